use crate::foundation::error::{LucyError, LucyResult};

pub use kurbo::Point;

/// A 2-D sample. Alias of [`kurbo::Point`] so geometry flows straight into `kurbo` APIs.
pub type Point2D = Point;

/// Ordered sequence of samples along a planar curve.
///
/// The order is the parametrization of the curve (by sample index, not arc length), so it is
/// never re-sorted. A contour may be closed explicitly (last point duplicates the first) or
/// implicitly (the transform treats the sequence as periodic).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    /// Wrap an ordered point list.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a contour from `(x, y)` tuples.
    pub fn from_xy(xy: &[(f64, f64)]) -> Self {
        xy.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Borrow the samples in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Take ownership of the samples.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the contour has no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last samples coincide within `eps`.
    pub fn is_closed(&self, eps: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() > 1 => a.distance(*b) <= eps,
            _ => false,
        }
    }

    /// Arithmetic mean of all samples, or `None` for an empty contour.
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Largest absolute coordinate over both axes (L-infinity extent about the origin).
    pub fn max_abs_coord(&self) -> f64 {
        self.points
            .iter()
            .fold(0.0_f64, |m, p| m.max(p.x.abs()).max(p.y.abs()))
    }

    /// `true` when every coordinate is finite (no NaN or infinity).
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    pub(crate) fn push(&mut self, p: Point) {
        self.points.push(p);
    }
}

impl From<Vec<Point>> for Contour {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for Contour {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Checked constructor: both sides nonzero and no larger than `u16::MAX`.
    pub fn new(width: u32, height: u32) -> LucyResult<Self> {
        if width == 0 || height == 0 {
            return Err(LucyError::config("canvas width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(LucyError::config("canvas width/height must fit in u16"));
        }
        Ok(Self { width, height })
    }

    /// Pixel center of the surface.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (255 is opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
