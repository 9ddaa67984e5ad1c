use crate::foundation::core::{Contour, Point};

/// Center a contour on its mean and scale it uniformly into `[-1, 1]^2`.
///
/// The divisor is the largest absolute coordinate over both axes (L-infinity), so the
/// aspect ratio is kept and at least one coordinate lands on +-1. Empty contours and
/// contours whose centered extent is exactly zero are returned unchanged.
pub fn normalize(contour: &Contour) -> Contour {
    let Some(mean) = contour.centroid() else {
        return contour.clone();
    };
    let centered: Contour = contour
        .points()
        .iter()
        .map(|p| Point::new(p.x - mean.x, p.y - mean.y))
        .collect();

    let max = centered.max_abs_coord();
    if max == 0.0 {
        return contour.clone();
    }
    centered
        .points()
        .iter()
        .map(|p| Point::new(p.x / max, p.y / max))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/normalize.rs"]
mod tests;
