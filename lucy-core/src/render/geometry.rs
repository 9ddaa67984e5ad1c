use crate::foundation::core::Point;

/// Straight line between two screen points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
}

/// Circle in screen space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
}

/// One component's clock: a filled face with tick marks and a single hand.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClockFace {
    /// Face outline/fill.
    pub face: Circle,
    /// Tick marks from the inner ratio out to the rim.
    pub ticks: Vec<Segment>,
    /// Hand from the face center to the rim at angle `frequency * t`.
    pub hand: Segment,
    /// Frequency of the component this clock shows.
    pub frequency: i64,
}

/// Everything a renderer needs for one frame, already in pixels.
///
/// Carries no colors; a [`RenderStyle`](crate::RenderStyle) decides how each role is painted.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameGeometry {
    /// Animation time the geometry was laid out at.
    pub elapsed: f64,
    /// Traced tip history, oldest first.
    pub trace: Vec<Point>,
    /// Marker at the current tip, if there is one.
    pub tip: Option<Circle>,
    /// Nested epicycle circles, centered on the running partial sums.
    pub epicycles: Vec<Circle>,
    /// Per-component clocks on the ring, in spectrum order.
    pub clocks: Vec<ClockFace>,
}

impl FrameGeometry {
    /// `true` when there is nothing to draw (idle animator).
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
            && self.tip.is_none()
            && self.epicycles.is_empty()
            && self.clocks.is_empty()
    }
}
