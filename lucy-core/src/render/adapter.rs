use crate::{
    foundation::core::{Point, Rgba8},
    foundation::error::LucyResult,
    render::geometry::{Circle, FrameGeometry, Segment},
    render::style::RenderStyle,
};

/// Fill and/or outline of a circle primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CirclePaint {
    /// Interior color; `None` leaves the circle unfilled.
    pub fill: Option<Rgba8>,
    /// Rim color and stroke width; `None` draws no rim.
    pub outline: Option<(Rgba8, f64)>,
}

/// A 2-D canvas the frame geometry is drawn onto.
pub trait RenderAdapter {
    /// Start a frame cleared to `background`.
    fn begin_frame(&mut self, background: Rgba8) -> LucyResult<()>;

    /// Stroke an open polyline through `points`.
    fn polyline(&mut self, points: &[Point], color: Rgba8, width: f64) -> LucyResult<()>;

    /// Fill and/or outline a circle.
    fn circle(&mut self, circle: &Circle, paint: CirclePaint) -> LucyResult<()>;

    /// Stroke a straight segment.
    fn segment(&mut self, segment: &Segment, color: Rgba8, width: f64) -> LucyResult<()>;

    /// Finish the frame; its pixels become available to the adapter's owner.
    fn end_frame(&mut self) -> LucyResult<()>;
}

/// Draw one frame in painter's order: epicycles, trace, tip, then the clock ring.
///
/// An empty geometry (idle animator) still produces a cleared frame.
pub fn draw_frame<A: RenderAdapter + ?Sized>(
    adapter: &mut A,
    geometry: &FrameGeometry,
    style: &RenderStyle,
) -> LucyResult<()> {
    adapter.begin_frame(style.background)?;

    if style.show_epicycles {
        let paint = CirclePaint {
            fill: None,
            outline: Some((style.epicycle, style.epicycle_width)),
        };
        for c in &geometry.epicycles {
            adapter.circle(c, paint)?;
        }
    }

    if geometry.trace.len() >= 2 {
        adapter.polyline(&geometry.trace, style.trace, style.trace_width)?;
    }

    if let Some(tip) = &geometry.tip {
        adapter.circle(
            tip,
            CirclePaint {
                fill: Some(style.tip),
                outline: None,
            },
        )?;
    }

    if style.show_clocks {
        let face = CirclePaint {
            fill: Some(style.clock_face),
            outline: Some((style.clock_outline, style.clock_outline_width)),
        };
        for clock in &geometry.clocks {
            adapter.circle(&clock.face, face)?;
            for tick in &clock.ticks {
                adapter.segment(tick, style.tick, style.line_width)?;
            }
            adapter.segment(&clock.hand, style.hand, style.line_width)?;
        }
    }

    adapter.end_frame()
}

#[cfg(test)]
#[path = "../../tests/unit/render/adapter.rs"]
mod tests;
