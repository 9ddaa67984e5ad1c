use crate::foundation::core::Rgba8;

/// Colors and stroke widths for each geometry role, plus layer toggles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderStyle {
    /// Frame clear color.
    pub background: Rgba8,
    /// Traced path stroke.
    pub trace: Rgba8,
    /// Traced path stroke width.
    pub trace_width: f64,
    /// Tip marker fill.
    pub tip: Rgba8,
    /// Epicycle circle outline.
    pub epicycle: Rgba8,
    /// Epicycle outline width.
    pub epicycle_width: f64,
    /// Clock face fill.
    pub clock_face: Rgba8,
    /// Clock face rim.
    pub clock_outline: Rgba8,
    /// Clock face rim width.
    pub clock_outline_width: f64,
    /// Tick mark stroke.
    pub tick: Rgba8,
    /// Clock hand stroke.
    pub hand: Rgba8,
    /// Width of ticks and hands.
    pub line_width: f64,
    /// Draw the nested epicycle circles.
    pub show_epicycles: bool,
    /// Draw the clock ring.
    pub show_clocks: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(245, 240, 230),
            trace: Rgba8::rgb(0, 0, 0),
            trace_width: 1.0,
            tip: Rgba8::rgb(255, 0, 0),
            epicycle: Rgba8::rgba(100, 100, 200, 80),
            epicycle_width: 1.0,
            clock_face: Rgba8::rgb(157, 124, 79),
            clock_outline: Rgba8::rgb(50, 50, 50),
            clock_outline_width: 1.5,
            tick: Rgba8::rgb(80, 80, 80),
            hand: Rgba8::rgb(255, 0, 0),
            line_width: 1.0,
            show_epicycles: true,
            show_clocks: true,
        }
    }
}
