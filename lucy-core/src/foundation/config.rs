use std::path::Path;

use anyhow::Context;

use crate::{
    analysis::transform::TransformKind,
    foundation::core::{Canvas, Point},
    foundation::error::{LucyError, LucyResult},
};

/// Tick marks drawn on every clock face.
pub const TICKS_PER_CLOCK: usize = 12;

/// Tunables for the whole contour -> spectrum -> animation pipeline.
///
/// Every field has a default, so a config file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EpicycleConfig {
    /// Number of spectral components kept (K). Clamped to the sample count at analysis time.
    pub components: usize,
    /// Multiplier applied to `dt` on every tick.
    pub speed: f64,
    /// Time step the host feeds into each tick when it runs at a fixed frame rate.
    pub frame_dt: f64,
    /// Maximum number of tip samples kept in the traced path.
    pub trace_capacity: usize,
    /// Which DFT implementation the analyzer uses.
    pub transform: TransformKind,
    /// Contour source options.
    pub source: SourceOptions,
    /// Screen-space placement of the drawing.
    pub layout: ScreenLayout,
}

impl Default for EpicycleConfig {
    fn default() -> Self {
        Self {
            components: 100,
            speed: 2.0,
            frame_dt: 0.02,
            trace_capacity: 2000,
            transform: TransformKind::Auto,
            source: SourceOptions::default(),
            layout: ScreenLayout::default(),
        }
    }
}

impl EpicycleConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> LucyResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| LucyError::config(format!("parse config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: &Path) -> LucyResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> LucyResult<()> {
        if self.components == 0 {
            return Err(LucyError::config("components must be > 0"));
        }
        if !self.speed.is_finite() {
            return Err(LucyError::config("speed must be finite"));
        }
        if !self.frame_dt.is_finite() || self.frame_dt < 0.0 {
            return Err(LucyError::config("frame_dt must be finite and >= 0"));
        }
        if self.trace_capacity == 0 {
            return Err(LucyError::config("trace_capacity must be > 0"));
        }
        self.source.validate()?;
        self.layout.validate()
    }
}

/// How vector and raster sources turn into contours.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceOptions {
    /// Line segments each cubic curve is flattened into (uniform in `t`).
    pub bezier_samples: usize,
    /// Whether a close-path command appends a copy of the subpath start.
    pub close_duplicates_start: bool,
    /// Gray level below which a raster pixel counts as foreground.
    pub raster_threshold: u8,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            bezier_samples: 30,
            close_duplicates_start: true,
            raster_threshold: 128,
        }
    }
}

impl SourceOptions {
    /// Fewest segments a cubic may be flattened into.
    pub const MIN_BEZIER_SAMPLES: usize = 20;

    fn validate(&self) -> LucyResult<()> {
        if self.bezier_samples < Self::MIN_BEZIER_SAMPLES {
            return Err(LucyError::config(format!(
                "bezier_samples must be >= {}",
                Self::MIN_BEZIER_SAMPLES
            )));
        }
        if self.raster_threshold == 0 {
            return Err(LucyError::config(
                "raster_threshold must be > 0 (no pixel could be foreground)",
            ));
        }
        Ok(())
    }
}

/// Mapping from normalized spectrum space to pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenLayout {
    /// Output surface.
    pub canvas: Canvas,
    /// Pixel position of the complex origin for the traced curve.
    pub origin: Point,
    /// Pixels per normalized unit for the traced curve and epicycle circles.
    pub path_scale: f64,
    /// Center of the ring the clock faces sit on.
    pub clock_center: Point,
    /// Radius of that ring in pixels.
    pub clock_ring_radius: f64,
    /// Pixels per unit of coefficient magnitude for clock face radii.
    pub clock_scale: f64,
    /// Inner end of a tick mark as a fraction of the face radius.
    pub tick_inner_ratio: f64,
    /// Radius of the tip marker in pixels.
    pub tip_radius: f64,
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::with_draw_scale(Self::DEFAULT_DRAW_SCALE)
    }
}

impl ScreenLayout {
    /// Overall drawing scale of the default 900x700 layout.
    pub const DEFAULT_DRAW_SCALE: f64 = 0.45;

    /// Default layout with every length derived from one `draw_scale`:
    /// curve `200 * s`, clock ring `300 * s`, clock faces `50 * s` pixels per unit.
    pub fn with_draw_scale(draw_scale: f64) -> Self {
        Self {
            canvas: Canvas {
                width: 900,
                height: 700,
            },
            origin: Point::new(450.0, 350.0),
            path_scale: 200.0 * draw_scale,
            clock_center: Point::new(450.0, 350.0),
            clock_ring_radius: 300.0 * draw_scale,
            clock_scale: 50.0 * draw_scale,
            tick_inner_ratio: 0.85,
            tip_radius: 4.0,
        }
    }

    fn validate(&self) -> LucyResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        for (name, v) in [
            ("path_scale", self.path_scale),
            ("clock_ring_radius", self.clock_ring_radius),
            ("clock_scale", self.clock_scale),
            ("tip_radius", self.tip_radius),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LucyError::config(format!("{name} must be finite and >= 0")));
            }
        }
        if !(0.0..=1.0).contains(&self.tick_inner_ratio) {
            return Err(LucyError::config("tick_inner_ratio must be in [0, 1]"));
        }
        Ok(())
    }

    /// Map a point of the complex plane (Y-up) to pixels (Y-down).
    pub fn to_screen(&self, re: f64, im: f64) -> Point {
        Point::new(
            self.origin.x + re * self.path_scale,
            self.origin.y - im * self.path_scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/config.rs"]
mod tests;
