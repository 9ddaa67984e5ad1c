//! Lucy draws closed outlines with rotating Fourier epicycles.
//!
//! A contour is read from a vector path, an SVG document or a raster silhouette, turned into
//! a truncated Fourier series, and played back as a chain of circles whose tip retraces the
//! outline. Each component is also shown on its own clock face with a single rotating hand.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: [`ContourSource`] `-> Contour` (vector first, raster as fallback via [`SourceChain`])
//! 2. **Normalize**: [`normalize`] centers the points and scales them into `[-1, 1]^2`
//! 3. **Analyze**: [`SpectrumAnalyzer`] `-> Spectrum` (DFT, signed frequencies, top-K by magnitude)
//! 4. **Animate**: [`EpicycleAnimator::advance`] `-> FrameGeometry` (partial sums, trace, clocks)
//! 5. **Render**: [`draw_frame`] feeds the geometry to a [`RenderAdapter`] such as [`CpuCanvas`]
//!
//! Steps 1 to 3 run once per [`EpicycleSession`] and are cached; steps 4 and 5 run every frame.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No drawing in the animator**: it only produces geometry in pixel space.
//! - **Straight RGBA8 colors** in [`RenderStyle`]; the CPU canvas reads back premultiplied pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod analysis;
mod animation;
mod foundation;
mod render;
mod session;
mod source;

pub use analysis::normalize::normalize;
pub use analysis::spectrum::{SpectralComponent, Spectrum, SpectrumAnalyzer, signed_frequency};
pub use analysis::transform::{Complex64, DirectDft, FastFft, FourierTransform, TransformKind};
pub use animation::epicycle::{AnimatorState, EpicycleAnimator, NoopReason, TickOutcome};
pub use animation::trace::TracedPath;
pub use foundation::config::{EpicycleConfig, ScreenLayout, SourceOptions, TICKS_PER_CLOCK};
pub use foundation::core::{Canvas, Contour, Point, Point2D, Rgba8};
pub use foundation::error::{LucyError, LucyResult};
pub use render::adapter::{CirclePaint, RenderAdapter, draw_frame};
pub use render::cpu::{CpuCanvas, FrameRGBA};
pub use render::geometry::{Circle, ClockFace, FrameGeometry, Segment};
pub use render::style::RenderStyle;
pub use session::{Analysis, AnalysisStatus, EpicycleSession, SharedSource, run_analysis};
pub use source::path::{
    ParseStop, PathParse, StopReason, contour_from_path_data, parse_path_data,
    parse_path_elements, sample_path_elements,
};
pub use source::raster::{
    binarize, contour_from_gray, contour_from_image_bytes, contour_from_image_path,
};
pub use source::svg::{contour_from_svg_bytes, contour_from_svg_path};
pub use source::{ContourInput, ContourSource, SourceChain};
