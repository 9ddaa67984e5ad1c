//! Contour sources: path data, SVG documents and raster images, plus the fallback chain.

pub(crate) mod path;
pub(crate) mod raster;
pub(crate) mod svg;

use std::{fmt, path::PathBuf, sync::Arc};

use crate::{
    foundation::config::SourceOptions,
    foundation::core::Contour,
    foundation::error::{LucyError, LucyResult},
};

/// Anything that can produce a contour for the analyzer.
pub trait ContourSource {
    /// Produce the contour, or a [`LucyError::Source`] the caller may recover from.
    fn extract(&self, opts: &SourceOptions) -> LucyResult<Contour>;
}

/// One concrete contour input.
#[derive(Clone)]
pub enum ContourInput {
    /// Inline path command string (`M`, `L`, `C`, `Z` and lower-case variants).
    PathData(String),
    /// SVG document on disk; the first path element is used.
    SvgFile(PathBuf),
    /// SVG document already in memory.
    SvgBytes(Arc<[u8]>),
    /// Raster image on disk; the largest dark silhouette is traced.
    ImageFile(PathBuf),
    /// Encoded raster image already in memory.
    ImageBytes(Arc<[u8]>),
}

impl ContourInput {
    /// Vector inputs are tried before raster ones by [`SourceChain`].
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            Self::PathData(_) | Self::SvgFile(_) | Self::SvgBytes(_)
        )
    }
}

impl fmt::Debug for ContourInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PathData(d) => write!(f, "PathData({} bytes)", d.len()),
            Self::SvgFile(p) => write!(f, "SvgFile({})", p.display()),
            Self::SvgBytes(b) => write!(f, "SvgBytes({} bytes)", b.len()),
            Self::ImageFile(p) => write!(f, "ImageFile({})", p.display()),
            Self::ImageBytes(b) => write!(f, "ImageBytes({} bytes)", b.len()),
        }
    }
}

impl ContourSource for ContourInput {
    fn extract(&self, opts: &SourceOptions) -> LucyResult<Contour> {
        match self {
            Self::PathData(d) => path::contour_from_path_data(d, opts),
            Self::SvgFile(p) => svg::contour_from_svg_path(p, opts),
            Self::SvgBytes(b) => svg::contour_from_svg_bytes(b, opts),
            Self::ImageFile(p) => raster::contour_from_image_path(p, opts.raster_threshold),
            Self::ImageBytes(b) => raster::contour_from_image_bytes(b, opts.raster_threshold),
        }
    }
}

/// Ordered list of inputs tried until one yields a contour.
///
/// Vector inputs always go first, raster inputs after them; within each group the
/// insertion order is kept. Only [`LucyError::Source`] failures fall through to the next
/// input; any other error is returned immediately.
#[derive(Clone, Debug, Default)]
pub struct SourceChain {
    inputs: Vec<ContourInput>,
}

impl SourceChain {
    /// Build a chain from inputs in any order.
    pub fn new(inputs: impl IntoIterator<Item = ContourInput>) -> Self {
        let mut chain = Self::default();
        for input in inputs {
            chain.push(input);
        }
        chain
    }

    /// Add an input, keeping vector inputs ahead of raster ones.
    pub fn push(&mut self, input: ContourInput) {
        if input.is_vector() {
            let at = self
                .inputs
                .iter()
                .position(|i| !i.is_vector())
                .unwrap_or(self.inputs.len());
            self.inputs.insert(at, input);
        } else {
            self.inputs.push(input);
        }
    }

    /// Inputs in the order they will be tried.
    pub fn inputs(&self) -> &[ContourInput] {
        &self.inputs
    }

    /// `true` when no input has been configured.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl ContourSource for SourceChain {
    fn extract(&self, opts: &SourceOptions) -> LucyResult<Contour> {
        let mut last_err = LucyError::source("no contour source configured");
        for input in &self.inputs {
            match input.extract(opts) {
                Ok(contour) => {
                    tracing::debug!(?input, points = contour.len(), "contour source succeeded");
                    return Ok(contour);
                }
                Err(err) if err.is_source() => {
                    tracing::warn!(?input, %err, "contour source failed, trying next");
                    last_err = err;
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_err)
    }
}

impl ContourSource for Contour {
    fn extract(&self, _opts: &SourceOptions) -> LucyResult<Contour> {
        Ok(self.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/chain.rs"]
mod tests;
