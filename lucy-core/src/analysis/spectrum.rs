use std::{f64::consts::TAU, sync::Arc};

use crate::{
    analysis::transform::{Complex64, FourierTransform, TransformKind},
    foundation::core::{Contour, Point},
    foundation::error::{LucyError, LucyResult},
};

/// One rotating vector of the epicycle chain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpectralComponent {
    /// Complex amplitude: radius `|c|` and phase at `t = 0`.
    #[serde(with = "complex_parts")]
    pub coefficient: Complex64,
    /// Signed angular velocity in radians per unit time (bin index wrapped into `[-N/2, N/2]`).
    pub frequency: i64,
}

impl SpectralComponent {
    /// Radius of this component's circle.
    pub fn magnitude(&self) -> f64 {
        self.coefficient.norm()
    }

    /// Position of this vector at time `t`: `c * exp(i * f * t)`.
    pub fn at(&self, t: f64) -> Complex64 {
        self.coefficient * Complex64::from_polar(1.0, self.frequency as f64 * t)
    }
}

/// Magnitude-sorted, truncated Fourier series of a contour.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spectrum {
    components: Vec<SpectralComponent>,
    sample_count: usize,
}

impl Spectrum {
    /// Wrap components that are already in draw order.
    pub fn from_components(components: Vec<SpectralComponent>, sample_count: usize) -> Self {
        Self {
            components,
            sample_count,
        }
    }

    /// Components in descending magnitude order.
    pub fn components(&self) -> &[SpectralComponent] {
        &self.components
    }

    /// Number of retained components (K).
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// `true` when nothing was retained.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of contour samples the transform was computed from (N).
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Tip of the full chain at time `t`. Order-independent.
    pub fn evaluate(&self, t: f64) -> Complex64 {
        self.components
            .iter()
            .fold(Complex64::new(0.0, 0.0), |acc, c| acc + c.at(t))
    }

    /// Running sums `s_0 = 0, s_{i+1} = s_i + c_i(t)`; `K + 1` entries, the last is the tip.
    ///
    /// `s_i` is the center of component `i`'s circle.
    pub fn partial_sums(&self, t: f64) -> Vec<Complex64> {
        let mut out = Vec::with_capacity(self.components.len() + 1);
        let mut acc = Complex64::new(0.0, 0.0);
        out.push(acc);
        for c in &self.components {
            acc += c.at(t);
            out.push(acc);
        }
        out
    }

    /// Evaluate the series at the `N` original sample instants `t = 2*pi*n/N`.
    ///
    /// With every component retained this reproduces the analyzed contour.
    pub fn reconstruct(&self) -> Contour {
        let n = self.sample_count;
        (0..n)
            .map(|j| {
                let z = self.evaluate(TAU * j as f64 / n as f64);
                Point::new(z.re, z.im)
            })
            .collect()
    }
}

/// Map DFT bin `k` of an `n`-point transform to its signed frequency.
pub fn signed_frequency(k: usize, n: usize) -> i64 {
    if k <= n / 2 {
        k as i64
    } else {
        k as i64 - n as i64
    }
}

/// Computes a truncated spectrum from a (normalized) contour.
#[derive(Clone)]
pub struct SpectrumAnalyzer {
    components: usize,
    kind: TransformKind,
    custom: Option<Arc<dyn FourierTransform>>,
}

impl std::fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("components", &self.components)
            .field("kind", &self.kind)
            .field("custom", &self.custom.as_ref().map(|t| t.name()))
            .finish()
    }
}

impl SpectrumAnalyzer {
    /// Keep up to `components` terms, picking the transform with `kind`.
    pub fn new(components: usize, kind: TransformKind) -> Self {
        Self {
            components,
            kind,
            custom: None,
        }
    }

    /// Keep up to `components` terms, always using `transform`.
    pub fn with_transform(components: usize, transform: Arc<dyn FourierTransform>) -> Self {
        Self {
            components,
            kind: TransformKind::Auto,
            custom: Some(transform),
        }
    }

    /// Configured component count (before clamping to `N`).
    pub fn components(&self) -> usize {
        self.components
    }

    /// Transform, frequency-map, rank and truncate.
    ///
    /// Ranking is a stable sort by descending magnitude, so equal magnitudes keep ascending
    /// bin order (the lower bin wins a tie). The result has `min(K, N)` components.
    #[tracing::instrument(skip_all, fields(n = contour.len(), k = self.components))]
    pub fn analyze(&self, contour: &Contour) -> LucyResult<Spectrum> {
        let n = contour.len();
        if n < 2 {
            return Err(LucyError::analysis(format!(
                "need at least 2 contour points for a transform, got {n}"
            )));
        }
        if self.components == 0 {
            return Err(LucyError::analysis("component count must be > 0"));
        }
        if !contour.is_finite() {
            return Err(LucyError::analysis("contour has non-finite coordinates"));
        }

        let transform: &dyn FourierTransform = match &self.custom {
            Some(t) => t.as_ref(),
            None => self.kind.strategy_for(n),
        };
        tracing::debug!(transform = transform.name(), "computing transform");

        let samples: Vec<Complex64> = contour
            .points()
            .iter()
            .map(|p| Complex64::new(p.x, p.y))
            .collect();
        let bins = transform.compute_transform(&samples);
        if bins.len() != n {
            return Err(LucyError::analysis(format!(
                "transform '{}' returned {} bins for {n} samples",
                transform.name(),
                bins.len()
            )));
        }

        let mut ranked: Vec<(usize, Complex64)> = bins.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.norm().total_cmp(&a.1.norm()));

        let k = self.components.min(n);
        let components = ranked
            .into_iter()
            .take(k)
            .map(|(bin, coefficient)| SpectralComponent {
                coefficient,
                frequency: signed_frequency(bin, n),
            })
            .collect();
        Ok(Spectrum::from_components(components, n))
    }
}

mod complex_parts {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Complex64;

    pub(super) fn serialize<S: Serializer>(c: &Complex64, s: S) -> Result<S::Ok, S::Error> {
        [c.re, c.im].serialize(s)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Complex64, D::Error> {
        let [re, im] = <[f64; 2]>::deserialize(d)?;
        Ok(Complex64::new(re, im))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/spectrum.rs"]
mod tests;
