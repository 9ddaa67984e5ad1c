use std::f64::consts::TAU;

use rayon::prelude::*;
use rustfft::FftPlanner;

pub use rustfft::num_complex::Complex64;

/// Forward DFT strategy used by the analyzer.
///
/// Implementations return `X_k = (1/N) * sum_n z_n * exp(-2*pi*i*k*n/N)` for `k` in `0..N`,
/// i.e. the unnormalized forward transform divided by the sample count.
pub trait FourierTransform: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Compute all `N` bins of `samples`.
    fn compute_transform(&self, samples: &[Complex64]) -> Vec<Complex64>;
}

/// Direct O(N^2) summation. Bins are computed in parallel.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectDft;

impl FourierTransform for DirectDft {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn compute_transform(&self, samples: &[Complex64]) -> Vec<Complex64> {
        let n = samples.len();
        if n == 0 {
            return Vec::new();
        }
        let inv_n = 1.0 / n as f64;
        (0..n)
            .into_par_iter()
            .map(|k| {
                let sum = samples
                    .iter()
                    .enumerate()
                    .fold(Complex64::new(0.0, 0.0), |acc, (j, z)| {
                        // Reduce k*j mod N first so the angle stays small for large N.
                        let phase = ((k * j) % n) as f64 * inv_n;
                        acc + z * Complex64::from_polar(1.0, -TAU * phase)
                    });
                sum * inv_n
            })
            .collect()
    }
}

/// O(N log N) transform backed by `rustfft`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastFft;

impl FourierTransform for FastFft {
    fn name(&self) -> &'static str {
        "fft"
    }

    fn compute_transform(&self, samples: &[Complex64]) -> Vec<Complex64> {
        let n = samples.len();
        if n == 0 {
            return Vec::new();
        }
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        let mut buf = samples.to_vec();
        fft.process(&mut buf);
        let inv_n = 1.0 / n as f64;
        for c in &mut buf {
            *c *= inv_n;
        }
        buf
    }
}

/// Transform selection as it appears in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    /// [`DirectDft`] up to [`TransformKind::AUTO_DIRECT_MAX`] samples, [`FastFft`] above.
    #[default]
    Auto,
    /// Always [`DirectDft`].
    Direct,
    /// Always [`FastFft`].
    Fast,
}

impl TransformKind {
    /// Largest sample count for which `Auto` keeps the direct sum.
    pub const AUTO_DIRECT_MAX: usize = 256;

    /// Concrete strategy for `n` samples.
    pub fn strategy_for(self, n: usize) -> &'static dyn FourierTransform {
        match self {
            Self::Direct => &DirectDft,
            Self::Fast => &FastFft,
            Self::Auto if n <= Self::AUTO_DIRECT_MAX => &DirectDft,
            Self::Auto => &FastFft,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/transform.rs"]
mod tests;
