use std::{f64::consts::TAU, sync::Arc};

use crate::{
    analysis::spectrum::Spectrum,
    analysis::transform::Complex64,
    animation::trace::TracedPath,
    foundation::config::{EpicycleConfig, ScreenLayout, TICKS_PER_CLOCK},
    foundation::core::Point,
    render::geometry::{Circle, ClockFace, FrameGeometry, Segment},
};

/// Lifecycle of an [`EpicycleAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    /// No spectrum bound; ticks do nothing.
    Idle,
    /// Spectrum bound; each tick advances time.
    Running,
}

/// Why a tick did not advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoopReason {
    /// Nothing is bound.
    Idle,
    /// The bound spectrum has fewer components than the animator expects.
    ShortSpectrum {
        /// Components the spectrum holds.
        have: usize,
        /// Components a tick needs.
        want: usize,
    },
}

/// Result of [`EpicycleAnimator::advance`].
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Time moved forward; the new frame's geometry.
    Advanced(FrameGeometry),
    /// State was left untouched.
    Noop(NoopReason),
}

impl TickOutcome {
    /// `true` when the tick left the animator untouched.
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop(_))
    }

    /// Frame geometry of an advanced tick.
    pub fn geometry(&self) -> Option<&FrameGeometry> {
        match self {
            Self::Advanced(g) => Some(g),
            Self::Noop(_) => None,
        }
    }
}

/// Owns the animation clock and traced path for one bound spectrum.
///
/// The animator never draws; it hands out [`FrameGeometry`] for a renderer.
#[derive(Clone, Debug)]
pub struct EpicycleAnimator {
    components: usize,
    speed: f64,
    layout: ScreenLayout,
    spectrum: Option<Arc<Spectrum>>,
    elapsed: f64,
    trace: TracedPath,
}

impl EpicycleAnimator {
    /// Idle animator configured from `cfg`.
    pub fn new(cfg: &EpicycleConfig) -> Self {
        Self {
            components: cfg.components,
            speed: cfg.speed,
            layout: cfg.layout.clone(),
            spectrum: None,
            elapsed: 0.0,
            trace: TracedPath::with_capacity(cfg.trace_capacity),
        }
    }

    /// [`AnimatorState::Running`] while a spectrum is bound.
    pub fn state(&self) -> AnimatorState {
        if self.spectrum.is_some() {
            AnimatorState::Running
        } else {
            AnimatorState::Idle
        }
    }

    /// Animation time, already scaled by speed.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Tip history in screen space.
    pub fn trace(&self) -> &TracedPath {
        &self.trace
    }

    /// The bound spectrum, if any.
    pub fn spectrum(&self) -> Option<&Arc<Spectrum>> {
        self.spectrum.as_ref()
    }

    /// Bind a spectrum and start from time zero.
    ///
    /// An empty spectrum is refused: the animator stays (or becomes) idle and `false` is
    /// returned.
    pub fn bind(&mut self, spectrum: Arc<Spectrum>) -> bool {
        self.elapsed = 0.0;
        self.trace.clear();
        if spectrum.is_empty() {
            self.spectrum = None;
            return false;
        }
        self.spectrum = Some(spectrum);
        true
    }

    /// Drop the spectrum and all animation state.
    pub fn teardown(&mut self) {
        self.spectrum = None;
        self.elapsed = 0.0;
        self.trace.clear();
    }

    /// Back to time zero with an empty trace; stays bound.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.trace.clear();
    }

    /// Components a tick uses: the configured K, capped by the transform's sample count.
    fn expected_components(&self, spectrum: &Spectrum) -> usize {
        match spectrum.sample_count() {
            0 => self.components,
            n => self.components.min(n),
        }
    }

    /// Advance time by `dt * speed`, trace the new tip and lay out the frame.
    pub fn advance(&mut self, dt: f64) -> TickOutcome {
        let Some(spectrum) = self.spectrum.clone() else {
            return TickOutcome::Noop(NoopReason::Idle);
        };
        let want = self.expected_components(&spectrum);
        if spectrum.len() < want || want == 0 {
            return TickOutcome::Noop(NoopReason::ShortSpectrum {
                have: spectrum.len(),
                want,
            });
        }

        self.elapsed += dt * self.speed;
        let sums = self.partial_sums(&spectrum, want);
        let tip = sums[want];
        self.trace.push(self.layout.to_screen(tip.re, tip.im));

        TickOutcome::Advanced(self.layout_frame(&spectrum, want, &sums))
    }

    /// Geometry for the current state without advancing. Empty when idle.
    pub fn frame(&self) -> FrameGeometry {
        let Some(spectrum) = self.spectrum.as_ref() else {
            return FrameGeometry::default();
        };
        let want = self.expected_components(spectrum);
        if spectrum.len() < want || want == 0 {
            return FrameGeometry::default();
        }
        let sums = self.partial_sums(spectrum, want);
        self.layout_frame(spectrum, want, &sums)
    }

    /// `s_0 = 0, s_{i+1} = s_i + c_i * exp(i * f_i * t)` over the first `k` components.
    fn partial_sums(&self, spectrum: &Spectrum, k: usize) -> Vec<Complex64> {
        let t = self.elapsed;
        let mut sums = Vec::with_capacity(k + 1);
        let mut acc = Complex64::new(0.0, 0.0);
        sums.push(acc);
        for c in &spectrum.components()[..k] {
            acc += c.at(t);
            sums.push(acc);
        }
        sums
    }

    fn layout_frame(&self, spectrum: &Spectrum, k: usize, sums: &[Complex64]) -> FrameGeometry {
        let layout = &self.layout;
        let comps = &spectrum.components()[..k];

        let epicycles = comps
            .iter()
            .zip(sums)
            .map(|(c, center)| Circle {
                center: layout.to_screen(center.re, center.im),
                radius: c.magnitude() * layout.path_scale,
            })
            .collect();

        let clocks = comps
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let ring_angle = TAU * i as f64 / k as f64;
                let center = polar(layout.clock_center, layout.clock_ring_radius, ring_angle);
                let radius = c.magnitude() * layout.clock_scale;
                self.clock_face(center, radius, c.frequency)
            })
            .collect();

        let tip = sums[k];
        FrameGeometry {
            elapsed: self.elapsed,
            trace: self.trace.iter().collect(),
            tip: Some(Circle {
                center: layout.to_screen(tip.re, tip.im),
                radius: layout.tip_radius,
            }),
            epicycles,
            clocks,
        }
    }

    fn clock_face(&self, center: Point, radius: f64, frequency: i64) -> ClockFace {
        let inner = radius * self.layout.tick_inner_ratio;
        let ticks = (0..TICKS_PER_CLOCK)
            .map(|j| {
                let a = TAU * j as f64 / TICKS_PER_CLOCK as f64;
                Segment {
                    from: polar(center, radius, a),
                    to: polar(center, inner, a),
                }
            })
            .collect();
        let hand_angle = frequency as f64 * self.elapsed;
        ClockFace {
            face: Circle { center, radius },
            ticks,
            hand: Segment {
                from: center,
                to: polar(center, radius, hand_angle),
            },
            frequency,
        }
    }
}

/// `center + r * (cos a, sin a)` in screen space.
fn polar(center: Point, r: f64, a: f64) -> Point {
    Point::new(center.x + r * a.cos(), center.y + r * a.sin())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/epicycle.rs"]
mod tests;
