//! Screen lifecycle around the pipeline: lazy analysis, caching, activation and ticking.

use std::sync::{Arc, OnceLock};

use crate::{
    analysis::normalize::normalize,
    analysis::spectrum::{Spectrum, SpectrumAnalyzer},
    animation::epicycle::{AnimatorState, EpicycleAnimator, TickOutcome},
    foundation::config::EpicycleConfig,
    foundation::core::Contour,
    foundation::error::{LucyError, LucyResult},
    render::adapter::{RenderAdapter, draw_frame},
    render::geometry::FrameGeometry,
    render::style::RenderStyle,
    source::ContourSource,
};

/// Contour source usable from the analysis worker thread.
pub type SharedSource = Arc<dyn ContourSource + Send + Sync>;

/// Extracted contour and its spectrum, computed together.
#[derive(Clone, Debug)]
pub struct Analysis {
    /// Contour as the source produced it (before normalization).
    pub contour: Arc<Contour>,
    /// Truncated spectrum of the normalized contour.
    pub spectrum: Arc<Spectrum>,
}

type Handoff = Arc<OnceLock<LucyResult<Analysis>>>;

const WORKER_PANICKED: &str = "analysis worker thread panicked";

/// State of a background analysis, as seen by [`EpicycleSession::poll_analysis`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// Nothing spawned and nothing cached.
    NotStarted,
    /// The worker has not published yet.
    Pending,
    /// A spectrum is cached.
    Ready,
    /// The worker published an error; the message is kept for display.
    Failed(String),
}

struct PendingAnalysis {
    slot: Handoff,
    worker: Option<std::thread::JoinHandle<()>>,
}

/// Owns one source, its cached analysis and the animator that plays it back.
///
/// Analysis runs at most once per session and is cached until [`invalidate`] is called.
/// Entering the screen never fails: when every source fails the animator simply stays
/// idle and frames draw only the background.
///
/// [`invalidate`]: EpicycleSession::invalidate
pub struct EpicycleSession {
    source: SharedSource,
    config: EpicycleConfig,
    analyzer: SpectrumAnalyzer,
    analysis: Option<Analysis>,
    last_error: Option<String>,
    pending: Option<PendingAnalysis>,
    animator: EpicycleAnimator,
    active: bool,
}

impl std::fmt::Debug for EpicycleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpicycleSession")
            .field("config", &self.config)
            .field("analyzer", &self.analyzer)
            .field("cached", &self.analysis.is_some())
            .field("pending", &self.pending.is_some())
            .field("state", &self.animator.state())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl EpicycleSession {
    /// Validate `config` and set up an inactive session. No I/O happens here.
    pub fn new(source: SharedSource, config: EpicycleConfig) -> LucyResult<Self> {
        config.validate()?;
        let analyzer = SpectrumAnalyzer::new(config.components, config.transform);
        Ok(Self::with_analyzer(source, config, analyzer))
    }

    /// Like [`new`](Self::new) but with a caller-provided analyzer.
    pub fn with_analyzer(
        source: SharedSource,
        config: EpicycleConfig,
        analyzer: SpectrumAnalyzer,
    ) -> Self {
        let animator = EpicycleAnimator::new(&config);
        Self {
            source,
            config,
            analyzer,
            analysis: None,
            last_error: None,
            pending: None,
            animator,
            active: false,
        }
    }

    /// Validated configuration.
    pub fn config(&self) -> &EpicycleConfig {
        &self.config
    }

    /// Animator driven by this session.
    pub fn animator(&self) -> &EpicycleAnimator {
        &self.animator
    }

    /// Current animator state.
    pub fn state(&self) -> AnimatorState {
        self.animator.state()
    }

    /// `true` between [`activate`](Self::activate) and [`deactivate`](Self::deactivate).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cached contour, if analysis already ran.
    pub fn contour(&self) -> Option<&Arc<Contour>> {
        self.analysis.as_ref().map(|a| &a.contour)
    }

    /// Cached spectrum, if analysis already ran.
    pub fn spectrum(&self) -> Option<&Arc<Spectrum>> {
        self.analysis.as_ref().map(|a| &a.spectrum)
    }

    /// Message of the most recent failed analysis.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Run extraction and analysis once; later calls return the cached spectrum.
    pub fn ensure_spectrum(&mut self) -> LucyResult<Arc<Spectrum>> {
        if let Some(a) = &self.analysis {
            return Ok(Arc::clone(&a.spectrum));
        }
        match run_analysis(self.source.as_ref(), &self.config, &self.analyzer) {
            Ok(a) => {
                let spectrum = Arc::clone(&a.spectrum);
                self.last_error = None;
                self.analysis = Some(a);
                Ok(spectrum)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Drop the cached analysis so the next activation recomputes it.
    ///
    /// A pending background analysis is abandoned and the animator goes idle.
    pub fn invalidate(&mut self) {
        self.analysis = None;
        self.last_error = None;
        self.pending = None;
        self.animator.teardown();
    }

    /// Enter the screen: analyze if needed and start the animation.
    ///
    /// Failures are logged and leave the animator idle. While a background analysis is
    /// pending nothing blocks; the spectrum is bound once [`poll_analysis`] sees it.
    ///
    /// [`poll_analysis`]: Self::poll_analysis
    pub fn activate(&mut self) -> AnimatorState {
        self.active = true;
        if self.pending.is_some() {
            self.poll_analysis();
            return self.animator.state();
        }
        match self.ensure_spectrum() {
            Ok(spectrum) => {
                if !self.animator.bind(spectrum) {
                    tracing::warn!("spectrum is empty, animator stays idle");
                }
            }
            Err(err) => {
                tracing::warn!(%err, "no spectrum available, animator stays idle");
            }
        }
        self.animator.state()
    }

    /// Leave the screen: animation state is discarded, the cached analysis is kept.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.animator.teardown();
    }

    /// Restart the animation from time zero.
    pub fn reset(&mut self) {
        self.animator.reset();
    }

    /// Start the analysis on a worker thread and return immediately.
    ///
    /// The worker publishes into a write-once slot. Does nothing if a result is already
    /// cached or a worker is already running.
    pub fn spawn_analysis(&mut self) -> LucyResult<()> {
        if self.analysis.is_some() || self.pending.is_some() {
            return Ok(());
        }
        let slot: Handoff = Arc::new(OnceLock::new());
        let out = Arc::clone(&slot);
        let source = Arc::clone(&self.source);
        let config = self.config.clone();
        let analyzer = self.analyzer.clone();
        let worker = std::thread::Builder::new()
            .name("lucy-analysis".to_string())
            .spawn(move || {
                let _ = out.set(run_analysis(source.as_ref(), &config, &analyzer));
            })
            .map_err(|e| LucyError::analysis(format!("spawn analysis worker: {e}")))?;
        self.pending = Some(PendingAnalysis {
            slot,
            worker: Some(worker),
        });
        Ok(())
    }

    /// Check the background analysis without blocking.
    ///
    /// A finished result is moved into the cache, and bound to the animator when the
    /// session is active. A worker that died without publishing is reported as failed
    /// and cleared, so [`spawn_analysis`](Self::spawn_analysis) can try again.
    pub fn poll_analysis(&mut self) -> AnalysisStatus {
        let Some(pending) = &self.pending else {
            return self.settled_status();
        };
        // Read before the slot: a worker that finished has already published, if it ever will.
        let finished = pending.worker.as_ref().is_none_or(|w| w.is_finished());
        let Some(result) = pending.slot.get() else {
            if !finished {
                return AnalysisStatus::Pending;
            }
            return AnalysisStatus::Failed(self.worker_died());
        };
        let result = result.as_ref().map(Analysis::clone).map_err(|e| e.to_string());
        self.pending = None;

        match result {
            Ok(analysis) => {
                let spectrum = Arc::clone(&analysis.spectrum);
                self.analysis = Some(analysis);
                self.last_error = None;
                if self.active && !self.animator.bind(spectrum) {
                    tracing::warn!("spectrum is empty, animator stays idle");
                }
                AnalysisStatus::Ready
            }
            Err(msg) => {
                tracing::warn!(err = %msg, "background analysis failed, animator stays idle");
                self.last_error = Some(msg.clone());
                AnalysisStatus::Failed(msg)
            }
        }
    }

    /// Block until the background analysis (if any) has published, then poll it.
    pub fn wait_for_analysis(&mut self) -> LucyResult<AnalysisStatus> {
        if let Some(worker) = self.pending.as_mut().and_then(|p| p.worker.take()) {
            if worker.join().is_err() {
                return Err(LucyError::analysis(self.worker_died()));
            }
        }
        Ok(self.poll_analysis())
    }

    /// Advance the animation by `dt`. Picks up a finished background analysis first.
    pub fn tick(&mut self, dt: f64) -> TickOutcome {
        if self.pending.is_some() {
            self.poll_analysis();
        }
        self.animator.advance(dt)
    }

    /// [`tick`](Self::tick) by the configured fixed frame step.
    pub fn tick_frame(&mut self) -> TickOutcome {
        self.tick(self.config.frame_dt)
    }

    /// Geometry for the current animation state; empty while idle.
    pub fn frame(&self) -> FrameGeometry {
        self.animator.frame()
    }

    /// Draw the current frame onto `adapter`.
    pub fn render<A: RenderAdapter + ?Sized>(
        &self,
        adapter: &mut A,
        style: &RenderStyle,
    ) -> LucyResult<()> {
        draw_frame(adapter, &self.animator.frame(), style)
    }

    /// Forget a worker that exited without publishing so a new one can be spawned.
    fn worker_died(&mut self) -> String {
        tracing::warn!(err = WORKER_PANICKED, "background analysis failed, animator stays idle");
        self.pending = None;
        self.last_error = Some(WORKER_PANICKED.to_string());
        WORKER_PANICKED.to_string()
    }

    fn settled_status(&self) -> AnalysisStatus {
        match (&self.analysis, &self.last_error) {
            (Some(_), _) => AnalysisStatus::Ready,
            (None, Some(msg)) => AnalysisStatus::Failed(msg.clone()),
            (None, None) => AnalysisStatus::NotStarted,
        }
    }
}

/// Extract, normalize and analyze.
pub fn run_analysis(
    source: &dyn ContourSource,
    config: &EpicycleConfig,
    analyzer: &SpectrumAnalyzer,
) -> LucyResult<Analysis> {
    let contour = source.extract(&config.source)?;
    tracing::debug!(points = contour.len(), "contour extracted");
    let spectrum = analyzer.analyze(&normalize(&contour))?;
    Ok(Analysis {
        contour: Arc::new(contour),
        spectrum: Arc::new(spectrum),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/session.rs"]
mod tests;
