use super::*;
use crate::analysis::spectrum::{SpectralComponent, SpectrumAnalyzer};
use crate::analysis::transform::TransformKind;
use crate::foundation::core::Contour;

const EPS: f64 = 1e-12;

fn cfg(components: usize, capacity: usize) -> EpicycleConfig {
    EpicycleConfig {
        components,
        speed: 1.0,
        trace_capacity: capacity,
        layout: ScreenLayout {
            origin: Point::ZERO,
            path_scale: 1.0,
            clock_center: Point::ZERO,
            clock_ring_radius: 10.0,
            clock_scale: 1.0,
            ..ScreenLayout::default()
        },
        ..EpicycleConfig::default()
    }
}

fn square_spectrum() -> Arc<Spectrum> {
    let sq = Contour::from_xy(&[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]);
    Arc::new(
        SpectrumAnalyzer::new(4, TransformKind::Direct)
            .analyze(&sq)
            .unwrap(),
    )
}

fn two_circles() -> Arc<Spectrum> {
    Arc::new(Spectrum::from_components(
        vec![
            SpectralComponent {
                coefficient: Complex64::new(2.0, 0.0),
                frequency: 1,
            },
            SpectralComponent {
                coefficient: Complex64::new(0.0, 1.0),
                frequency: -3,
            },
        ],
        16,
    ))
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
}

#[test]
fn idle_tick_is_an_observable_noop() {
    let mut anim = EpicycleAnimator::new(&cfg(4, 10));
    assert_eq!(anim.state(), AnimatorState::Idle);
    let out = anim.advance(0.5);
    assert_eq!(out, TickOutcome::Noop(NoopReason::Idle));
    assert!(out.is_noop());
    assert_eq!(anim.elapsed(), 0.0);
    assert!(anim.trace().is_empty());
    assert!(anim.frame().is_empty());
}

#[test]
fn empty_spectrum_is_refused() {
    let mut anim = EpicycleAnimator::new(&cfg(4, 10));
    assert!(!anim.bind(Arc::new(Spectrum::default())));
    assert_eq!(anim.state(), AnimatorState::Idle);
    assert!(anim.advance(0.1).is_noop());
}

#[test]
fn short_spectrum_leaves_state_untouched() {
    let mut anim = EpicycleAnimator::new(&cfg(10, 10));
    assert!(anim.bind(two_circles()));
    let out = anim.advance(0.1);
    assert_eq!(
        out,
        TickOutcome::Noop(NoopReason::ShortSpectrum { have: 2, want: 10 })
    );
    assert_eq!(anim.elapsed(), 0.0);
    assert!(anim.trace().is_empty());
}

#[test]
fn component_count_is_capped_by_sample_count() {
    // K = 100 but the square only has 4 samples.
    let mut anim = EpicycleAnimator::new(&cfg(100, 10));
    assert!(anim.bind(square_spectrum()));
    let out = anim.advance(0.1);
    let g = out.geometry().unwrap();
    assert_eq!(g.clocks.len(), 4);
    assert_eq!(g.epicycles.len(), 4);
}

#[test]
fn advance_scales_dt_by_speed_and_traces_the_tip() {
    let mut c = cfg(4, 10);
    c.speed = 2.0;
    let mut anim = EpicycleAnimator::new(&c);
    anim.bind(square_spectrum());

    let out = anim.advance(0.25);
    assert!((anim.elapsed() - 0.5).abs() < EPS);

    // Square spectrum is exp(i t): screen y is flipped.
    let tip = out.geometry().unwrap().tip.unwrap().center;
    assert!(close(tip, Point::new(0.5_f64.cos(), -0.5_f64.sin())));
    assert_eq!(anim.trace().len(), 1);
    assert_eq!(anim.trace().last(), Some(tip));
}

#[test]
fn trace_is_bounded_fifo() {
    let mut anim = EpicycleAnimator::new(&cfg(2, 5));
    anim.bind(two_circles());
    let mut tips = Vec::new();
    for _ in 0..20 {
        let out = anim.advance(0.1);
        tips.push(out.geometry().unwrap().tip.unwrap().center);
        assert!(anim.trace().len() <= 5);
    }
    let kept: Vec<Point> = anim.trace().iter().collect();
    assert_eq!(kept, tips[15..].to_vec());
}

#[test]
fn epicycles_nest_on_partial_sums() {
    let mut anim = EpicycleAnimator::new(&cfg(2, 10));
    anim.bind(two_circles());
    let g = anim.advance(0.3).geometry().cloned().unwrap();
    let t = anim.elapsed();

    assert!(close(g.epicycles[0].center, Point::ZERO));
    assert!((g.epicycles[0].radius - 2.0).abs() < EPS);

    let first = Complex64::new(2.0, 0.0) * Complex64::from_polar(1.0, t);
    assert!(close(g.epicycles[1].center, Point::new(first.re, -first.im)));
    assert!((g.epicycles[1].radius - 1.0).abs() < EPS);

    let second = Complex64::new(0.0, 1.0) * Complex64::from_polar(1.0, -3.0 * t);
    let tip = first + second;
    assert!(close(g.tip.unwrap().center, Point::new(tip.re, -tip.im)));
}

#[test]
fn clocks_sit_on_the_ring_with_twelve_ticks() {
    let mut anim = EpicycleAnimator::new(&cfg(2, 10));
    anim.bind(two_circles());
    let g = anim.advance(0.2).geometry().cloned().unwrap();
    let t = anim.elapsed();

    assert_eq!(g.clocks.len(), 2);
    assert!(close(g.clocks[0].face.center, Point::new(10.0, 0.0)));
    assert!(close(g.clocks[1].face.center, Point::new(-10.0, 0.0)));
    assert!((g.clocks[0].face.radius - 2.0).abs() < EPS);
    assert!((g.clocks[1].face.radius - 1.0).abs() < EPS);

    for clock in &g.clocks {
        assert_eq!(clock.ticks.len(), TICKS_PER_CLOCK);
        let r = clock.face.radius;
        let first = clock.ticks[0];
        assert!(close(first.from, Point::new(clock.face.center.x + r, clock.face.center.y)));
        assert!(close(
            first.to,
            Point::new(clock.face.center.x + 0.85 * r, clock.face.center.y)
        ));
    }

    let hand = g.clocks[1].hand;
    let a = -3.0 * t;
    assert!(close(
        hand.to,
        Point::new(-10.0 + a.cos(), a.sin())
    ));
    assert_eq!(g.clocks[1].frequency, -3);
}

#[test]
fn reset_keeps_running_and_teardown_goes_idle() {
    let mut anim = EpicycleAnimator::new(&cfg(2, 10));
    anim.bind(two_circles());
    for _ in 0..3 {
        anim.advance(0.1);
    }
    anim.reset();
    assert_eq!(anim.state(), AnimatorState::Running);
    assert_eq!(anim.elapsed(), 0.0);
    assert!(anim.trace().is_empty());
    assert!(!anim.advance(0.1).is_noop());

    anim.teardown();
    assert_eq!(anim.state(), AnimatorState::Idle);
    assert!(anim.trace().is_empty());
    assert!(anim.advance(0.1).is_noop());
}

#[test]
fn frame_does_not_advance() {
    let mut anim = EpicycleAnimator::new(&cfg(2, 10));
    anim.bind(two_circles());
    anim.advance(0.1);
    let before = anim.elapsed();
    let g = anim.frame();
    assert_eq!(anim.elapsed(), before);
    assert_eq!(g.trace.len(), 1);
    assert_eq!(g.elapsed, before);
}
