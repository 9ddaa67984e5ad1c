use super::*;

const EPS: f64 = 1e-12;

fn assert_close(a: &Contour, b: &Contour) {
    assert_eq!(a.len(), b.len());
    for (p, q) in a.points().iter().zip(b.points()) {
        assert!((p.x - q.x).abs() < EPS && (p.y - q.y).abs() < EPS, "{p:?} vs {q:?}");
    }
}

fn wobbly(n: usize) -> Contour {
    (0..n)
        .map(|i| {
            let t = i as f64 * 0.37;
            Point::new(120.0 + 40.0 * t.cos() + 3.0 * (5.0 * t).sin(), -80.0 + 17.0 * t.sin())
        })
        .collect()
}

#[test]
fn output_is_mean_zero_and_within_unit_box() {
    for n in [2, 3, 17, 256] {
        let out = normalize(&wobbly(n));
        let mean = out.centroid().unwrap();
        assert!(mean.x.abs() < EPS && mean.y.abs() < EPS, "n={n}: mean {mean:?}");
        assert!(out.points().iter().all(|p| p.x.abs() <= 1.0 + EPS && p.y.abs() <= 1.0 + EPS));
        assert!((out.max_abs_coord() - 1.0).abs() < EPS);
    }
}

#[test]
fn normalize_is_idempotent() {
    let once = normalize(&wobbly(64));
    let twice = normalize(&once);
    assert_close(&once, &twice);
}

#[test]
fn uses_chebyshev_not_euclidean_scale() {
    let c = Contour::from_xy(&[(-3.0, -4.0), (3.0, 4.0)]);
    let out = normalize(&c);
    assert_close(&out, &Contour::from_xy(&[(-0.75, -1.0), (0.75, 1.0)]));
}

#[test]
fn unit_square_maps_to_itself() {
    let sq = Contour::from_xy(&[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]);
    assert_close(&normalize(&sq), &sq);
}

#[test]
fn degenerate_inputs_are_untouched() {
    assert!(normalize(&Contour::default()).is_empty());

    let single = Contour::from_xy(&[(5.0, 7.0)]);
    assert_eq!(normalize(&single), single);

    let stacked = Contour::from_xy(&[(2.0, 2.0), (2.0, 2.0)]);
    assert_eq!(normalize(&stacked), stacked);
}
