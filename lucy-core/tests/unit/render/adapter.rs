use super::*;
use crate::render::geometry::ClockFace;

#[derive(Default)]
struct MockAdapter {
    calls: Vec<&'static str>,
    fills: Vec<Rgba8>,
}

impl RenderAdapter for MockAdapter {
    fn begin_frame(&mut self, _background: Rgba8) -> LucyResult<()> {
        self.calls.push("begin_frame");
        Ok(())
    }

    fn polyline(&mut self, _points: &[Point], _color: Rgba8, _width: f64) -> LucyResult<()> {
        self.calls.push("polyline");
        Ok(())
    }

    fn circle(&mut self, _circle: &Circle, paint: CirclePaint) -> LucyResult<()> {
        self.calls.push("circle");
        if let Some(fill) = paint.fill {
            self.fills.push(fill);
        }
        Ok(())
    }

    fn segment(&mut self, _segment: &Segment, _color: Rgba8, _width: f64) -> LucyResult<()> {
        self.calls.push("segment");
        Ok(())
    }

    fn end_frame(&mut self) -> LucyResult<()> {
        self.calls.push("end_frame");
        Ok(())
    }
}

fn one_clock_geometry() -> FrameGeometry {
    let center = Point::new(10.0, 10.0);
    FrameGeometry {
        elapsed: 0.5,
        trace: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
        tip: Some(Circle {
            center: Point::new(1.0, 1.0),
            radius: 4.0,
        }),
        epicycles: vec![Circle {
            center: Point::ZERO,
            radius: 3.0,
        }],
        clocks: vec![ClockFace {
            face: Circle { center, radius: 5.0 },
            ticks: vec![Segment {
                from: center,
                to: Point::new(15.0, 10.0),
            }],
            hand: Segment {
                from: center,
                to: Point::new(10.0, 15.0),
            },
            frequency: 1,
        }],
    }
}

#[test]
fn draw_frame_calls_in_painter_order() {
    let mut mock = MockAdapter::default();
    let style = RenderStyle::default();
    draw_frame(&mut mock, &one_clock_geometry(), &style).unwrap();

    assert_eq!(
        mock.calls,
        vec![
            "begin_frame",
            "circle",
            "polyline",
            "circle",
            "circle",
            "segment",
            "segment",
            "end_frame",
        ]
    );
    assert_eq!(mock.fills, vec![style.tip, style.clock_face]);
}

#[test]
fn idle_geometry_only_clears() {
    let mut mock = MockAdapter::default();
    draw_frame(&mut mock, &FrameGeometry::default(), &RenderStyle::default()).unwrap();
    assert_eq!(mock.calls, vec!["begin_frame", "end_frame"]);
}

#[test]
fn layer_toggles_skip_epicycles_and_clocks() {
    let mut mock = MockAdapter::default();
    let style = RenderStyle {
        show_epicycles: false,
        show_clocks: false,
        ..RenderStyle::default()
    };
    draw_frame(&mut mock, &one_clock_geometry(), &style).unwrap();
    assert_eq!(
        mock.calls,
        vec!["begin_frame", "polyline", "circle", "end_frame"]
    );
}

#[test]
fn single_point_trace_is_not_stroked() {
    let mut geometry = one_clock_geometry();
    geometry.trace.truncate(1);
    let mut mock = MockAdapter::default();
    draw_frame(&mut mock, &geometry, &RenderStyle::default()).unwrap();
    assert!(!mock.calls.contains(&"polyline"));
}
