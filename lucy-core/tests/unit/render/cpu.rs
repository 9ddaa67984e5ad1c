use super::*;
use crate::render::adapter::draw_frame;
use crate::render::geometry::FrameGeometry;
use crate::render::style::RenderStyle;

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn idle_frame_is_background_only() {
    let mut canvas = CpuCanvas::new(Canvas::new(16, 8).unwrap()).unwrap();
    let style = RenderStyle::default();
    draw_frame(&mut canvas, &FrameGeometry::default(), &style).unwrap();

    let frame = canvas.readback();
    assert_eq!((frame.width, frame.height), (16, 8));
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    let bg = style.background;
    for (x, y) in [(0, 0), (15, 7), (8, 4)] {
        assert_eq!(pixel(&frame, x, y), [bg.r, bg.g, bg.b, 255]);
    }
}

#[test]
fn filled_circle_covers_its_center() {
    let mut canvas = CpuCanvas::new(Canvas::new(32, 32).unwrap()).unwrap();
    canvas.begin_frame(Rgba8::rgb(255, 255, 255)).unwrap();
    canvas
        .circle(
            &Circle {
                center: Point::new(16.0, 16.0),
                radius: 6.0,
            },
            CirclePaint {
                fill: Some(Rgba8::rgb(255, 0, 0)),
                outline: None,
            },
        )
        .unwrap();
    canvas.end_frame().unwrap();

    let frame = canvas.readback();
    assert_eq!(pixel(&frame, 16, 16), [255, 0, 0, 255]);
    assert_eq!(pixel(&frame, 1, 1), [255, 255, 255, 255]);
}

#[test]
fn draw_outside_frame_is_a_render_error() {
    let mut canvas = CpuCanvas::new(Canvas::new(4, 4).unwrap()).unwrap();
    let err = canvas
        .segment(
            &Segment {
                from: Point::ZERO,
                to: Point::new(3.0, 3.0),
            },
            Rgba8::rgb(0, 0, 0),
            1.0,
        )
        .unwrap_err();
    assert!(matches!(err, LucyError::Render(_)));
    assert!(canvas.end_frame().is_err());
}

#[test]
fn to_rgba_image_unpremultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    let img = frame.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [128, 0, 0, 128]);
}

#[test]
fn to_rgba_image_rejects_bad_length() {
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 4],
        premultiplied: false,
    };
    assert!(frame.to_rgba_image().is_err());
}
