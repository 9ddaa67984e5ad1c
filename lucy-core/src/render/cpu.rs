use vello_cpu::kurbo::Shape as _;

use crate::{
    foundation::core::{Canvas, Point, Rgba8},
    foundation::error::{LucyError, LucyResult},
    render::adapter::{CirclePaint, RenderAdapter},
    render::geometry::{Circle, Segment},
};

/// Flattening tolerance for circles, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Rendered frame pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to a straight-alpha `image` buffer, ready for PNG encoding.
    pub fn to_rgba_image(&self) -> LucyResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| LucyError::render("frame byte length does not match dimensions"))
    }
}

/// [`RenderAdapter`] that rasterizes on the CPU with `vello_cpu`.
pub struct CpuCanvas {
    width: u16,
    height: u16,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: vello_cpu::Pixmap,
}

impl CpuCanvas {
    /// Allocate the backing pixmap for `canvas`.
    pub fn new(canvas: Canvas) -> LucyResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| LucyError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| LucyError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(LucyError::render("canvas width/height must be > 0"));
        }
        Ok(Self {
            width,
            height,
            ctx: None,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    /// Pixels of the last finished frame (premultiplied RGBA8).
    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn ctx(&mut self) -> LucyResult<&mut vello_cpu::RenderContext> {
        self.ctx
            .as_mut()
            .ok_or_else(|| LucyError::render("draw call outside begin_frame/end_frame"))
    }

    fn stroke(
        &mut self,
        path: &vello_cpu::kurbo::BezPath,
        color: Rgba8,
        width: f64,
    ) -> LucyResult<()> {
        let ctx = self.ctx()?;
        ctx.set_paint(to_color(color));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        ctx.stroke_path(path);
        Ok(())
    }
}

impl RenderAdapter for CpuCanvas {
    fn begin_frame(&mut self, background: Rgba8) -> LucyResult<()> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(to_color(background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        self.ctx = Some(ctx);
        Ok(())
    }

    fn polyline(&mut self, points: &[Point], color: Rgba8, width: f64) -> LucyResult<()> {
        let mut it = points.iter();
        let Some(first) = it.next() else {
            return Ok(());
        };
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(to_cpu_point(*first));
        for p in it {
            path.line_to(to_cpu_point(*p));
        }
        self.stroke(&path, color, width)
    }

    fn circle(&mut self, circle: &Circle, paint: CirclePaint) -> LucyResult<()> {
        if !(circle.radius.is_finite() && circle.radius > 0.0) {
            return Ok(());
        }
        let path = vello_cpu::kurbo::Circle::new(to_cpu_point(circle.center), circle.radius)
            .to_path(CIRCLE_TOLERANCE);
        if let Some(fill) = paint.fill {
            let ctx = self.ctx()?;
            ctx.set_paint(to_color(fill));
            ctx.fill_path(&path);
        }
        if let Some((color, width)) = paint.outline {
            self.stroke(&path, color, width)?;
        }
        Ok(())
    }

    fn segment(&mut self, segment: &Segment, color: Rgba8, width: f64) -> LucyResult<()> {
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(to_cpu_point(segment.from));
        path.line_to(to_cpu_point(segment.to));
        self.stroke(&path, color, width)
    }

    fn end_frame(&mut self) -> LucyResult<()> {
        let mut ctx = self
            .ctx
            .take()
            .ok_or_else(|| LucyError::render("end_frame without begin_frame"))?;
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }
}

fn to_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn to_cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
