use std::path::Path;

use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, find_contours};

use crate::{
    foundation::core::{Contour, Point},
    foundation::error::{LucyError, LucyResult},
};

/// Decode encoded image bytes and extract the largest external silhouette.
pub fn contour_from_image_bytes(bytes: &[u8], threshold: u8) -> LucyResult<Contour> {
    let gray = image::load_from_memory(bytes)
        .map_err(|e| LucyError::source(format!("decode image: {e}")))?
        .to_luma8();
    contour_from_gray(&gray, threshold)
}

/// Read an image file and extract the largest external silhouette.
pub fn contour_from_image_path(path: &Path, threshold: u8) -> LucyResult<Contour> {
    let bytes = std::fs::read(path)
        .map_err(|e| LucyError::source(format!("read image '{}': {e}", path.display())))?;
    contour_from_image_bytes(&bytes, threshold)
}

/// Pixels darker than `threshold` become foreground (255), everything else background (0).
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (x, y, px) in gray.enumerate_pixels() {
        let v = if px.0[0] < threshold { 255 } else { 0 };
        out.put_pixel(x, y, Luma([v]));
    }
    out
}

/// Extract the boundary of the largest foreground region, Y-up.
///
/// Only outer borders without a parent are candidates (holes and nested islands are
/// ignored). The winner is the border of maximum enclosed area; the first one found wins a
/// tie. Points come back in border-following order with `y` negated.
#[tracing::instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn contour_from_gray(gray: &GrayImage, threshold: u8) -> LucyResult<Contour> {
    if gray.width() == 0 || gray.height() == 0 {
        return Err(LucyError::source("image has zero width or height"));
    }

    let binary = binarize(gray, threshold);
    let borders = find_contours::<i32>(&binary);

    let mut best: Option<(f64, &imageproc::contours::Contour<i32>)> = None;
    let mut external = 0usize;
    for border in &borders {
        if !matches!(border.border_type, BorderType::Outer) || border.parent.is_some() {
            continue;
        }
        if border.points.len() < 2 {
            continue;
        }
        external += 1;
        let area = shoelace_area(border.points.iter().map(|p| (p.x, p.y)));
        if best.is_none_or(|(a, _)| area > a) {
            best = Some((area, border));
        }
    }

    let Some((area, border)) = best else {
        return Err(LucyError::source("no boundary curve found in image"));
    };
    tracing::debug!(
        borders = borders.len(),
        external,
        area,
        points = border.points.len(),
        "selected largest external border"
    );

    Ok(border
        .points
        .iter()
        .map(|p| Point::new(f64::from(p.x), -f64::from(p.y)))
        .collect())
}

/// Absolute area of the polygon through `pts` (implicitly closed).
pub(crate) fn shoelace_area<I>(pts: I) -> f64
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let pts: Vec<(f64, f64)> = pts
        .into_iter()
        .map(|(x, y)| (f64::from(x), f64::from(y)))
        .collect();
    if pts.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, &(x0, y0)) in pts.iter().enumerate() {
        let (x1, y1) = pts[(i + 1) % pts.len()];
        twice += x0 * y1 - x1 * y0;
    }
    (twice / 2.0).abs()
}

#[cfg(test)]
#[path = "../../tests/unit/source/raster.rs"]
mod tests;
