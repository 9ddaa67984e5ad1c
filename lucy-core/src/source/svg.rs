use std::path::Path;

use kurbo::{PathEl, Point};
use usvg::tiny_skia_path::PathSegment;

use crate::{
    foundation::config::SourceOptions,
    foundation::core::Contour,
    foundation::error::{LucyError, LucyResult},
    source::path::sample_path_elements,
};

/// Parse an SVG document and flatten its first path element (document order).
///
/// Coordinates stay in the path's own user space; element transforms are not applied.
pub fn contour_from_svg_bytes(bytes: &[u8], opts: &SourceOptions) -> LucyResult<Contour> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| LucyError::source(format!("parse svg tree: {e}")))?;

    let path = first_path(tree.root())
        .ok_or_else(|| LucyError::source("svg document contains no <path> element"))?;

    let els = path.data().segments().map(|seg| match seg {
        PathSegment::MoveTo(p) => PathEl::MoveTo(pt(p)),
        PathSegment::LineTo(p) => PathEl::LineTo(pt(p)),
        PathSegment::QuadTo(p1, p2) => PathEl::QuadTo(pt(p1), pt(p2)),
        PathSegment::CubicTo(p1, p2, p3) => PathEl::CurveTo(pt(p1), pt(p2), pt(p3)),
        PathSegment::Close => PathEl::ClosePath,
    });
    let contour = sample_path_elements(els, opts);
    tracing::debug!(id = path.id(), points = contour.len(), "flattened svg path");

    if !contour.is_finite() {
        return Err(LucyError::source(format!(
            "svg path '{}' produced non-finite coordinates",
            path.id()
        )));
    }
    if contour.len() < 2 {
        return Err(LucyError::source(format!(
            "svg path '{}' yielded {} point(s), need at least 2",
            path.id(),
            contour.len()
        )));
    }
    Ok(contour)
}

/// Read an SVG file and flatten its first path element.
pub fn contour_from_svg_path(path: &Path, opts: &SourceOptions) -> LucyResult<Contour> {
    let bytes = std::fs::read(path)
        .map_err(|e| LucyError::source(format!("read svg '{}': {e}", path.display())))?;
    contour_from_svg_bytes(&bytes, opts)
}

fn first_path(group: &usvg::Group) -> Option<&usvg::Path> {
    for child in group.children() {
        match child {
            usvg::Node::Path(p) => return Some(p.as_ref()),
            usvg::Node::Group(g) => {
                if let Some(p) = first_path(g.as_ref()) {
                    return Some(p);
                }
            }
            _ => {}
        }
    }
    None
}

fn pt(p: usvg::tiny_skia_path::Point) -> Point {
    Point::new(f64::from(p.x), f64::from(p.y))
}

#[cfg(test)]
#[path = "../../tests/unit/source/svg.rs"]
mod tests;
