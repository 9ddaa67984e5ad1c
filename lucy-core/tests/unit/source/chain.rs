use std::io::Cursor;

use image::{GrayImage, Luma};

use super::*;

fn square_png() -> Arc<[u8]> {
    let mut img = GrayImage::from_pixel(24, 24, Luma([255]));
    for y in 6..18 {
        for x in 6..18 {
            img.put_pixel(x, y, Luma([0]));
        }
    }
    let mut buf = Vec::new();
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf.into()
}

#[test]
fn vector_inputs_are_ordered_before_raster() {
    let chain = SourceChain::new([
        ContourInput::ImageFile("a.png".into()),
        ContourInput::PathData("M0 0 L1 1".into()),
        ContourInput::ImageFile("b.png".into()),
        ContourInput::SvgFile("c.svg".into()),
    ]);
    let kinds: Vec<bool> = chain.inputs().iter().map(|i| i.is_vector()).collect();
    assert_eq!(kinds, vec![true, true, false, false]);
    assert!(matches!(&chain.inputs()[0], ContourInput::PathData(_)));
    assert!(matches!(&chain.inputs()[2], ContourInput::ImageFile(p) if p.ends_with("a.png")));
}

#[test]
fn vector_success_short_circuits() {
    let chain = SourceChain::new([
        ContourInput::ImageBytes(square_png()),
        ContourInput::PathData("M0 0 L10 0 L10 10 Z".into()),
    ]);
    let c = chain.extract(&SourceOptions::default()).unwrap();
    assert_eq!(c.len(), 4);
}

#[test]
fn falls_back_to_raster_when_vector_fails() {
    let chain = SourceChain::new([
        ContourInput::PathData("M0 0 X5 5".into()),
        ContourInput::ImageBytes(square_png()),
    ]);
    let c = chain.extract(&SourceOptions::default()).unwrap();
    assert!(c.len() >= 4);
    assert!(c.points().iter().all(|p| p.y <= 0.0));
}

#[test]
fn all_failures_surface_last_source_error() {
    let chain = SourceChain::new([
        ContourInput::SvgFile("does/not/exist.svg".into()),
        ContourInput::ImageFile("does/not/exist.png".into()),
    ]);
    let err = chain.extract(&SourceOptions::default()).unwrap_err();
    assert!(err.is_source());
    assert!(err.to_string().contains("exist.png"));
}

#[test]
fn empty_chain_is_source_error() {
    let err = SourceChain::default()
        .extract(&SourceOptions::default())
        .unwrap_err();
    assert!(err.is_source());
}

#[test]
fn overflowing_path_data_falls_back_to_raster() {
    let chain = SourceChain::new([
        ContourInput::PathData("M0 0 L1e400 0 L0 1".into()),
        ContourInput::ImageBytes(square_png()),
    ]);
    let c = chain.extract(&SourceOptions::default()).unwrap();
    assert!(c.is_finite());
    assert!(c.points().iter().all(|p| p.y <= 0.0));
}
