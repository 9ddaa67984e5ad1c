use std::io::Cursor;

use super::*;

fn white(w: u32, h: u32) -> GrayImage {
    GrayImage::from_pixel(w, h, Luma([255]))
}

fn fill_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, v: u8) {
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Luma([v]));
        }
    }
}

fn encode_png(img: &GrayImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageLuma8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn binarize_uses_strict_less_than() {
    let mut img = white(3, 1);
    img.put_pixel(0, 0, Luma([127]));
    img.put_pixel(1, 0, Luma([128]));
    let b = binarize(&img, 128);
    assert_eq!(b.get_pixel(0, 0).0[0], 255);
    assert_eq!(b.get_pixel(1, 0).0[0], 0);
    assert_eq!(b.get_pixel(2, 0).0[0], 0);
}

#[test]
fn largest_silhouette_wins_and_y_is_flipped() {
    let mut img = white(40, 30);
    fill_rect(&mut img, 2, 2, 6, 6, 0);
    fill_rect(&mut img, 10, 8, 30, 24, 0);

    let c = contour_from_gray(&img, 128).unwrap();
    assert!(c.len() >= 4);
    for p in c.points() {
        assert!((10.0..=29.0).contains(&p.x), "x out of big rect: {}", p.x);
        assert!((-23.0..=-8.0).contains(&p.y), "y not flipped: {}", p.y);
    }
}

#[test]
fn holes_do_not_compete_with_outer_border() {
    let mut img = white(30, 30);
    fill_rect(&mut img, 5, 5, 25, 25, 0);
    fill_rect(&mut img, 8, 8, 22, 22, 255);

    let c = contour_from_gray(&img, 128).unwrap();
    let min_x = c.points().iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    assert_eq!(min_x, 5.0);
}

#[test]
fn blank_image_has_no_boundary() {
    let err = contour_from_gray(&white(16, 16), 128).unwrap_err();
    assert!(err.is_source());
}

#[test]
fn decode_roundtrip_and_corrupt_bytes() {
    let mut img = white(20, 20);
    fill_rect(&mut img, 4, 4, 16, 16, 10);
    let c = contour_from_image_bytes(&encode_png(&img), 128).unwrap();
    assert!(c.len() >= 4);

    let err = contour_from_image_bytes(b"definitely not an image", 128).unwrap_err();
    assert!(err.is_source());
}

#[test]
fn missing_file_is_source_error() {
    let err = contour_from_image_path(Path::new("no/such/kamon.png"), 128).unwrap_err();
    assert!(err.is_source());
}

#[test]
fn shoelace_area_of_unit_square() {
    let area = shoelace_area([(0, 0), (2, 0), (2, 2), (0, 2)]);
    assert_eq!(area, 4.0);
    assert_eq!(shoelace_area([(0, 0), (1, 1)]), 0.0);
}
