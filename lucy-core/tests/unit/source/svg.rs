use super::*;

#[test]
fn first_path_is_flattened() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
        <g><path d="M0 0 L10 0 L10 10 Z" fill="black"/></g>
        <path d="M0 0 L1 1" stroke="black"/>
    </svg>"#;
    let c = contour_from_svg_bytes(svg, &SourceOptions::default()).unwrap();
    let xy: Vec<(f64, f64)> = c.points().iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(
        xy,
        vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]
    );
}

#[test]
fn curves_use_configured_sampling() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
        <path d="M0 0 C0 10 10 10 10 0" stroke="black" fill="none"/>
    </svg>"#;
    let c = contour_from_svg_bytes(svg, &SourceOptions::default()).unwrap();
    assert_eq!(c.len(), 31);
}

#[test]
fn document_without_path_is_source_error() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    assert!(
        contour_from_svg_bytes(svg, &SourceOptions::default())
            .unwrap_err()
            .is_source()
    );
}

#[test]
fn malformed_document_is_source_error() {
    assert!(
        contour_from_svg_bytes(b"<svg", &SourceOptions::default())
            .unwrap_err()
            .is_source()
    );
}
