//! Lattice scan behaviour on synthetic images.

use image::{GrayImage, Luma};
use rstest::rstest;

use halftone_lines::geometry::Rotation;
use halftone_lines::scan::{CanvasRows, Quadrant, Scanner};

fn scan(image: &GrayImage, kernel: u32, degrees: f64) -> CanvasRows {
    Scanner::new(image, kernel, Rotation::from_degrees(degrees))
        .expect("valid scanner")
        .scan()
        .expect("scan succeeds")
}

fn selected_pixels(rows: &CanvasRows) -> usize {
    rows.samples().map(|(_, s)| s.pixels).sum()
}

// ==================== Partition Tests ====================

#[test]
fn test_axis_aligned_scan_is_a_partition() {
    let image = GrayImage::from_pixel(40, 40, Luma([200]));
    let rows = scan(&image, 10, 0.0);

    assert_eq!(rows.sample_count(), 16);
    assert_eq!(rows.len(), 4);
    assert!(rows.samples().all(|(_, s)| s.pixels == 100));
    assert_eq!(selected_pixels(&rows), 40 * 40);

    let mut cells: Vec<(i64, i64)> = rows.samples().map(|(r, s)| (r, s.column)).collect();
    cells.sort_unstable();
    cells.dedup();
    assert_eq!(cells.len(), 16);
    assert_eq!(cells.first(), Some(&(-2, -2)));
    assert_eq!(cells.last(), Some(&(1, 1)));
}

#[rstest]
#[case(90.0)]
#[case(180.0)]
#[case(270.0)]
fn test_right_angles_are_partitions(#[case] degrees: f64) {
    let image = GrayImage::from_pixel(37, 23, Luma([0]));
    let rows = scan(&image, 5, degrees);
    assert_eq!(selected_pixels(&rows), 37 * 23);
}

#[rstest]
#[case(1.0)]
#[case(20.0)]
#[case(-33.0)]
#[case(45.0)]
#[case(60.0)]
#[case(135.0)]
fn test_rotated_scan_covers_square_image(#[case] degrees: f64) {
    let image = GrayImage::from_pixel(40, 40, Luma([0]));
    let rows = scan(&image, 10, degrees);
    // kernels share their edges, so pixels exactly on an edge may be read twice
    let selected = selected_pixels(&rows);
    assert!(selected >= 40 * 40, "{degrees}°: {selected} pixels");
    assert!(selected <= 40 * 40 * 11 / 10, "{degrees}°: {selected} pixels");
}

#[rstest]
#[case(1e-5)]
#[case(1e-6)]
#[case(89.99999)]
#[case(90.00001)]
#[case(179.99999)]
fn test_near_right_angles_scan(#[case] degrees: f64) {
    // kernel sides are a hair off vertical here, with slopes in the millions
    let image = GrayImage::from_pixel(40, 40, Luma([0]));
    let rows = scan(&image, 10, degrees);
    let selected = selected_pixels(&rows);
    assert!(selected >= 40 * 40, "{degrees}°: {selected} pixels");
    assert!(selected <= 40 * 40 * 11 / 10, "{degrees}°: {selected} pixels");
    assert!(rows.samples().all(|(_, s)| s.intensity == 1.0));
}

// ==================== Intensity Tests ====================

#[rstest]
#[case(0.0)]
#[case(20.0)]
#[case(45.0)]
#[case(90.0)]
#[case(-71.0)]
fn test_white_image_has_zero_intensity(#[case] degrees: f64) {
    let image = GrayImage::from_pixel(30, 20, Luma([255]));
    let rows = scan(&image, 4, degrees);
    assert!(!rows.is_empty());
    assert!(rows.samples().all(|(_, s)| s.intensity == 0.0));
}

#[rstest]
#[case(0.0)]
#[case(20.0)]
#[case(45.0)]
#[case(90.0)]
#[case(-71.0)]
fn test_black_image_has_full_intensity(#[case] degrees: f64) {
    let image = GrayImage::from_pixel(30, 20, Luma([0]));
    let rows = scan(&image, 4, degrees);
    assert!(!rows.is_empty());
    assert!(rows.samples().all(|(_, s)| s.intensity == 1.0));
}

#[test]
fn test_gray_intensity() {
    let image = GrayImage::from_pixel(100, 100, Luma([128]));
    let rows = scan(&image, 20, 0.0);
    assert_eq!(rows.sample_count(), 36);
    for (_, sample) in rows.samples() {
        assert!((sample.intensity - (1.0 - 128.0 / 255.0)).abs() < 1e-12);
    }
}

#[test]
fn test_half_dark_image() {
    let image = GrayImage::from_fn(40, 40, |x, _| Luma([if x < 20 { 0 } else { 255 }]));
    let rows = scan(&image, 10, 0.0);
    for (_, sample) in rows.samples() {
        let expected = if sample.column < 0 { 1.0 } else { 0.0 };
        assert_eq!(sample.intensity, expected, "column {}", sample.column);
    }
}

// ==================== Termination Tests ====================

#[rstest]
#[case(1, 1, 1)]
#[case(1, 1, 50)]
#[case(3, 200, 7)]
#[case(200, 3, 7)]
#[case(64, 48, 3)]
fn test_scan_terminates(#[case] width: u32, #[case] height: u32, #[case] kernel: u32) {
    let image = GrayImage::from_pixel(width, height, Luma([10]));
    for degrees in [0.0, 15.0, 45.0, 89.0, 90.0, 135.0, 200.0] {
        let scanner = Scanner::new(&image, kernel, Rotation::from_degrees(degrees))
            .expect("valid scanner");
        let rows = scanner.scan().expect("scan succeeds");
        assert!(!rows.is_empty(), "{width}x{height} k{kernel} {degrees}°");
        let limit = scanner.step_limit();
        assert!(rows.sample_count() <= 4 * limit * limit);
    }
}

#[test]
fn test_quadrants_write_disjoint_rows() {
    let image = GrayImage::from_pixel(50, 50, Luma([0]));
    let scanner =
        Scanner::new(&image, 5, Rotation::from_degrees(30.0)).expect("valid scanner");
    let mut seen = std::collections::HashSet::new();
    for quadrant in Quadrant::ALL {
        let rows = scanner.scan_quadrant(quadrant).expect("quadrant scans");
        for (row, sample) in rows.samples() {
            assert!(seen.insert((row, sample.column)), "cell ({row}, {}) seen twice", sample.column);
        }
    }
}

#[rstest]
#[case(3, 200, 7, 135.0)]
#[case(200, 3, 7, 200.0)]
#[case(30, 20, 4, 200.0)]
#[case(64, 48, 3, 135.0)]
fn test_obtuse_angles_cover_image(
    #[case] width: u32,
    #[case] height: u32,
    #[case] kernel: u32,
    #[case] degrees: f64,
) {
    // rows run right to left here; continuing past empty kernels must still work
    let image = GrayImage::from_pixel(width, height, Luma([0]));
    let rows = scan(&image, kernel, degrees);
    let area = (width * height) as usize;
    let selected = selected_pixels(&rows);
    assert!(selected >= area, "{degrees}°: {selected} of {area} pixels");
    assert!(selected <= area * 11 / 10, "{degrees}°: {selected} of {area} pixels");
}
