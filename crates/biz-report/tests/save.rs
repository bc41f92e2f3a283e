use biz_report::{Block, Report};
use pretty_assertions::assert_eq;
use printpdf::image_crate::{Rgb, RgbImage};
use tempfile::TempDir;

fn write_png(path: &std::path::Path, width: u32, height: u32) {
    RgbImage::from_pixel(width, height, Rgb([135, 206, 235]))
        .save(path)
        .unwrap();
}

fn is_pdf(path: &std::path::Path) -> bool {
    std::fs::read(path).unwrap().starts_with(b"%PDF-")
}

#[test]
fn saves_under_reports_directory() {
    let dir = TempDir::new().unwrap();
    let mut report = Report::new("Sales Report", dir.path());
    report.add_text("Total sales: ₹35.00\nTop performing product: A");

    let path = report.save("report-abc.pdf").unwrap();

    assert_eq!(path, dir.path().join("reports").join("report-abc.pdf"));
    assert!(is_pdf(&path));
}

#[test]
fn same_filename_returns_same_path_and_replaces_file() {
    let dir = TempDir::new().unwrap();

    let mut first = Report::new("First", dir.path());
    first.add_text("short");
    let first_path = first.save("report.pdf").unwrap();
    let first_len = std::fs::metadata(&first_path).unwrap().len();

    let mut second = Report::new("Second", dir.path());
    let long: String = (0..200).map(|i| format!("line {i}\n")).collect();
    second.add_text(long);
    let second_path = second.save("report.pdf").unwrap();

    assert_eq!(first_path, second_path);
    assert_ne!(std::fs::metadata(&second_path).unwrap().len(), first_len);
    let entries = std::fs::read_dir(dir.path().join("reports")).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn embeds_images_and_survives_missing_ones() {
    let dir = TempDir::new().unwrap();
    let chart = dir.path().join("bar.png");
    write_png(&chart, 60, 40);

    let mut report = Report::new("Charts", dir.path()).with_image_width(120.0);
    report.add_image(&chart);
    report.add_image(dir.path().join("pie.png"));

    assert!(matches!(
        report.blocks()[1],
        Block::Image {
            width_px: 60,
            height_px: 40,
            ..
        }
    ));
    assert_eq!(report.warnings().len(), 1);

    let path = report.save("").unwrap();
    assert!(path.ends_with("reports/report.pdf"));
    assert!(is_pdf(&path));
}

#[test]
fn path_components_are_stripped_from_filename() {
    let dir = TempDir::new().unwrap();
    let path = Report::new("T", dir.path())
        .save("../../escape.pdf")
        .unwrap();
    assert_eq!(path, dir.path().join("reports").join("escape.pdf"));
}
