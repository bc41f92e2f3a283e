use biz_analysis::Table;
use biz_charts::{ChartRenderer, ChartSettings};
use biz_core::{ChartKind, GroupOrder};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn table(csv: &str) -> Table {
    Table::from_reader(csv.as_bytes()).unwrap()
}

fn small_renderer() -> ChartRenderer {
    ChartRenderer::new(
        ChartSettings {
            bar_size: (320, 240),
            pie_size: 240,
            font_path: None,
        },
        GroupOrder::FirstSeen,
    )
}

fn assert_png(path: &std::path::Path) {
    let bytes = std::fs::read(path).unwrap();
    assert!(bytes.starts_with(PNG_MAGIC), "{} is not a PNG", path.display());
}

#[test]
fn renders_bar_and_pie_for_full_table() {
    let dir = TempDir::new().unwrap();
    let table = table("Product,Month,Sales\nA,Jan,10\nB,Jan,5\nA,Feb,20\n");

    let artifacts = small_renderer().render(&table, dir.path()).unwrap();

    let kinds: Vec<ChartKind> = artifacts.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![ChartKind::CategoricalBar, ChartKind::TemporalPie]);
    for artifact in &artifacts {
        assert_eq!(artifact.path.parent().unwrap(), dir.path());
        assert_png(&artifact.path);
    }
}

#[test]
fn table_without_month_yields_only_bar_chart() {
    let dir = TempDir::new().unwrap();
    let table = table("Product,Sales\nA,10\nB,5\n");

    let artifacts = small_renderer().render(&table, dir.path()).unwrap();

    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].kind, ChartKind::CategoricalBar);
    assert!(!dir.path().join(ChartKind::TemporalPie.file_name()).exists());
}

#[test]
fn table_without_product_or_month_yields_nothing() {
    let dir = TempDir::new().unwrap();
    let artifacts = small_renderer()
        .render(&table("Sales\n1\n2\n"), dir.path())
        .unwrap();
    assert!(artifacts.is_empty());
}

#[test]
fn rerender_overwrites_same_files() {
    let dir = TempDir::new().unwrap();
    let renderer = small_renderer();

    let first = renderer
        .render(&table("Product,Month,Sales\nA,Jan,1\n"), dir.path())
        .unwrap();
    let second = renderer
        .render(&table("Product,Month,Sales\nB,Feb,2\nC,Mar,3\n"), dir.path())
        .unwrap();

    assert_eq!(first, second);
    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 2);
}

#[test]
fn negative_month_total_skips_pie_but_keeps_bar() {
    let dir = TempDir::new().unwrap();
    let table = table("Product,Month,Sales\nA,Jan,10\nB,Feb,-30\n");

    let artifacts = small_renderer().render(&table, dir.path()).unwrap();

    let kinds: Vec<ChartKind> = artifacts.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![ChartKind::CategoricalBar]);
}

#[test]
fn creates_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("charts").join("abc123");

    let artifacts = small_renderer()
        .render(&table("Product,Sales\nA,3\n"), &nested)
        .unwrap();

    assert!(nested.is_dir());
    assert_png(&artifacts[0].path);
}

#[test]
fn non_numeric_sales_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = small_renderer()
        .render(&table("Product,Sales\nA,ten\n"), dir.path())
        .unwrap_err();
    assert!(matches!(err, biz_charts::ChartError::Analysis(_)));
}

#[test]
fn product_total_near_f64_max_skips_bar() {
    let dir = TempDir::new().unwrap();

    let artifacts = small_renderer()
        .render(&table("Product,Sales\nA,1.7e308\n"), dir.path())
        .unwrap();

    assert!(artifacts.is_empty());
    assert!(!dir.path().join(ChartKind::CategoricalBar.file_name()).exists());
}

#[test]
fn overflowing_product_total_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = small_renderer()
        .render(&table("Product,Sales\nA,1e308\nA,1e308\n"), dir.path())
        .unwrap_err();
    assert!(matches!(
        err,
        biz_charts::ChartError::Analysis(biz_analysis::AnalysisError::DataFormat(_))
    ));
}
