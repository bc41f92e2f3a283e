//! Sum and max invariants of the insight extractor over generated tables.

use biz_analysis::{Table, extract_insights};
use biz_core::GroupOrder;
use rstest::rstest;
use std::io::Write;

/// Small deterministic generator so the tables differ per case without
/// pulling in a property-testing framework.
fn generate_rows(seed: u64, count: usize) -> Vec<(String, String, i64)> {
    let products = ["Alpha", "Beta", "Gamma", "Delta"];
    let months = ["Jan", "Feb", "Mar"];
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let bits = state >> 33;
            let product = products[(bits % 4) as usize].to_string();
            let month = months[((bits / 4) % 3) as usize].to_string();
            let sales = i64::try_from(bits % 1000).unwrap() - 100;
            (product, month, sales)
        })
        .collect()
}

fn to_csv(rows: &[(String, String, i64)]) -> String {
    let mut text = String::from("Product,Month,Sales\n");
    for (product, month, sales) in rows {
        text.push_str(&format!("{product},{month},{sales}\n"));
    }
    text
}

#[rstest]
#[case(1, 1)]
#[case(7, 12)]
#[case(42, 50)]
#[case(1234, 200)]
fn total_is_column_sum_and_top_product_is_maximal(#[case] seed: u64, #[case] count: usize) {
    let rows = generate_rows(seed, count);
    let table = Table::from_reader(to_csv(&rows).as_bytes()).unwrap();
    let insights = extract_insights(&table, GroupOrder::FirstSeen).unwrap();

    let expected_total: i64 = rows.iter().map(|(_, _, s)| s).sum();
    #[allow(clippy::cast_precision_loss)]
    let expected_total = expected_total as f64;
    assert!((insights.total() - expected_total).abs() < 1e-9);

    let top = insights.top_product().expect("at least one product");
    for candidate in ["Alpha", "Beta", "Gamma", "Delta"] {
        let candidate_total: i64 = rows
            .iter()
            .filter(|(p, _, _)| p == candidate)
            .map(|(_, _, s)| s)
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let candidate_total = candidate_total as f64;
        if rows.iter().any(|(p, _, _)| p == candidate) {
            assert!(top.total >= candidate_total, "{} < {candidate}", top.key);
        }
    }

    let period_total: f64 = insights.periods().iter().map(|p| p.total).sum();
    assert!((period_total - insights.total()).abs() < 1e-9);
}

#[test]
fn loads_from_file_on_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Product,Month,Sales").unwrap();
    writeln!(file, "A,Jan,10").unwrap();
    writeln!(file, "A,Jan,20").unwrap();
    writeln!(file, "B,Feb,5").unwrap();

    let table = Table::from_path(file.path()).unwrap();
    let insights = extract_insights(&table, GroupOrder::FirstSeen).unwrap();
    assert!((insights.total() - 35.0).abs() < f64::EPSILON);
    assert_eq!(insights.top_product().unwrap().key, "A");
    assert_eq!(insights.row_count(), 3);
}
