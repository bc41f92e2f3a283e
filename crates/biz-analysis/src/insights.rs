//! Sales insight extraction.

use biz_core::{GroupOrder, InsightSet};

use crate::aggregate::{column_sum, grouped_sums, top_group, value_count};
use crate::error::AnalysisError;
use crate::table::Table;
use crate::{MONTH, PRODUCT, SALES};

/// Derive the total, the top product and the per-month totals.
///
/// `Sales` is mandatory. Without a `Product` column there is no top
/// product; without a `Month` column there are no period entries.
///
/// # Errors
///
/// [`AnalysisError::MissingColumn`] when `Sales` is absent and
/// [`AnalysisError::NonNumericValue`] when a `Sales` cell is not a number.
pub fn extract_insights(table: &Table, order: GroupOrder) -> Result<InsightSet, AnalysisError> {
    let total = column_sum(table, SALES)?;
    let mut insights =
        InsightSet::new(total, table.len()).with_value_count(value_count(table, SALES)?);

    if table.has_column(PRODUCT) {
        let products = grouped_sums(table, PRODUCT, SALES, order)?;
        if let Some(top) = top_group(&products) {
            insights = insights.with_top_product(top.clone());
        }
    } else {
        tracing::debug!("no {PRODUCT} column; skipping top product");
    }

    if table.has_column(MONTH) {
        insights = insights.with_periods(grouped_sums(table, MONTH, SALES, order)?);
    } else {
        tracing::debug!("no {MONTH} column; skipping per-period totals");
    }

    Ok(insights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use biz_core::{CurrencyFormat, Insight};
    use pretty_assertions::assert_eq;

    fn table(text: &str) -> Table {
        Table::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn worked_example() {
        let t = table("Product,Month,Sales\nA,Jan,10\nA,Feb,20\nB,Jan,5\n");
        let insights = extract_insights(&t, GroupOrder::FirstSeen).unwrap();

        assert!((insights.total() - 35.0).abs() < f64::EPSILON);
        let top = insights.top_product().unwrap();
        assert_eq!(top.key, "A");
        assert!((top.total - 30.0).abs() < f64::EPSILON);

        let period_sum: f64 = insights.periods().iter().map(|p| p.total).sum();
        assert!((period_sum - insights.total()).abs() < f64::EPSILON);

        assert_eq!(
            insights.lines(&CurrencyFormat::new("$")),
            vec![
                "Total sales: $35.00".to_string(),
                "Top performing product: A".to_string(),
                "Jan: $15.00".to_string(),
                "Feb: $20.00".to_string(),
            ]
        );
    }

    #[test]
    fn blank_sales_cells_do_not_lower_the_average() {
        let t = table("Product,Sales\nA,10\nB,\nC,20\n");
        let insights = extract_insights(&t, GroupOrder::FirstSeen).unwrap();

        assert_eq!(insights.average(), Some(15.0));
        assert_eq!(
            insights.summary_lines(&CurrencyFormat::new("$")),
            vec![
                "Total rows in data: 3".to_string(),
                "Total Sales: $30.00".to_string(),
                "Average Sales per record: $15.00".to_string(),
            ]
        );
    }

    #[test]
    fn huge_sales_total_is_a_format_error() {
        let t = table("Product,Sales\nA,1e308\nB,1e308\n");
        let err = extract_insights(&t, GroupOrder::FirstSeen).unwrap_err();
        assert!(matches!(err, AnalysisError::DataFormat(_)));
    }

    #[test]
    fn missing_sales_fails() {
        let t = table("Product,Month\nA,Jan\n");
        let err = extract_insights(&t, GroupOrder::FirstSeen).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(c) if c == "Sales"));
    }

    #[test]
    fn missing_month_keeps_total_and_top_product() {
        let t = table("Product,Sales\nA,10\nA,20\nB,5\n");
        let insights = extract_insights(&t, GroupOrder::FirstSeen).unwrap();
        assert_eq!(insights.findings().len(), 2);
        assert!(insights.periods().is_empty());
    }

    #[test]
    fn missing_product_keeps_total_and_periods() {
        let t = table("Month,Sales\nJan,1\nFeb,2\n");
        let insights = extract_insights(&t, GroupOrder::FirstSeen).unwrap();
        assert!(insights.top_product().is_none());
        assert!(matches!(insights.findings()[1], Insight::Period { .. }));
    }

    #[test]
    fn tie_follows_group_order() {
        let t = table("Product,Sales\nZed,10\nAlpha,10\n");
        let first_seen = extract_insights(&t, GroupOrder::FirstSeen).unwrap();
        let sorted = extract_insights(&t, GroupOrder::Sorted).unwrap();
        assert_eq!(first_seen.top_product().unwrap().key, "Zed");
        assert_eq!(sorted.top_product().unwrap().key, "Alpha");
    }
}
