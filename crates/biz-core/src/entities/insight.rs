use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::currency::CurrencyFormat;

/// Sum of a value column for one distinct key of a grouping column.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
}

impl GroupTotal {
    #[must_use]
    pub fn new(key: impl Into<String>, total: f64) -> Self {
        Self {
            key: key.into(),
            total,
        }
    }
}

/// A single derived finding.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    /// Sum of `Sales` over every row.
    Total { amount: f64 },
    /// Product with the largest aggregated `Sales`.
    TopProduct { product: String, amount: f64 },
    /// Aggregated `Sales` for one month.
    Period { period: String, amount: f64 },
}

impl Insight {
    /// Human-readable line for this finding.
    #[must_use]
    pub fn line(&self, currency: &CurrencyFormat) -> String {
        match self {
            Self::Total { amount } => format!("Total sales: {}", currency.format(*amount)),
            Self::TopProduct { product, .. } => format!("Top performing product: {product}"),
            Self::Period { period, amount } => format!("{period}: {}", currency.format(*amount)),
        }
    }
}

/// Ordered findings extracted from a sales table.
///
/// The order is fixed by construction: the total first, then the top
/// product (when a `Product` column exists), then one entry per period in
/// grouping order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InsightSet {
    total: f64,
    row_count: usize,
    /// Rows whose `Sales` cell holds a number.
    value_count: usize,
    top_product: Option<GroupTotal>,
    periods: Vec<GroupTotal>,
}

impl InsightSet {
    /// A set over `row_count` rows, all of them assumed to carry a value.
    #[must_use]
    pub const fn new(total: f64, row_count: usize) -> Self {
        Self {
            total,
            row_count,
            value_count: row_count,
            top_product: None,
            periods: Vec::new(),
        }
    }

    /// Record how many rows actually carry a `Sales` value.
    #[must_use]
    pub fn with_value_count(mut self, value_count: usize) -> Self {
        self.value_count = value_count;
        self
    }

    #[must_use]
    pub fn with_top_product(mut self, top: GroupTotal) -> Self {
        self.top_product = Some(top);
        self
    }

    #[must_use]
    pub fn with_periods(mut self, periods: Vec<GroupTotal>) -> Self {
        self.periods = periods;
        self
    }

    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Number of data rows in the source table.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Rows with a `Sales` value; missing cells are not counted.
    #[must_use]
    pub const fn value_count(&self) -> usize {
        self.value_count
    }

    /// Mean over the rows that carry a value, `None` when there are none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> Option<f64> {
        (self.value_count > 0).then(|| self.total / self.value_count as f64)
    }

    #[must_use]
    pub const fn top_product(&self) -> Option<&GroupTotal> {
        self.top_product.as_ref()
    }

    #[must_use]
    pub fn periods(&self) -> &[GroupTotal] {
        &self.periods
    }

    /// Findings in their fixed order.
    #[must_use]
    pub fn findings(&self) -> Vec<Insight> {
        let mut findings = Vec::with_capacity(2 + self.periods.len());
        findings.push(Insight::Total { amount: self.total });
        if let Some(top) = &self.top_product {
            findings.push(Insight::TopProduct {
                product: top.key.clone(),
                amount: top.total,
            });
        }
        findings.extend(self.periods.iter().map(|p| Insight::Period {
            period: p.key.clone(),
            amount: p.total,
        }));
        findings
    }

    /// One text line per finding.
    #[must_use]
    pub fn lines(&self, currency: &CurrencyFormat) -> Vec<String> {
        self.findings()
            .iter()
            .map(|insight| insight.line(currency))
            .collect()
    }

    /// Newline-joined [`Self::lines`], the input handed to the summarizer.
    #[must_use]
    pub fn text(&self, currency: &CurrencyFormat) -> String {
        self.lines(currency).join("\n")
    }

    /// Dataset statistics used by the offline report: row count, total and
    /// average sale per record (`n/a` when no row has a value).
    #[must_use]
    pub fn summary_lines(&self, currency: &CurrencyFormat) -> Vec<String> {
        let average = self
            .average()
            .map_or_else(|| "n/a".to_string(), |average| currency.format(average));
        vec![
            format!("Total rows in data: {}", self.row_count),
            format!("Total Sales: {}", currency.format(self.total)),
            format!("Average Sales per record: {average}"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> InsightSet {
        InsightSet::new(35.0, 3)
            .with_top_product(GroupTotal::new("A", 30.0))
            .with_periods(vec![GroupTotal::new("Jan", 15.0), GroupTotal::new("Feb", 20.0)])
    }

    #[test]
    fn findings_keep_fixed_order() {
        let findings = sample().findings();
        assert!(matches!(findings[0], Insight::Total { .. }));
        assert!(matches!(findings[1], Insight::TopProduct { .. }));
        assert!(matches!(findings[2], Insight::Period { ref period, .. } if period == "Jan"));
        assert!(matches!(findings[3], Insight::Period { ref period, .. } if period == "Feb"));
    }

    #[test]
    fn lines_use_currency_symbol() {
        let lines = sample().lines(&CurrencyFormat::new("$"));
        assert_eq!(
            lines,
            vec![
                "Total sales: $35.00".to_string(),
                "Top performing product: A".to_string(),
                "Jan: $15.00".to_string(),
                "Feb: $20.00".to_string(),
            ]
        );
    }

    #[test]
    fn total_only_when_no_groups() {
        let set = InsightSet::new(12.5, 2);
        assert_eq!(set.findings(), vec![Insight::Total { amount: 12.5 }]);
    }

    #[test]
    fn average_requires_rows() {
        assert_eq!(InsightSet::new(0.0, 0).average(), None);
        assert_eq!(sample().average(), Some(35.0 / 3.0));
    }

    #[test]
    fn average_ignores_rows_without_value() {
        let set = InsightSet::new(30.0, 3).with_value_count(2);
        assert_eq!(set.average(), Some(15.0));
        assert_eq!(set.row_count(), 3);
    }

    #[test]
    fn summary_without_values_has_no_average() {
        let lines = InsightSet::new(0.0, 2)
            .with_value_count(0)
            .summary_lines(&CurrencyFormat::new("$"));
        assert_eq!(lines[2], "Average Sales per record: n/a");
    }

    #[test]
    fn summary_lines_include_row_count_and_average() {
        let lines = InsightSet::new(40.0, 4).summary_lines(&CurrencyFormat::new("$"));
        assert_eq!(
            lines,
            vec![
                "Total rows in data: 4".to_string(),
                "Total Sales: $40.00".to_string(),
                "Average Sales per record: $10.00".to_string(),
            ]
        );
    }

    #[test]
    fn insight_serializes_with_kind_tag() {
        let json = serde_json::to_value(Insight::Total { amount: 1.0 }).unwrap();
        assert_eq!(json["kind"], "total");
    }
}
