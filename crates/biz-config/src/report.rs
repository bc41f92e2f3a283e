//! Report content and presentation settings.

use biz_core::{CurrencyFormat, GroupOrder};
use serde::{Deserialize, Serialize};

fn default_title() -> String {
    String::from("AutoBiz.AI | CSV Business Insights")
}

fn default_offline_title() -> String {
    String::from("AutoBiz Report")
}

fn default_currency_symbol() -> String {
    String::from("₹")
}

fn default_filename() -> String {
    String::from("report.pdf")
}

const fn default_image_width_mm() -> f32 {
    180.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Title of reports generated through `POST /report/`.
    #[serde(default = "default_title")]
    pub title: String,

    /// Title of reports generated by `autobiz report`.
    #[serde(default = "default_offline_title")]
    pub offline_title: String,

    /// Symbol prepended to every amount in insight lines.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// File name used when the caller does not pick one.
    #[serde(default = "default_filename")]
    pub default_filename: String,

    /// Rendered width of chart images in the PDF.
    #[serde(default = "default_image_width_mm")]
    pub image_width_mm: f32,

    /// Emission order of grouped aggregates (and tie-break order).
    #[serde(default)]
    pub group_order: GroupOrder,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            offline_title: default_offline_title(),
            currency_symbol: default_currency_symbol(),
            default_filename: default_filename(),
            image_width_mm: default_image_width_mm(),
            group_order: GroupOrder::default(),
        }
    }
}

impl ReportConfig {
    #[must_use]
    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_symbol.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ReportConfig::default();
        assert_eq!(config.title, "AutoBiz.AI | CSV Business Insights");
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.default_filename, "report.pdf");
        assert!((config.image_width_mm - 180.0).abs() < f32::EPSILON);
        assert_eq!(config.group_order, GroupOrder::FirstSeen);
    }

    #[test]
    fn currency_uses_configured_symbol() {
        let config = ReportConfig {
            currency_symbol: "$".into(),
            ..Default::default()
        };
        assert_eq!(config.currency().format(5.0), "$5.00");
    }
}
