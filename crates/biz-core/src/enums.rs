//! Small enums shared across the pipeline.
//!
//! All enums use `snake_case` serialization so they read the same in TOML
//! configuration, environment variables and JSON responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// GroupOrder
// ---------------------------------------------------------------------------

/// Order in which grouped aggregates are emitted.
///
/// The order matters twice: it is the order of the per-period insight lines
/// and chart entries, and it decides which group wins a tie for the maximum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GroupOrder {
    /// Order of first appearance in the table.
    #[default]
    FirstSeen,
    /// Lexicographic order of the group key.
    Sorted,
}

impl GroupOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstSeen => "first_seen",
            Self::Sorted => "sorted",
        }
    }
}

impl fmt::Display for GroupOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChartKind
// ---------------------------------------------------------------------------

/// Semantic category of a rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Bar chart of per-product sales totals.
    CategoricalBar,
    /// Pie chart of each month's share of total sales.
    TemporalPie,
}

impl ChartKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CategoricalBar => "categorical_bar",
            Self::TemporalPie => "temporal_pie",
        }
    }

    /// Fixed file name for this kind. Re-rendering into the same directory
    /// overwrites the previous image.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::CategoricalBar => "bar_product_sales.png",
            Self::TemporalPie => "pie_monthly_sales.png",
        }
    }

    /// Caption drawn above the chart.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CategoricalBar => "Product-wise Sales",
            Self::TemporalPie => "Monthly Sales Share",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
