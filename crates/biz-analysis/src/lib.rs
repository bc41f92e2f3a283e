//! # biz-analysis
//!
//! Loads a CSV sales sheet into an in-memory [`Table`] and derives the
//! aggregates every later stage works from:
//! - [`column_sum`] / [`grouped_sums`] / [`top_group`]: plain aggregations
//! - [`extract_insights`]: total, top product and per-month figures as an
//!   ordered [`InsightSet`](biz_core::InsightSet)
//!
//! Column names used by the sales pipeline are exported as constants.

pub mod aggregate;
pub mod error;
pub mod insights;
pub mod table;

pub use aggregate::{column_sum, grouped_sums, top_group, value_count};
pub use error::AnalysisError;
pub use insights::extract_insights;
pub use table::Table;

/// Numeric column summed by every aggregate.
pub const SALES: &str = "Sales";
/// Categorical column for the per-product breakdown.
pub const PRODUCT: &str = "Product";
/// Temporal column for the per-period breakdown.
pub const MONTH: &str = "Month";
