//! # biz-core
//!
//! Types shared by every AutoBiz crate:
//! - Insight findings and their currency presentation
//! - Chart artifact references
//! - Grouping order used by all aggregations
//! - Request identifiers used to namespace per-request files
//! - JSON bodies exchanged over the HTTP API

pub mod currency;
pub mod entities;
pub mod enums;
pub mod ids;
pub mod responses;

pub use currency::CurrencyFormat;
pub use entities::{ChartArtifact, Insight, InsightSet};
pub use enums::{ChartKind, GroupOrder};
pub use ids::RequestId;
