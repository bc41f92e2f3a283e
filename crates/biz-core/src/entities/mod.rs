//! Values handed from one pipeline stage to the next.

mod chart;
mod insight;

pub use chart::ChartArtifact;
pub use insight::{GroupTotal, Insight, InsightSet};
