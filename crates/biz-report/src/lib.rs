//! # biz-report
//!
//! Composes a paginated A4 PDF from an ordered list of blocks:
//! - a title, added once by [`Report::new`]
//! - wrapped text in Helvetica 12 pt
//! - raster images scaled to a fixed width
//!
//! Missing or undecodable images never fail a report. They are replaced by
//! a placeholder line and reported through [`Report::warnings`].

mod block;
pub mod error;
mod layout;
mod pdf;
mod report;
pub mod text;

pub use block::{Block, ImageIssue, MissingImageWarning};
pub use error::ReportError;
pub use report::{DEFAULT_FILENAME, REPORTS_DIR, Report};
