pub mod dispatch;
pub mod insights;
pub mod report;
pub mod schema;
pub mod serve;
