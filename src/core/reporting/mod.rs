//! Insight reporting

mod insights;
mod table;

pub use insights::{DateRange, InsightsReporter};
pub use table::ReportTable;
