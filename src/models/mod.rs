// Domain models

mod metric;
mod options;
mod report;
mod usage;

pub use metric::Metric;
pub use options::{DEFAULT_PARTITION, ReportOptions};
pub use report::{Report, merged_key};
pub use usage::Usage;
