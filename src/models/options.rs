// Caller options recognized by every report request

use serde::{Deserialize, Serialize};

pub const DEFAULT_PARTITION: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Human-readable strings (`true`) or raw numbers (`false`).
    pub format: bool,
    /// Partition that single-value disk metrics describe.
    pub partition: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: true,
            partition: DEFAULT_PARTITION.into(),
        }
    }
}

impl ReportOptions {
    pub fn raw() -> Self {
        Self {
            format: false,
            ..Self::default()
        }
    }

    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }
}
