// Total/free pair read at one instant (RAM or one disk partition)

use crate::models::Metric;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub total: u64,
    pub free: u64,
}

impl Usage {
    pub fn new(total: u64, free: u64) -> Self {
        Self { total, free }
    }

    /// `total - free`; a free value above total (racing reads) counts as nothing used.
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }

    /// Used share of total in percent, 0 when total is unknown.
    pub fn used_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.used() as f64 / self.total as f64 * 100.0
    }

    /// Always exactly `100 - used_percentage()`.
    pub fn free_percentage(&self) -> f64 {
        100.0 - self.used_percentage()
    }

    pub fn used_percentage_metric(&self, format: bool) -> Metric {
        Metric::percent(self.used_percentage(), format)
    }

    /// The formatted free share is derived from the rounded used share so the
    /// two rendered percentages always add up to 100.
    pub fn free_percentage_metric(&self, format: bool) -> Metric {
        if format {
            Metric::percent(100.0 - self.used_percentage().round(), true)
        } else {
            Metric::Float(self.free_percentage())
        }
    }
}
