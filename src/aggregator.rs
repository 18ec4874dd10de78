// Report aggregation: one pass over the dispatch table

use tracing::{debug, instrument};

use crate::dispatcher::Sysinfo;
use crate::metrics::{MetricName, Readings};
use crate::models::{Report, ReportOptions};

impl Report {
    /// Every metric of `MetricName::ALL`, grouped by category in declared order.
    /// RAM and disk figures are read once per report.
    #[instrument(skip(sysinfo), fields(platform = %sysinfo.platform()))]
    pub fn collect(sysinfo: &Sysinfo, options: &ReportOptions) -> Self {
        let adapter = sysinfo.adapter();
        let readings = Readings::take(adapter, options);
        let mut report = Report::new();
        for &name in MetricName::ALL {
            let metric = name.resolve_from(adapter, options, &readings);
            report.insert(name.category(), name.key(), metric);
        }
        debug!(metrics = MetricName::ALL.len(), "report collected");
        report
    }
}
