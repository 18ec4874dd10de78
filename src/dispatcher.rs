// Sysinfo: the context object that selects, holds and answers through one adapter

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use tracing::debug;

use crate::adapters::{Adapter, Base, PlatformAdapter};
use crate::config::{AppConfig, RuntimeConfig};
use crate::detect::Platform;
use crate::error::SysinfoError;
use crate::metrics::MetricName;
use crate::models::{Metric, Report, ReportOptions};
use crate::probe::{SysinfoProbe, SystemProbe};
use crate::source::{ProcessTextSource, TextSource};

/// Entry point for metric queries.
///
/// The adapter for `platform` is built on first use and reused for every
/// later call on the same `Sysinfo`.
pub struct Sysinfo {
    platform: Platform,
    base: Base,
    adapter: OnceLock<Adapter>,
}

impl Sysinfo {
    /// Real processes, real files, the running platform.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_sources(
            Platform::current(),
            Arc::new(ProcessTextSource::new(&config.commands)),
            Arc::new(SysinfoProbe),
            config.runtime.clone(),
        )
    }

    pub fn with_sources(
        platform: Platform,
        text: Arc<dyn TextSource>,
        system: Arc<dyn SystemProbe>,
        runtime: RuntimeConfig,
    ) -> Self {
        Self {
            platform,
            base: Base::new(text, system, runtime),
            adapter: OnceLock::new(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn adapter(&self) -> &dyn PlatformAdapter {
        self.adapter
            .get_or_init(|| {
                debug!(platform = %self.platform, "selecting adapter");
                Adapter::new(self.platform, self.base.clone())
            })
            .contract()
    }

    pub fn get(&self, name: MetricName, options: &ReportOptions) -> Metric {
        name.resolve(self.adapter(), options)
    }

    /// Look a metric up by name (`cpuCores`, `computerHostname`, ...).
    pub fn metric(&self, name: &str, options: &ReportOptions) -> Result<Metric, SysinfoError> {
        let name: MetricName = name.parse()?;
        Ok(self.get(name, options))
    }

    pub fn report(&self, options: &ReportOptions) -> Report {
        Report::collect(self, options)
    }

    pub fn report_merged(&self, options: &ReportOptions) -> IndexMap<String, Metric> {
        self.report(options).merged()
    }
}
