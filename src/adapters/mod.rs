// Platform adapters: the capability contract and one implementation per OS family

mod base;
mod linux;
mod mac;
pub mod text;
mod windows;

use indexmap::IndexMap;
use tracing::instrument;

pub use base::Base;
pub use linux::Linux;
pub use mac::Mac;
pub use windows::Windows;

use crate::detect::Platform;
use crate::models::{Metric, Usage};

/// What every adapter can answer.
///
/// Required methods are the per-platform primitives and return raw values;
/// anything a platform cannot determine comes back as `0`, `""`, an empty
/// list or `None`. Provided methods build the rest on top of them and the
/// shared [`Base`], and render raw values when `format` is set.
pub trait PlatformAdapter: Send + Sync {
    fn base(&self) -> &Base;
    fn platform(&self) -> Platform;

    fn cpu_cores(&self) -> u64;
    /// Idle share of the CPU in percent.
    fn cpu_free(&self) -> u64;
    /// Rated (maximum) clock in Hz.
    fn cpu_frequency_hz(&self) -> u64;
    fn cpu_name(&self) -> String;
    fn cpu_processors(&self) -> u64;
    /// Current clock in Hz.
    fn cpu_speed_hz(&self) -> u64;
    fn cpu_vendor(&self) -> String;

    fn disk_partitions(&self) -> Vec<String>;

    fn ram_free_bytes(&self) -> u64;
    /// Capacity of each installed memory module.
    fn ram_list_bytes(&self) -> Vec<u64>;

    fn os_release(&self) -> String;
    /// Addresses found by the platform's own interface tool.
    fn platform_ips(&self) -> Vec<String>;
    fn mac_address(&self) -> Option<String>;

    // CPU

    fn cpu_architecture(&self) -> String {
        self.base().architecture()
    }

    fn cpu_frequency(&self, format: bool) -> Metric {
        Metric::hertz(self.cpu_frequency_hz(), format)
    }

    fn cpu_speed(&self, format: bool) -> Metric {
        Metric::hertz(self.cpu_speed_hz(), format)
    }

    // Disk

    fn disk_usage(&self, partition: &str) -> Usage {
        self.base().disk_usage(partition)
    }

    fn disk_total_bytes(&self, partition: &str) -> u64 {
        self.disk_usage(partition).total
    }

    fn disk_free_bytes(&self, partition: &str) -> u64 {
        self.disk_usage(partition).free
    }

    fn disk_total(&self, format: bool, partition: &str) -> Metric {
        Metric::bytes(self.disk_total_bytes(partition), format)
    }

    fn disk_free(&self, format: bool, partition: &str) -> Metric {
        Metric::bytes(self.disk_free_bytes(partition), format)
    }

    fn disk_used(&self, format: bool, partition: &str) -> Metric {
        Metric::bytes(self.disk_usage(partition).used(), format)
    }

    fn disk_used_percentage(&self, format: bool, partition: &str) -> Metric {
        self.disk_usage(partition).used_percentage_metric(format)
    }

    fn disk_free_percentage(&self, format: bool, partition: &str) -> Metric {
        self.disk_usage(partition).free_percentage_metric(format)
    }

    /// Usage of every listed partition, taken from one disk listing.
    fn disk_partition_usages(&self) -> IndexMap<String, Usage> {
        self.base().disk_usages(&self.disk_partitions())
    }

    /// Sum of the totals of every listed partition.
    fn disk_capacity_bytes(&self) -> u64 {
        self.disk_partition_usages().values().map(|u| u.total).sum()
    }

    fn disk_capacity(&self, format: bool) -> Metric {
        Metric::bytes(self.disk_capacity_bytes(), format)
    }

    fn disk_count_partitions(&self) -> u64 {
        self.disk_partitions().len() as u64
    }

    fn disk_partitions_spaces(&self, format: bool) -> IndexMap<String, Metric> {
        partition_totals(&self.disk_partition_usages(), format)
    }

    // Memory

    fn ram_total_bytes(&self) -> u64 {
        self.ram_list_bytes().iter().sum()
    }

    /// Total and free read together, so `used = total - free` holds for one reading.
    fn ram_usage(&self) -> Usage {
        Usage::new(self.ram_total_bytes(), self.ram_free_bytes())
    }

    fn ram_list(&self, format: bool) -> Metric {
        Metric::List(
            self.ram_list_bytes()
                .into_iter()
                .map(|b| Metric::bytes(b, format))
                .collect(),
        )
    }

    fn ram_total(&self, format: bool) -> Metric {
        Metric::bytes(self.ram_total_bytes(), format)
    }

    fn ram_free(&self, format: bool) -> Metric {
        Metric::bytes(self.ram_free_bytes(), format)
    }

    fn ram_used(&self, format: bool) -> Metric {
        Metric::bytes(self.ram_usage().used(), format)
    }

    fn ram_used_percentage(&self, format: bool) -> Metric {
        self.ram_usage().used_percentage_metric(format)
    }

    fn ram_free_percentage(&self, format: bool) -> Metric {
        self.ram_usage().free_percentage_metric(format)
    }

    fn ram_count(&self) -> u64 {
        self.ram_list_bytes().len() as u64
    }

    // Host

    fn hostname(&self) -> String {
        self.base().hostname()
    }

    fn kernel(&self) -> String {
        self.base().kernel()
    }

    /// Tag of the implementing adapter, not a query.
    fn os(&self) -> String {
        self.platform().tag().to_string()
    }

    /// Interface-list addresses merged with the platform tool's, first seen first.
    fn ips_address(&self) -> Vec<String> {
        text::merge_unique([self.base().shared_ips(), self.platform_ips()])
    }

    fn ip_address(&self) -> String {
        base::primary_ip(&self.ips_address())
    }

    // Runtime

    fn memory_limit(&self, format: bool) -> Metric {
        Metric::bytes(self.base().memory_limit_bytes(), format)
    }

    fn memory_usage(&self, format: bool) -> Metric {
        Metric::bytes(self.base().memory_usage_bytes(), format)
    }

    fn execution_time_limit(&self) -> u64 {
        self.base().execution_time_limit()
    }
}

/// Partition -> total, rendered when `format` is set.
pub(crate) fn partition_totals(
    usages: &IndexMap<String, Usage>,
    format: bool,
) -> IndexMap<String, Metric> {
    usages
        .iter()
        .map(|(p, u)| (p.clone(), Metric::bytes(u.total, format)))
        .collect()
}

/// The closed set of adapters; exactly one is built per context.
pub enum Adapter {
    Linux(Linux),
    Mac(Mac),
    Windows(Windows),
}

impl Adapter {
    #[instrument(skip(base))]
    pub fn new(platform: Platform, base: Base) -> Self {
        match platform {
            Platform::Linux => Adapter::Linux(Linux::new(base)),
            Platform::Mac => Adapter::Mac(Mac::new(base)),
            Platform::Windows => Adapter::Windows(Windows::new(base)),
        }
    }

    pub fn contract(&self) -> &dyn PlatformAdapter {
        match self {
            Adapter::Linux(a) => a,
            Adapter::Mac(a) => a,
            Adapter::Windows(a) => a,
        }
    }

    pub fn platform(&self) -> Platform {
        self.contract().platform()
    }
}
