// Explicit dispatch table: every metric name, its category and the adapter call behind it

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::adapters::{PlatformAdapter, partition_totals};
use crate::error::SysinfoError;
use crate::models::{Metric, ReportOptions, Usage, merged_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Computer,
    Cpu,
    Disk,
    Runtime,
    Ram,
}

impl Category {
    /// Report order.
    pub const ALL: [Category; 5] = [
        Category::Computer,
        Category::Cpu,
        Category::Disk,
        Category::Runtime,
        Category::Ram,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Computer => "computer",
            Category::Cpu => "cpu",
            Category::Disk => "disk",
            Category::Runtime => "runtime",
            Category::Ram => "ram",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! metric_names {
    ($($variant:ident => ($category:ident, $key:literal, $method:literal),)+) => {
        /// Every metric a report carries.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MetricName {
            $($variant,)+
        }

        impl MetricName {
            /// Declared order, which is also report order.
            pub const ALL: &'static [MetricName] = &[$(MetricName::$variant,)+];

            pub fn category(self) -> Category {
                match self {
                    $(MetricName::$variant => Category::$category,)+
                }
            }

            /// Key inside the category, e.g. `cores`.
            pub fn key(self) -> &'static str {
                match self {
                    $(MetricName::$variant => $key,)+
                }
            }

            /// Name as callers request it, e.g. `cpuCores` or `hostname`.
            pub fn method(self) -> &'static str {
                match self {
                    $(MetricName::$variant => $method,)+
                }
            }
        }
    };
}

metric_names! {
    Hostname => (Computer, "hostname", "hostname"),
    IpAddress => (Computer, "ipAddress", "ipAddress"),
    IpsAddress => (Computer, "ipsAddress", "ipsAddress"),
    Kernel => (Computer, "kernel", "kernel"),
    MacAddress => (Computer, "macAddress", "macAddress"),
    Os => (Computer, "os", "os"),
    OsRelease => (Computer, "osRelease", "osRelease"),

    CpuArchitecture => (Cpu, "architecture", "cpuArchitecture"),
    CpuCores => (Cpu, "cores", "cpuCores"),
    CpuFree => (Cpu, "free", "cpuFree"),
    CpuFrequency => (Cpu, "frequency", "cpuFrequency"),
    CpuName => (Cpu, "name", "cpuName"),
    CpuProcessors => (Cpu, "processors", "cpuProcessors"),
    CpuSpeed => (Cpu, "speed", "cpuSpeed"),
    CpuVendor => (Cpu, "vendor", "cpuVendor"),

    DiskCapacity => (Disk, "capacity", "diskCapacity"),
    DiskCountPartitions => (Disk, "countPartitions", "diskCountPartitions"),
    DiskFree => (Disk, "free", "diskFree"),
    DiskFreePercentage => (Disk, "freePercentage", "diskFreePercentage"),
    DiskPartitions => (Disk, "partitions", "diskPartitions"),
    DiskPartitionsSpaces => (Disk, "partitionsSpaces", "diskPartitionsSpaces"),
    DiskTotal => (Disk, "total", "diskTotal"),
    DiskUsed => (Disk, "used", "diskUsed"),
    DiskUsedPercentage => (Disk, "usedPercentage", "diskUsedPercentage"),

    MemoryLimit => (Runtime, "memoryLimit", "memoryLimit"),
    MemoryUsage => (Runtime, "memoryUsage", "memoryUsage"),
    ExecutionTimeLimit => (Runtime, "executionTimeLimit", "executionTimeLimit"),

    RamCount => (Ram, "count", "ramCount"),
    RamFree => (Ram, "free", "ramFree"),
    RamFreePercentage => (Ram, "freePercentage", "ramFreePercentage"),
    RamList => (Ram, "list", "ramList"),
    RamTotal => (Ram, "total", "ramTotal"),
    RamUsed => (Ram, "used", "ramUsed"),
    RamUsedPercentage => (Ram, "usedPercentage", "ramUsedPercentage"),
}

impl MetricName {
    /// Key in the merged report, e.g. `computerHostname`.
    pub fn merged_key(self) -> String {
        merged_key(self.category().as_str(), self.key())
    }

    /// Ask `adapter` for this metric.
    pub fn resolve(self, adapter: &dyn PlatformAdapter, options: &ReportOptions) -> Metric {
        let format = options.format;
        let partition = options.partition.as_str();
        match self {
            MetricName::Hostname => adapter.hostname().into(),
            MetricName::IpAddress => adapter.ip_address().into(),
            MetricName::IpsAddress => adapter.ips_address().into(),
            MetricName::Kernel => adapter.kernel().into(),
            MetricName::MacAddress => adapter.mac_address().into(),
            MetricName::Os => adapter.os().into(),
            MetricName::OsRelease => adapter.os_release().into(),

            MetricName::CpuArchitecture => adapter.cpu_architecture().into(),
            MetricName::CpuCores => adapter.cpu_cores().into(),
            MetricName::CpuFree => adapter.cpu_free().into(),
            MetricName::CpuFrequency => adapter.cpu_frequency(format),
            MetricName::CpuName => adapter.cpu_name().into(),
            MetricName::CpuProcessors => adapter.cpu_processors().into(),
            MetricName::CpuSpeed => adapter.cpu_speed(format),
            MetricName::CpuVendor => adapter.cpu_vendor().into(),

            MetricName::DiskCapacity => adapter.disk_capacity(format),
            MetricName::DiskCountPartitions => adapter.disk_count_partitions().into(),
            MetricName::DiskFree => adapter.disk_free(format, partition),
            MetricName::DiskFreePercentage => adapter.disk_free_percentage(format, partition),
            MetricName::DiskPartitions => adapter.disk_partitions().into(),
            MetricName::DiskPartitionsSpaces => Metric::Map(adapter.disk_partitions_spaces(format)),
            MetricName::DiskTotal => adapter.disk_total(format, partition),
            MetricName::DiskUsed => adapter.disk_used(format, partition),
            MetricName::DiskUsedPercentage => adapter.disk_used_percentage(format, partition),

            MetricName::MemoryLimit => adapter.memory_limit(format),
            MetricName::MemoryUsage => adapter.memory_usage(format),
            MetricName::ExecutionTimeLimit => adapter.execution_time_limit().into(),

            MetricName::RamCount => adapter.ram_count().into(),
            MetricName::RamFree => adapter.ram_free(format),
            MetricName::RamFreePercentage => adapter.ram_free_percentage(format),
            MetricName::RamList => adapter.ram_list(format),
            MetricName::RamTotal => adapter.ram_total(format),
            MetricName::RamUsed => adapter.ram_used(format),
            MetricName::RamUsedPercentage => adapter.ram_used_percentage(format),
        }
    }
}

/// RAM and disk figures read once and shared by every metric of a report.
///
/// `ram` and `disk` each come from a single query, so used, free and both
/// percentages of one report always describe the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Readings {
    pub ram: Usage,
    pub disk: Usage,
    pub partitions: IndexMap<String, Usage>,
}

impl Readings {
    pub fn take(adapter: &dyn PlatformAdapter, options: &ReportOptions) -> Self {
        let partitions = adapter.disk_partition_usages();
        let disk = match partitions.get(&options.partition) {
            Some(usage) => *usage,
            None => adapter.disk_usage(&options.partition),
        };
        Self {
            ram: adapter.ram_usage(),
            disk,
            partitions,
        }
    }
}

impl MetricName {
    /// Like [`MetricName::resolve`], but RAM and disk figures come from `readings`.
    pub fn resolve_from(
        self,
        adapter: &dyn PlatformAdapter,
        options: &ReportOptions,
        readings: &Readings,
    ) -> Metric {
        let format = options.format;
        let Readings {
            ram,
            disk,
            partitions,
        } = readings;
        match self {
            MetricName::DiskCapacity => {
                Metric::bytes(partitions.values().map(|u| u.total).sum(), format)
            }
            MetricName::DiskCountPartitions => (partitions.len() as u64).into(),
            MetricName::DiskFree => Metric::bytes(disk.free, format),
            MetricName::DiskFreePercentage => disk.free_percentage_metric(format),
            MetricName::DiskPartitions => partitions.keys().cloned().collect::<Vec<_>>().into(),
            MetricName::DiskPartitionsSpaces => Metric::Map(partition_totals(partitions, format)),
            MetricName::DiskTotal => Metric::bytes(disk.total, format),
            MetricName::DiskUsed => Metric::bytes(disk.used(), format),
            MetricName::DiskUsedPercentage => disk.used_percentage_metric(format),

            MetricName::RamFree => Metric::bytes(ram.free, format),
            MetricName::RamFreePercentage => ram.free_percentage_metric(format),
            MetricName::RamTotal => Metric::bytes(ram.total, format),
            MetricName::RamUsed => Metric::bytes(ram.used(), format),
            MetricName::RamUsedPercentage => ram.used_percentage_metric(format),

            _ => self.resolve(adapter, options),
        }
    }
}

impl FromStr for MetricName {
    type Err = SysinfoError;

    /// Accepts the method name (`cpuCores`, `hostname`) or the merged key (`computerHostname`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricName::ALL
            .iter()
            .copied()
            .find(|m| m.method() == s || m.merged_key() == s)
            .ok_or_else(|| SysinfoError::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}
