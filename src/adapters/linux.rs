// Linux adapter: /proc, /sys, /etc/os-release, free, lscpu, dmidecode, ip

use tracing::{debug, instrument};

use super::{Base, PlatformAdapter, text};
use crate::detect::Platform;
use crate::units::{self, BYTE_BASE, BYTE_UNITS};

const CPUINFO: &str = "/proc/cpuinfo";
const MEMINFO: &str = "/proc/meminfo";
const LOADAVG: &str = "/proc/loadavg";
const MOUNTS: &str = "/proc/mounts";
const OS_RELEASE: &str = "/etc/os-release";
const SCALING_CUR_FREQ: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq";
const CPUINFO_MAX_FREQ: &str = "/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq";

/// RAM totals read once when the adapter is built, in KB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MemorySnapshot {
    total_kb: u64,
    free_kb: u64,
}

pub struct Linux {
    base: Base,
    memory: MemorySnapshot,
}

impl Linux {
    #[instrument(skip(base))]
    pub fn new(base: Base) -> Self {
        let mut memory = base
            .command("free", &[])
            .and_then(|out| parse_free(&out))
            .unwrap_or_default();
        if let Some(meminfo) = base.file(MEMINFO) {
            if let Some(available) = meminfo_kb(&meminfo, "MemAvailable") {
                memory.free_kb = available;
            }
            if memory.total_kb == 0 {
                memory.total_kb = meminfo_kb(&meminfo, "MemTotal").unwrap_or(0);
            }
        }
        debug!(total_kb = memory.total_kb, free_kb = memory.free_kb, "memory snapshot");
        Self { base, memory }
    }

    fn cpuinfo(&self) -> Option<String> {
        self.base.file(CPUINFO)
    }

    fn lscpu(&self, key: &str) -> Option<String> {
        let out = self.base.command("lscpu", &[])?;
        text::field(&out, key, ':').map(str::to_string)
    }

    fn processor_records(&self) -> Option<u64> {
        self.cpuinfo().map(|info| count_processor_records(&info))
    }
}

impl PlatformAdapter for Linux {
    fn base(&self) -> &Base {
        &self.base
    }

    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn cpu_cores(&self) -> u64 {
        self.processor_records().unwrap_or(1)
    }

    fn cpu_free(&self) -> u64 {
        let Some(load) = self.base.file(LOADAVG).and_then(|l| first_number(&l)) else {
            return 0;
        };
        idle_percent(load, self.cpu_processors())
    }

    fn cpu_frequency_hz(&self) -> u64 {
        self.base
            .file(CPUINFO_MAX_FREQ)
            .and_then(|f| f.trim().parse::<u64>().ok())
            .map(|khz| khz * 1000)
            .or_else(|| {
                self.lscpu("CPU max MHz")
                    .and_then(|mhz| mhz.parse::<f64>().ok())
                    .map(|mhz| (mhz * 1_000_000.0).round() as u64)
            })
            .unwrap_or_else(|| self.cpu_speed_hz())
    }

    fn cpu_name(&self) -> String {
        self.cpuinfo()
            .and_then(|info| cpu_model(&info))
            .or_else(|| self.lscpu("Model name"))
            .unwrap_or_default()
    }

    fn cpu_processors(&self) -> u64 {
        self.lscpu("CPU(s)")
            .and_then(|n| n.parse().ok())
            .or_else(|| self.processor_records())
            .unwrap_or(0)
    }

    fn cpu_speed_hz(&self) -> u64 {
        self.base
            .file(SCALING_CUR_FREQ)
            .and_then(|f| f.trim().parse::<u64>().ok())
            .map(|khz| khz * 1000)
            .or_else(|| {
                let info = self.cpuinfo()?;
                let mhz: f64 = text::field(&info, "cpu MHz", ':')?.parse().ok()?;
                Some((mhz * 1_000_000.0).round() as u64)
            })
            .unwrap_or(0)
    }

    fn cpu_vendor(&self) -> String {
        self.cpuinfo()
            .and_then(|info| text::field(&info, "vendor_id", ':').map(str::to_string))
            .or_else(|| self.lscpu("Vendor ID"))
            .unwrap_or_default()
    }

    fn disk_partitions(&self) -> Vec<String> {
        self.base
            .file(MOUNTS)
            .map(|m| device_mount_points(&m))
            .unwrap_or_default()
    }

    fn ram_free_bytes(&self) -> u64 {
        self.memory.free_kb * 1024
    }

    fn ram_total_bytes(&self) -> u64 {
        self.memory.total_kb * 1024
    }

    fn ram_list_bytes(&self) -> Vec<u64> {
        self.base
            .command("dmidecode", &["-t", "memory"])
            .map(|out| dmidecode_module_sizes(&out))
            .unwrap_or_default()
    }

    fn os_release(&self) -> String {
        self.base
            .file(OS_RELEASE)
            .and_then(|r| pretty_name(&r))
            .or_else(|| self.base.command_line("uname", &["-rs"]))
            .unwrap_or_default()
    }

    fn platform_ips(&self) -> Vec<String> {
        self.base
            .command("ip", &["-4", "addr", "show"])
            .map(|out| {
                text::find_ips(&out, "inet ")
                    .into_iter()
                    .map(|ip| strip_prefix_len(&ip))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn mac_address(&self) -> Option<String> {
        self.base
            .command("ip", &["link", "show"])
            .and_then(|out| text::find_mac_address(&out, "link/ether "))
            .and_then(|value| text::first_mac(&value))
            .or_else(|| self.base.shared_mac())
    }
}

/// Total and "free" KB from the `Mem:` row of `free`: fields 1 and 2 of the second line.
fn parse_free(output: &str) -> Option<MemorySnapshot> {
    let row = output.trim().lines().nth(1)?;
    let fields: Vec<&str> = row.split_whitespace().collect();
    Some(MemorySnapshot {
        total_kb: fields.get(1)?.parse().ok()?,
        free_kb: fields.get(2)?.parse().ok()?,
    })
}

fn meminfo_kb(meminfo: &str, key: &str) -> Option<u64> {
    text::field(meminfo, key, ':')?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

fn count_processor_records(cpuinfo: &str) -> u64 {
    cpuinfo
        .lines()
        .filter(|l| l.starts_with("processor"))
        .count() as u64
}

/// First "model name" from /proc/cpuinfo.
fn cpu_model(cpuinfo: &str) -> Option<String> {
    text::field(cpuinfo, "model name", ':')
        .filter(|s| !s.is_empty() && *s != "cpu0")
        .map(str::to_string)
}

/// PRETTY_NAME from /etc/os-release, falling back to NAME.
fn pretty_name(os_release: &str) -> Option<String> {
    ["PRETTY_NAME", "NAME"].iter().find_map(|key| {
        let v = text::field(os_release, key, '=')?.trim_matches('"');
        (!v.is_empty()).then(|| v.to_string())
    })
}

/// Mount points of block devices in /proc/mounts, in mount order, without repeats.
fn device_mount_points(mounts: &str) -> Vec<String> {
    let mut points: Vec<String> = Vec::new();
    for line in mounts.lines() {
        let mut fields = line.split_whitespace();
        let (Some(device), Some(mount)) = (fields.next(), fields.next()) else {
            continue;
        };
        if !device.starts_with("/dev/") || device.starts_with("/dev/loop") {
            continue;
        }
        let mount = mount.replace("\\040", " ");
        if !points.contains(&mount) {
            points.push(mount);
        }
    }
    points
}

/// `Size:` lines of `dmidecode -t memory`; empty slots are skipped.
fn dmidecode_module_sizes(output: &str) -> Vec<u64> {
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("Size:"))
        .filter_map(|size| units::parse_size(size, BYTE_UNITS, BYTE_BASE))
        .filter(|&bytes| bytes > 0)
        .collect()
}

fn strip_prefix_len(cidr: &str) -> String {
    cidr.split('/').next().unwrap_or(cidr).to_string()
}

pub(super) fn first_number(text: &str) -> Option<f64> {
    text.split(|c: char| c.is_whitespace() || c == '{' || c == '}')
        .find(|s| !s.is_empty())?
        .parse()
        .ok()
}

/// Idle share from the 1-minute load average spread over `processors`.
pub(super) fn idle_percent(load: f64, processors: u64) -> u64 {
    if processors == 0 {
        return 0;
    }
    let busy = load / processors as f64 * 100.0;
    (100.0 - busy).clamp(0.0, 100.0).round() as u64
}
