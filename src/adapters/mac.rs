// macOS adapter: sysctl, hostinfo, ps, uname, mount, ifconfig, system_profiler

use tracing::{debug, instrument};

use super::linux::{first_number, idle_percent};
use super::{Base, PlatformAdapter, text};
use crate::detect::Platform;
use crate::units::{self, BYTE_BASE, BYTE_UNITS};

const GIB: u64 = 1024 * 1024 * 1024;

pub struct Mac {
    base: Base,
}

impl Mac {
    #[instrument(skip(base))]
    pub fn new(base: Base) -> Self {
        Self { base }
    }

    fn sysctl(&self, name: &str) -> Option<String> {
        self.base.command_line("sysctl", &["-n", name])
    }

    fn sysctl_u64(&self, name: &str) -> Option<u64> {
        self.sysctl(name)?.parse().ok()
    }
}

impl PlatformAdapter for Mac {
    fn base(&self) -> &Base {
        &self.base
    }

    fn platform(&self) -> Platform {
        Platform::Mac
    }

    fn cpu_cores(&self) -> u64 {
        self.sysctl_u64("hw.ncpu").unwrap_or(0)
    }

    fn cpu_free(&self) -> u64 {
        let Some(load) = self.sysctl("vm.loadavg").and_then(|l| first_number(&l)) else {
            return 0;
        };
        idle_percent(load, self.cpu_processors())
    }

    fn cpu_frequency_hz(&self) -> u64 {
        self.sysctl_u64("hw.cpufrequency_max")
            .unwrap_or_else(|| self.cpu_speed_hz())
    }

    fn cpu_name(&self) -> String {
        self.sysctl("machdep.cpu.brand_string").unwrap_or_default()
    }

    fn cpu_processors(&self) -> u64 {
        self.sysctl_u64("hw.logicalcpu").unwrap_or(0)
    }

    /// Not exposed on Apple silicon; 0 there.
    fn cpu_speed_hz(&self) -> u64 {
        self.sysctl_u64("hw.cpufrequency").unwrap_or(0)
    }

    fn cpu_vendor(&self) -> String {
        self.sysctl("machdep.cpu.vendor")
            .or_else(|| {
                self.cpu_name()
                    .starts_with("Apple")
                    .then(|| "Apple".to_string())
            })
            .unwrap_or_default()
    }

    fn disk_partitions(&self) -> Vec<String> {
        self.base
            .command("mount", &[])
            .map(|out| mount_points(&out))
            .unwrap_or_default()
    }

    /// Sum of every process' resident set.
    fn ram_free_bytes(&self) -> u64 {
        self.base
            .command("ps", &["-caxm", "-orss="])
            .map(|out| sum_rss_kb(&out) * 1024)
            .unwrap_or(0)
    }

    fn ram_total_bytes(&self) -> u64 {
        match self.sysctl_u64("hw.memsize") {
            Some(total) if total > 0 => total,
            _ => {
                debug!("hw.memsize unavailable, trying hostinfo");
                self.base
                    .command("hostinfo", &[])
                    .and_then(|out| hostinfo_memory(&out))
                    .unwrap_or(0)
            }
        }
    }

    fn ram_list_bytes(&self) -> Vec<u64> {
        self.base
            .command("system_profiler", &["SPMemoryDataType"])
            .map(|out| profiler_module_sizes(&out))
            .unwrap_or_default()
    }

    fn os_release(&self) -> String {
        self.base.command_line("uname", &["-rs"]).unwrap_or_default()
    }

    fn platform_ips(&self) -> Vec<String> {
        self.base
            .command("ifconfig", &[])
            .map(|out| text::find_ips(&out, "inet "))
            .unwrap_or_default()
    }

    fn mac_address(&self) -> Option<String> {
        self.base
            .command("ifconfig", &["en0"])
            .and_then(|out| text::find_mac_address(&out, "ether "))
            .and_then(|value| text::first_mac(&value))
            .or_else(|| self.base.shared_mac())
    }
}

fn sum_rss_kb(ps: &str) -> u64 {
    ps.lines().filter_map(|l| l.trim().parse::<u64>().ok()).sum()
}

/// `Primary memory available: 16.00 gigabytes` -> bytes (GiB based).
fn hostinfo_memory(hostinfo: &str) -> Option<u64> {
    let value = text::field(hostinfo, "Primary memory available", ':')?;
    let gigabytes: f64 = value.trim_end_matches("gigabytes").trim().parse().ok()?;
    Some((gigabytes * GIB as f64).round() as u64)
}

/// Mount points of `/dev/*` devices: `/dev/disk3s1s1 on / (apfs, ...)`.
fn mount_points(mount: &str) -> Vec<String> {
    let mut points: Vec<String> = Vec::new();
    for line in mount.lines().filter(|l| l.starts_with("/dev/")) {
        let Some((_, rest)) = line.split_once(" on ") else {
            continue;
        };
        let point = rest.rsplit_once(" (").map(|(p, _)| p).unwrap_or(rest);
        if !points.iter().any(|p| p == point) {
            points.push(point.to_string());
        }
    }
    points
}

/// Module sizes from `system_profiler SPMemoryDataType`. Intel Macs list
/// `Size:` per slot; Apple silicon only reports one `Memory:` total.
fn profiler_module_sizes(output: &str) -> Vec<u64> {
    let sizes = |prefix: &str| -> Vec<u64> {
        output
            .lines()
            .filter_map(|line| line.trim().strip_prefix(prefix))
            .filter_map(|size| units::parse_size(size, BYTE_UNITS, BYTE_BASE))
            .filter(|&bytes| bytes > 0)
            .collect()
    };
    let slots = sizes("Size:");
    if slots.is_empty() {
        sizes("Memory:")
    } else {
        slots
    }
}
