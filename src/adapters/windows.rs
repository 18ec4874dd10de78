// Windows adapter: wmic, fsutil, ipconfig

use tracing::{debug, instrument};

use super::{Base, PlatformAdapter, text};
use crate::detect::Platform;
use crate::models::Usage;
use crate::units::{self, HZ_BASE, HZ_UNITS};

pub struct Windows {
    base: Base,
}

impl Windows {
    #[instrument(skip(base))]
    pub fn new(base: Base) -> Self {
        Self { base }
    }

    /// `wmic <class> get <property>`: first value under the header.
    fn wmic(&self, class: &str, property: &str) -> Option<String> {
        let out = self.base.command("wmic", &[class, "get", property])?;
        first_value(&out)
    }

    fn wmic_u64(&self, class: &str, property: &str) -> Option<u64> {
        self.wmic(class, property)?.parse().ok()
    }
}

impl PlatformAdapter for Windows {
    fn base(&self) -> &Base {
        &self.base
    }

    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn cpu_cores(&self) -> u64 {
        self.wmic_u64("cpu", "NumberOfCores").unwrap_or(0)
    }

    fn cpu_free(&self) -> u64 {
        self.wmic_u64("cpu", "LoadPercentage")
            .map(|load| 100 - load.min(100))
            .unwrap_or(0)
    }

    /// Rated clock from the processor name, e.g. `... CPU @ 3.60GHz`.
    fn cpu_frequency_hz(&self) -> u64 {
        rated_clock(&self.cpu_name()).unwrap_or_else(|| self.cpu_speed_hz())
    }

    fn cpu_name(&self) -> String {
        self.wmic("cpu", "Name").unwrap_or_default()
    }

    fn cpu_processors(&self) -> u64 {
        self.wmic_u64("cpu", "NumberOfLogicalProcessors").unwrap_or(0)
    }

    /// CurrentClockSpeed is reported in MHz.
    fn cpu_speed_hz(&self) -> u64 {
        self.wmic_u64("cpu", "CurrentClockSpeed")
            .map(|mhz| mhz * 1_000_000)
            .unwrap_or(0)
    }

    fn cpu_vendor(&self) -> String {
        self.wmic("cpu", "Manufacturer").unwrap_or_default()
    }

    fn disk_partitions(&self) -> Vec<String> {
        let Some(out) = self.base.command("fsutil", &["fsinfo", "drives"]) else {
            return Vec::new();
        };
        drive_roots(&out)
            .into_iter()
            .filter(|drive| self.base.is_mounted(drive))
            .collect()
    }

    /// `/` and `\` name the system drive, so the default partition works here too.
    fn disk_usage(&self, partition: &str) -> Usage {
        match on_drive(partition, &system_drive()) {
            Some(path) => {
                debug!(partition, path = %path, "rooted partition mapped to system drive");
                self.base.disk_usage(&path)
            }
            None => self.base.disk_usage(partition),
        }
    }

    /// FreePhysicalMemory is reported in KB.
    fn ram_free_bytes(&self) -> u64 {
        self.base
            .command("wmic", &["OS", "get", "FreePhysicalMemory", "/Value"])
            .and_then(|out| {
                text::field(&out, "FreePhysicalMemory", '=').and_then(|v| v.parse::<u64>().ok())
            })
            .map(|kb| kb * 1024)
            .unwrap_or(0)
    }

    fn ram_list_bytes(&self) -> Vec<u64> {
        self.base
            .command("wmic", &["memorychip", "get", "capacity"])
            .map(|out| chip_capacities(&out))
            .unwrap_or_default()
    }

    fn os_release(&self) -> String {
        self.wmic("OS", "Caption").unwrap_or_default()
    }

    fn platform_ips(&self) -> Vec<String> {
        self.base
            .command("ipconfig", &[])
            .map(|out| ipv4_addresses(&out))
            .unwrap_or_default()
    }

    fn mac_address(&self) -> Option<String> {
        self.base
            .command("ipconfig", &["/all"])
            .and_then(|out| text::first_mac(&out))
            .or_else(|| self.base.shared_mac())
    }
}

fn first_value(wmic: &str) -> Option<String> {
    wmic.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .nth(1)
        .map(str::to_string)
}

fn rated_clock(name: &str) -> Option<u64> {
    let (_, clock) = name.rsplit_once('@')?;
    units::parse_size(clock.trim(), HZ_UNITS, HZ_BASE)
}

/// `Drives: C:\ D:\ ` -> `["C:\", "D:\"]`.
fn drive_roots(fsutil: &str) -> Vec<String> {
    fsutil
        .split_whitespace()
        .filter(|token| {
            let bytes = token.as_bytes();
            bytes.len() == 3 && bytes[0].is_ascii_alphabetic() && &bytes[1..] == b":\\"
        })
        .map(str::to_string)
        .collect()
}

/// Drive of the working directory, else `%SystemDrive%`, else `C:`.
fn system_drive() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|dir| drive_letter(&dir.to_string_lossy()))
        .or_else(|| {
            std::env::var("SystemDrive")
                .ok()
                .and_then(|d| drive_letter(&d))
        })
        .unwrap_or_else(|| "C:".to_string())
}

/// `c:\Users` -> `C:`.
fn drive_letter(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
        .then(|| path[..2].to_ascii_uppercase())
}

/// Rebase a drive-relative rooted path (`/`, `\Users`) onto `drive`.
/// UNC paths and paths that already carry a drive are left alone.
fn on_drive(partition: &str, drive: &str) -> Option<String> {
    if partition.starts_with("\\\\") || partition.starts_with("//") {
        return None;
    }
    let rest = partition.strip_prefix(['/', '\\'])?;
    Some(format!("{drive}\\{}", rest.replace('/', "\\")))
}

fn chip_capacities(wmic: &str) -> Vec<u64> {
    wmic.split_whitespace()
        .filter_map(|token| token.parse::<u64>().ok())
        .filter(|&bytes| bytes > 0)
        .collect()
}

/// `IPv4 Address. . . . . . . . . . . : 192.168.1.10(Preferred)` lines of `ipconfig`.
fn ipv4_addresses(ipconfig: &str) -> Vec<String> {
    ipconfig
        .lines()
        .filter(|l| l.contains("IPv4"))
        .filter_map(|l| {
            let (_, value) = l.split_once(':')?;
            let ip = value.trim().trim_end_matches("(Preferred)").trim();
            (!ip.is_empty()).then(|| ip.to_string())
        })
        .collect()
}
