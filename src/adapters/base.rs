// Primitives every adapter shares: host identity, disk space, runtime limits

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

use super::text;
use crate::config::RuntimeConfig;
use crate::models::Usage;
use crate::probe::{DiskSpace, SystemProbe};
use crate::source::TextSource;

/// Sources and configuration handed to whichever adapter gets selected.
#[derive(Clone)]
pub struct Base {
    text: Arc<dyn TextSource>,
    system: Arc<dyn SystemProbe>,
    runtime: RuntimeConfig,
}

impl Base {
    pub fn new(text: Arc<dyn TextSource>, system: Arc<dyn SystemProbe>, runtime: RuntimeConfig) -> Self {
        Self {
            text,
            system,
            runtime,
        }
    }

    pub fn command(&self, program: &str, args: &[&str]) -> Option<String> {
        self.text.command(program, args)
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.text.file(path)
    }

    /// First non-empty line of a command's output, trimmed.
    pub fn command_line(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = self.command(program, args)?;
        output
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
    }

    /// Machine hardware name as `uname -m` reports it.
    pub fn architecture(&self) -> String {
        self.command_line("uname", &["-m"])
            .or_else(|| std::env::var("PROCESSOR_ARCHITECTURE").ok())
            .unwrap_or_else(|| std::env::consts::ARCH.to_string())
    }

    pub fn hostname(&self) -> String {
        self.system.host_name().unwrap_or_default()
    }

    pub fn kernel(&self) -> String {
        self.system.kernel_version().unwrap_or_default()
    }

    /// Total and free space of the filesystem holding `partition`.
    ///
    /// The mounted filesystem whose mount point is the longest prefix of
    /// `partition` answers, so any path on a volume works. Unknown -> zeros.
    pub fn disk_usage(&self, partition: &str) -> Usage {
        let disks = self.system.disks();
        match best_mount(&disks, partition) {
            Some(disk) => Usage::new(disk.total, disk.available),
            None => {
                debug!(partition, "no mounted filesystem for partition");
                Usage::default()
            }
        }
    }

    /// [`Base::disk_usage`] for several partitions from one disk listing.
    pub fn disk_usages(&self, partitions: &[String]) -> IndexMap<String, Usage> {
        let disks = self.system.disks();
        partitions
            .iter()
            .map(|p| {
                let usage = best_mount(&disks, p)
                    .map(|d| Usage::new(d.total, d.available))
                    .unwrap_or_default();
                (p.clone(), usage)
            })
            .collect()
    }

    /// Whether `root` is a mounted filesystem or at least an existing directory.
    pub fn is_mounted(&self, root: &str) -> bool {
        self.system
            .disks()
            .iter()
            .any(|d| d.mount_point.eq_ignore_ascii_case(root))
            || std::path::Path::new(root).is_dir()
    }

    /// Non-loopback addresses from the interface list.
    pub fn shared_ips(&self) -> Vec<String> {
        self.system.interface_addresses()
    }

    pub fn shared_mac(&self) -> Option<String> {
        self.system.interface_macs().into_iter().next()
    }

    pub fn memory_limit_bytes(&self) -> u64 {
        self.runtime.memory_limit_bytes()
    }

    pub fn memory_usage_bytes(&self) -> u64 {
        self.system.process_memory().unwrap_or(0)
    }

    pub fn execution_time_limit(&self) -> u64 {
        self.runtime.execution_time_limit_secs
    }
}

fn best_mount<'a>(disks: &'a [DiskSpace], partition: &str) -> Option<&'a DiskSpace> {
    disks
        .iter()
        .filter(|d| is_under(partition, &d.mount_point))
        .max_by_key(|d| d.mount_point.len())
}

fn is_under(path: &str, mount: &str) -> bool {
    if mount.is_empty() {
        return false;
    }
    if path.eq_ignore_ascii_case(mount) {
        return true;
    }
    match path.get(..mount.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(mount) => {
            mount.ends_with(['/', '\\']) || path[mount.len()..].starts_with(['/', '\\'])
        }
        _ => false,
    }
}

/// Primary address: first non-loopback IPv4, else the first address, else empty.
pub(crate) fn primary_ip(ips: &[String]) -> String {
    ips.iter()
        .find(|ip| text::is_dotted_quad(ip) && !ip.starts_with("127."))
        .or_else(|| ips.first())
        .cloned()
        .unwrap_or_default()
}
