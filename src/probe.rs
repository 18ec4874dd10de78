// Host facts via sysinfo: identity, disks, interfaces, own process memory

use sysinfo::{Disks, Networks, ProcessesToUpdate, System};
use tracing::debug;

/// Space of one mounted filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskSpace {
    pub mount_point: String,
    pub total: u64,
    pub available: u64,
}

/// Facts every platform exposes through a native API rather than a tool.
/// Each call reads fresh values; nothing is cached between calls.
pub trait SystemProbe: Send + Sync {
    fn host_name(&self) -> Option<String>;
    fn kernel_version(&self) -> Option<String>;
    fn disks(&self) -> Vec<DiskSpace>;
    /// Non-loopback interface addresses.
    fn interface_addresses(&self) -> Vec<String>;
    /// MAC addresses of interfaces that report one.
    fn interface_macs(&self) -> Vec<String>;
    /// Resident memory of the current process in bytes.
    fn process_memory(&self) -> Option<u64>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoProbe;

impl SystemProbe for SysinfoProbe {
    fn host_name(&self) -> Option<String> {
        System::host_name().filter(|s| !s.is_empty())
    }

    fn kernel_version(&self) -> Option<String> {
        System::kernel_version().filter(|s| !s.is_empty())
    }

    fn disks(&self) -> Vec<DiskSpace> {
        let disks = Disks::new_with_refreshed_list();
        disks
            .list()
            .iter()
            .map(|d| DiskSpace {
                mount_point: d.mount_point().to_string_lossy().into_owned(),
                total: d.total_space(),
                available: d.available_space(),
            })
            .collect()
    }

    fn interface_addresses(&self) -> Vec<String> {
        let networks = Networks::new_with_refreshed_list();
        let mut names: Vec<&String> = networks.list().keys().collect();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| networks.list().get(name))
            .flat_map(|data| data.ip_networks().iter())
            .filter(|n| !n.addr.is_loopback())
            .map(|n| n.addr.to_string())
            .collect()
    }

    fn interface_macs(&self) -> Vec<String> {
        let networks = Networks::new_with_refreshed_list();
        let mut macs: Vec<(String, String)> = networks
            .list()
            .iter()
            .map(|(name, data)| (name.clone(), data.mac_address().to_string()))
            .filter(|(_, mac)| mac != "00:00:00:00:00:00")
            .collect();
        macs.sort();
        macs.into_iter().map(|(_, mac)| mac).collect()
    }

    fn process_memory(&self) -> Option<u64> {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                debug!(error = %e, "current pid unavailable");
                return None;
            }
        };
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        sys.process(pid).map(|p| p.memory())
    }
}

/// Fixed facts for replaying a recorded machine.
#[derive(Debug, Clone, Default)]
pub struct CannedProbe {
    pub host_name: Option<String>,
    pub kernel_version: Option<String>,
    pub disks: Vec<DiskSpace>,
    pub interface_addresses: Vec<String>,
    pub interface_macs: Vec<String>,
    pub process_memory: Option<u64>,
}

impl SystemProbe for CannedProbe {
    fn host_name(&self) -> Option<String> {
        self.host_name.clone()
    }

    fn kernel_version(&self) -> Option<String> {
        self.kernel_version.clone()
    }

    fn disks(&self) -> Vec<DiskSpace> {
        self.disks.clone()
    }

    fn interface_addresses(&self) -> Vec<String> {
        self.interface_addresses.clone()
    }

    fn interface_macs(&self) -> Vec<String> {
        self.interface_macs.clone()
    }

    fn process_memory(&self) -> Option<u64> {
        self.process_memory
    }
}
