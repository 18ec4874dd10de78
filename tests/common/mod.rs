// Shared test helpers: recorded tool output for one machine per platform

#![allow(dead_code)]

use std::sync::Arc;

use sysreport::config::RuntimeConfig;
use sysreport::detect::Platform;
use sysreport::probe::{CannedProbe, DiskSpace};
use sysreport::source::CannedSource;
use sysreport::Sysinfo;

pub const KIB: u64 = 1024;
pub const MIB: u64 = 1024 * KIB;
pub const GIB: u64 = 1024 * MIB;

pub fn runtime() -> RuntimeConfig {
    RuntimeConfig {
        memory_limit: "128M".into(),
        execution_time_limit_secs: 30,
    }
}

pub fn sysinfo(platform: Platform, source: CannedSource, probe: CannedProbe) -> Sysinfo {
    Sysinfo::with_sources(platform, Arc::new(source), Arc::new(probe), runtime())
}

/// A platform with nothing recorded: every query fails.
pub fn empty(platform: Platform) -> Sysinfo {
    sysinfo(platform, CannedSource::new(), CannedProbe::default())
}

pub fn disk(mount_point: &str, total: u64, available: u64) -> DiskSpace {
    DiskSpace {
        mount_point: mount_point.into(),
        total,
        available,
    }
}

// Linux

pub const LINUX_CPUINFO: &str = "processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model name\t: Intel(R) Core(TM) i5-7500 CPU @ 3.40GHz
cpu MHz\t\t: 2400.000

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i5-7500 CPU @ 3.40GHz
cpu MHz\t\t: 2400.000

processor\t: 2
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i5-7500 CPU @ 3.40GHz
cpu MHz\t\t: 2400.000

processor\t: 3
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i5-7500 CPU @ 3.40GHz
cpu MHz\t\t: 2400.000
";

pub const LINUX_MEMINFO: &str = "MemTotal:       16314508 kB
MemFree:         6518872 kB
MemAvailable:   10426080 kB
Buffers:          412345 kB
";

pub const LINUX_FREE: &str = "               total        used        free      shared  buff/cache   available
Mem:        16314508     5127764     6518872      431844     4667872    10426080
Swap:        2097148           0     2097148
";

pub const LINUX_MOUNTS: &str = "sysfs /sys sysfs rw,nosuid,nodev,noexec,relatime 0 0
proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0
/dev/nvme0n1p2 / ext4 rw,relatime 0 0
tmpfs /run tmpfs rw,nosuid,nodev 0 0
/dev/nvme0n1p1 /boot/efi vfat rw,relatime 0 0
/dev/loop3 /snap/core22/1380 squashfs ro,nodev,relatime 0 0
/dev/sdb1 /media/USB\\040Drive exfat rw,relatime 0 0
";

pub const LINUX_LSCPU: &str = "Architecture:            x86_64
  CPU op-mode(s):        32-bit, 64-bit
CPU(s):                  4
  On-line CPU(s) list:   0-3
Vendor ID:               GenuineIntel
  Model name:            Intel(R) Core(TM) i5-7500 CPU @ 3.40GHz
    CPU max MHz:         3800.0000
";

pub const LINUX_DMIDECODE: &str = "# dmidecode 3.5
Handle 0x003D, DMI type 17, 40 bytes
Memory Device
\tTotal Width: 64 bits
\tSize: 8192 MB
\tForm Factor: DIMM

Handle 0x003E, DMI type 17, 40 bytes
Memory Device
\tSize: No Module Installed

Handle 0x003F, DMI type 17, 40 bytes
Memory Device
\tSize: 8 GB
\tVolatile Size: 8 GB
";

pub const LINUX_IP_ADDR: &str = "1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN group default qlen 1000
    inet 127.0.0.1/8 scope host lo
       valid_lft forever preferred_lft forever
2: enp3s0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP group default qlen 1000
    inet 192.168.1.50/24 brd 192.168.1.255 scope global dynamic enp3s0
       valid_lft 85902sec preferred_lft 85902sec
3: docker0: <NO-CARRIER,BROADCAST,MULTICAST,UP> mtu 1500 qdisc noqueue state DOWN group default
    inet 172.17.0.1/16 brd 172.17.255.255 scope global docker0
       valid_lft forever preferred_lft forever
";

pub const LINUX_IP_LINK: &str = "1: lo: <LOOPBACK,UP,LOWER_UP> mtu 65536 qdisc noqueue state UNKNOWN mode DEFAULT group default qlen 1000
    link/loopback 00:00:00:00:00:00 brd 00:00:00:00:00:00
2: enp3s0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc fq_codel state UP mode DEFAULT group default qlen 1000
    link/ether 3c:7c:3f:1a:2b:3c brd ff:ff:ff:ff:ff:ff
";

pub const LINUX_OS_RELEASE: &str = "PRETTY_NAME=\"Ubuntu 24.04.1 LTS\"
NAME=\"Ubuntu\"
VERSION_ID=\"24.04\"
ID=ubuntu
";

pub fn linux_source() -> CannedSource {
    CannedSource::new()
        .with_file("/proc/cpuinfo", LINUX_CPUINFO)
        .with_file("/proc/meminfo", LINUX_MEMINFO)
        .with_file("/proc/loadavg", "1.00 0.80 0.70 2/913 48213\n")
        .with_file("/proc/mounts", LINUX_MOUNTS)
        .with_file("/etc/os-release", LINUX_OS_RELEASE)
        .with_file("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq", "3400000\n")
        .with_file("/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq", "2400000\n")
        .with_command("free", LINUX_FREE)
        .with_command("lscpu", LINUX_LSCPU)
        .with_command("dmidecode -t memory", LINUX_DMIDECODE)
        .with_command("ip -4 addr show", LINUX_IP_ADDR)
        .with_command("ip link show", LINUX_IP_LINK)
        .with_command("uname -m", "x86_64\n")
}

pub fn linux_probe() -> CannedProbe {
    CannedProbe {
        host_name: Some("buildbox".into()),
        kernel_version: Some("6.8.0-45-generic".into()),
        disks: vec![
            disk("/", 100 * GIB, 40 * GIB),
            disk("/boot/efi", 512 * MIB, 256 * MIB),
            disk("/media/USB Drive", 64 * GIB, 60 * GIB),
        ],
        interface_addresses: vec!["192.168.1.50".into(), "fe80::3e7c:3fff:fe1a:2b3c".into()],
        interface_macs: vec!["3c:7c:3f:1a:2b:3c".into()],
        process_memory: Some(8 * MIB),
    }
}

pub fn linux() -> Sysinfo {
    sysinfo(Platform::Linux, linux_source(), linux_probe())
}

// macOS (Intel)

pub const MAC_MOUNT: &str = "/dev/disk1s1s1 on / (apfs, sealed, local, read-only, journaled)
devfs on /dev (devfs, local, nobrowse)
/dev/disk1s5 on /System/Volumes/VM (apfs, local, noexec, journaled, noatime, nobrowse)
/dev/disk1s2 on /System/Volumes/Data (apfs, local, journaled, nobrowse, protect)
map auto_home on /System/Volumes/Data/home (autofs, automounted, nobrowse)
";

pub const MAC_PS: &str = "  524288\n  262144\n  131072\n  131072\n";

pub const MAC_PROFILER: &str = "Memory:

    Memory Slots:

      ECC: Disabled
      Upgradeable Memory: No

        BANK 0/ChannelA-DIMM0:

          Size: 8 GB
          Type: LPDDR3
          Speed: 2133 MHz

        BANK 2/ChannelB-DIMM0:

          Size: 8 GB
          Type: LPDDR3
          Speed: 2133 MHz
";

pub const MAC_IFCONFIG: &str = "lo0: flags=8049<UP,LOOPBACK,RUNNING,MULTICAST> mtu 16384
\toptions=1203<RXCSUM,TXCSUM,TXSTATUS,SW_TIMESTAMP>
\tinet 127.0.0.1 netmask 0xff000000
\tinet6 ::1 prefixlen 128
en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tether a4:83:e7:12:34:56
\tinet6 fe80::1c2d:3e4f:5a6b:7c8d%en0 prefixlen 64 secured scopeid 0x6
\tinet 192.168.1.23 netmask 0xffffff00 broadcast 192.168.1.255
\tstatus: active
";

pub const MAC_IFCONFIG_EN0: &str = "en0: flags=8863<UP,BROADCAST,SMART,RUNNING,SIMPLEX,MULTICAST> mtu 1500
\tether a4:83:e7:12:34:56
\tinet 192.168.1.23 netmask 0xffffff00 broadcast 192.168.1.255
";

pub fn mac_source() -> CannedSource {
    CannedSource::new()
        .with_command("sysctl -n hw.ncpu", "8\n")
        .with_command("sysctl -n hw.logicalcpu", "8\n")
        .with_command(
            "sysctl -n machdep.cpu.brand_string",
            "Intel(R) Core(TM) i7-8569U CPU @ 2.80GHz\n",
        )
        .with_command("sysctl -n machdep.cpu.vendor", "GenuineIntel\n")
        .with_command("sysctl -n hw.cpufrequency", "2800000000\n")
        .with_command("sysctl -n hw.cpufrequency_max", "4700000000\n")
        .with_command("sysctl -n vm.loadavg", "{ 2.00 1.85 1.70 }\n")
        .with_command("sysctl -n hw.memsize", "17179869184\n")
        .with_command("mount", MAC_MOUNT)
        .with_command("ps -caxm -orss=", MAC_PS)
        .with_command("system_profiler SPMemoryDataType", MAC_PROFILER)
        .with_command("uname -rs", "Darwin 23.1.0\n")
        .with_command("uname -m", "x86_64\n")
        .with_command("ifconfig", MAC_IFCONFIG)
        .with_command("ifconfig en0", MAC_IFCONFIG_EN0)
}

pub fn mac_probe() -> CannedProbe {
    CannedProbe {
        host_name: Some("studio.local".into()),
        kernel_version: Some("23.1.0".into()),
        disks: vec![
            disk("/", 500 * GIB, 200 * GIB),
            disk("/System/Volumes/VM", 500 * GIB, 200 * GIB),
            disk("/System/Volumes/Data", 500 * GIB, 200 * GIB),
        ],
        interface_addresses: vec!["192.168.1.23".into()],
        interface_macs: vec!["a4:83:e7:12:34:56".into()],
        process_memory: Some(12 * MIB),
    }
}

pub fn mac() -> Sysinfo {
    sysinfo(Platform::Mac, mac_source(), mac_probe())
}

// Windows

pub const WINDOWS_IPCONFIG: &str = "\r
Windows IP Configuration\r
\r
\r
Ethernet adapter Ethernet:\r
\r
   Connection-specific DNS Suffix  . : lan\r
   Link-local IPv6 Address . . . . . : fe80::8d2e:1c4b:9a3f:12e7%12\r
   IPv4 Address. . . . . . . . . . . : 192.168.1.10\r
   Subnet Mask . . . . . . . . . . . : 255.255.255.0\r
   Default Gateway . . . . . . . . . : 192.168.1.1\r
";

pub const WINDOWS_IPCONFIG_ALL: &str = "\r
Windows IP Configuration\r
\r
   Host Name . . . . . . . . . . . . : DESKTOP-7Q2K\r
\r
Ethernet adapter Ethernet:\r
\r
   Description . . . . . . . . . . . : Intel(R) Ethernet Connection I219-V\r
   Physical Address. . . . . . . . . : 00-1A-2B-3C-4D-5E\r
   IPv4 Address. . . . . . . . . . . : 192.168.1.10(Preferred)\r
";

pub fn windows_source() -> CannedSource {
    CannedSource::new()
        .with_command("wmic cpu get NumberOfCores", "NumberOfCores  \r\r\n4              \r\r\n\r\r\n")
        .with_command("wmic cpu get LoadPercentage", "LoadPercentage  \r\r\n12              \r\r\n")
        .with_command(
            "wmic cpu get Name",
            "Name                                      \r\r\nIntel(R) Core(TM) i7-9700K CPU @ 3.60GHz  \r\r\n",
        )
        .with_command(
            "wmic cpu get NumberOfLogicalProcessors",
            "NumberOfLogicalProcessors  \r\r\n8                          \r\r\n",
        )
        .with_command("wmic cpu get CurrentClockSpeed", "CurrentClockSpeed  \r\r\n3600               \r\r\n")
        .with_command("wmic cpu get Manufacturer", "Manufacturer  \r\r\nGenuineIntel  \r\r\n")
        .with_command("fsutil fsinfo drives", "\r\nDrives: C:\\ D:\\ Z:\\ \r\n")
        .with_command(
            "wmic OS get FreePhysicalMemory /Value",
            "\r\r\n\r\r\nFreePhysicalMemory=4194304\r\r\n\r\r\n",
        )
        .with_command(
            "wmic memorychip get capacity",
            "Capacity    \r\r\n8589934592  \r\r\n8589934592  \r\r\n\r\r\n",
        )
        .with_command("wmic OS get Caption", "Caption                   \r\r\nMicrosoft Windows 11 Pro  \r\r\n")
        .with_command("ipconfig", WINDOWS_IPCONFIG)
        .with_command("ipconfig /all", WINDOWS_IPCONFIG_ALL)
}

pub fn windows_probe() -> CannedProbe {
    CannedProbe {
        host_name: Some("DESKTOP-7Q2K".into()),
        kernel_version: Some("26100".into()),
        disks: vec![disk("C:\\", 476 * GIB, 120 * GIB), disk("D:\\", 931 * GIB, 700 * GIB)],
        interface_addresses: vec!["fe80::8d2e:1c4b:9a3f:12e7".into(), "192.168.1.10".into()],
        interface_macs: vec!["00:1a:2b:3c:4d:5e".into()],
        process_memory: Some(6 * MIB),
    }
}

pub fn windows() -> Sysinfo {
    sysinfo(Platform::Windows, windows_source(), windows_probe())
}
