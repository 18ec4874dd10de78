// Platform detection from the OS identity string

use std::fmt;

/// Operating-system family an adapter is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Mac,
    Windows,
}

impl Platform {
    /// Select from a uname-style identity (`Linux`, `Darwin`, `WINNT`, ...).
    ///
    /// Exactly `Darwin` is macOS; any other identity containing `win`
    /// (case-insensitive) is Windows; everything else falls back to Linux.
    /// The Darwin check runs first since "darwin" itself contains "win".
    pub fn from_identity(identity: &str) -> Self {
        if identity == "Darwin" {
            Platform::Mac
        } else if identity.to_lowercase().contains("win") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// The platform this process runs on.
    pub fn current() -> Self {
        Self::from_identity(current_identity())
    }

    /// Adapter tag reported as `computer.os`.
    pub fn tag(self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::Mac => "Mac",
            Platform::Windows => "Windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// uname-style name of the OS this binary was built for.
pub fn current_identity() -> &'static str {
    match std::env::consts::OS {
        "linux" => "Linux",
        "macos" => "Darwin",
        "windows" => "WINNT",
        "freebsd" => "FreeBSD",
        "openbsd" => "OpenBSD",
        "netbsd" => "NetBSD",
        "solaris" | "illumos" => "SunOS",
        "android" => "Linux",
        other => other,
    }
}
