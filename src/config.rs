use serde::Deserialize;

use crate::models::ReportOptions;
use crate::units;

const DEFAULT_CONFIG_FILE: &str = "sysreport.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub report: ReportOptions,
    pub runtime: RuntimeConfig,
    pub commands: CommandConfig,
}

/// Limits of the hosting runtime, reported under `runtime` rather than queried from the OS.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Shorthand size (`"128M"`, `"1G"`); `"-1"` means unlimited.
    pub memory_limit: String,
    /// Wall-clock limit in seconds; 0 means no limit.
    pub execution_time_limit_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            memory_limit: "-1".into(),
            execution_time_limit_secs: 0,
        }
    }
}

impl RuntimeConfig {
    /// Configured memory limit in bytes (0 when unlimited or unparseable).
    pub fn memory_limit_bytes(&self) -> u64 {
        units::shorthand_bytes(&self.memory_limit).unwrap_or(0)
    }
}

/// Bounds for every tool invocation and file read.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Child processes still running after this long are killed.
    pub timeout_ms: u64,
    /// Bytes of stdout kept per command; the rest is drained and dropped.
    pub max_output_bytes: usize,
    pub max_file_bytes: u64,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            max_output_bytes: 64 * 1024,
            max_file_bytes: 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE`, else `sysreport.toml` if present, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(&path),
            Err(_) if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_path(DEFAULT_CONFIG_FILE)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.report.partition.trim().is_empty(),
            "report.partition must be non-empty"
        );
        anyhow::ensure!(
            units::shorthand_bytes(&self.runtime.memory_limit).is_some(),
            "runtime.memory_limit must be a size like 128M or -1, got {:?}",
            self.runtime.memory_limit
        );
        anyhow::ensure!(
            self.commands.timeout_ms > 0,
            "commands.timeout_ms must be > 0, got {}",
            self.commands.timeout_ms
        );
        anyhow::ensure!(
            self.commands.max_output_bytes > 0,
            "commands.max_output_bytes must be > 0, got {}",
            self.commands.max_output_bytes
        );
        anyhow::ensure!(
            self.commands.max_file_bytes > 0,
            "commands.max_file_bytes must be > 0, got {}",
            self.commands.max_file_bytes
        );
        Ok(())
    }
}
