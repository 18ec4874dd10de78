use anyhow::Result;
use clap::Parser;
use indexmap::IndexMap;
use std::path::PathBuf;
use sysreport::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser)]
#[command(name = "sysreport", version, about = "Print a CPU, RAM, disk and host report as JSON")]
struct Cli {
    /// Config file (TOML); defaults to sysreport.toml when present
    #[arg(long, env = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Raw numbers instead of human-readable sizes
    #[arg(long)]
    raw: bool,

    /// Partition described by the single-value disk metrics
    #[arg(long)]
    partition: Option<String>,

    /// Flat `<category><Metric>` keys instead of nested categories
    #[arg(long)]
    flat: bool,

    /// Only these metrics (e.g. cpuCores, computerHostname); repeatable
    #[arg(long = "metric", value_name = "NAME")]
    metrics: Vec<String>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app_config = match &cli.config {
        Some(path) => config::AppConfig::load_from_path(&path.to_string_lossy())?,
        None => config::AppConfig::load()?,
    };

    let mut options = app_config.report.clone();
    if cli.raw {
        options.format = false;
    }
    if let Some(partition) = cli.partition {
        options = options.with_partition(partition);
    }

    let sysinfo = Sysinfo::new(&app_config);
    tracing::debug!(platform = %sysinfo.platform(), format = options.format, partition = %options.partition, "collecting");

    let json = if !cli.metrics.is_empty() {
        let mut selected = IndexMap::new();
        for name in &cli.metrics {
            selected.insert(name.clone(), sysinfo.metric(name, &options)?);
        }
        serde_json::to_string_pretty(&selected)?
    } else if cli.flat {
        serde_json::to_string_pretty(&sysinfo.report_merged(&options))?
    } else {
        serde_json::to_string_pretty(&sysinfo.report(&options))?
    };
    println!("{json}");

    Ok(())
}
