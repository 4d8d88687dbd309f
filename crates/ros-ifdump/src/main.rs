//! ros-ifdump entry point.
//!
//! Replays a recorded RouterOS API transcript through the `/interface/print`
//! query and prints the resulting interface list.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use routeros_api::{
    enumerate_interfaces, ClientConfig, Connection, Interface, ReplayConnection, RosError,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Dump RouterOS interface lists from recorded API transcripts
#[derive(Parser, Debug)]
#[command(name = "ros-ifdump")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transcript file with recorded replies
    transcript: PathBuf,

    /// Client configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error), overrides the config file
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Only list running interfaces
    #[arg(long)]
    running: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ros-ifdump: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    init_tracing(&config, args.log_level.as_deref());

    info!(
        endpoint = %config.endpoint(),
        transcript = %args.transcript.display(),
        "replaying transcript"
    );

    let text = std::fs::read_to_string(&args.transcript)
        .with_context(|| format!("reading transcript {}", args.transcript.display()))?;
    let mut conn = ReplayConnection::from_transcript(&text).context("parsing transcript")?;

    dump(&mut conn, args.format, args.running)
}

fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    let config = match path {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Initialize tracing; `RUST_LOG` wins over the CLI flag and config file.
fn init_tracing(config: &ClientConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Enumerates interfaces on `conn` and renders them in `format`.
fn dump<C: Connection>(conn: &mut C, format: OutputFormat, running_only: bool) -> Result<String> {
    let mut rows: Vec<String> = Vec::new();
    let mut values: Vec<serde_json::Value> = Vec::new();

    enumerate_interfaces(conn, |_, interfaces| {
        for iface in interfaces.iter().filter(|i| !running_only || i.running) {
            match format {
                OutputFormat::Table => rows.push(format_row(iface)),
                OutputFormat::Json => values.push(
                    serde_json::to_value(iface).map_err(|e| RosError::handler(e.to_string()))?,
                ),
            }
        }
        Ok(())
    })
    .context("enumerating interfaces")?;

    info!(interfaces = rows.len() + values.len(), "enumeration complete");

    match format {
        OutputFormat::Table => {
            let mut out = format_header();
            for row in rows {
                out.push_str(&row);
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&values)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// RouterOS-style flags: X disabled, R running, D dynamic.
fn flags(iface: &Interface<'_>) -> String {
    let mut flags = String::new();
    if !iface.enabled {
        flags.push('X');
    }
    if iface.running {
        flags.push('R');
    }
    if iface.dynamic {
        flags.push('D');
    }
    flags
}

fn format_header() -> String {
    format!(
        "{:<3} {:<16} {:<10} {:>5} {:>5} {:>12} {:>12} {:>14} {:>14} {:>11} {:>11} {}\n",
        "FL", "NAME", "TYPE", "MTU", "L2MTU", "RX-PACKETS", "TX-PACKETS", "RX-BYTES", "TX-BYTES",
        "ERRORS", "DROPS", "COMMENT"
    )
}

fn format_row(iface: &Interface<'_>) -> String {
    format!(
        "{:<3} {:<16} {:<10} {:>5} {:>5} {:>12} {:>12} {:>14} {:>14} {:>11} {:>11} {}\n",
        flags(iface),
        iface.name.unwrap_or("-"),
        iface.interface_type.unwrap_or("-"),
        iface.mtu,
        iface.l2mtu,
        iface.rx_packets,
        iface.tx_packets,
        iface.rx_bytes,
        iface.tx_bytes,
        format!("{}/{}", iface.rx_errors, iface.tx_errors),
        format!("{}/{}", iface.rx_drops, iface.tx_drops),
        iface.comment.unwrap_or("")
    )
}
