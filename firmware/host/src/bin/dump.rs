//! Dump the log ring of a target to stdout.
//!
//! Attaches to the target memory, reads the ring once and writes the reconstructed
//! log (oldest line first) followed by a newline. Diagnostics go to stderr.
//!
//! ```bash
//! ringlog-dump --image /dev/uio0 --base-offset 0x80000
//! ringlog-dump --config ringlog.toml > target.log
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use ringlog_host::{Session, Settings, logging};
use tracing::info;

#[derive(Parser)]
#[command(name = "ringlog-dump")]
#[command(about = "Read the firmware log ring and print it", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./ringlog.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image or device node exposing target memory
    #[arg(long)]
    image: Option<PathBuf>,

    /// Offset of the ring region inside the image (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_offset)]
    base_offset: Option<u64>,

    /// Diagnostic log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_offset(value: &str) -> Result<u64, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid offset '{value}': {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(image) = cli.image {
        settings.target.image = image;
    }
    if let Some(offset) = cli.base_offset {
        settings.target.base_offset = offset;
    }
    if let Some(level) = cli.log_level {
        settings.log.level = level;
    }
    settings.validate().map_err(|e| anyhow!(e))?;
    logging::init(&settings.log.level).map_err(|e| anyhow!(e))?;

    let mut session = Session::attach(&settings.target)
        .with_context(|| format!("could not reach target at {}", settings.target.image.display()))?;
    let dump = session.log_reader().read_buffer().context("failed to read the log ring")?;
    info!(
        image = %session.image().display(),
        pointer = dump.pointer,
        length = dump.length,
        "read {} bytes",
        dump.len()
    );

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&dump.bytes)?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}
