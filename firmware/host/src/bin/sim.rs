//! Simulate the firmware logger on the host.
//!
//! Pushes formatted log lines into a memory-mapped ring image with the same writer the
//! firmware runs, so `ringlog-dump` can be pointed at the image while it is written.
//!
//! ```bash
//! ringlog-sim --image ringlog.bin --interval-ms 10 &
//! ringlog-dump --image ringlog.bin
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use ringlog_common::RingWriter;
use ringlog_common::entry::{LogLevel, format_line};
use ringlog_host::{MmapRegion, Settings, logging};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ringlog-sim")]
#[command(about = "Write simulated firmware log lines into a ring image", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./ringlog.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ring image to create or overwrite
    #[arg(long)]
    image: Option<PathBuf>,

    /// Offset of the ring region inside the image
    #[arg(long)]
    base_offset: Option<u64>,

    /// Number of lines to write (0 = until interrupted)
    #[arg(long)]
    count: Option<u64>,

    /// Delay between lines in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,
}

/// Messages cycled through by the simulator, loosely following a firmware boot.
const SCRIPT: [(LogLevel, &str); 6] = [
    (LogLevel::Info, "heartbeat"),
    (LogLevel::Debug, "button poll idle"),
    (LogLevel::Info, "readout frame complete"),
    (LogLevel::Warn, "readout fifo above high-water mark"),
    (LogLevel::Info, "exposure started"),
    (LogLevel::Error, "sensor timeout, retrying"),
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(image) = cli.image {
        settings.target.image = image;
    }
    if let Some(offset) = cli.base_offset {
        settings.target.base_offset = offset;
    }
    if let Some(count) = cli.count {
        settings.sim.count = count;
    }
    if let Some(interval) = cli.interval_ms {
        settings.sim.interval_ms = interval;
    }
    settings.validate().map_err(|e| anyhow!(e))?;
    logging::init(&settings.log.level).map_err(|e| anyhow!(e))?;

    let region = MmapRegion::create(&settings.target.image, settings.target.base_offset)
        .with_context(|| format!("could not map {}", settings.target.image.display()))?;
    let mut writer = RingWriter::init(region);
    info!(
        image = %settings.target.image.display(),
        count = settings.sim.count,
        interval_ms = settings.sim.interval_ms,
        "simulated ring initialized"
    );

    let start = Instant::now();
    let interval = Duration::from_millis(settings.sim.interval_ms);
    let mut sequence: u64 = 0;

    while settings.sim.count == 0 || sequence < settings.sim.count {
        let (level, message) = SCRIPT[(sequence % SCRIPT.len() as u64) as usize];
        let elapsed_ms = start.elapsed().as_millis() as u32;
        let line = format_line(level, elapsed_ms, &format!("{message} #{sequence}"));
        writer.push_str(&line);
        debug!(pointer = writer.pointer(), length = writer.length(), "pushed line {sequence}");

        sequence += 1;
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    writer.region().flush()?;
    info!(lines = sequence, pointer = writer.pointer(), length = writer.length(), "simulation finished");
    Ok(())
}
