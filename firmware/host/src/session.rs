//! Attachment to a target's memory.
//!
//! A [`Session`] owns the register transport for one target. Attaching validates that
//! the ring region is reachable; it does not read the ring itself.

use std::path::Path;

use ringlog_common::REGION_SIZE;
use tracing::info;

use crate::bus::MmapBus;
use crate::config::TargetConfig;
use crate::error::BusError;
use crate::reader::LogReader;

/// An attached target.
#[derive(Debug)]
pub struct Session {
    bus: MmapBus,
}

impl Session {
    /// Map the ring region described by `target`.
    pub fn attach(target: &TargetConfig) -> Result<Self, BusError> {
        let bus = MmapBus::open(&target.image, target.base_offset, REGION_SIZE)?;
        info!(
            image = %target.image.display(),
            base_offset = target.base_offset,
            "attached to target"
        );
        Ok(Self { bus })
    }

    pub fn image(&self) -> &Path { self.bus.path() }

    /// Reader borrowing this session's transport.
    pub fn log_reader(&mut self) -> LogReader<&mut MmapBus> { LogReader::new(&mut self.bus) }
}
