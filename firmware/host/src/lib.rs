//! Host side of the log ring: reading it back from a target, and simulating a target.
//!
//! - [`bus`]: Register transport abstraction (`RegisterBus`) and its implementations
//! - [`reader`]: `LogReader`, which samples the ring and reconstructs the log stream
//! - [`session`]: Attachment to a target's memory from settings
//! - [`region`]: File-backed `Region` for the simulator
//! - [`config`]: Settings (TOML + environment)
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Error types

pub mod bus;
pub mod config;
pub mod error;
pub mod logging;
pub mod reader;
pub mod region;
pub mod session;

pub use bus::{MemoryBus, MmapBus, RegisterBus};
pub use config::Settings;
pub use error::{BusError, ReaderError, ReaderResult};
pub use reader::{LogDump, LogReader};
pub use region::MmapRegion;
pub use session::Session;
