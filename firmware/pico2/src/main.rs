//! Log ring firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Owns the 4KB log ring in SRAM4 and appends every `log_*!` line to it. A host
//! drains the ring through the debugger with `ringlog-dump`.
//!
//! # Button Controls (Pimoroni PIM715)
//!
//! - **A**: Append a numbered marker line
//! - **B**: Reset the log ring (zero the region, pointer back to 4)
//!
//! The firmware only builds for the ARM target; on the host this binary just
//! prints a hint so `cargo test --workspace` keeps working.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

#[cfg(target_arch = "arm")]
mod firmware;

#[cfg(not(target_arch = "arm"))]
fn main() {
    eprintln!("pico2 runs on the RP2350 only: build with --target thumbv8m.main-none-eabihf");
}
