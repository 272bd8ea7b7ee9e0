//! Build script for ringlog-pico2
//!
//! Puts `memory.x` on the linker search path and adds the cortex-m-rt and defmt
//! linker scripts. Host builds (tests) skip all of it.

use std::fs;
use std::path::PathBuf;
use std::{env, io};

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Only link the firmware image for the ARM target
    if env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default() != "arm" {
        return Ok(());
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").map_err(io::Error::other)?);
    fs::copy("memory.x", out_dir.join("memory.x"))?;
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    Ok(())
}
