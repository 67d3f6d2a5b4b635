//! refind-updater library exports.
//!
//! The binary in `main.rs` is a thin wrapper; everything lives here so
//! integration tests can drive the pipeline against sandboxed directories.

pub mod compose;
pub mod config;
pub mod entry;
pub mod gfx;
pub mod paths;
pub mod process;
pub mod refind;
pub mod stage;
pub mod sync;
pub mod uki;
