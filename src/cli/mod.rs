//! Command Line Interface (CLI) layer for plistsplit.
//!
//! This module defines argument normalization and parsing (`args`) and the
//! orchestration logic (`runner`) for a single extraction run. It wires
//! user-provided options to the library functionality exposed via
//! `plistsplit::api`.
pub mod args;
pub mod runner;

pub use args::{CliArgs, normalize_args};
pub use runner::run;
