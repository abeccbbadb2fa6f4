//! Core building blocks: descriptor parsing, sub-image extraction, path
//! derivation and run parameters. These are the primitives consumed by the
//! high-level `api` module.
pub mod descriptor;
pub mod extract;
pub mod params;
pub mod paths;
