//! I/O layer: the XML property-list reader for sprite sheet descriptors and
//! `writers` for the frame manifest sidecar.
pub mod plist;
pub use plist::{PlistDict, PlistError, PlistValue, load_plist};

pub mod writers;
