//! Output writers other than the sprite images themselves.
pub mod manifest;
