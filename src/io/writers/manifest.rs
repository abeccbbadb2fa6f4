use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::types::SpriteTable;

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Frame geometry sidecar written next to the extracted sprites
#[derive(Debug, Serialize)]
pub struct FrameManifest<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub descriptor: &'a Path,
    pub texture: &'a Path,
    pub texture_size: [u32; 2],
    pub sprites: &'a SpriteTable,
}

impl<'a> FrameManifest<'a> {
    pub fn new(
        descriptor: &'a Path,
        texture: &'a Path,
        texture_size: (u32, u32),
        sprites: &'a SpriteTable,
    ) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            descriptor,
            texture,
            texture_size: [texture_size.0, texture_size.1],
            sprites,
        }
    }
}

/// Write `manifest.json` into `output_dir`. No timestamps, so reruns produce identical bytes.
pub fn write_manifest(output_dir: &Path, manifest: &FrameManifest<'_>) -> Result<PathBuf> {
    let manifest_path = output_dir.join(MANIFEST_FILE_NAME);
    let json_string = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json_string)?;
    info!("Created frame manifest: {:?}", manifest_path);
    Ok(manifest_path)
}
