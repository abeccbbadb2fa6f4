use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Extraction parameters suitable for config files and scripted runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractParams {
    /// Sprite sheet descriptor (.plist)
    pub plist: PathBuf,
    /// Output directory; None derives it from the descriptor path
    pub output_dir: Option<PathBuf>,
    /// If true, write `manifest.json` with frame geometry next to the sprites
    #[serde(default)]
    pub manifest: bool,
}

impl ExtractParams {
    pub fn new(plist: impl Into<PathBuf>) -> Self {
        Self {
            plist: plist.into(),
            output_dir: None,
            manifest: false,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_manifest(mut self, manifest: bool) -> Self {
        self.manifest = manifest;
        self
    }
}
