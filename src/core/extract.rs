//! Sub-image extraction: crops every frame out of the composite texture and
//! writes it as its own PNG under the output directory.
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, ImageFormat};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::paths::sprite_output_path;
use crate::error::Result;
use crate::types::{IntRect, SpriteTable};

/// Where extracted sprites go
#[derive(Debug, Clone)]
pub struct ExtractContext {
    pub output_dir: PathBuf,
}

impl ExtractContext {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

/// Outcome of one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    /// Files written, in processing order
    pub written: Vec<PathBuf>,
    /// Sprites whose rectangle was empty or outside the texture, or whose
    /// name maps to no file path
    pub skipped: Vec<String>,
    /// Parent directories created on demand
    pub directories_created: usize,
}

/// Copy `rect` out of `image`.
///
/// Returns None for an empty rectangle or one reaching past the image edges;
/// no clamping is attempted.
pub fn crop_frame(image: &DynamicImage, rect: &IntRect) -> Option<DynamicImage> {
    let (width, height) = image.dimensions();
    if !rect.fits_within(width, height) {
        return None;
    }
    Some(image.crop_imm(
        rect.left as u32,
        rect.top as u32,
        rect.width as u32,
        rect.height as u32,
    ))
}

/// Write one PNG per sprite; invalid rectangles are skipped, I/O and encoding errors abort.
pub fn extract_sprites(
    image: &DynamicImage,
    sprites: &SpriteTable,
    ctx: &ExtractContext,
) -> Result<ExtractReport> {
    let mut report = ExtractReport::default();
    let mut known_dirs: HashSet<PathBuf> = HashSet::new();

    for (name, frame) in sprites {
        let Some(sub_image) = crop_frame(image, &frame.rect) else {
            debug!("Skipping {}: rectangle {} outside texture", name, frame.rect);
            report.skipped.push(name.clone());
            continue;
        };

        let Some(output) = sprite_output_path(&ctx.output_dir, name) else {
            warn!("Skipping {:?}: name has no usable file path", name);
            report.skipped.push(name.clone());
            continue;
        };
        if let Some(parent) = output.parent() {
            if ensure_dir(parent, &mut known_dirs)? {
                report.directories_created += 1;
            }
        }

        sub_image.save_with_format(&output, ImageFormat::Png)?;
        debug!("Wrote {:?}", output);
        report.written.push(output);
    }

    info!(
        "Extracted {} sprite(s) to {:?}, skipped {}",
        report.written.len(),
        ctx.output_dir,
        report.skipped.len()
    );
    Ok(report)
}

// Creates `dir` the first time it is seen; returns true if it did not exist yet.
fn ensure_dir(dir: &Path, known: &mut HashSet<PathBuf>) -> Result<bool> {
    if !known.insert(dir.to_path_buf()) {
        return Ok(false);
    }
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrameInfo;
    use image::{Rgba, RgbaImage};

    fn checkerboard(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, 0, 255])
        }))
    }

    #[test]
    fn crop_copies_requested_region() {
        let image = checkerboard(8, 8);
        let sub = crop_frame(&image, &IntRect::new(2, 3, 4, 2)).unwrap();
        assert_eq!(sub.dimensions(), (4, 2));
        assert_eq!(sub.get_pixel(0, 0), Rgba([32, 48, 0, 255]));
        assert_eq!(sub.get_pixel(3, 1), Rgba([80, 64, 0, 255]));
    }

    #[test]
    fn crop_rejects_invalid_rectangles() {
        let image = checkerboard(8, 8);
        assert!(crop_frame(&image, &IntRect::new(0, 0, 0, 4)).is_none());
        assert!(crop_frame(&image, &IntRect::new(6, 0, 4, 4)).is_none());
        assert!(crop_frame(&image, &IntRect::new(0, -1, 4, 4)).is_none());
        assert!(crop_frame(&image, &IntRect::new(0, 0, 8, 8)).is_some());
    }

    #[test]
    fn extraction_creates_nested_directories_once() {
        let dir = tempfile::tempdir().unwrap();
        let image = checkerboard(8, 8);
        let mut sprites = SpriteTable::new();
        sprites.insert("ui/a.png".into(), FrameInfo::new(IntRect::new(0, 0, 2, 2)));
        sprites.insert("ui/b.png".into(), FrameInfo::new(IntRect::new(2, 0, 2, 2)));
        sprites.insert("ui/deep/c.png".into(), FrameInfo::new(IntRect::new(4, 0, 2, 2)));
        sprites.insert("gone.png".into(), FrameInfo::new(IntRect::new(7, 7, 2, 2)));

        let ctx = ExtractContext::new(dir.path().join("out"));
        let report = extract_sprites(&image, &sprites, &ctx).unwrap();

        assert_eq!(report.written.len(), 3);
        assert_eq!(report.skipped, vec!["gone.png".to_string()]);
        assert_eq!(report.directories_created, 2);
        assert!(dir.path().join("out/ui/deep/c.png").is_file());
        assert!(!dir.path().join("out/gone.png").exists());
    }

    #[test]
    fn unusable_names_are_skipped_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        let image = checkerboard(8, 8);
        let mut sprites = SpriteTable::new();
        sprites.insert("..".into(), FrameInfo::new(IntRect::new(0, 0, 2, 2)));
        sprites.insert("".into(), FrameInfo::new(IntRect::new(0, 0, 2, 2)));
        sprites.insert("ok.png".into(), FrameInfo::new(IntRect::new(2, 2, 2, 2)));

        let out = dir.path().join("out");
        let report = extract_sprites(&image, &sprites, &ExtractContext::new(&out)).unwrap();

        assert_eq!(report.written, vec![out.join("ok.png")]);
        assert_eq!(report.skipped, vec!["".to_string(), "..".to_string()]);
        assert!(out.join("ok.png").is_file());
    }
}
