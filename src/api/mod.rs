//! High-level, ergonomic library API: load a sprite sheet descriptor and its
//! texture, then slice the texture into per-sprite PNG files. Prefer these
//! entrypoints over the lower-level `core` and `io` modules when embedding
//! plistsplit.
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use tracing::info;

use crate::core::descriptor::{FrameWarning, parse_frames};
use crate::core::extract::{ExtractContext, ExtractReport, extract_sprites};
use crate::core::params::ExtractParams;
use crate::core::paths::{default_output_dir, resolve_against, sprite_output_path, texture_path};
use crate::error::{Error, Result};
use crate::io::plist::{PlistDict, PlistError, load_plist};
use crate::io::writers::manifest::{FrameManifest, MANIFEST_FILE_NAME, write_manifest};
use crate::types::SpriteTable;

/// Explicit run context; relative input and output paths resolve against `working_dir`
#[derive(Debug, Clone)]
pub struct RunContext {
    pub working_dir: PathBuf,
}

impl RunContext {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// Context rooted at the process's current directory
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub descriptor: PathBuf,
    pub texture: PathBuf,
    pub output_dir: PathBuf,
    pub sprites: SpriteTable,
    pub warnings: Vec<FrameWarning>,
    pub extract: ExtractReport,
    pub manifest: Option<PathBuf>,
}

/// Load a descriptor file; any read or decode failure becomes `Error::Descriptor`
pub fn load_descriptor(path: &Path) -> Result<PlistDict> {
    load_plist(path).map_err(|source| Error::Descriptor {
        path: path.to_path_buf(),
        source,
    })
}

/// Texture file named in the descriptor's `metadata` section.
///
/// Reads `realTextureFileName`, falling back to `textureFileName` when the
/// former is absent.
pub fn texture_file_name(root: &PlistDict) -> Result<&str> {
    let metadata = root.dict("metadata")?;
    let name = if metadata.contains_key("realTextureFileName") {
        metadata.string("realTextureFileName")?
    } else if metadata.contains_key("textureFileName") {
        metadata.string("textureFileName")?
    } else {
        return Err(PlistError::MissingKey("realTextureFileName".to_string()).into());
    };
    Ok(name)
}

/// Decode the composite texture; any failure becomes `Error::Texture`
pub fn load_texture(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| Error::Texture {
        path: path.to_path_buf(),
        source,
    })
}

/// Run a full extraction: descriptor, frames, texture, sprites, optional manifest.
///
/// The output directory is only created once both inputs decoded, so a
/// failed run leaves nothing behind. With `params.manifest` set, a sprite
/// whose output path is the manifest file fails the run up front.
pub fn extract_plist(params: &ExtractParams, ctx: &RunContext) -> Result<RunReport> {
    let descriptor = resolve_against(&ctx.working_dir, &params.plist);
    let output_dir = match &params.output_dir {
        Some(dir) => resolve_against(&ctx.working_dir, dir),
        None => default_output_dir(&descriptor),
    };

    info!("Loading sprite sheet descriptor: {:?}", descriptor);
    let root = load_descriptor(&descriptor)?;
    let parsed = parse_frames(&root)?;
    info!("Parsed {} frame(s)", parsed.sprites.len());
    if params.manifest {
        check_manifest_collision(&output_dir, &parsed.sprites)?;
    }

    let texture = texture_path(&descriptor, texture_file_name(&root)?);
    info!("Loading sprite sheet texture: {:?}", texture);
    let image = load_texture(&texture)?;

    std::fs::create_dir_all(&output_dir)?;
    let extract = extract_sprites(&image, &parsed.sprites, &ExtractContext::new(&output_dir))?;

    let manifest = if params.manifest {
        let manifest = FrameManifest::new(&descriptor, &texture, image.dimensions(), &parsed.sprites);
        Some(write_manifest(&output_dir, &manifest)?)
    } else {
        None
    };

    Ok(RunReport {
        descriptor,
        texture,
        output_dir,
        sprites: parsed.sprites,
        warnings: parsed.warnings,
        extract,
        manifest,
    })
}

// A sprite that maps onto the manifest file would be silently replaced by it
fn check_manifest_collision(output_dir: &Path, sprites: &SpriteTable) -> Result<()> {
    let manifest = output_dir.join(MANIFEST_FILE_NAME);
    match sprites
        .keys()
        .find(|name| sprite_output_path(output_dir, name).as_ref() == Some(&manifest))
    {
        Some(sprite) => Err(Error::ManifestCollision {
            sprite: sprite.clone(),
            path: manifest,
        }),
        None => Ok(()),
    }
}

/// Convenience wrapper: extract `plist` into `output_dir`, resolving relative
/// paths against the current directory
pub fn extract_plist_to_dir(plist: &Path, output_dir: &Path) -> Result<RunReport> {
    let params = ExtractParams::new(plist).with_output_dir(output_dir);
    extract_plist(&params, &RunContext::from_current_dir()?)
}
