//! Path derivation for a run: where the descriptor lives, where the texture
//! is found, and where sprites are written.
use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Default output directory: the descriptor's directory plus its base name.
/// `/art/ui/buttons.plist` maps to `/art/ui/buttons`.
pub fn default_output_dir(descriptor: &Path) -> PathBuf {
    let parent = descriptor.parent().unwrap_or_else(|| Path::new(""));
    match descriptor.file_stem() {
        Some(stem) => parent.join(stem),
        None => parent.to_path_buf(),
    }
}

/// Texture named by the descriptor's metadata, relative to the descriptor's directory
pub fn texture_path(descriptor: &Path, texture_file_name: &str) -> PathBuf {
    descriptor
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(texture_file_name)
}

/// Output file for a sprite. `/` in the name becomes nested directories;
/// empty, `.` and `..` segments are dropped so the result stays under `output_dir`.
///
/// Returns `None` when no segment survives (`""`, `..`, `/`): such a name
/// would resolve to `output_dir` itself.
pub fn sprite_output_path(output_dir: &Path, name: &str) -> Option<PathBuf> {
    let mut path = output_dir.to_path_buf();
    let mut kept = 0;
    for segment in name.split(['/', '\\']) {
        let mut components = Path::new(segment).components();
        if let (Some(Component::Normal(part)), None) = (components.next(), components.next()) {
            path.push(part);
            kept += 1;
        }
    }
    (kept > 0).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_defaults_next_to_descriptor() {
        assert_eq!(
            default_output_dir(Path::new("/art/ui/buttons.plist")),
            PathBuf::from("/art/ui/buttons")
        );
        assert_eq!(
            default_output_dir(Path::new("sheet.plist")),
            PathBuf::from("sheet")
        );
    }

    #[test]
    fn texture_resolves_beside_descriptor() {
        assert_eq!(
            texture_path(Path::new("/art/ui/buttons.plist"), "buttons.png"),
            PathBuf::from("/art/ui/buttons.png")
        );
        assert_eq!(
            texture_path(Path::new("/art/ui/buttons.plist"), "hd/buttons.png"),
            PathBuf::from("/art/ui/hd/buttons.png")
        );
    }

    #[test]
    fn relative_paths_use_base() {
        let base = Path::new("/work");
        assert_eq!(
            resolve_against(base, Path::new("a/b.plist")),
            PathBuf::from("/work/a/b.plist")
        );
        assert_eq!(
            resolve_against(base, Path::new("/abs/b.plist")),
            PathBuf::from("/abs/b.plist")
        );
    }

    #[test]
    fn sprite_names_nest_and_stay_inside() {
        let out = Path::new("/out");
        assert_eq!(
            sprite_output_path(out, "hero/walk/01.png"),
            Some(PathBuf::from("/out/hero/walk/01.png"))
        );
        assert_eq!(
            sprite_output_path(out, "icon.png"),
            Some(PathBuf::from("/out/icon.png"))
        );
        assert_eq!(
            sprite_output_path(out, "/../../etc//./x.png"),
            Some(PathBuf::from("/out/etc/x.png"))
        );
    }

    #[test]
    fn names_without_a_usable_segment_have_no_output() {
        let out = Path::new("/out");
        for name in ["", ".", "..", "/", "../..", "./", "\\"] {
            assert_eq!(sprite_output_path(out, name), None, "{name:?}");
        }
    }
}
