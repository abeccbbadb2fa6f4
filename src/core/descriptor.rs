//! Descriptor parsing: turns the `frames` section of a texture-packer
//! property list into a `SpriteTable`.
use tracing::{debug, warn};

use crate::io::plist::{PlistDict, PlistError};
use crate::types::{FrameInfo, IntRect, IntVector2, SpriteTable, Vec2};

/// Non-fatal findings reported while parsing frames
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameWarning {
    /// Frame was packed rotated; the exported sprite is not upright
    Rotated { name: String },
    /// Only one of `sourceColorRect` left/top is non-zero, so no trim offset was applied
    PartialTrim { name: String, source_color_rect: IntRect },
}

impl FrameWarning {
    pub fn sprite_name(&self) -> &str {
        match self {
            FrameWarning::Rotated { name } | FrameWarning::PartialTrim { name, .. } => name,
        }
    }
}

impl std::fmt::Display for FrameWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameWarning::Rotated { name } => {
                write!(f, "{} is rotated; exported image is not upright", name)
            }
            FrameWarning::PartialTrim {
                name,
                source_color_rect,
            } => write!(
                f,
                "{} has sourceColorRect {} with a single zero edge; trim offset not applied",
                name, source_color_rect
            ),
        }
    }
}

/// Sprite table plus the warnings raised while building it
#[derive(Clone, Debug, Default)]
pub struct ParsedDescriptor {
    pub sprites: SpriteTable,
    pub warnings: Vec<FrameWarning>,
}

/// Build the sprite table from a descriptor's top-level dictionary.
///
/// Every frame needs `rotated` and `frame`; `offset`, `sourceColorRect` and
/// `sourceSize` are read when present. A missing or mistyped required key is
/// returned as the accessor's `PlistError` unchanged.
pub fn parse_frames(root: &PlistDict) -> Result<ParsedDescriptor, PlistError> {
    let frames = root.dict("frames")?;
    let mut parsed = ParsedDescriptor::default();

    for (name, value) in frames {
        let entry = value.as_dict().ok_or_else(|| PlistError::TypeMismatch {
            key: name.clone(),
            expected: "dict",
            found: value.kind(),
        })?;
        let frame = parse_frame(name, entry, &mut parsed.warnings)?;
        debug!("Frame {} -> {} offset {}", name, frame.rect, frame.offset);
        parsed.sprites.insert(name.clone(), frame);
    }

    Ok(parsed)
}

fn parse_frame(
    name: &str,
    entry: &PlistDict,
    warnings: &mut Vec<FrameWarning>,
) -> Result<FrameInfo, PlistError> {
    let rotated = entry.bool("rotated")?;
    let rect = entry.int_rect("frame", rotated)?;
    if rotated {
        warn!("{} is rotated!", name);
        warnings.push(FrameWarning::Rotated {
            name: name.to_string(),
        });
    }

    let mut offset = IntVector2::ZERO;
    if entry.contains_key("offset") {
        offset = entry.int_vector2("offset")?;
    }

    let mut hot_spot = Vec2::CENTER;
    if entry.contains_key("sourceColorRect") {
        let source_color_rect = entry.int_rect("sourceColorRect", false)?;
        if source_color_rect.left != 0 && source_color_rect.top != 0 {
            offset = IntVector2::new(-source_color_rect.left, -source_color_rect.top);
            let source_size = entry.int_vector2("sourceSize")?;
            hot_spot = compute_hot_spot(offset, source_size, rect);
        } else if source_color_rect.left != 0 || source_color_rect.top != 0 {
            let warning = FrameWarning::PartialTrim {
                name: name.to_string(),
                source_color_rect,
            };
            warn!("{}", warning);
            warnings.push(warning);
        }
    }

    Ok(FrameInfo {
        rect,
        offset,
        rotated,
        hot_spot,
    })
}

/// Normalized anchor of a trimmed sprite; y grows upwards
pub fn compute_hot_spot(offset: IntVector2, source_size: IntVector2, rect: IntRect) -> Vec2 {
    Vec2::new(
        (offset.x as f32 + source_size.x as f32 / 2.0) / rect.width as f32,
        1.0 - (offset.y as f32 + source_size.y as f32 / 2.0) / rect.height as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::plist::PlistValue;

    fn frame(pairs: &[(&str, PlistValue)]) -> PlistValue {
        PlistValue::Dict(pairs.iter().map(|(k, v)| (*k, v.clone())).collect())
    }

    fn s(text: &str) -> PlistValue {
        PlistValue::String(text.to_string())
    }

    fn root_with(frames: Vec<(&str, PlistValue)>) -> PlistDict {
        [("frames", PlistValue::Dict(frames.into_iter().collect()))]
            .into_iter()
            .collect()
    }

    #[test]
    fn plain_frame_has_zero_offset_and_centered_hot_spot() {
        let root = root_with(vec![(
            "idle.png",
            frame(&[
                ("rotated", PlistValue::Bool(false)),
                ("frame", s("{{4,8},{16,32}}")),
            ]),
        )]);

        let parsed = parse_frames(&root).unwrap();
        let info = &parsed.sprites["idle.png"];
        assert_eq!(info.rect, IntRect::new(4, 8, 16, 32));
        assert_eq!(info.offset, IntVector2::ZERO);
        assert_eq!(info.hot_spot, Vec2::CENTER);
        assert!(!info.rotated);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn explicit_offset_is_kept_without_trim() {
        let root = root_with(vec![(
            "a",
            frame(&[
                ("rotated", PlistValue::Bool(false)),
                ("frame", s("{{0,0},{10,10}}")),
                ("offset", s("{3,-2}")),
                ("sourceColorRect", s("{{0,0},{10,10}}")),
            ]),
        )]);
        let parsed = parse_frames(&root).unwrap();
        assert_eq!(parsed.sprites["a"].offset, IntVector2::new(3, -2));
    }

    #[test]
    fn trimmed_frame_offset_and_hot_spot() {
        let root = root_with(vec![(
            "trimmed",
            frame(&[
                ("rotated", PlistValue::Bool(false)),
                ("frame", s("{{0,0},{100,100}}")),
                ("offset", s("{7,7}")),
                ("sourceColorRect", s("{{10,20},{100,100}}")),
                ("sourceSize", s("{120,140}")),
            ]),
        )]);

        let parsed = parse_frames(&root).unwrap();
        let info = &parsed.sprites["trimmed"];
        assert_eq!(info.offset, IntVector2::new(-10, -20));
        assert_eq!(info.hot_spot, Vec2::new(0.5, 0.5));
        assert!((0.0..=1.0).contains(&info.hot_spot.x));
        assert!((0.0..=1.0).contains(&info.hot_spot.y));
    }

    #[test]
    fn trimmed_frame_requires_source_size() {
        let root = root_with(vec![(
            "trimmed",
            frame(&[
                ("rotated", PlistValue::Bool(false)),
                ("frame", s("{{0,0},{100,100}}")),
                ("sourceColorRect", s("{{10,20},{100,100}}")),
            ]),
        )]);
        assert!(matches!(
            parse_frames(&root),
            Err(PlistError::MissingKey(k)) if k == "sourceSize"
        ));
    }

    #[test]
    fn rotated_frame_swaps_size_and_warns_once() {
        let root = root_with(vec![
            (
                "turned",
                frame(&[
                    ("rotated", PlistValue::Bool(true)),
                    ("frame", s("{{2,2},{30,10}}")),
                ]),
            ),
            (
                "upright",
                frame(&[
                    ("rotated", PlistValue::Bool(false)),
                    ("frame", s("{{40,2},{30,10}}")),
                ]),
            ),
        ]);

        let parsed = parse_frames(&root).unwrap();
        assert_eq!(parsed.sprites["turned"].rect, IntRect::new(2, 2, 10, 30));
        assert!(parsed.sprites["turned"].rotated);
        assert_eq!(
            parsed.warnings,
            vec![FrameWarning::Rotated {
                name: "turned".to_string()
            }]
        );
    }

    #[test]
    fn single_zero_trim_edge_is_reported_not_applied() {
        let root = root_with(vec![(
            "edge",
            frame(&[
                ("rotated", PlistValue::Bool(false)),
                ("frame", s("{{0,0},{50,50}}")),
                ("sourceColorRect", s("{{0,6},{50,50}}")),
                ("sourceSize", s("{50,56}")),
            ]),
        )]);

        let parsed = parse_frames(&root).unwrap();
        assert_eq!(parsed.sprites["edge"].offset, IntVector2::ZERO);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].sprite_name(), "edge");
        assert!(matches!(
            parsed.warnings[0],
            FrameWarning::PartialTrim { .. }
        ));
    }

    #[test]
    fn empty_frames_yield_empty_table() {
        let root = root_with(vec![]);
        let parsed = parse_frames(&root).unwrap();
        assert!(parsed.sprites.is_empty());
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn missing_required_keys_propagate() {
        let no_frames = PlistDict::new();
        assert!(matches!(
            parse_frames(&no_frames),
            Err(PlistError::MissingKey(k)) if k == "frames"
        ));

        let no_rotated = root_with(vec![("a", frame(&[("frame", s("{{0,0},{1,1}}"))]))]);
        assert!(matches!(
            parse_frames(&no_rotated),
            Err(PlistError::MissingKey(k)) if k == "rotated"
        ));

        let not_a_dict = root_with(vec![("a", s("oops"))]);
        assert!(matches!(
            parse_frames(&not_a_dict),
            Err(PlistError::TypeMismatch { key, expected: "dict", found: "string" }) if key == "a"
        ));
    }
}
