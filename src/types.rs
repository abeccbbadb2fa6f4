//! Shared geometry and frame types used across plistsplit.
//! Includes `IntRect`, `IntVector2`, `Vec2`, the per-sprite `FrameInfo` and
//! the `SpriteTable` built from a descriptor.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Integer 2D vector (offsets, untrimmed sprite sizes)
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct IntVector2 {
    pub x: i32,
    pub y: i32,
}

impl IntVector2 {
    pub const ZERO: IntVector2 = IntVector2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for IntVector2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned integer rectangle in source-image pixel space
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.left as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.top as i64 + self.height as i64
    }

    /// True when the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// True when the rectangle is non-empty and lies inside a `width` x `height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty()
            && self.left >= 0
            && self.top >= 0
            && self.right() <= width as i64
            && self.bottom() <= height as i64
    }
}

impl std::fmt::Display for IntRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {} {}x{}]",
            self.left, self.top, self.width, self.height
        )
    }
}

#[derive(Copy, Clone, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Default hotspot: the sprite center
    pub const CENTER: Vec2 = Vec2 { x: 0.5, y: 0.5 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Geometry of one packed sprite
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FrameInfo {
    /// Region of the composite texture holding the sprite's pixels
    pub rect: IntRect,
    /// Trimming offset relative to the untrimmed sprite bounds
    pub offset: IntVector2,
    /// Packed with a 90° rotation; pixels are exported as stored
    pub rotated: bool,
    /// Normalized anchor point (0..1), only differs from the center for trimmed sprites
    pub hot_spot: Vec2,
}

impl FrameInfo {
    pub fn new(rect: IntRect) -> Self {
        Self {
            rect,
            offset: IntVector2::ZERO,
            rotated: false,
            hot_spot: Vec2::CENTER,
        }
    }
}

/// Sprite name to frame geometry
pub type SpriteTable = BTreeMap<String, FrameInfo>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_fits_within_bounds() {
        assert!(IntRect::new(0, 0, 8, 8).fits_within(8, 8));
        assert!(IntRect::new(4, 2, 4, 6).fits_within(8, 8));
        assert!(!IntRect::new(5, 0, 4, 4).fits_within(8, 8));
        assert!(!IntRect::new(-1, 0, 2, 2).fits_within(8, 8));
        assert!(!IntRect::new(0, 0, 0, 4).fits_within(8, 8));
    }

    #[test]
    fn rect_edges_do_not_overflow() {
        let r = IntRect::new(i32::MAX, 0, i32::MAX, 1);
        assert_eq!(r.right(), 2 * i32::MAX as i64);
        assert!(!r.fits_within(4096, 4096));
    }
}
