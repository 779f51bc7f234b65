//! Shape and material descriptors
//!
//! Block kinds map to their render style through a fixed lookup table
//! instead of a per-draw branch; the host resolves texture names against
//! its own asset store.

use crate::sim::BlockKind;

/// Unit shapes the host knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Sphere,
    /// Host-loaded mesh, addressed by asset name
    Mesh(&'static str),
}

/// Flat material descriptor: RGBA color plus an optional texture name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 4],
    pub texture: Option<&'static str>,
}

impl Material {
    pub const fn flat(color: [f32; 4]) -> Self {
        Self {
            color,
            texture: None,
        }
    }

    pub const fn textured(color: [f32; 4], texture: &'static str) -> Self {
        Self {
            color,
            texture: Some(texture),
        }
    }
}

/// A drawable style: which unit shape, with which material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub shape: ShapeKind,
    pub material: Material,
}

const CRATE_STYLE: Style = Style {
    shape: ShapeKind::Cube,
    material: Material::textured([0.55, 0.35, 0.17, 1.0], "crate"),
};

const SAND_STYLE: Style = Style {
    shape: ShapeKind::Cube,
    material: Material::textured([0.93, 0.79, 0.69, 1.0], "sand"),
};

const STONE_STYLE: Style = Style {
    shape: ShapeKind::Cube,
    material: Material::textured([0.50, 0.50, 0.50, 1.0], "stone"),
};

/// Indexed by `BlockKind::index`; destroyed blocks have no style and are
/// simply not drawn
const BLOCK_STYLES: [Option<Style>; 4] = [
    None,
    Some(CRATE_STYLE),
    Some(SAND_STYLE),
    Some(STONE_STYLE),
];

/// Render style for a block kind, `None` when the block is destroyed
#[inline]
pub fn block_style(kind: BlockKind) -> Option<&'static Style> {
    BLOCK_STYLES[kind.index()].as_ref()
}

/// The single fixed style used for lit mask cells on the letter screens
#[inline]
pub fn letter_style() -> &'static Style {
    &CRATE_STYLE
}

/// Ball material (plastic blue)
pub const BALL_MATERIAL: Material = Material::flat([0.10, 0.62, 0.98, 1.0]);

/// Paddle material (light green)
pub const PADDLE_MATERIAL: Material = Material::flat([0.56, 0.93, 0.56, 1.0]);

/// Border material
pub const BORDER_MATERIAL: Material = Material::flat([0.85, 0.85, 0.85, 1.0]);
