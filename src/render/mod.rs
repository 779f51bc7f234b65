//! Presentation seam
//!
//! The core never touches pixels. It composes world transforms with `glam`
//! and hands them to a [`DrawSurface`] together with a shape and material
//! descriptor; the platform host owns the actual drawing. On the web build
//! the host is the embedding page, in tests it is a recording stub.

use glam::{Mat4, Vec2, Vec3};

pub mod scene;
pub mod style;

pub use scene::Scene;
pub use style::{Material, ShapeKind, Style, block_style, letter_style};

/// Fire-and-forget draw interface implemented by the platform host.
///
/// A host whose asset for a call is not ready yet skips that draw for the
/// frame; the scene pass re-issues every call next frame anyway, so a
/// skipped draw is a no-op, never an error.
pub trait DrawSurface {
    /// Draw a unit shape under `transform` with the given material
    fn draw(&mut self, shape: ShapeKind, transform: Mat4, material: &Material);
    /// Draw a text label under `transform`
    fn draw_text(&mut self, text: &str, transform: Mat4);
}

/// Place a unit shape: translate to `pos` on the arena plane, then scale
/// by half-extents
#[inline]
pub fn place(pos: Vec2, half_extents: Vec3) -> Mat4 {
    Mat4::from_translation(pos.extend(0.0)) * Mat4::from_scale(half_extents)
}

/// Uniform-scale placement
#[inline]
pub fn place_uniform(pos: Vec2, half_extent: f32) -> Mat4 {
    place(pos, Vec3::splat(half_extent))
}
