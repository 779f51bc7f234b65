//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per frame callback, driven by the platform loop
//! - Seeded RNG only
//! - Stable scan order (row-major over the grid)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{Outcome, Side, resolve};
pub use grid::{Block, BlockGrid, BlockKind, Mask};
pub use state::{Ball, GamePhase, GameSession, MoveIntents, Paddle};
pub use tick::{TickInput, tick};
