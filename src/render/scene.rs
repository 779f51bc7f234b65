//! Scene pass
//!
//! Walks a `GameSession` once per frame and emits one draw call per visible
//! entity. Which grid is shown depends on the phase: the gameplay blocks
//! while `Playing`, a block-letter mask screen otherwise - never both.

use glam::{Vec2, Vec3};

use super::style::{self, BALL_MATERIAL, BORDER_MATERIAL, PADDLE_MATERIAL, ShapeKind};
use super::{DrawSurface, place, place_uniform};
use crate::consts::*;
use crate::sim::{BlockGrid, GamePhase, GameSession, Mask};

/// Visual half-height of the paddle bar
const PADDLE_HALF_HEIGHT: f32 = 0.35;
/// Side borders reach a little below the paddle line
const WALL_BOTTOM: f32 = PADDLE_Y - 5.0;

/// Owns the three pre-painted letter screens and emits the frame's draws
pub struct Scene {
    title: Mask,
    won: Mask,
    lost: Mask,
}

impl Scene {
    pub fn new() -> Self {
        let mut title = Mask::new(GRID_ROWS, GRID_COLS);
        title.paint_message("CRATE");
        let mut won = Mask::new(GRID_ROWS, GRID_COLS);
        won.paint_message("YOU WIN");
        let mut lost = Mask::new(GRID_ROWS, GRID_COLS);
        lost.paint_message("THE END");
        Self { title, won, lost }
    }

    /// Emit the frame's draw calls for the current session state
    pub fn render(&self, session: &GameSession, surface: &mut impl DrawSurface) {
        self.draw_borders(surface);

        match session.phase {
            GamePhase::Playing => {
                self.draw_grid(session, surface);
                surface.draw(
                    ShapeKind::Sphere,
                    place_uniform(session.ball.pos, session.ball.radius),
                    &BALL_MATERIAL,
                );
                surface.draw(
                    ShapeKind::Cube,
                    place(
                        session.paddle.pos,
                        Vec3::new(session.paddle.half_width, PADDLE_HALF_HEIGHT, 1.0),
                    ),
                    &PADDLE_MATERIAL,
                );
                surface.draw_text(
                    &format!("SCORE {}", session.score),
                    place_uniform(Vec2::new(-ARENA_HALF_WIDTH, ARENA_TOP + 3.0), 1.0),
                );
                surface.draw_text(
                    &format!("LIVES {}", session.lives),
                    place_uniform(Vec2::new(ARENA_HALF_WIDTH - 14.0, ARENA_TOP + 3.0), 1.0),
                );
            }
            GamePhase::Start => {
                self.draw_mask(&self.title, surface);
                surface.draw_text(
                    "PRESS R TO PLAY",
                    place_uniform(Vec2::new(-14.0, -5.0), 1.0),
                );
            }
            GamePhase::Won => {
                self.draw_mask(&self.won, surface);
                self.draw_final_score(session, surface);
            }
            GamePhase::GameOver => {
                self.draw_mask(&self.lost, surface);
                self.draw_final_score(session, surface);
            }
        }
    }

    fn draw_borders(&self, surface: &mut impl DrawSurface) {
        let wall_center_y = (ARENA_TOP + BORDER_THICKNESS + WALL_BOTTOM) / 2.0;
        let wall_half_height = (ARENA_TOP + BORDER_THICKNESS - WALL_BOTTOM) / 2.0;
        let wall_center_x = ARENA_HALF_WIDTH + BORDER_THICKNESS / 2.0;
        let side = Vec3::new(BORDER_THICKNESS / 2.0, wall_half_height, 1.0);

        surface.draw(
            ShapeKind::Cube,
            place(Vec2::new(-wall_center_x, wall_center_y), side),
            &BORDER_MATERIAL,
        );
        surface.draw(
            ShapeKind::Cube,
            place(Vec2::new(wall_center_x, wall_center_y), side),
            &BORDER_MATERIAL,
        );
        surface.draw(
            ShapeKind::Cube,
            place(
                Vec2::new(0.0, ARENA_TOP + BORDER_THICKNESS / 2.0),
                Vec3::new(
                    ARENA_HALF_WIDTH + BORDER_THICKNESS,
                    BORDER_THICKNESS / 2.0,
                    1.0,
                ),
            ),
            &BORDER_MATERIAL,
        );
    }

    fn draw_grid(&self, session: &GameSession, surface: &mut impl DrawSurface) {
        for block in session.grid.live_blocks() {
            let Some(style) = style::block_style(block.kind) else {
                continue;
            };
            surface.draw(
                style.shape,
                place_uniform(block.pos, BLOCK_HALF_DIM),
                &style.material,
            );
        }
    }

    /// Letter screens light mask cells as a single fixed block style,
    /// independent of gameplay grid state
    fn draw_mask(&self, mask: &Mask, surface: &mut impl DrawSurface) {
        let style = style::letter_style();
        for (row, col) in mask.lit_cells() {
            surface.draw(
                style.shape,
                place_uniform(BlockGrid::cell_position(row, col), BLOCK_HALF_DIM),
                &style.material,
            );
        }
    }

    fn draw_final_score(&self, session: &GameSession, surface: &mut impl DrawSurface) {
        surface.draw_text(
            &format!("FINAL SCORE {}", session.score),
            place_uniform(Vec2::new(-11.0, -5.0), 1.0),
        );
        surface.draw_text(
            "PRESS R TO PLAY AGAIN",
            place_uniform(Vec2::new(-19.0, -10.0), 1.0),
        );
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}
