//! Collision detection and response
//!
//! One resolution pass per frame, in fixed priority order: ball-lost check,
//! paddle, borders (left/right/top), block scan. The first category that
//! fires is the frame's only response - later categories are not evaluated.
//!
//! Every test treats the ball as an axis-aligned square of side
//! `2 * radius`. The paddle-angle response math assumes exactly this, so
//! it must not be tightened into a circle test.

use glam::Vec2;

use super::grid::BlockGrid;
use super::state::{Ball, Paddle};
use crate::consts::*;

/// Which border the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
}

/// The single response applied this frame, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Ball crossed the open bottom edge; no bounce, a life is forfeit
    BallLost,
    /// Angled return off the paddle, speed budget redistributed
    PaddleBounce,
    /// One velocity axis negated against a static border
    BorderBounce(Side),
    /// One velocity axis negated against a block face; `scored` is true
    /// when the hit downgraded the block's kind
    BlockHit {
        row: usize,
        col: usize,
        scored: bool,
    },
}

/// Run the frame's collision pass, mutating ball velocity and block state.
///
/// Returns the first (and only) response that fired, or `None` for a free
/// flight frame.
pub fn resolve(ball: &mut Ball, paddle: &Paddle, grid: &mut BlockGrid) -> Option<Outcome> {
    // Bottom check outranks every bounce
    if ball.pos.y < paddle.pos.y {
        return Some(Outcome::BallLost);
    }

    if paddle_bounce(ball, paddle) {
        log::debug!("paddle bounce, vel {:?}", ball.vel);
        return Some(Outcome::PaddleBounce);
    }

    if let Some(side) = border_bounce(ball) {
        log::debug!("{side:?} border bounce");
        return Some(Outcome::BorderBounce(side));
    }

    if let Some(outcome) = block_bounce(ball, grid) {
        return Some(outcome);
    }

    None
}

/// Paddle test and response.
///
/// Only a falling ball can hit the paddle - a ball already returning
/// upward must not re-trigger while still overlapping the paddle plane.
fn paddle_bounce(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.vel.y >= 0.0 {
        return false;
    }

    let x_overlap = ball.pos.x - ball.radius < paddle.pos.x + paddle.half_width
        && ball.pos.x + ball.radius > paddle.pos.x - paddle.half_width;
    let y_window = ball.pos.y > paddle.pos.y && ball.pos.y - ball.radius < paddle.pos.y;
    if !(x_overlap && y_window) {
        return false;
    }

    // Return angle steepens with distance from the paddle center; the
    // clamp keeps some upward component even on an edge graze.
    let limit = paddle.half_width - PADDLE_EDGE_MARGIN;
    let offset = (ball.pos.x - paddle.pos.x).clamp(-limit, limit);
    ball.vel.x = offset / paddle.half_width * BALL_SPEED_BUDGET;
    ball.vel.y = BALL_SPEED_BUDGET - ball.vel.x.abs();
    true
}

/// Border tests, each gated on the ball moving toward that side so a bounce
/// applied last frame cannot re-fire while still geometrically overlapping.
fn border_bounce(ball: &mut Ball) -> Option<Side> {
    if ball.vel.x < 0.0 && ball.pos.x - ball.radius <= -ARENA_HALF_WIDTH {
        ball.vel.x = -ball.vel.x;
        return Some(Side::Left);
    }
    if ball.vel.x > 0.0 && ball.pos.x + ball.radius >= ARENA_HALF_WIDTH {
        ball.vel.x = -ball.vel.x;
        return Some(Side::Right);
    }
    if ball.vel.y > 0.0 && ball.pos.y + ball.radius >= ARENA_TOP {
        ball.vel.y = -ball.vel.y;
        return Some(Side::Top);
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Left,
    Right,
    Bottom,
    Top,
}

/// Which block face was struck: the ball center is compared against the
/// block bounds shrunk by a small inset, in fixed order - first match wins.
fn struck_face(ball_pos: Vec2, block_pos: Vec2) -> Face {
    let min = block_pos - BLOCK_HALF_DIM;
    let max = block_pos + BLOCK_HALF_DIM;

    if ball_pos.x < min.x + BLOCK_SIDE_INSET {
        Face::Left
    } else if ball_pos.x > max.x - BLOCK_SIDE_INSET {
        Face::Right
    } else if ball_pos.y < min.y + BLOCK_SIDE_INSET {
        Face::Bottom
    } else {
        Face::Top
    }
}

/// Linear scan over live blocks in row-major order; the first overlap is
/// the frame's block hit.
fn block_bounce(ball: &mut Ball, grid: &mut BlockGrid) -> Option<Outcome> {
    let reach = ball.radius + BLOCK_HALF_DIM;

    let mut struck = None;
    for block in grid.live_blocks() {
        let d = ball.pos - block.pos;
        if d.x.abs() < reach && d.y.abs() < reach {
            struck = Some((block.row, block.col, block.pos));
            break;
        }
    }
    let (row, col, pos) = struck?;

    let face = struck_face(ball.pos, pos);
    match face {
        Face::Left | Face::Right => ball.vel.x = -ball.vel.x,
        Face::Bottom | Face::Top => ball.vel.y = -ball.vel.y,
    }

    let scored = grid.hit(row, col);
    log::debug!("block ({row},{col}) hit on {face:?} face, scored={scored}");
    Some(Outcome::BlockHit { row, col, scored })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::BlockKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn empty_grid() -> BlockGrid {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut grid = BlockGrid::generate(GRID_ROWS, GRID_COLS, &mut rng);
        grid.clear_all();
        grid
    }

    fn falling_ball(x: f32, y: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(0.0, -BALL_SPEED_BUDGET),
            radius: BALL_RADIUS,
        }
    }

    #[test]
    fn test_centered_paddle_bounce_goes_straight_up() {
        let mut ball = falling_ball(0.0, -19.5);
        let paddle = Paddle::new();
        let mut grid = empty_grid();

        let outcome = resolve(&mut ball, &paddle, &mut grid);
        assert_eq!(outcome, Some(Outcome::PaddleBounce));
        assert_eq!(ball.vel.x, 0.0);
        assert_eq!(ball.vel.y, BALL_SPEED_BUDGET);
    }

    #[test]
    fn test_offcenter_paddle_bounce_splits_budget() {
        let mut ball = falling_ball(3.5, -19.5);
        let paddle = Paddle::new();
        let mut grid = empty_grid();

        resolve(&mut ball, &paddle, &mut grid);
        assert_eq!(ball.vel.x, 3.5 / PADDLE_HALF_WIDTH * BALL_SPEED_BUDGET);
        assert_eq!(ball.vel.x.abs() + ball.vel.y.abs(), BALL_SPEED_BUDGET);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_edge_graze_clamps_offset() {
        let mut ball = falling_ball(6.95, -19.5);
        let paddle = Paddle::new();
        let mut grid = empty_grid();

        resolve(&mut ball, &paddle, &mut grid);
        let limit = PADDLE_HALF_WIDTH - PADDLE_EDGE_MARGIN;
        assert_eq!(ball.vel.x, limit / PADDLE_HALF_WIDTH * BALL_SPEED_BUDGET);
        assert!(ball.vel.y > 0.0, "some upward motion must survive a graze");
    }

    #[test]
    fn test_rising_ball_does_not_retrigger_paddle() {
        let mut ball = falling_ball(0.0, -19.5);
        ball.vel = Vec2::new(0.0, BALL_SPEED_BUDGET);
        let paddle = Paddle::new();
        let mut grid = empty_grid();

        assert_eq!(resolve(&mut ball, &paddle, &mut grid), None);
    }

    #[test]
    fn test_ball_lost_outranks_everything() {
        let mut ball = falling_ball(0.0, -20.5);
        let paddle = Paddle::new();
        let mut grid = empty_grid();

        let vel_before = ball.vel;
        assert_eq!(resolve(&mut ball, &paddle, &mut grid), Some(Outcome::BallLost));
        // no bounce logic ran
        assert_eq!(ball.vel, vel_before);
    }

    #[test]
    fn test_left_border_bounce_is_not_retriggered() {
        let mut ball = Ball {
            pos: Vec2::new(-ARENA_HALF_WIDTH + 0.5, 0.0),
            vel: Vec2::new(-30.0, -20.0),
            radius: BALL_RADIUS,
        };
        let paddle = Paddle::new();
        let mut grid = empty_grid();

        assert_eq!(
            resolve(&mut ball, &paddle, &mut grid),
            Some(Outcome::BorderBounce(Side::Left))
        );
        assert_eq!(ball.vel.x, 30.0);

        // same position, velocity already outbound: the direction guard
        // must keep both side borders quiet
        assert_eq!(resolve(&mut ball, &paddle, &mut grid), None);
    }

    #[test]
    fn test_top_border_negates_vy_only() {
        let mut ball = Ball {
            pos: Vec2::new(4.0, ARENA_TOP - 0.5),
            vel: Vec2::new(10.0, 40.0),
            radius: BALL_RADIUS,
        };
        let paddle = Paddle::new();
        let mut grid = empty_grid();

        assert_eq!(
            resolve(&mut ball, &paddle, &mut grid),
            Some(Outcome::BorderBounce(Side::Top))
        );
        assert_eq!(ball.vel, Vec2::new(10.0, -40.0));
    }

    #[test]
    fn test_paddle_outranks_border() {
        let mut paddle = Paddle::new();
        paddle.pos.x = -(ARENA_HALF_WIDTH - PADDLE_HALF_WIDTH);
        let mut ball = Ball {
            pos: Vec2::new(-ARENA_HALF_WIDTH + 0.8, -19.5),
            vel: Vec2::new(-5.0, -45.0),
            radius: BALL_RADIUS,
        };
        let mut grid = empty_grid();

        assert_eq!(
            resolve(&mut ball, &paddle, &mut grid),
            Some(Outcome::PaddleBounce)
        );
        // the left border test never ran, vx follows the paddle response
        assert!(ball.vel.x < 0.0);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_block_hit_from_below_negates_vy() {
        let mut grid = empty_grid();
        let target = BlockGrid::cell_position(3, 10);
        grid.set_kind(3, 10, BlockKind::Sand);

        let mut ball = Ball {
            pos: Vec2::new(target.x, target.y - BLOCK_HALF_DIM - 0.5),
            vel: Vec2::new(0.0, 30.0),
            radius: BALL_RADIUS,
        };
        let paddle = Paddle::new();

        let outcome = resolve(&mut ball, &paddle, &mut grid);
        assert_eq!(
            outcome,
            Some(Outcome::BlockHit {
                row: 3,
                col: 10,
                scored: true
            })
        );
        assert_eq!(ball.vel, Vec2::new(0.0, -30.0));
        assert_eq!(grid.block(3, 10).unwrap().kind, BlockKind::Crate);
    }

    #[test]
    fn test_block_hit_from_side_negates_vx() {
        let mut grid = empty_grid();
        grid.set_kind(2, 4, BlockKind::Crate);
        let target = BlockGrid::cell_position(2, 4);

        let mut ball = Ball {
            pos: Vec2::new(target.x - BLOCK_HALF_DIM - 0.6, target.y),
            vel: Vec2::new(25.0, 0.0),
            radius: BALL_RADIUS,
        };
        let paddle = Paddle::new();

        let outcome = resolve(&mut ball, &paddle, &mut grid);
        assert_eq!(
            outcome,
            Some(Outcome::BlockHit {
                row: 2,
                col: 4,
                scored: true
            })
        );
        assert_eq!(ball.vel, Vec2::new(-25.0, 0.0));
        // crate destroyed outright
        assert_eq!(grid.block(2, 4).unwrap().kind, BlockKind::None);
    }

    #[test]
    fn test_free_flight_frame_has_no_response() {
        let mut ball = falling_ball(12.0, -5.0);
        let paddle = Paddle::new();
        let mut grid = empty_grid();
        grid.set_kind(0, 0, BlockKind::Stone);

        let vel_before = ball.vel;
        assert_eq!(resolve(&mut ball, &paddle, &mut grid), None);
        assert_eq!(ball.vel, vel_before);
        assert_eq!(grid.block(0, 0).unwrap().kind, BlockKind::Stone);
    }
}
