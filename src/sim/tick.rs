//! Per-frame simulation update
//!
//! One invocation advances the session by exactly one frame: paddle, ball,
//! collision pass, score/life side effects, win check. Rendering is a
//! separate pass driven by the platform loop.

use super::collision::{self, Outcome};
use super::state::{GamePhase, GameSession, MoveIntents};

/// Input for a single frame.
///
/// Move intents are level flags maintained by key-down/key-up edges;
/// `restart` and `cheat` are one-shots the driver clears after the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Start/restart trigger (key or DOM button)
    pub restart: bool,
    /// Debug: clear every block and force the run to end
    pub cheat: bool,
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    // Restart re-arms straight into Playing from any idle screen; it is
    // ignored mid-run
    if input.restart {
        match session.phase {
            GamePhase::Start | GamePhase::GameOver | GamePhase::Won => {
                session.restart();
                return;
            }
            GamePhase::Playing => {}
        }
    }

    if session.phase != GamePhase::Playing {
        return;
    }

    if input.cheat {
        session.grid.clear_all();
        session.phase = GamePhase::GameOver;
        log::info!("cheat: grid cleared, run ended at score {}", session.score);
        return;
    }

    let mut intents = MoveIntents {
        left: input.move_left,
        right: input.move_right,
    };
    session.paddle.update(&mut intents, dt);
    session.ball.integrate(dt);

    match collision::resolve(&mut session.ball, &session.paddle, &mut session.grid) {
        Some(Outcome::BallLost) => {
            session.lives = session.lives.saturating_sub(1);
            if session.lives == 0 {
                // same-frame transition, not deferred to the next update
                session.phase = GamePhase::GameOver;
                log::info!("game over, final score {}", session.score);
                return;
            }
            log::info!("ball lost, {} lives left", session.lives);
            session.reset_ball_and_paddle();
        }
        Some(Outcome::BlockHit { scored: true, .. }) => {
            session.score += 1;
        }
        _ => {}
    }

    if session.grid.all_clear() {
        session.phase = GamePhase::Won;
        log::info!("all blocks cleared, final score {}", session.score);
    }
}
