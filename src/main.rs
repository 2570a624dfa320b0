//! Brick Breaker entry point
//!
//! Window creation and drawing belong to the host toolkit. Natively this
//! runs a headless session against an in-memory scene with a simple
//! autopilot on the paddle and reports how it went.

use brick_breaker::consts::*;
use brick_breaker::sim::{Game, GameEvent, GameObject, GamePhase, Key};
use brick_breaker::{Scene, Settings};

/// Give up after ten minutes of game time
const MAX_RUN_MS: u64 = 10 * 60 * 1000;

fn main() {
    env_logger::init();
    let settings = Settings::default();
    log::info!("{} (headless) starting...", settings.title);

    let mut game = Game::new(settings, Scene::default());
    while !game.phase().is_terminal() && game.now_ms() < MAX_RUN_MS {
        autopilot(&mut game);
        game.advance(TICK_MS);

        for event in game.take_events() {
            match event {
                GameEvent::BrickDestroyed { brick } => log::debug!("Destroyed {:?}", brick),
                GameEvent::BallLost { lives } => log::info!("Ball lost, lives left: {}", lives),
                _ => {}
            }
        }
    }

    let outcome = match game.phase() {
        GamePhase::Won => "won",
        GamePhase::Lost => "lost",
        _ => "timed out",
    };
    log::info!(
        "Finished after {} ms: {} with score {}, {} bricks left",
        game.now_ms(),
        outcome,
        game.score(),
        game.bricks().count()
    );
    println!("{outcome}: score {}", game.score());
}

/// Serve as soon as possible and keep the paddle under the ball
fn autopilot(game: &mut Game<Scene>) {
    if game.phase() == GamePhase::Setup {
        game.handle_key(Key::Start);
        return;
    }
    let Some(ball_x) = game.ball().map(|b| b.bounds().center_x()) else {
        return;
    };
    let paddle_x = game.paddle().bounds().center_x();
    if ball_x < paddle_x - PADDLE_STEP * 0.5 {
        game.handle_key(Key::Left);
    } else if ball_x > paddle_x + PADDLE_STEP * 0.5 {
        game.handle_key(Key::Right);
    }
}
