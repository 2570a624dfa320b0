//! Game session: entity registry, HUD and the fixed-tick loop
//!
//! Everything runs on the caller's thread. The host forwards key presses to
//! `handle_key` and elapsed wall time to `advance`; the session fires its own
//! timers from there. A tick only schedules the next one once it has
//! finished, so two ticks are never in flight.

use std::collections::BTreeMap;

use glam::Vec2;

use super::ball::Ball;
use super::brick::{Brick, BrickHit};
use super::collision::find_overlapping;
use super::geom::Screen;
use super::object::{EntityId, GameObject};
use super::paddle::Paddle;
use super::schedule::{Scheduler, Timer};
use super::state::{GameEvent, GamePhase, Key, KeyBindings};
use crate::consts::*;
use crate::renderer::{Fill, ItemId, Surface};
use crate::settings::Settings;

/// Text handles for the score and lives labels
#[derive(Debug, Clone, Copy)]
struct Hud {
    lives: ItemId,
    score: ItemId,
}

pub struct Game<S: Surface> {
    settings: Settings,
    screen: Screen,
    surface: S,
    phase: GamePhase,
    score: u64,
    lives: i32,
    paddle: Paddle,
    /// Empty only while a lost ball is being replaced
    ball: Option<Ball>,
    /// Registered bricks, including ones still flashing out
    bricks: BTreeMap<EntityId, Brick>,
    hud: Option<Hud>,
    prompt: Option<ItemId>,
    message: Option<ItemId>,
    bindings: KeyBindings,
    scheduler: Scheduler,
    events: Vec<GameEvent>,
    /// Simulation tick counter
    time_ticks: u64,
    next_id: u32,
}

impl<S: Surface> Game<S> {
    /// Lay out the board on `surface` and wait for the start key
    pub fn new(settings: Settings, mut surface: S) -> Self {
        let settings = settings.validated();
        let screen = settings.screen;
        let paddle = Paddle::spawn(
            EntityId(1),
            Vec2::new(screen.width * 0.5, PADDLE_Y),
            &mut surface,
        );

        let mut game = Self {
            lives: settings.starting_lives,
            settings,
            screen,
            surface,
            phase: GamePhase::Setup,
            score: 0,
            paddle,
            ball: None,
            bricks: BTreeMap::new(),
            hud: None,
            prompt: None,
            message: None,
            bindings: KeyBindings::default(),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            time_ticks: 0,
            next_id: 2,
        };

        game.build_wall();
        game.setup_round();
        game.bindings.bind(Key::Left);
        game.bindings.bind(Key::Right);

        log::info!(
            "New session: {}x{}, {} bricks, {} lives",
            screen.width,
            screen.height,
            game.bricks.len(),
            game.lives
        );
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.values()
    }

    pub fn brick(&self, id: EntityId) -> Option<&Brick> {
        self.bricks.get(&id)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Virtual clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// When the next timer fires, if anything is pending
    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// Hand over the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Dispatch a key press; keys without a binding are ignored
    pub fn handle_key(&mut self, key: Key) {
        if !self.bindings.is_bound(key) {
            return;
        }
        match key {
            Key::Left => self.move_paddle(-PADDLE_STEP),
            Key::Right => self.move_paddle(PADDLE_STEP),
            Key::Start => self.start(),
        }
    }

    /// Let `elapsed_ms` pass, firing every timer that falls due
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms);
        while let Some(timer) = self.scheduler.pop_due(until) {
            self.fire(timer);
        }
        self.scheduler.advance_to(until);
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Columns of bricks across the top, toughest rows first
    fn build_wall(&mut self) {
        let mut x = BRICK_MARGIN;
        while x < self.screen.width - BRICK_MARGIN {
            for (y, hits) in BRICK_ROWS {
                self.add_brick(Vec2::new(x + BRICK_WIDTH * 0.5, y), hits);
            }
            x += BRICK_WIDTH;
        }
    }

    fn add_brick(&mut self, center: Vec2, hits: u32) {
        let id = self.next_entity_id();
        let brick = Brick::spawn(id, center, hits, &mut self.surface);
        self.bricks.insert(id, brick);
    }

    /// Replace the ball with a fresh one docked on the paddle
    fn add_ball(&mut self) {
        if let Some(old) = self.ball.take() {
            let old_id = old.id();
            self.scheduler
                .cancel_where(|t| matches!(t, Timer::BallFill { ball, .. } if *ball == old_id));
            old.delete(&mut self.surface);
        }

        let id = self.next_entity_id();
        let x = self.paddle.bounds().center_x();
        let ball = Ball::spawn(id, Vec2::new(x, BALL_SERVE_Y), &mut self.surface);
        self.paddle.set_ball(&ball);
        self.ball = Some(ball);
    }

    /// Serve: new ball, refreshed HUD, start prompt
    fn setup_round(&mut self) {
        self.add_ball();
        self.update_hud();
        if let Some(old) = self.prompt.take() {
            self.surface.delete_item(old);
        }
        self.prompt = Some(self.surface.create_text(
            Vec2::new(MESSAGE_X, MESSAGE_Y),
            START_PROMPT,
            MESSAGE_SIZE,
        ));
        self.bindings.bind(Key::Start);
        self.phase = GamePhase::Setup;
        self.events.push(GameEvent::Served);
        log::info!("Serve: lives={}, score={}", self.lives, self.score);
    }

    fn update_hud(&mut self) {
        let lives_text = format!("Lives: {}", self.lives);
        let score_text = format!("Score: {}", self.score);
        match self.hud {
            Some(hud) => {
                self.surface.set_text(hud.lives, &lives_text);
                self.surface.set_text(hud.score, &score_text);
            }
            None => {
                let lives = self.surface.create_text(
                    Vec2::new(HUD_LIVES_X, HUD_Y),
                    &lives_text,
                    HUD_TEXT_SIZE,
                );
                let score = self.surface.create_text(
                    Vec2::new(self.screen.width - HUD_SCORE_INSET, HUD_Y),
                    &score_text,
                    HUD_TEXT_SIZE,
                );
                self.hud = Some(Hud { lives, score });
            }
        }
    }

    fn show_message(&mut self, text: &str) {
        if let Some(old) = self.message.take() {
            self.surface.delete_item(old);
        }
        self.message = Some(self.surface.create_text(
            Vec2::new(MESSAGE_X, MESSAGE_Y),
            text,
            MESSAGE_SIZE,
        ));
    }

    fn move_paddle(&mut self, offset: f32) {
        self.paddle
            .move_horizontal(offset, self.ball.as_mut(), &self.screen, &mut self.surface);
    }

    /// Setup -> Running
    fn start(&mut self) {
        if self.phase != GamePhase::Setup {
            return;
        }
        self.bindings.unbind(Key::Start);
        if let Some(prompt) = self.prompt.take() {
            self.surface.delete_item(prompt);
        }
        self.paddle.release_ball();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Launched);
        log::info!("Ball launched");
        self.game_loop();
    }

    fn fire(&mut self, timer: Timer) {
        match timer {
            Timer::Tick => {
                if self.phase == GamePhase::Running {
                    self.game_loop();
                }
            }
            Timer::BrickFill { brick, fill } => {
                if let Some(brick) = self.bricks.get(&brick) {
                    self.surface.set_fill(brick.item(), fill);
                }
            }
            Timer::RemoveBrick { brick } => {
                if let Some(removed) = self.bricks.remove(&brick) {
                    removed.delete(&mut self.surface);
                    self.events.push(GameEvent::BrickRemoved { brick });
                    log::debug!("Brick {:?} removed, {} left", brick, self.bricks.len());
                }
            }
            Timer::BallFill { ball, fill } => {
                if let Some(current) = self.ball.as_ref().filter(|b| b.id() == ball) {
                    self.surface.set_fill(current.item(), fill);
                }
            }
            Timer::Serve => {
                if self.phase == GamePhase::BallLost {
                    self.setup_round();
                }
            }
        }
    }

    /// One tick: collisions, then win, then loss, else move and reschedule
    fn game_loop(&mut self) {
        self.time_ticks += 1;
        log::trace!("tick {}", self.time_ticks);

        self.check_collisions();

        let Some(bottom) = self.ball.as_ref().map(|b| b.bounds().bottom()) else {
            return;
        };

        if self.bricks.is_empty() {
            self.win();
        } else if bottom >= self.screen.height {
            self.lose_ball();
        } else {
            if let Some(ball) = self.ball.as_mut() {
                ball.update(&self.screen, &mut self.surface);
            }
            self.scheduler.after(TICK_MS, Timer::Tick);
        }
    }

    fn check_collisions(&mut self) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        let area = ball.bounds();
        let mut contacts = find_overlapping(&area, &self.paddle, self.bricks.values_mut());
        if contacts.is_empty() {
            return;
        }

        let hits = ball.collide(&mut contacts, &mut self.surface);
        drop(contacts);
        for hit in hits {
            self.score_hit(hit);
        }
    }

    fn score_hit(&mut self, hit: BrickHit) {
        self.score += POINTS_PER_HIT;
        if hit.remaining == 0 {
            self.score += DESTROY_BONUS;
        }
        self.events.push(GameEvent::BrickHit {
            brick: hit.brick,
            remaining: hit.remaining,
        });

        if hit.destroyed {
            log::debug!("Brick {:?} destroyed", hit.brick);
            self.events.push(GameEvent::BrickDestroyed { brick: hit.brick });
            self.animate_brick_delete(hit.brick);
        }
        self.update_hud();
    }

    /// Flash on and off, then remove once the flashing is done
    fn animate_brick_delete(&mut self, brick: EntityId) {
        if !self.settings.reduced_motion {
            for i in 0..FLASH_CYCLES {
                let at = i * FLASH_PERIOD_MS;
                self.scheduler.after(
                    at,
                    Timer::BrickFill {
                        brick,
                        fill: FLASH_COLOR.into(),
                    },
                );
                self.scheduler.after(
                    at + FLASH_ON_MS,
                    Timer::BrickFill {
                        brick,
                        fill: Fill::Clear,
                    },
                );
            }
        }
        self.scheduler.after(BRICK_REMOVE_MS, Timer::RemoveBrick { brick });
    }

    fn animate_ball_fall(&mut self, ball: EntityId) {
        if self.settings.reduced_motion {
            return;
        }
        for i in 0..FLASH_CYCLES {
            let at = i * FLASH_PERIOD_MS;
            self.scheduler.after(
                at,
                Timer::BallFill {
                    ball,
                    fill: FLASH_COLOR.into(),
                },
            );
            self.scheduler.after(
                at + FLASH_ON_MS,
                Timer::BallFill {
                    ball,
                    fill: Fill::Clear,
                },
            );
        }
    }

    fn win(&mut self) {
        if let Some(ball) = self.ball.as_mut() {
            ball.stop();
        }
        self.phase = GamePhase::Won;
        self.show_message(&format!("Congratulations! You Won!\nScore: {}", self.score));
        self.events.push(GameEvent::Won { score: self.score });
        log::info!("Won with score {}", self.score);
    }

    fn lose_ball(&mut self) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        ball.stop();
        let ball_id = ball.id();

        self.lives -= 1;
        self.update_hud();
        self.events.push(GameEvent::BallLost { lives: self.lives });
        log::debug!("Ball lost, {} lives left", self.lives);

        if self.lives < 0 {
            self.phase = GamePhase::Lost;
            self.show_message(&format!("Loser! Game Over!\nScore: {}", self.score));
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over with score {}", self.score);
        } else {
            self.phase = GamePhase::BallLost;
            self.animate_ball_fall(ball_id);
            self.scheduler.after(RESERVE_DELAY_MS, Timer::Serve);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Scene, SceneItem};

    fn new_game() -> Game<Scene> {
        Game::new(Settings::default(), Scene::default())
    }

    /// Teleport the live ball so its center sits at `center`
    fn place_ball(game: &mut Game<Scene>, center: Vec2, direction: Vec2) {
        let ball = game.ball.as_mut().unwrap();
        let delta = center - ball.bounds().center();
        ball.move_by(delta, &mut game.surface);
        ball.direction = direction;
    }

    /// Bottom-row brick whose span covers x = 417.5
    fn target_brick(game: &Game<Scene>) -> EntityId {
        game.bricks
            .values()
            .find(|b| b.bounds().center() == Vec2::new(417.5, 170.0))
            .map(|b| b.id())
            .unwrap()
    }

    fn texts(game: &Game<Scene>) -> Vec<String> {
        game.surface().texts().map(str::to_owned).collect()
    }

    fn fill_of(game: &Game<Scene>, item: ItemId) -> Option<Fill> {
        game.surface().get(item).and_then(SceneItem::fill)
    }

    #[test]
    fn test_new_session_layout() {
        let game = new_game();
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lives(), 1);
        // 11 columns of 8 rows
        assert_eq!(game.bricks().count(), 88);
        assert_eq!(game.bricks().filter(|b| b.hits() == 4).count(), 22);
        assert_eq!(game.bricks().filter(|b| b.hits() == 1).count(), 22);

        let ball = game.ball().unwrap();
        assert_eq!(game.paddle().docked_ball(), Some(ball.id()));
        assert_eq!(ball.bounds().center(), Vec2::new(415.0, BALL_SERVE_Y));

        let shown = texts(&game);
        assert!(shown.contains(&"Lives: 1".to_owned()));
        assert!(shown.contains(&"Score: 0".to_owned()));
        assert!(shown.contains(&START_PROMPT.to_owned()));
        assert!(game.bindings().is_bound(Key::Start));
    }

    #[test]
    fn test_nothing_moves_before_start() {
        let mut game = new_game();
        let before = game.ball().unwrap().bounds();
        game.advance(5_000);
        assert_eq!(game.phase(), GamePhase::Setup);
        assert_eq!(game.ball().unwrap().bounds(), before);
        assert_eq!(game.time_ticks(), 0);
    }

    #[test]
    fn test_paddle_carries_docked_ball() {
        let mut game = new_game();
        game.handle_key(Key::Left);
        assert_eq!(game.paddle().bounds().center_x(), 400.0);
        assert_eq!(game.ball().unwrap().bounds().center_x(), 400.0);
    }

    #[test]
    fn test_paddle_rejects_move_past_left_edge() {
        let mut game = new_game();
        for _ in 0..26 {
            game.handle_key(Key::Left);
        }
        assert_eq!(game.paddle().bounds().left(), 0.0);

        game.handle_key(Key::Left);
        assert_eq!(game.paddle().bounds().left(), 0.0);
        assert_eq!(game.ball().unwrap().bounds().center_x(), 25.0);
    }

    #[test]
    fn test_start_launches_ball() {
        let mut game = new_game();
        game.handle_key(Key::Start);

        assert_eq!(game.phase(), GamePhase::Running);
        assert!(!game.bindings().is_bound(Key::Start));
        assert_eq!(game.paddle().docked_ball(), None);
        assert!(!texts(&game).contains(&START_PROMPT.to_owned()));
        // First tick ran synchronously
        assert_eq!(game.time_ticks(), 1);
        assert_eq!(game.ball().unwrap().bounds().center(), Vec2::new(425.0, 300.0));
        assert_eq!(game.next_due_ms(), Some(TICK_MS));

        // Paddle no longer drags the ball along
        game.handle_key(Key::Right);
        assert_eq!(game.ball().unwrap().bounds().center_x(), 425.0);

        // Start is unbound now
        game.handle_key(Key::Start);
        assert_eq!(game.time_ticks(), 1);

        let events = game.take_events();
        assert_eq!(events, vec![GameEvent::Served, GameEvent::Launched]);
    }

    #[test]
    fn test_ticks_every_fifty_ms() {
        let mut game = new_game();
        game.handle_key(Key::Start);
        game.advance(49);
        assert_eq!(game.time_ticks(), 1);
        game.advance(1);
        assert_eq!(game.time_ticks(), 2);
        game.advance(100);
        assert_eq!(game.time_ticks(), 4);
    }

    #[test]
    fn test_lost_ball_with_lives_left_reserves() {
        let mut game = new_game();
        game.handle_key(Key::Start);
        let first_ball = game.ball().unwrap().id();
        place_ball(&mut game, Vec2::new(700.0, 385.0), Vec2::new(1.0, 1.0));

        game.advance(100);
        assert_eq!(game.phase(), GamePhase::BallLost);
        assert_eq!(game.lives(), 0);
        assert_eq!(game.score(), 0);
        assert!(game.ball().unwrap().is_stopped());
        assert!(texts(&game).contains(&"Lives: 0".to_owned()));

        // Flashing, then a fresh serve after a second
        game.advance(999);
        assert_eq!(game.phase(), GamePhase::BallLost);
        game.advance(1);
        assert_eq!(game.phase(), GamePhase::Setup);

        let ball = game.ball().unwrap();
        assert_ne!(ball.id(), first_ball);
        assert!(!ball.is_stopped());
        assert_eq!(game.paddle().docked_ball(), Some(ball.id()));
        assert_eq!(game.lives(), 0);
        assert!(game.bindings().is_bound(Key::Start));
        assert!(texts(&game).contains(&START_PROMPT.to_owned()));
    }

    #[test]
    fn test_ball_flash_is_visible() {
        let mut game = new_game();
        game.handle_key(Key::Start);
        place_ball(&mut game, Vec2::new(700.0, 395.0), Vec2::new(1.0, 1.0));

        game.advance(50);
        assert_eq!(game.phase(), GamePhase::BallLost);
        let item = game.ball().unwrap().item();
        assert_eq!(fill_of(&game, item), Some(FLASH_COLOR.into()));
        game.advance(50);
        assert_eq!(fill_of(&game, item), Some(Fill::Clear));
    }

    #[test]
    fn test_out_of_lives_is_terminal() {
        let mut game = Game::new(
            Settings {
                starting_lives: 0,
                ..Default::default()
            },
            Scene::default(),
        );
        game.handle_key(Key::Start);
        place_ball(&mut game, Vec2::new(700.0, 395.0), Vec2::new(1.0, 1.0));

        game.advance(50);
        assert_eq!(game.phase(), GamePhase::Lost);
        assert_eq!(game.lives(), -1);
        assert!(game.ball().unwrap().is_stopped());
        assert!(texts(&game).iter().any(|t| t.starts_with("Loser! Game Over!")));
        assert!(game.next_due_ms().is_none());

        let ticks = game.time_ticks();
        game.advance(10_000);
        assert_eq!(game.time_ticks(), ticks);
        assert_eq!(game.phase(), GamePhase::Lost);
        assert!(game.take_events().contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_destroying_brick_scores_and_flashes_out() {
        let mut game = new_game();
        game.handle_key(Key::Start);
        let target = target_brick(&game);
        let item = game.brick(target).unwrap().item();
        place_ball(&mut game, Vec2::new(417.5, 190.0), Vec2::new(1.0, -1.0));

        game.advance(50);
        assert_eq!(game.score(), 20);
        assert!(texts(&game).contains(&"Score: 20".to_owned()));
        assert_eq!(game.ball().unwrap().direction, Vec2::new(1.0, 1.0));

        // Still registered while flashing, but out of play
        let brick = game.brick(target).unwrap();
        assert_eq!(brick.hits(), 0);
        assert!(!brick.is_solid());
        assert_eq!(fill_of(&game, item), Some(FLASH_COLOR.into()));

        game.advance(499);
        assert!(game.brick(target).is_some());
        game.advance(1);
        assert!(game.brick(target).is_none());
        assert!(game.surface().get(item).is_none());
        assert_eq!(game.bricks().count(), 87);

        let events = game.take_events();
        let destroyed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
        assert!(events.contains(&GameEvent::BrickRemoved { brick: target }));
    }

    #[test]
    fn test_partial_hit_recolors() {
        let mut game = new_game();
        game.handle_key(Key::Start);
        // Second row from the bottom holds two-hit bricks
        let id = game
            .bricks
            .values()
            .find(|b| b.bounds().center() == Vec2::new(417.5, 130.0))
            .map(|b| b.id())
            .unwrap();
        for brick in game.bricks.values_mut().filter(|b| b.bounds().center().y > 130.0) {
            brick.hit(&mut game.surface);
        }
        let before = game.score();
        place_ball(&mut game, Vec2::new(417.5, 150.0), Vec2::new(1.0, -1.0));

        game.advance(50);
        assert_eq!(game.score(), before + POINTS_PER_HIT);
        let brick = game.brick(id).unwrap();
        assert_eq!(brick.hits(), 1);
        assert_eq!(
            fill_of(&game, brick.item()),
            Some(crate::sim::brick::brick_fill(1))
        );
    }

    #[test]
    fn test_wedged_ball_hits_both_bricks() {
        let mut game = new_game();
        game.handle_key(Key::Start);
        // Straddles the bottom-row seam at x = 380
        place_ball(&mut game, Vec2::new(380.0, 190.0), Vec2::new(-1.0, -1.0));

        game.advance(50);
        assert_eq!(game.score(), 40);
        assert_eq!(game.ball().unwrap().direction, Vec2::new(-1.0, 1.0));
        assert_eq!(game.bricks().filter(|b| !b.is_solid()).count(), 2);
    }

    #[test]
    fn test_clearing_last_brick_wins() {
        let mut game = new_game();
        game.handle_key(Key::Start);
        let target = target_brick(&game);
        game.bricks.retain(|id, _| *id == target);
        place_ball(&mut game, Vec2::new(417.5, 190.0), Vec2::new(1.0, -1.0));

        game.advance(50);
        assert_eq!(game.phase(), GamePhase::Running);
        // Win is noticed on the first tick after the brick is gone
        game.advance(500);
        assert_eq!(game.phase(), GamePhase::Won);
        assert!(game.ball().unwrap().is_stopped());
        assert!(texts(&game).contains(&"Congratulations! You Won!\nScore: 20".to_owned()));
        assert!(game.next_due_ms().is_none());

        let frozen = game.ball().unwrap().bounds();
        game.advance(1_000);
        assert_eq!(game.ball().unwrap().bounds(), frozen);
    }

    #[test]
    fn test_reduced_motion_skips_flashes() {
        let mut game = Game::new(
            Settings {
                reduced_motion: true,
                ..Default::default()
            },
            Scene::default(),
        );
        game.handle_key(Key::Start);
        let target = target_brick(&game);
        let item = game.brick(target).unwrap().item();
        place_ball(&mut game, Vec2::new(417.5, 190.0), Vec2::new(1.0, -1.0));

        game.advance(50);
        assert_eq!(fill_of(&game, item), Some(crate::sim::brick::brick_fill(1)));
        game.advance(500);
        assert!(game.brick(target).is_none());
    }

    #[test]
    fn test_replacing_ball_cancels_its_flashes() {
        let mut game = new_game();
        game.handle_key(Key::Start);
        place_ball(&mut game, Vec2::new(700.0, 395.0), Vec2::new(1.0, 1.0));
        game.advance(50);
        assert_eq!(game.phase(), GamePhase::BallLost);
        let old = game.ball().unwrap().id();

        // Swap the ball mid-flash
        game.add_ball();
        let pending = game
            .scheduler
            .cancel_where(|t| matches!(t, Timer::BallFill { ball, .. } if *ball == old));
        assert_eq!(pending, 0);

        game.advance(500);
        let ball = game.ball().unwrap();
        assert_ne!(ball.id(), old);
        assert_eq!(fill_of(&game, ball.item()), Some(BALL_COLOR.into()));
    }

    #[test]
    fn test_advance_saturates_clock() {
        let mut game = new_game();
        game.advance(u64::MAX);
        assert_eq!(game.now_ms(), u64::MAX);
        // Clock pinned at the max, further time is a no-op
        game.advance(50);
        assert_eq!(game.now_ms(), u64::MAX);
    }

    #[test]
    fn test_determinism() {
        let script = [
            (Some(Key::Right), 30),
            (Some(Key::Start), 0),
            (None, 400),
            (Some(Key::Left), 120),
            (Some(Key::Left), 2_000),
        ];

        let run = || {
            let mut game = new_game();
            for (key, ms) in script {
                if let Some(key) = key {
                    game.handle_key(key);
                }
                game.advance(ms);
            }
            game
        };

        let a = run();
        let b = run();
        assert_eq!(a.score(), b.score());
        assert_eq!(a.lives(), b.lives());
        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.time_ticks(), b.time_ticks());
        assert_eq!(
            a.ball().map(|ball| ball.bounds()),
            b.ball().map(|ball| ball.bounds())
        );
    }
}
