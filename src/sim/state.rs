//! Session phases, input keys and gameplay events

use serde::{Deserialize, Serialize};

use super::object::EntityId;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball docked on the paddle, waiting for the start key
    Setup,
    /// Tick loop active
    Running,
    /// Ball fell out; flashing before the next serve
    BallLost,
    /// Every brick cleared
    Won,
    /// Out of lives
    Lost,
}

impl GamePhase {
    /// Won or Lost: nothing is scheduled anymore
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Keys the session understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// Space
    Start,
}

/// Which keys currently have a handler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyBindings {
    left: bool,
    right: bool,
    start: bool,
}

impl KeyBindings {
    fn slot(&mut self, key: Key) -> &mut bool {
        match key {
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
            Key::Start => &mut self.start,
        }
    }

    pub fn bind(&mut self, key: Key) {
        *self.slot(key) = true;
    }

    pub fn unbind(&mut self, key: Key) {
        *self.slot(key) = false;
    }

    pub fn is_bound(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Start => self.start,
        }
    }
}

/// Things that happened, for hosts that want sound or effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh ball is docked on the paddle
    Served,
    Launched,
    BrickHit { brick: EntityId, remaining: u32 },
    /// Brick ran out of hits and started flashing
    BrickDestroyed { brick: EntityId },
    /// Flashing done, brick gone from the board
    BrickRemoved { brick: EntityId },
    BallLost { lives: i32 },
    Won { score: u64 },
    GameOver { score: u64 },
}
