//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, driven by a virtual millisecond clock
//! - Stable iteration order (by entity ID)
//! - Screen size passed in explicitly, never queried from the surface
//! - Drawing only through the `Surface` trait

pub mod ball;
pub mod brick;
pub mod collision;
pub mod geom;
pub mod object;
pub mod paddle;
pub mod schedule;
pub mod session;
pub mod state;

pub use ball::Ball;
pub use brick::{Brick, BrickHit, BrickState, brick_fill};
pub use collision::{Contact, find_overlapping};
pub use geom::{Aabb, Screen};
pub use object::{EntityId, GameObject};
pub use paddle::Paddle;
pub use schedule::{Scheduler, Timer};
pub use session::Game;
pub use state::{GameEvent, GamePhase, Key, KeyBindings};
