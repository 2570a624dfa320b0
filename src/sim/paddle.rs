//! The player's paddle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::geom::{Aabb, Screen};
use super::object::{EntityId, GameObject};
use crate::consts::*;
use crate::renderer::{ItemId, Shape, Surface};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    id: EntityId,
    item: ItemId,
    bounds: Aabb,
    /// Ball waiting to be served, carried along with the paddle
    ball: Option<EntityId>,
}

impl Paddle {
    pub fn spawn(id: EntityId, center: Vec2, surface: &mut dyn Surface) -> Self {
        let bounds = Aabb::from_center(center, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT));
        let item = surface.create_shape(Shape::Rectangle, bounds, PADDLE_COLOR.into());
        Self {
            id,
            item,
            bounds,
            ball: None,
        }
    }

    pub fn set_ball(&mut self, ball: &Ball) {
        self.ball = Some(ball.id());
    }

    /// Detach the docked ball, if any
    pub fn release_ball(&mut self) -> Option<EntityId> {
        self.ball.take()
    }

    pub fn docked_ball(&self) -> Option<EntityId> {
        self.ball
    }

    /// Slide horizontally by `offset`.
    ///
    /// The move is dropped if either edge would leave the screen. When it
    /// goes through, `ball` follows along if it is the docked one.
    pub fn move_horizontal(
        &mut self,
        offset: f32,
        ball: Option<&mut Ball>,
        screen: &Screen,
        surface: &mut dyn Surface,
    ) -> bool {
        let target = self.bounds.translated(Vec2::new(offset, 0.0));
        if !screen.contains_x(&target) {
            return false;
        }

        self.move_by(Vec2::new(offset, 0.0), surface);
        if let Some(ball) = ball {
            if self.ball == Some(ball.id()) {
                ball.move_by(Vec2::new(offset, 0.0), surface);
            }
        }
        true
    }
}

impl GameObject for Paddle {
    fn id(&self) -> EntityId {
        self.id
    }

    fn item(&self) -> ItemId {
        self.item
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn bounds_mut(&mut self) -> &mut Aabb {
        &mut self.bounds
    }
}
