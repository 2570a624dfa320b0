//! The ball: movement, wall bounces and collision response

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::brick::BrickHit;
use super::collision::Contact;
use super::geom::{Aabb, Screen};
use super::object::{EntityId, GameObject};
use crate::consts::*;
use crate::renderer::{ItemId, Shape, Surface};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    id: EntityId,
    item: ItemId,
    bounds: Aabb,
    pub radius: f32,
    /// Per-axis direction, each component ±1
    pub direction: Vec2,
    /// Distance per tick along each axis; `None` once frozen
    pub speed: Option<f32>,
}

impl Ball {
    pub fn spawn(id: EntityId, center: Vec2, surface: &mut dyn Surface) -> Self {
        let bounds = Aabb::from_center(center, Vec2::splat(BALL_RADIUS * 2.0));
        let item = surface.create_shape(Shape::Oval, bounds, BALL_COLOR.into());
        Self {
            id,
            item,
            bounds,
            radius: BALL_RADIUS,
            direction: Vec2::new(1.0, -1.0),
            speed: Some(BALL_SPEED),
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.speed.is_none()
    }

    /// Freeze in place; further updates do nothing
    pub fn stop(&mut self) {
        self.speed = None;
    }

    /// Advance one tick.
    ///
    /// Touching the left or right edge flips the horizontal direction and
    /// touching the top flips the vertical one. The step is then clamped so
    /// the box never crosses those edges. The bottom is open.
    pub fn update(&mut self, screen: &Screen, surface: &mut dyn Surface) {
        let Some(speed) = self.speed else {
            return;
        };

        let b = self.bounds;
        if b.left() <= 0.0 || b.right() >= screen.width {
            self.direction.x = -self.direction.x;
        }
        if b.top() <= 0.0 {
            self.direction.y = -self.direction.y;
        }

        let step = self.direction * speed;
        let dx = step.x.max(-b.left()).min(screen.width - b.right());
        let dy = step.y.max(-b.top());
        self.move_by(Vec2::new(dx, dy), surface);
    }

    /// Resolve this tick's contacts.
    ///
    /// Several contacts at once always flip the vertical direction. A single
    /// contact pushes the ball sideways when its center is past either end
    /// of the object, otherwise flips the vertical direction. Every brick in
    /// the set takes a hit regardless.
    pub fn collide(
        &mut self,
        contacts: &mut [Contact<'_>],
        surface: &mut dyn Surface,
    ) -> Vec<BrickHit> {
        let center_x = self.bounds.center_x();

        match contacts {
            [] => {}
            [only] => {
                let other = only.bounds();
                if center_x > other.right() {
                    self.direction.x = 1.0;
                } else if center_x < other.left() {
                    self.direction.x = -1.0;
                } else {
                    self.direction.y = -self.direction.y;
                }
            }
            _ => self.direction.y = -self.direction.y,
        }

        contacts
            .iter_mut()
            .filter_map(|contact| match contact {
                Contact::Brick(brick) => Some(brick.hit(surface)),
                Contact::Paddle(_) => None,
            })
            .collect()
    }
}

impl GameObject for Ball {
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
