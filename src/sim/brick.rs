//! Destructible bricks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use super::object::{EntityId, GameObject};
use crate::consts::*;
use crate::renderer::{Color, Fill, ItemId, Shape, Surface};

/// Fill for a brick with `hits` remaining; unknown counts draw nothing
pub fn brick_fill(hits: u32) -> Fill {
    match hits {
        1 => Fill::Solid(Color::rgb(0x15F5BA)), // teal
        2 => Fill::Solid(Color::rgb(0x836FFF)), // purple
        3 => Fill::Solid(Color::rgb(0x211951)), // navy
        4 => Fill::Solid(Color::rgb(0x000000)),
        _ => Fill::Clear,
    }
}

/// Outcome of a single hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    pub brick: EntityId,
    pub remaining: u32,
    /// This hit took the brick to zero
    pub destroyed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickState {
    Intact,
    /// Out of hits, flashing until the session removes it
    Dying,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    id: EntityId,
    item: ItemId,
    bounds: Aabb,
    hits: u32,
    state: BrickState,
}

impl Brick {
    pub fn spawn(id: EntityId, center: Vec2, hits: u32, surface: &mut dyn Surface) -> Self {
        let bounds = Aabb::from_center(center, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT));
        let item = surface.create_shape(Shape::Rectangle, bounds, brick_fill(hits));
        Self {
            id,
            item,
            bounds,
            hits,
            state: if hits == 0 {
                BrickState::Dying
            } else {
                BrickState::Intact
            },
        }
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn state(&self) -> BrickState {
        self.state
    }

    /// Whether the ball can still collide with it
    pub fn is_solid(&self) -> bool {
        self.state == BrickState::Intact
    }

    /// Take one hit. Reaching zero starts the dying state; the flash and
    /// removal are scheduled by the owner.
    pub fn hit(&mut self, surface: &mut dyn Surface) -> BrickHit {
        let was_intact = self.is_solid();
        self.hits = self.hits.saturating_sub(1);

        let destroyed = was_intact && self.hits == 0;
        if self.hits == 0 {
            self.state = BrickState::Dying;
        } else {
            surface.set_fill(self.item, brick_fill(self.hits));
        }

        BrickHit {
            brick: self.id,
            remaining: self.hits,
            destroyed,
        }
    }
}

impl GameObject for Brick {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Scene;

    fn fill_of(scene: &Scene, brick: &Brick) -> Option<Fill> {
        scene.get(brick.item()).and_then(|i| i.fill())
    }

    #[test]
    fn test_color_table() {
        assert_eq!(brick_fill(1), Fill::Solid(Color::rgb(0x15F5BA)));
        assert_eq!(brick_fill(4), Fill::Solid(Color::rgb(0x000000)));
        assert_eq!(brick_fill(0), Fill::Clear);
        assert_eq!(brick_fill(9), Fill::Clear);
    }

    #[test]
    fn test_hit_recolors() {
        let mut scene = Scene::default();
        let mut brick = Brick::spawn(EntityId(1), Vec2::new(42.5, 30.0), 4, &mut scene);
        assert_eq!(fill_of(&scene, &brick), Some(brick_fill(4)));

        let hit = brick.hit(&mut scene);
        assert_eq!(hit.remaining, 3);
        assert!(!hit.destroyed);
        assert_eq!(fill_of(&scene, &brick), Some(brick_fill(3)));
        assert!(brick.is_solid());
    }

    #[test]
    fn test_last_hit_destroys_once() {
        let mut scene = Scene::default();
        let mut brick = Brick::spawn(EntityId(1), Vec2::new(42.5, 170.0), 1, &mut scene);

        let hit = brick.hit(&mut scene);
        assert!(hit.destroyed);
        assert_eq!(hit.remaining, 0);
        assert_eq!(brick.state(), BrickState::Dying);
        assert!(!brick.is_solid());

        // Further hits never report a second destruction
        let again = brick.hit(&mut scene);
        assert!(!again.destroyed);
        assert_eq!(again.remaining, 0);
    }

    #[test]
    fn test_hits_decrease_monotonically() {
        let mut scene = Scene::default();
        let mut brick = Brick::spawn(EntityId(1), Vec2::new(42.5, 30.0), 4, &mut scene);
        let mut last = brick.hits();
        for _ in 0..6 {
            let hit = brick.hit(&mut scene);
            assert!(hit.remaining <= last);
            last = hit.remaining;
        }
        assert_eq!(last, 0);
    }
}
