//! Shared behaviour of everything positioned on the surface

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::renderer::{ItemId, Surface};

/// Stable id of an entity in the session registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// A positioned, movable, deletable visual entity.
///
/// `delete` takes the object by value so nothing can touch it afterwards.
pub trait GameObject {
    fn id(&self) -> EntityId;

    /// Surface handle of the visual
    fn item(&self) -> ItemId;

    fn bounds(&self) -> Aabb;

    fn bounds_mut(&mut self) -> &mut Aabb;

    /// Translate by `delta` and keep the visual in sync
    fn move_by(&mut self, delta: Vec2, surface: &mut dyn Surface) {
        let moved = self.bounds().translated(delta);
        *self.bounds_mut() = moved;
        surface.move_item(self.item(), delta);
    }

    fn delete(self, surface: &mut dyn Surface)
    where
        Self: Sized,
    {
        surface.delete_item(self.item());
    }
}
