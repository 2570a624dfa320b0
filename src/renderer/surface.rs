//! Surface contract consumed by every visible entity

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Aabb;

/// Opaque handle to something drawn on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Interior of a shape: a solid color or nothing at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fill {
    Solid(Color),
    Clear,
}

impl From<Color> for Fill {
    fn from(color: Color) -> Self {
        Fill::Solid(color)
    }
}

/// Primitive shapes, both described by their bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Oval,
    Rectangle,
}

/// A retained-mode drawing surface.
///
/// Operations on an item that was never created or was already deleted are
/// ignored.
pub trait Surface {
    fn create_shape(&mut self, shape: Shape, bounds: Aabb, fill: Fill) -> ItemId;
    fn create_text(&mut self, pos: Vec2, text: &str, size: u16) -> ItemId;
    fn move_item(&mut self, item: ItemId, delta: Vec2);
    fn set_fill(&mut self, item: ItemId, fill: Fill);
    fn set_text(&mut self, item: ItemId, text: &str);
    fn delete_item(&mut self, item: ItemId);
}
