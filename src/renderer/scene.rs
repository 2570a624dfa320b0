//! In-memory display list
//!
//! Items are kept in creation order, which is also the stacking order a host
//! should draw them in.

use std::collections::BTreeMap;

use glam::Vec2;

use super::surface::{Color, Fill, ItemId, Shape, Surface};
use crate::sim::Aabb;

/// What an item is
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItemKind {
    Shape { shape: Shape, bounds: Aabb, fill: Fill },
    Text { pos: Vec2, text: String, size: u16 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub id: ItemId,
    pub kind: SceneItemKind,
}

impl SceneItem {
    pub fn bounds(&self) -> Option<Aabb> {
        match &self.kind {
            SceneItemKind::Shape { bounds, .. } => Some(*bounds),
            SceneItemKind::Text { .. } => None,
        }
    }

    pub fn fill(&self) -> Option<Fill> {
        match &self.kind {
            SceneItemKind::Shape { fill, .. } => Some(*fill),
            SceneItemKind::Text { .. } => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            SceneItemKind::Text { text, .. } => Some(text),
            SceneItemKind::Shape { .. } => None,
        }
    }
}

/// Retained scene that records everything the simulation draws
#[derive(Debug, Clone)]
pub struct Scene {
    background: Color,
    items: BTreeMap<ItemId, SceneItem>,
    next_id: u32,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            items: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn get(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.get(&id)
    }

    /// Items in stacking order (bottom first)
    pub fn items(&self) -> impl Iterator<Item = &SceneItem> {
        self.items.values()
    }

    /// All text labels currently shown
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.values().filter_map(SceneItem::text)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn insert(&mut self, kind: SceneItemKind) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, SceneItem { id, kind });
        id
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(crate::consts::BACKGROUND)
    }
}

impl Surface for Scene {
    fn create_shape(&mut self, shape: Shape, bounds: Aabb, fill: Fill) -> ItemId {
        self.insert(SceneItemKind::Shape { shape, bounds, fill })
    }

    fn create_text(&mut self, pos: Vec2, text: &str, size: u16) -> ItemId {
        self.insert(SceneItemKind::Text {
            pos,
            text: text.to_owned(),
            size,
        })
    }

    fn move_item(&mut self, item: ItemId, delta: Vec2) {
        if let Some(entry) = self.items.get_mut(&item) {
            match &mut entry.kind {
                SceneItemKind::Shape { bounds, .. } => *bounds = bounds.translated(delta),
                SceneItemKind::Text { pos, .. } => *pos += delta,
            }
        }
    }

    fn set_fill(&mut self, item: ItemId, new_fill: Fill) {
        if let Some(SceneItem {
            kind: SceneItemKind::Shape { fill, .. },
            ..
        }) = self.items.get_mut(&item)
        {
            *fill = new_fill;
        }
    }

    fn set_text(&mut self, item: ItemId, new_text: &str) {
        if let Some(SceneItem {
            kind: SceneItemKind::Text { text, .. },
            ..
        }) = self.items.get_mut(&item)
        {
            new_text.clone_into(text);
        }
    }

    fn delete_item(&mut self, item: ItemId) {
        self.items.remove(&item);
    }
}
