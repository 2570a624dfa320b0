//! Drawing surface module
//!
//! The simulation only talks to a `Surface`. A host toolkit either implements
//! it directly or draws the retained `Scene` each frame.

pub mod scene;
pub mod surface;

pub use scene::{Scene, SceneItem, SceneItemKind};
pub use surface::{Color, Fill, ItemId, Shape, Surface};
