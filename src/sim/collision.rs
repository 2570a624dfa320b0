//! Overlap queries against the entity registry
//!
//! Each overlapping entity is wrapped in a `Contact` so collision response
//! can match on the kind instead of inspecting types at runtime.

use super::brick::Brick;
use super::geom::Aabb;
use super::object::GameObject;
use super::paddle::Paddle;

/// An entity the ball is touching this tick
#[derive(Debug)]
pub enum Contact<'a> {
    Paddle(&'a Paddle),
    Brick(&'a mut Brick),
}

impl Contact<'_> {
    pub fn bounds(&self) -> Aabb {
        match self {
            Contact::Paddle(paddle) => paddle.bounds(),
            Contact::Brick(brick) => brick.bounds(),
        }
    }
}

/// Collect everything overlapping `area` in stacking order: paddle first,
/// then bricks in the order given. Dying bricks are skipped.
pub fn find_overlapping<'a>(
    area: &Aabb,
    paddle: &'a Paddle,
    bricks: impl IntoIterator<Item = &'a mut Brick>,
) -> Vec<Contact<'a>> {
    let mut contacts = Vec::new();
    if paddle.bounds().overlaps(area) {
        contacts.push(Contact::Paddle(paddle));
    }
    contacts.extend(
        bricks
            .into_iter()
            .filter(|brick| brick.is_solid() && brick.bounds().overlaps(area))
            .map(Contact::Brick),
    );
    contacts
}
