//! Overlap predicates
//!
//! Pure geometry only; deciding what an overlap *means* is the resolver's
//! job. Two watches exist per item: the player box and the ground line.

use super::entity::Aabb;

/// Player × item overlap (a potential catch)
pub fn player_catches_item(player: &Aabb, item: &Aabb) -> bool {
    player.overlaps(item)
}

/// Ground line × item overlap (a potential miss)
///
/// The ground line is horizontal and spans the full viewport width, so only
/// the item's lowest edge matters.
pub fn item_hits_ground(item: &Aabb, ground_y: f32) -> bool {
    item.bottom() >= ground_y
}
