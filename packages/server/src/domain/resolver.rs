//! Room identity resolution.
//!
//! [`resolve_room_key`] is the only place a room key is derived from a pair of
//! users. Write and read paths must both go through it.

use super::value_object::{RoomKey, UserId};

/// Separator between the two ids of a room key. [`UserId`] rejects it.
pub const ROOM_KEY_SEPARATOR: char = '_';

/// Derive the canonical key of the room shared by `a` and `b`.
///
/// The ids are ordered lexicographically and joined with
/// [`ROOM_KEY_SEPARATOR`], so `resolve_room_key(a, b) == resolve_room_key(b, a)`.
/// Equal ids are accepted.
pub fn resolve_room_key(a: &UserId, b: &UserId) -> RoomKey {
    let (first, second) = canonical_pair(a, b);
    RoomKey::from_canonical(format!(
        "{}{}{}",
        first.as_str(),
        ROOM_KEY_SEPARATOR,
        second.as_str()
    ))
}

/// Order two participants the way they are stored on a room.
pub fn canonical_pair<'a>(a: &'a UserId, b: &'a UserId) -> (&'a UserId, &'a UserId) {
    if a <= b { (a, b) } else { (b, a) }
}
