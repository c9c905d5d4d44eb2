//! Range gating and target lock.

use glam::{Vec2, Vec3};

use crate::state::{ActorState, EntityId};

/// Distance on the ground plane (XZ), ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Checks whether `target` is within `range` of `actor`.
///
/// The gap between the two collision circles is compared to `range`; the
/// returned deficit is `gap - range`, so the action is in range iff the
/// deficit is not positive.
pub fn in_range_for_action(range: f32, actor: &ActorState, target: &ActorState) -> (bool, f32) {
    let gap = planar_distance(actor.position(), target.position())
        - actor.transform.collision_radius
        - target.transform.collision_radius;
    let deficit = gap - range;
    (deficit <= 0.0, deficit)
}

/// Overwrites the actor's single target lock.
pub fn update_target_lock(actor: &mut ActorState, target: Option<EntityId>) {
    actor.target_lock = target;
}
