/// Compile-time capacities for replicated, fixed-size state.
///
/// Replicated collections never grow past these bounds; appends beyond them
/// fail with [`crate::CapacityError`] instead of reallocating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatConfig;

impl CombatConfig {
    /// Longest name (status effect, weapon, resource) stored in replicated state.
    pub const MAX_NAME_LEN: usize = 20;
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Target references carried by a single action.
    pub const MAX_ACTION_TARGETS: usize = 4;
    pub const MAX_TRACKED_RESOURCES: usize = 64;
    /// Pending animator triggers per rendered actor.
    pub const MAX_ANIM_TRIGGERS: usize = 8;
}
