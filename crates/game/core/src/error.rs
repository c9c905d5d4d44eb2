//! Common error infrastructure for arena-core.
//!
//! Validation failures are not errors: they are [`crate::ValidationResponse`]
//! values handed back to the caller. The types here cover the remaining
//! failures, which are programming errors (authority violations, malformed
//! action data) or fixed-capacity overflows.
//!
//! # Design Principles
//!
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Loud at the source**: authority violations are logged with `warn!` where detected

use crate::action::ActionKind;
use crate::state::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; retrying later may succeed.
    ///
    /// Examples: replicated list full
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: name longer than the replicated capacity
    Validation,

    /// Unexpected state inconsistency that should be investigated.
    ///
    /// Examples: action data references an actor that never existed
    Internal,

    /// The caller broke a simulation contract.
    ///
    /// Examples: mutating an actor without state authority, combat state without a target
    Fatal,
}

impl ErrorSeverity {
    /// Log label for this severity.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all arena-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// A fixed-capacity collection rejected an append.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{what} capacity of {capacity} exceeded")]
pub struct CapacityError {
    pub what: &'static str,
    pub capacity: usize,
}

impl CapacityError {
    pub const fn new(what: &'static str, capacity: usize) -> Self {
        Self { what, capacity }
    }
}

impl GameError for CapacityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "CAPACITY_EXCEEDED"
    }
}

/// Errors raised by the combat engine and action pipeline.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CombatError {
    #[error("state authority violation: cannot mutate actor {actor}")]
    AuthorityViolation { actor: EntityId },

    #[error("actor {0} not found in arena")]
    ActorNotFound(EntityId),

    #[error("action data for actor {actor} has no target")]
    MissingTarget { actor: EntityId },

    #[error("no action registered for {0:?}")]
    UnknownAction(ActionKind),

    #[error("actor {actor} is in combat without action data")]
    MissingActionData { actor: EntityId },

    #[error("name `{name}` exceeds {max} bytes")]
    NameTooLong { name: String, max: usize },

    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AuthorityViolation { .. }
            | Self::MissingTarget { .. }
            | Self::MissingActionData { .. } => ErrorSeverity::Fatal,
            Self::ActorNotFound(_) | Self::UnknownAction(_) => ErrorSeverity::Internal,
            Self::NameTooLong { .. } => ErrorSeverity::Validation,
            Self::Capacity(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AuthorityViolation { .. } => "AUTHORITY_VIOLATION",
            Self::ActorNotFound(_) => "ACTOR_NOT_FOUND",
            Self::UnknownAction(_) => "UNKNOWN_ACTION",
            Self::MissingTarget { .. } => "MISSING_TARGET",
            Self::MissingActionData { .. } => "MISSING_ACTION_DATA",
            Self::NameTooLong { .. } => "NAME_TOO_LONG",
            Self::Capacity(inner) => inner.error_code(),
        }
    }
}
