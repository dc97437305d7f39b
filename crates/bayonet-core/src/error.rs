//! Error types for the melee core.

/// Errors a caller can trigger when driving an encounter.
///
/// Internal invariant breaks are never reported here; they are asserted in
/// debug builds and otherwise leave an odd-looking but complete round log.
#[derive(Debug, thiserror::Error)]
pub enum MeleeError {
    /// The player targeted an opponent that is not in the live active set.
    #[error("opponent #{0} is not a live target")]
    InvalidTarget(usize),

    /// An opponent index does not refer to a slot in the roster.
    #[error("opponent index {0} out of range")]
    OpponentOutOfRange(usize),

    /// The chosen action cannot be taken right now.
    #[error("action unavailable: {0}")]
    ActionUnavailable(String),

    /// The encounter already reached a terminal outcome.
    #[error("encounter already finished ({0})")]
    EncounterFinished(String),

    /// No preset encounter with the given name exists.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Serialized encounter data could not be read.
    #[error("invalid encounter data: {0}")]
    InvalidEncounter(#[from] serde_json::Error),

    /// Encounter data parsed but its roster bookkeeping is inconsistent.
    #[error("inconsistent encounter: {0}")]
    InconsistentEncounter(String),
}

/// Convenience result type for melee operations.
pub type MeleeResult<T> = Result<T, MeleeError>;
