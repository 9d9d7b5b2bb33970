use thiserror::Error;

/// Errors from the hand journal. The action API itself never errors:
/// illegal actions are silent no-ops against the current state, a policy
/// chosen for a single trusted operator rather than an adversarial system.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal io: {0}")]
    Io(#[from] std::io::Error),
    #[error("journal encode: {0}")]
    Encode(#[from] serde_json::Error),
}
