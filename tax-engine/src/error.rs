use thiserror::Error;

/// Input rejection from the computation engine.
///
/// The service layer validates requests before calling in; these exist so
/// the engine itself can never produce a negative or NaN result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}
