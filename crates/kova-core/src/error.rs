use thiserror::Error;

/// Configuration failures detected when a component is constructed.
///
/// Runtime paths (missing elements, re-entrant activations, reduced motion)
/// never produce errors; they degrade to a static render instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    #[error("invalid scroll marker `{0}`")]
    InvalidMarker(String),
    #[error("unknown easing `{0}`")]
    UnknownEase(String),
    #[error("duplicate card id {0}")]
    DuplicateCard(u32),
    #[error("rotating text needs at least one word")]
    EmptyWordList,
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("crossfade of {transition_ms} ms does not fit in a {interval_ms} ms interval")]
    CrossfadeTooLong { transition_ms: f64, interval_ms: f64 },
}

/// Reject zero, negative and NaN values for a named setting.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), MotionError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(MotionError::NonPositive { name, value })
    }
}
