use crate::sampling::RejectionHistogram;

/// Sampling error type.
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingError {
    /// The design spec is malformed or describes an impossible search space.
    SpecError(String),
    /// Every attempt of the retry budget was rejected.
    Exhausted {
        attempts: usize,
        histogram: RejectionHistogram,
    },
}
impl std::fmt::Display for SamplingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingError::SpecError(error) => write!(f, "- Invalid design spec: {}", error),
            SamplingError::Exhausted{attempts, histogram} => write!(
                f,
                "- Failed to sample a valid coil after {} attempts\n- Rejections:\n{}",
                attempts, histogram,
            ),
        }
    }
}

/// Result type for the `sampling` module.
pub type ProcResult<T> = std::result::Result<T, SamplingError>;

/// Create a `SamplingError::SpecError` from a string.
pub fn err_spec<T>(error_str: &str) -> ProcResult<T> {
    Err(SamplingError::SpecError(error_str.to_string()))
}
