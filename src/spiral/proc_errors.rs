/// Spiral synthesis error type.
#[derive(Debug, Clone, PartialEq)]
pub enum SpiralError {
    /// Arguments outside their allowed domain.
    InvalidInput(String),
    /// The constraints cannot be met by a spiral of the requested shape.
    GeometryInfeasible(String),
}
impl std::fmt::Display for SpiralError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpiralError::InvalidInput(error) => write!(f, "- Invalid spiral input: {}", error),
            SpiralError::GeometryInfeasible(error) => write!(f, "- Geometry infeasible: {}", error),
        }
    }
}

/// Result type for the `spiral` module.
pub type ProcResult<T> = std::result::Result<T, SpiralError>;

/// Create a `SpiralError::InvalidInput` from a string.
pub fn err_input<T>(error_str: &str) -> ProcResult<T> {
    Err(SpiralError::InvalidInput(error_str.to_string()))
}

/// Create a `SpiralError::GeometryInfeasible` from a string.
pub fn err_infeasible<T>(error_str: &str) -> ProcResult<T> {
    Err(SpiralError::GeometryInfeasible(error_str.to_string()))
}
