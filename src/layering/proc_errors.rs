/// Layer assignment error type.
#[derive(Debug, Clone, PartialEq)]
pub enum LayeringError {
    /// A leg that is neither horizontal nor vertical.
    NonAxisAligned(String),
    /// StringOnly error.
    StringOnly(String),
}
impl std::fmt::Display for LayeringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayeringError::NonAxisAligned(error) => write!(f, "- Only axis-aligned segments are supported: {}", error),
            LayeringError::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}
impl From<String> for LayeringError {
    fn from(error: String) -> Self {
        LayeringError::StringOnly(error)
    }
}

/// Result type for the `layering` module.
pub type ProcResult<T> = std::result::Result<T, LayeringError>;

/// Create a `LayeringError::StringOnly` from a string.
pub fn err_str<T>(error_str: &str) -> ProcResult<T> {
    Err(LayeringError::StringOnly(error_str.to_string()))
}
