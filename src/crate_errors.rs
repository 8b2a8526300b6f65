use crate::{
    args,
    io,
    sampling,
};

/// Error-type enum for the `pcbcoil` crate.
/// Wraps the argument, IO and sampling errors.
#[derive(Debug)]
pub enum PcbCoilError {
    ArgError(args::ArgError),
    IoError(io::IoError),
    SamplingError(sampling::SamplingError),
    StringOnly(String),
}
impl std::fmt::Display for PcbCoilError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PcbCoilError::ArgError(error) => write!(f, "! ARGUMENT ERROR:\n{}", error),
            PcbCoilError::IoError(error) => write!(f, "! IO ERROR:\n{}", error),
            PcbCoilError::SamplingError(error) => write!(f, "! SAMPLING ERROR:\n{}", error),
            PcbCoilError::StringOnly(error) => write!(f, "! PCBCOIL ERROR:\n- {}", error),
        }
    }
}
impl From<String> for PcbCoilError {
    fn from(error: String) -> Self {
        PcbCoilError::StringOnly(error)
    }
}
impl From<args::ArgError> for PcbCoilError {
    fn from(error: args::ArgError) -> Self {
        PcbCoilError::ArgError(error)
    }
}
impl From<io::IoError> for PcbCoilError {
    fn from(error: io::IoError) -> Self {
        PcbCoilError::IoError(error)
    }
}
impl From<sampling::SamplingError> for PcbCoilError {
    fn from(error: sampling::SamplingError) -> Self {
        PcbCoilError::SamplingError(error)
    }
}

/// Result type for the `pcbcoil` crate.
pub type PcbCoilResult<T> = std::result::Result<T, PcbCoilError>;

/// Create a `PcbCoilResult` with an `Err` from a string.
pub fn err_str<T>(error_str: &str) -> PcbCoilResult<T> {
    Err(PcbCoilError::StringOnly(error_str.to_string()))
}
