use std::io::Write;
use serde::Serialize;

#[derive(Debug)]
pub enum IoErrorType {
    File(std::io::Error),
    SerdeJson(serde_json::Error),
    SerdeYaml(serde_yaml::Error),
    TomlDe(toml::de::Error),
    StringOnly(String),
}
impl std::fmt::Display for IoErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoErrorType::File(error) => write!(f, "- File IO Error:\n{}", error),
            IoErrorType::SerdeJson(error) => write!(f, "- JSON Serialization/Deserialization Error:\n{}", error),
            IoErrorType::SerdeYaml(error) => write!(f, "- YAML Serialization/Deserialization Error:\n{}", error),
            IoErrorType::TomlDe(error) => write!(f, "- TOML Deserialization Error:\n{}", error),
            IoErrorType::StringOnly(error) => write!(f, "- {}", error),
        }
    }
}

/// Custom verbose IO error struct.
#[derive(Debug)]
pub struct IoError {
    /// Filepath facing an error.
    pub file: Option<String>,
    /// Error cause.
    pub cause: IoErrorType,
}
impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.file {
            Some(ref file) => write!(f, "- Error with file: {}\n- {}", file, self.cause),
            None => write!(f, "- {}", self.cause),
        }
    }
}

pub type IoResult<T> = std::result::Result<T, IoError>;

/// Open a file with verbose errors.
pub fn open(path: &str) -> IoResult<std::fs::File> {
    let file = match std::fs::File::open(path){
        Ok(file) => file,
        Err(error) => {
            return Err(IoError{file: Some(path.to_string()), cause: IoErrorType::File(error)});
        },
    };
    Ok(file)
}

/// Create a file with verbose errors.
pub fn create(path: &str) -> IoResult<std::fs::File> {
    let file = match std::fs::File::create(path){
        Ok(file) => file,
        Err(error) => {
            return Err(IoError{file: Some(path.to_string()), cause: IoErrorType::File(error)});
        },
    };
    Ok(file)
}

/// Read from string with verbose errors
pub fn read_to_string(path: &str) -> IoResult<String> {
    match std::fs::read_to_string(path){
        Ok(buffer) => Ok(buffer),
        Err(error) => Err(IoError{file: Some(path.to_string()), cause: IoErrorType::File(error)}),
    }
}

/// Write string to file with verbose errors.
pub fn write_to_file(path: &str, buffer: &str) -> IoResult<()> {
    let mut f = create(path)?;
    match f.write_all(buffer.as_bytes()){
        Ok(_) => Ok(()),
        Err(error) => {
            return Err(IoError{file: Some(path.to_string()), cause: IoErrorType::File(error)});
        },
    }
}

/// Serialize a value to pretty JSON.
pub fn to_json_string<T: Serialize>(value: &T) -> IoResult<String> {
    match serde_json::to_string_pretty(value) {
        Ok(buffer) => Ok(buffer),
        Err(error) => Err(IoError{file: None, cause: IoErrorType::SerdeJson(error)}),
    }
}

/// Write a value to a file as pretty JSON with verbose errors.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> IoResult<()> {
    let mut buffer = match serde_json::to_string_pretty(value) {
        Ok(buffer) => buffer,
        Err(error) => return Err(IoError{file: Some(path.to_string()), cause: IoErrorType::SerdeJson(error)}),
    };
    buffer.push('\n');
    write_to_file(path, &buffer)
}

/// Config file extensions understood by `read_cfg_file`.
pub const CFG_EXTENSIONS: [&str; 4] = ["json", "toml", "yaml", "yml"];

/// Read a config file, picking the format from the file extension.
pub fn read_cfg_file<T>(path: &str) -> IoResult<T>
where T: serde::de::DeserializeOwned
{
    let extension = std::path::Path::new(path).extension().and_then(|e| e.to_str());
    let with_file = |cause| IoError{file: Some(path.to_string()), cause};
    match extension {
        Some("json") => serde_json::from_reader(std::io::BufReader::new(open(path)?))
            .map_err(|error| with_file(IoErrorType::SerdeJson(error))),
        Some("toml") => toml::from_str(&read_to_string(path)?)
            .map_err(|error| with_file(IoErrorType::TomlDe(error))),
        Some("yaml") | Some("yml") => serde_yaml::from_reader(open(path)?)
            .map_err(|error| with_file(IoErrorType::SerdeYaml(error))),
        _ => {
            let error_string = format!("Unsupported filetype for config file: {}\nSupported filetypes: {:?}", path, CFG_EXTENSIONS);
            Err(with_file(IoErrorType::StringOnly(error_string)))
        },
    }
}
