use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArkError {
    #[error("NOID command `{command}` failed ({status}): {stderr}")]
    Authority {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Malformed metadata in {}: {source}", .path.display())]
    MalformedMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ArkError>;
