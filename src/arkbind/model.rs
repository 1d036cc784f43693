use crate::error::{ArkError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheme prefix ARKs carry in source metadata.
pub const ARK_SCHEME: &str = "ark:/";

/// Element names that tell NOID to read the binding from standard input.
pub const STDIN_MARKERS: [&str; 2] = [":", ":-"];

/// Strips the `ark:/` scheme prefix, if present.
pub fn normalize_identifier(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix(ARK_SCHEME).unwrap_or(trimmed)
}

pub fn is_stdin_marker(element: &str) -> bool {
    STDIN_MARKERS.contains(&element)
}

/// Overwrite semantics for a `bind` call, using NOID's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMode {
    #[default]
    Set,
    Let,
    Add,
    Insert,
    New,
    Replace,
    Append,
    Prepend,
    Delete,
    Purge,
}

impl BindMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BindMode::Set => "set",
            BindMode::Let => "let",
            BindMode::Add => "add",
            BindMode::Insert => "insert",
            BindMode::New => "new",
            BindMode::Replace => "replace",
            BindMode::Append => "append",
            BindMode::Prepend => "prepend",
            BindMode::Delete => "delete",
            BindMode::Purge => "purge",
        }
    }
}

impl fmt::Display for BindMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindMode {
    type Err = ArkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "set" => Ok(BindMode::Set),
            "let" => Ok(BindMode::Let),
            "add" => Ok(BindMode::Add),
            "insert" => Ok(BindMode::Insert),
            "new" => Ok(BindMode::New),
            "replace" => Ok(BindMode::Replace),
            "append" => Ok(BindMode::Append),
            "prepend" => Ok(BindMode::Prepend),
            "delete" => Ok(BindMode::Delete),
            "purge" => Ok(BindMode::Purge),
            other => Err(ArkError::InvalidArguments(format!(
                "Unknown bind mode: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_scheme() {
        assert_eq!(normalize_identifier("ark:/77981/gmgs1zcrnw"), "77981/gmgs1zcrnw");
        assert_eq!(normalize_identifier("77981/gmgs1zcrnw"), "77981/gmgs1zcrnw");
        assert_eq!(normalize_identifier(" ark:/1/x "), "1/x");
    }

    #[test]
    fn test_normalize_only_strips_prefix() {
        assert_eq!(normalize_identifier("see ark:/1/x"), "see ark:/1/x");
    }

    #[test]
    fn test_stdin_markers() {
        assert!(is_stdin_marker(":"));
        assert!(is_stdin_marker(":-"));
        assert!(!is_stdin_marker("where"));
        assert!(!is_stdin_marker("::"));
    }

    #[test]
    fn test_bind_mode_parse() {
        assert_eq!("SET".parse::<BindMode>().unwrap(), BindMode::Set);
        assert_eq!("replace".parse::<BindMode>().unwrap(), BindMode::Replace);
        assert!(matches!(
            "overwrite".parse::<BindMode>(),
            Err(ArkError::InvalidArguments(_))
        ));
        assert_eq!(BindMode::default().to_string(), "set");
    }
}
