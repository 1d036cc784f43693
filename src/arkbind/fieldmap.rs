//! Canonical binding keys and the vendor field names that feed them.
//!
//! Defaults target OpenGeoMetadata Aardvark records. Any key can be remapped in the
//! `Fields` section of the config file.

use crate::error::{ArkError, Result};
use serde::{Deserialize, Serialize};

pub const REFERENCES_FIELD: &str = "dct_references_s";
pub const SCHEMA_URL: &str = "http://schema.org/url";
pub const SCHEMA_DOWNLOAD_URL: &str = "http://schema.org/downloadUrl";

/// The six canonical keys bound onto every identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKey {
    Identifier,
    OgmAardvarkId,
    Title,
    Access,
    Download,
    Where,
}

impl BindingKey {
    /// Bind order used by the batch binder.
    pub const ALL: [BindingKey; 6] = [
        BindingKey::Identifier,
        BindingKey::OgmAardvarkId,
        BindingKey::Title,
        BindingKey::Access,
        BindingKey::Download,
        BindingKey::Where,
    ];

    /// Element name on the authority side.
    pub fn element(self) -> &'static str {
        match self {
            BindingKey::Identifier => "identifier",
            BindingKey::OgmAardvarkId => "ogm_aardvark_id",
            BindingKey::Title => "title",
            BindingKey::Access => "access",
            BindingKey::Download => "download",
            BindingKey::Where => "where",
        }
    }
}

fn default_identifier() -> String {
    "dct_identifier_sm".to_string()
}

fn default_ogm_aardvark_id() -> String {
    "id".to_string()
}

fn default_title() -> String {
    "dct_title_s".to_string()
}

fn default_access() -> String {
    "dct_accessRights_s".to_string()
}

fn default_references() -> String {
    REFERENCES_FIELD.to_string()
}

/// Maps canonical binding keys to source JSON field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    #[serde(default = "default_identifier")]
    pub identifier: String,

    #[serde(default = "default_ogm_aardvark_id")]
    pub ogm_aardvark_id: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_access")]
    pub access: String,

    /// Field holding the JSON-encoded references that supply `where`.
    #[serde(default = "default_references", rename = "where")]
    pub where_: String,

    /// Field holding the JSON-encoded references that supply `download`.
    #[serde(default = "default_references")]
    pub download: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            identifier: default_identifier(),
            ogm_aardvark_id: default_ogm_aardvark_id(),
            title: default_title(),
            access: default_access(),
            where_: default_references(),
            download: default_references(),
        }
    }
}

impl FieldMap {
    /// Source field name for a canonical key.
    pub fn field(&self, key: BindingKey) -> &str {
        match key {
            BindingKey::Identifier => &self.identifier,
            BindingKey::OgmAardvarkId => &self.ogm_aardvark_id,
            BindingKey::Title => &self.title,
            BindingKey::Access => &self.access,
            BindingKey::Download => &self.download,
            BindingKey::Where => &self.where_,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for key in BindingKey::ALL {
            if self.field(key).trim().is_empty() {
                return Err(ArkError::Config(format!(
                    "Field map entry '{}' must not be empty",
                    key.element()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_targets_aardvark() {
        let map = FieldMap::default();
        assert_eq!(map.field(BindingKey::Identifier), "dct_identifier_sm");
        assert_eq!(map.field(BindingKey::OgmAardvarkId), "id");
        assert_eq!(map.field(BindingKey::Where), REFERENCES_FIELD);
        assert_eq!(map.field(BindingKey::Download), REFERENCES_FIELD);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let map: FieldMap = serde_yaml::from_str("title: name\nwhere: refs").unwrap();
        assert_eq!(map.title, "name");
        assert_eq!(map.where_, "refs");
        assert_eq!(map.access, "dct_accessRights_s");
    }

    #[test]
    fn test_empty_entry_is_rejected() {
        let map = FieldMap {
            title: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(map.validate(), Err(ArkError::Config(_))));
    }

    #[test]
    fn test_bind_order() {
        let elements: Vec<&str> = BindingKey::ALL.iter().map(|k| k.element()).collect();
        assert_eq!(
            elements,
            vec!["identifier", "ogm_aardvark_id", "title", "access", "download", "where"]
        );
    }
}
