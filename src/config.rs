//! Typed tool configuration.
//!
//! Every field carries an explicit default so a host can pass a partial JSON object and get a
//! complete configuration back. The configuration is fixed for the lifetime of a block.

use crate::constants::{
    DEFAULT_CAPTION_PLACEHOLDER, DEFAULT_CLASS_PREFIX, DEFAULT_FIELD, DEFAULT_TYPES,
};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Upload endpoints. A missing `by_file` endpoint selects the local uploader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoints {
    pub by_file: Option<String>,
    pub by_url: Option<String>,
}

/// Class-name tokens owned by the tool itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeTokens {
    pub class_prefix: String,
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    pub endpoints: Endpoints,
    pub additional_request_data: BTreeMap<String, String>,
    pub additional_request_headers: BTreeMap<String, String>,
    pub field: String,
    pub types: String,
    pub caption_placeholder: String,
    /// Label of the add control. Empty means the translated default label.
    pub button_content: String,
    pub theme: ThemeTokens,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            additional_request_data: BTreeMap::new(),
            additional_request_headers: BTreeMap::new(),
            field: DEFAULT_FIELD.to_string(),
            types: DEFAULT_TYPES.to_string(),
            caption_placeholder: DEFAULT_CAPTION_PLACEHOLDER.to_string(),
            button_content: String::new(),
            theme: ThemeTokens::default(),
        }
    }
}

impl CarouselConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns true if `mime` passes the `types` filter.
    ///
    /// The filter is a comma separated list of MIME types; `*` matches any subtype and a bare
    /// `*/*` or `*` accepts everything.
    pub fn accepts_mime(&self, mime: &str) -> bool {
        let mime = mime.trim().to_ascii_lowercase();
        let (top, sub) = mime.split_once('/').unwrap_or((mime.as_str(), ""));
        self.type_filters().any(|filter| match filter.split_once('/') {
            Some(("*", "*")) => true,
            Some((f_top, "*")) => f_top == top,
            Some((f_top, f_sub)) => f_top == top && f_sub == sub,
            None => filter == "*",
        })
    }

    /// Individual entries of the `types` filter, lowercased.
    pub fn type_filters(&self) -> impl Iterator<Item = String> + '_ {
        self.types
            .split(',')
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
    }
}

/// Settings file read by a host: tool configuration plus its translation table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    pub tool: CarouselConfig,
    pub messages: BTreeMap<String, String>,
}

impl HostSettings {
    /// Loads settings from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let file = std::fs::File::open(path)?;
        let settings = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.field, "image");
        assert_eq!(config.types, "image/*");
        assert_eq!(config.caption_placeholder, "Caption");
        assert!(config.button_content.is_empty());
        assert!(config.endpoints.by_file.is_none());
        assert_eq!(config.theme.class_prefix, "cdxcarousel");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CarouselConfig::from_json(
            r#"{
                "endpoints": { "byFile": "https://example.com/upload" },
                "additionalRequestHeaders": { "Authorization": "Bearer x" },
                "field": "file"
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.endpoints.by_file.as_deref(),
            Some("https://example.com/upload")
        );
        assert!(config.endpoints.by_url.is_none());
        assert_eq!(config.field, "file");
        assert_eq!(config.types, "image/*");
        assert_eq!(
            config.additional_request_headers.get("Authorization").map(String::as_str),
            Some("Bearer x")
        );
    }

    #[test]
    fn test_accepts_mime_wildcard() {
        let config = CarouselConfig::default();
        assert!(config.accepts_mime("image/png"));
        assert!(config.accepts_mime("IMAGE/JPEG"));
        assert!(!config.accepts_mime("video/mp4"));
    }

    #[test]
    fn test_accepts_mime_list() {
        let config = CarouselConfig {
            types: "image/png, video/*".to_string(),
            ..Default::default()
        };
        assert!(config.accepts_mime("image/png"));
        assert!(!config.accepts_mime("image/gif"));
        assert!(config.accepts_mime("video/mp4"));
    }

    #[test]
    fn test_accepts_everything() {
        let config = CarouselConfig {
            types: "*/*".to_string(),
            ..Default::default()
        };
        assert!(config.accepts_mime("application/octet-stream"));
    }

    #[test]
    fn test_missing_settings_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = HostSettings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings.tool, CarouselConfig::default());
        assert!(settings.messages.is_empty());
    }

    #[test]
    fn test_settings_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{ "tool": { "captionPlaceholder": "Legende" }, "messages": { "Add Image": "Bild hinzufügen" } }"#,
        )
        .unwrap();

        let settings = HostSettings::load(&path).unwrap();
        assert_eq!(settings.tool.caption_placeholder, "Legende");
        assert_eq!(
            settings.messages.get("Add Image").map(String::as_str),
            Some("Bild hinzufügen")
        );
    }
}
