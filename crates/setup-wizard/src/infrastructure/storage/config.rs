//! JSON configuration persistence.
//!
//! Reads and writes the [`ConfigDocument`] the automation host consumes:
//!
//! - default location: `~/.hammerspoon/user_config.json`
//! - encoding: UTF-8 JSON, 2-space indentation, keys sorted
//!   lexicographically at every level, one trailing newline
//!
//! Sorted keys and fixed indentation make saving an unchanged document
//! byte-for-byte idempotent, so version-controlled config files diff cleanly.
//!
//! # No implicit defaults
//!
//! Unlike many settings stores, a missing file is an error
//! ([`ConfigError::NotFound`]), not a cue to write defaults.  The wizard edits
//! an existing installation; "reset to default" is an explicit user action.

use std::path::{Path, PathBuf};

use serde_json::Value;
use setup_core::ConfigDocument;
use tracing::{debug, info};

use super::atomic::write_atomically;
use crate::application::ports::{ConfigError, ConfigRepository};

/// Directory under the home directory that the automation host reads from.
pub const HAMMERSPOON_DIR: &str = ".hammerspoon";

/// File name of the configuration document.
pub const CONFIG_FILE_NAME: &str = "user_config.json";

/// Configuration repository backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.hammerspoon/user_config.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] if the home directory is unknown.
    pub fn at_default_location() -> Result<Self, ConfigError> {
        Ok(Self::new(config_file_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigRepository for JsonConfigStore {
    fn load(&self) -> Result<ConfigDocument, ConfigError> {
        load_config(&self.path)
    }

    fn save(&self, document: &ConfigDocument) -> Result<(), ConfigError> {
        save_config(&self.path, document)
    }
}

/// Resolves `~/.hammerspoon`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDir`] when no home directory is set.
pub fn hammerspoon_dir() -> Result<PathBuf, ConfigError> {
    home_dir()
        .map(|home| home.join(HAMMERSPOON_DIR))
        .ok_or(ConfigError::NoHomeDir)
}

/// Resolves the full path to the configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDir`] when no home directory is set.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(hammerspoon_dir()?.join(CONFIG_FILE_NAME))
}

/// Loads the document at `path`.
///
/// # Errors
///
/// - [`ConfigError::NotFound`] if the file does not exist,
/// - [`ConfigError::Io`] for other read failures,
/// - [`ConfigError::Parse`] if the content is not JSON,
/// - [`ConfigError::Invalid`] if a top-level section is missing or mistyped.
pub fn load_config(path: &Path) -> Result<ConfigDocument, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let document = ConfigDocument::from_value(value).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), "configuration loaded");
    Ok(document)
}

/// Atomically replaces the file at `path` with `document`.
///
/// The parent directory must already exist.
///
/// # Errors
///
/// [`ConfigError::Serialize`] if serialization fails, [`ConfigError::Io`] if
/// the write or rename fails.  In both cases the existing file is unchanged.
pub fn save_config(path: &Path, document: &ConfigDocument) -> Result<(), ConfigError> {
    let content = render_document(document)?;
    write_atomically(path, content.as_bytes()).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "configuration written");
    Ok(())
}

/// Renders the on-disk text of `document`.
///
/// Serializing through [`Value`] sorts every object's keys, including
/// unknown top-level keys carried in `extra`.
///
/// # Errors
///
/// Propagates `serde_json` serialization failures.
pub fn render_document(document: &ConfigDocument) -> Result<String, ConfigError> {
    let value = document.to_value()?;
    let mut content = serde_json::to_string_pretty(&value)?;
    content.push('\n');
    Ok(content)
}

/// Home directory from the environment.
pub(crate) fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("USERPROFILE").map(PathBuf::from)
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use setup_core::defaults;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("setup_wizard_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_render_uses_two_space_indent_and_sorted_keys() {
        // Arrange / Act
        let text = render_document(&defaults()).unwrap();

        // Assert
        assert!(text.starts_with("{\n  \"applications\": {\n    \"Cursor\": \"Cursor\","));
        let top_level: Vec<usize> = [
            "\"applications\"",
            "\"fabric\"",
            "\"folders\"",
            "\"shortcuts\"",
            "\"windowManagement\": {\n    \"animationDuration\"",
        ]
        .iter()
        .map(|k| text.find(k).expect("key present"))
        .collect();
        assert!(top_level.windows(2).all(|w| w[0] < w[1]), "keys must be sorted");
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_render_writes_zero_as_float() {
        let text = render_document(&defaults()).unwrap();
        assert!(text.contains("\"animationDuration\": 0.0"));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join(CONFIG_FILE_NAME);
        let mut doc = defaults();
        doc.folders
            .insert("Projects".to_string(), "~/Projects".to_string());

        // Act
        save_config(&path, &doc).expect("save");
        let loaded = load_config(&path).expect("load");

        // Assert
        assert_eq!(loaded, doc);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_saving_twice_is_byte_identical() {
        let dir = temp_dir();
        let path = dir.join(CONFIG_FILE_NAME);

        save_config(&path, &defaults()).unwrap();
        let first = std::fs::read(&path).unwrap();
        let reloaded = load_config(&path).unwrap();
        save_config(&path, &reloaded).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let path = std::env::temp_dir()
            .join(format!("setup_wizard_absent_{}", Uuid::new_v4()))
            .join(CONFIG_FILE_NAME);

        let result = load_config(&path);

        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_malformed_json_is_parse_error() {
        let dir = temp_dir();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ \"applications\": ").unwrap();

        let result = load_config(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_document_missing_section_is_invalid() {
        let dir = temp_dir();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"applications": {}, "folders": {}}"#).unwrap();

        let result = load_config(&path);

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_into_missing_directory_fails_with_io() {
        let path = std::env::temp_dir()
            .join(format!("setup_wizard_absent_{}", Uuid::new_v4()))
            .join(CONFIG_FILE_NAME);

        let result = save_config(&path, &defaults());

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_store_delegates_to_its_path() {
        let dir = temp_dir();
        let store = JsonConfigStore::new(dir.join(CONFIG_FILE_NAME));

        store.save(&defaults()).unwrap();

        assert_eq!(store.load().unwrap(), defaults());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_user_config_json() {
        // If no home directory is set (stripped CI env), NoHomeDir is acceptable.
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with(".hammerspoon/user_config.json"));
        }
    }
}
