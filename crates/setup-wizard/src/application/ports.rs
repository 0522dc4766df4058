//! Abstractions over configuration persistence and the reload signal.
//!
//! The production implementations live in `infrastructure::storage` and
//! `infrastructure::reload`; unit tests use the `mockall`-generated
//! `MockConfigRepository` and `MockReloadNotifier`.

use std::path::PathBuf;

use setup_core::{ConfigDocument, DocumentError};
use thiserror::Error;

/// Error type for loading and saving the configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be determined from the environment.
    #[error("could not determine the home directory")]
    NoHomeDir,

    /// No configuration file exists at the expected path.  Fatal at startup:
    /// the wizard never creates a configuration implicitly.
    #[error("configuration file not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The file is not valid JSON.
    #[error("failed to parse configuration JSON at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file is valid JSON but a section is missing or mistyped.
    #[error("invalid configuration at {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    /// A file system I/O error occurred.  On save, the previous file content
    /// is left in place.
    #[error("I/O error accessing config at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Error type for writing the reload sentinel.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("failed to write reload marker at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads and stores the whole configuration document.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigRepository {
    /// Reads the document.  No default-filling is performed.
    fn load(&self) -> Result<ConfigDocument, ConfigError>;

    /// Replaces the stored document.  Must not leave a truncated file behind
    /// on failure.
    fn save(&self, document: &ConfigDocument) -> Result<(), ConfigError>;
}

/// Tells the automation host that the configuration changed.
#[cfg_attr(test, mockall::automock)]
pub trait ReloadNotifier {
    /// Best effort: a failure is reported but never undoes a save.
    fn notify(&self) -> Result<(), ReloadError>;
}
