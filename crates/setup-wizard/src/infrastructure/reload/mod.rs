//! Reload sentinel: tells the running automation host to re-read its config.
//!
//! The host watches `~/.hammerspoon/temp_config.json`.  When the file appears
//! (or its modification time changes) the host reloads the configuration and
//! deletes the marker.  The marker's content, `{"reload":true}`, is a signal
//! only and carries no configuration.
//!
//! Writing the marker is best effort: the caller reports a failure but keeps
//! the configuration it has already saved.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::storage::atomic::write_atomically;
use super::storage::config::home_dir;
use crate::application::ports::{ReloadError, ReloadNotifier};

/// File name of the reload marker inside `~/.hammerspoon`.
pub const RELOAD_MARKER_FILE_NAME: &str = "temp_config.json";

/// Content of the reload marker.
pub const RELOAD_MARKER_BODY: &[u8] = br#"{"reload":true}"#;

/// Reload notifier that writes the sentinel file.
#[derive(Debug, Clone)]
pub struct SentinelReloadSignal {
    marker_path: PathBuf,
}

impl SentinelReloadSignal {
    pub fn new(marker_path: impl Into<PathBuf>) -> Self {
        Self {
            marker_path: marker_path.into(),
        }
    }

    /// Signal at `~/.hammerspoon/temp_config.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::NoHomeDir`] if the home directory is unknown.
    pub fn at_default_location() -> Result<Self, ReloadError> {
        Ok(Self::new(reload_marker_path()?))
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker_path
    }
}

impl ReloadNotifier for SentinelReloadSignal {
    fn notify(&self) -> Result<(), ReloadError> {
        notify_reload(&self.marker_path)
    }
}

/// Resolves `~/.hammerspoon/temp_config.json`.
///
/// # Errors
///
/// Returns [`ReloadError::NoHomeDir`] when no home directory is set.
pub fn reload_marker_path() -> Result<PathBuf, ReloadError> {
    home_dir()
        .map(|home| {
            home.join(super::storage::config::HAMMERSPOON_DIR)
                .join(RELOAD_MARKER_FILE_NAME)
        })
        .ok_or(ReloadError::NoHomeDir)
}

/// Writes the reload marker to `marker_path`, replacing any existing marker.
///
/// # Errors
///
/// Returns [`ReloadError::Io`] if the marker cannot be written.
pub fn notify_reload(marker_path: &Path) -> Result<(), ReloadError> {
    write_atomically(marker_path, RELOAD_MARKER_BODY).map_err(|source| ReloadError::Io {
        path: marker_path.to_path_buf(),
        source,
    })?;
    debug!(path = %marker_path.display(), "reload marker written");
    Ok(())
}
