//! SettingsSession: the form controller's logic without the form.
//!
//! A session owns the current [`ConfigDocument`] and the [`FieldSet`] bound
//! to it.  Edits go to the field set; only [`SettingsSession::save`] and a
//! confirmed [`SettingsSession::reset`] replace the document.
//!
//! # Reset state machine
//!
//! ```text
//!             reset(false)
//!   Editing ◄──────────────── Editing / Persisted
//!      │
//!      │ reset(true)
//!      ▼
//!    Reset  ── document := defaults(), fields repopulated
//!      │
//!      │ immediate save, NO reload signal
//!      ▼
//!  Persisted ── any edit ──► Editing
//! ```
//!
//! A normal save fires the reload signal after the document is on disk; a
//! reset deliberately does not.  If the reset's save fails the session stays
//! in `Reset` with the defaults in memory, and a later [`SettingsSession::save`]
//! persists them (with the signal).

use setup_core::domain::shortcut::check_order;
use setup_core::{
    collect, defaults, populate, BindError, CollectError, ConfigDocument, FieldKey, FieldSet,
    ShortcutGroup,
};
use thiserror::Error;
use tracing::{info, warn};

use super::ports::{ConfigError, ConfigRepository, ReloadError, ReloadNotifier};

/// Where the session is in the edit/reset/save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Fields may differ from the stored document.
    Editing,
    /// Defaults are in memory but not yet on disk.
    Reset,
    /// The in-memory document matches what was last written.
    Persisted,
}

/// Error type for session operations that write the document.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A field could not be converted; nothing was written.
    #[error("cannot save: {0}")]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result of a successful save.
#[derive(Debug)]
pub struct SaveReport {
    /// Outcome of the reload signal that followed the save.
    pub reload: Result<(), ReloadError>,
}

impl SaveReport {
    pub fn reload_notified(&self) -> bool {
        self.reload.is_ok()
    }
}

/// Result of a reset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The user declined; nothing changed.
    Declined,
    /// Defaults replaced the document and were written to disk.
    Persisted,
}

/// One open editing session over a configuration document.
pub struct SettingsSession<R, N> {
    repository: R,
    notifier: N,
    document: ConfigDocument,
    fields: FieldSet,
    state: SessionState,
}

impl<R: ConfigRepository, N: ReloadNotifier> SettingsSession<R, N> {
    /// Loads the document and binds its fields.
    ///
    /// # Errors
    ///
    /// Propagates the repository's [`ConfigError`]; a session cannot exist
    /// without a loaded document.
    pub fn open(repository: R, notifier: N) -> Result<Self, ConfigError> {
        let document = repository.load()?;
        Ok(Self::with_document(repository, notifier, document))
    }

    /// Starts a session over an already-loaded document.
    pub fn with_document(repository: R, notifier: N, document: ConfigDocument) -> Self {
        warn_on_dangling_pattern_models(&document);
        let fields = populate(&document);
        info!(fields = fields.len(), "configuration bound to form fields");
        Self {
            repository,
            notifier,
            document,
            fields,
            state: SessionState::Editing,
        }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Edits a text, shortcut, or number field.
    ///
    /// # Errors
    ///
    /// See [`FieldSet::set_text`].
    pub fn set_text(&mut self, key: &FieldKey, text: impl Into<String>) -> Result<(), BindError> {
        self.fields.set_text(key, text)?;
        self.state = SessionState::Editing;
        Ok(())
    }

    /// Selects an option of a choice field.
    ///
    /// # Errors
    ///
    /// See [`FieldSet::select`].
    pub fn select(&mut self, key: &FieldKey, choice: &str) -> Result<(), BindError> {
        self.fields.select(key, choice)?;
        self.state = SessionState::Editing;
        Ok(())
    }

    /// Collects the fields into a new document, writes it, then signals the
    /// automation host.
    ///
    /// The in-memory document is replaced only once the write succeeded.
    /// A failed reload signal is logged and returned in the report; the save
    /// still counts.
    ///
    /// # Errors
    ///
    /// [`SessionError::Collect`] if a field does not convert (nothing is
    /// written), [`SessionError::Config`] if the write fails.
    pub fn save(&mut self) -> Result<SaveReport, SessionError> {
        let document = collect(&self.fields)?;
        warn_on_unconventional_shortcuts(&document);

        self.repository.save(&document)?;
        info!("configuration saved");

        let reload = self.notifier.notify();
        match &reload {
            Ok(()) => info!("reload signal sent"),
            Err(e) => warn!(error = %e, "reload signal failed; configuration remains saved"),
        }

        self.fields = populate(&document);
        self.document = document;
        self.state = SessionState::Persisted;
        Ok(SaveReport { reload })
    }

    /// Replaces the document with the built-in defaults when `confirmed`.
    ///
    /// A confirmed reset writes the defaults immediately but does not send
    /// the reload signal.
    ///
    /// # Errors
    ///
    /// [`SessionError::Config`] if writing the defaults fails.  The defaults
    /// stay in memory and the state stays [`SessionState::Reset`].
    pub fn reset(&mut self, confirmed: bool) -> Result<ResetOutcome, SessionError> {
        if !confirmed {
            info!("reset to default declined");
            self.state = SessionState::Editing;
            return Ok(ResetOutcome::Declined);
        }

        let document = defaults();
        self.fields = populate(&document);
        self.document = document;
        self.state = SessionState::Reset;
        info!("configuration reset to defaults in memory");

        self.repository.save(&self.document)?;
        self.state = SessionState::Persisted;
        info!("default configuration saved without reload signal");
        Ok(ResetOutcome::Persisted)
    }

    /// Asks `confirm` (typically a yes/no dialog) and resets on "yes".
    ///
    /// # Errors
    ///
    /// See [`SettingsSession::reset`].
    pub fn request_reset(
        &mut self,
        confirm: impl FnOnce() -> bool,
    ) -> Result<ResetOutcome, SessionError> {
        let confirmed = confirm();
        self.reset(confirmed)
    }
}

/// Logs each pattern whose model id is unknown; binding selects the first
/// model instead.  Returns how many were found.
fn warn_on_dangling_pattern_models(document: &ConfigDocument) -> usize {
    let dangling = document.dangling_pattern_models();
    let fallback = document.fabric.model_ids().into_iter().next();
    for (pattern, model) in &dangling {
        let field = FieldKey::PatternModel((*pattern).to_string());
        warn!(
            field = %field,
            model = %model,
            fallback = fallback.as_deref().unwrap_or("<none>"),
            "pattern model refers to an unknown model"
        );
    }
    dangling.len()
}

fn warn_on_unconventional_shortcuts(document: &ConfigDocument) {
    for group in ShortcutGroup::ALL {
        let Some(shortcuts) = document.shortcuts.group(group) else {
            continue;
        };
        for (action, tokens) in shortcuts {
            if let Err(issue) = check_order(tokens) {
                let field = FieldKey::Shortcut(group, action.clone());
                warn!(field = %field, %issue, "unconventional shortcut");
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
