//! Command bridge: exposes the settings session to a form front end.
//!
//! Every command takes the shared [`AppState`] and returns a
//! [`CommandResult`], so a front end (the headless CLI in `main.rs` today, a
//! tabbed window tomorrow) never handles Rust error types directly.
//!
//! # Data Transfer Objects (DTOs)
//!
//! The session works with typed values (`FieldKey`, `Field`, `Section`).
//! DTOs flatten these into plain strings and vectors that serialize to JSON:
//!
//! - [`TabDto`] – one tab, its heading groups, and their fields.
//! - [`FieldDto`] – one row: qualified name, label, kind, text, options.
//! - [`FieldUpdateDto`] – one edit coming back from the form.
//! - [`SaveReportDto`] – whether the reload signal went out.
//!
//! # `CommandResult<T>` wrapper
//!
//! `{ success: bool, data: T | null, error: string | null }` for every
//! command, so the caller can always check `success` first.

use serde::{Deserialize, Serialize};
use setup_core::{Field, FieldKey, FieldKind, Section};

use crate::application::ports::{ConfigRepository, ReloadNotifier};
use crate::application::session::{ResetOutcome, SettingsSession};
use crate::infrastructure::reload::SentinelReloadSignal;
use crate::infrastructure::storage::config::JsonConfigStore;

// ── Shared application state ──────────────────────────────────────────────────

/// State shared by all commands.
///
/// The wizard is single-threaded: commands run one at a time in response to
/// user actions, so the session is held directly rather than behind a lock.
pub struct AppState<R = JsonConfigStore, N = SentinelReloadSignal> {
    pub session: SettingsSession<R, N>,
}

impl<R: ConfigRepository, N: ReloadNotifier> AppState<R, N> {
    pub fn new(session: SettingsSession<R, N>) -> Self {
        Self { session }
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// One row of a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDto {
    /// Qualified name, e.g. `shortcuts.appShortcuts.Cursor`.
    pub name: String,
    /// Row label (the leaf key).
    pub label: String,
    /// `text`, `shortcut`, `number`, or `choice`.
    pub kind: String,
    pub value: String,
    /// Options of a choice field; empty otherwise.
    pub options: Vec<String>,
}

impl FieldDto {
    fn new(key: &FieldKey, field: &Field) -> Self {
        Self {
            name: key.to_string(),
            label: key.name().to_string(),
            kind: field.kind().to_string(),
            value: field.text().to_string(),
            options: field.options().to_vec(),
        }
    }
}

/// Fields under one bold heading on a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDto {
    pub heading: Option<String>,
    pub fields: Vec<FieldDto>,
}

/// One tab of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabDto {
    /// JSON key of the section, e.g. `windowManagement`.
    pub section: String,
    /// Tab label, e.g. `Window Management`.
    pub label: String,
    pub groups: Vec<GroupDto>,
}

/// An edit sent by the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldUpdateDto {
    pub name: String,
    pub value: String,
}

/// Outcome of a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReportDto {
    pub reload_notified: bool,
    pub reload_error: Option<String>,
}

/// Unified response wrapper used by all commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns every tab in display order.
pub fn get_tabs<R: ConfigRepository, N: ReloadNotifier>(
    state: &AppState<R, N>,
) -> CommandResult<Vec<TabDto>> {
    let tabs = Section::ALL
        .into_iter()
        .map(|section| build_tab(state, section))
        .collect();
    CommandResult::ok(tabs)
}

/// Returns one tab, addressed by JSON key or label (`windowManagement`,
/// `window-management`).
pub fn get_tab<R: ConfigRepository, N: ReloadNotifier>(
    state: &AppState<R, N>,
    section: &str,
) -> CommandResult<TabDto> {
    match section.parse::<Section>() {
        Ok(section) => CommandResult::ok(build_tab(state, section)),
        Err(e) => CommandResult::err(e),
    }
}

/// Applies one edit.  Choice fields are selected; every other kind takes the
/// value as text.
pub fn update_field<R: ConfigRepository, N: ReloadNotifier>(
    state: &mut AppState<R, N>,
    update: FieldUpdateDto,
) -> CommandResult<()> {
    let key = match update.name.parse::<FieldKey>() {
        Ok(key) => key,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let is_choice = state
        .session
        .fields()
        .get(&key)
        .is_some_and(|f| f.kind() == FieldKind::Choice);
    let result = if is_choice {
        state.session.select(&key, &update.value)
    } else {
        state.session.set_text(&key, update.value)
    };
    match result {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Applies edits in order, stopping at the first one that fails.
pub fn update_fields<R: ConfigRepository, N: ReloadNotifier>(
    state: &mut AppState<R, N>,
    updates: Vec<FieldUpdateDto>,
) -> CommandResult<()> {
    for update in updates {
        let result = update_field(state, update);
        if !result.success {
            return result;
        }
    }
    CommandResult::ok(())
}

/// Collects, writes, and signals a reload.
pub fn save_configuration<R: ConfigRepository, N: ReloadNotifier>(
    state: &mut AppState<R, N>,
) -> CommandResult<SaveReportDto> {
    match state.session.save() {
        Ok(report) => CommandResult::ok(SaveReportDto {
            reload_notified: report.reload_notified(),
            reload_error: report.reload.err().map(|e| e.to_string()),
        }),
        Err(e) => CommandResult::err(format!("failed to save configuration: {e}")),
    }
}

/// Resets to defaults when `confirmed`.  Returns `true` if defaults were
/// written, `false` if the user declined.
pub fn reset_to_default<R: ConfigRepository, N: ReloadNotifier>(
    state: &mut AppState<R, N>,
    confirmed: bool,
) -> CommandResult<bool> {
    match state.session.reset(confirmed) {
        Ok(outcome) => CommandResult::ok(outcome == ResetOutcome::Persisted),
        Err(e) => CommandResult::err(format!("failed to reset configuration: {e}")),
    }
}

fn build_tab<R: ConfigRepository, N: ReloadNotifier>(
    state: &AppState<R, N>,
    section: Section,
) -> TabDto {
    let mut groups: Vec<GroupDto> = Vec::new();
    for (key, field) in state.session.fields().fields_in(section) {
        let heading = group_heading(key);
        match groups.last_mut() {
            Some(group) if group.heading.as_deref() == heading => {
                group.fields.push(FieldDto::new(key, field));
            }
            _ => groups.push(GroupDto {
                heading: heading.map(str::to_string),
                fields: vec![FieldDto::new(key, field)],
            }),
        }
    }
    TabDto {
        section: section.json_key().to_string(),
        label: section.label().to_string(),
        groups,
    }
}

fn group_heading(key: &FieldKey) -> Option<&'static str> {
    match key {
        FieldKey::Shortcut(group, _) => Some(group.heading()),
        FieldKey::Model(_) => Some("Models"),
        FieldKey::PatternModel(_) => Some("Pattern Models"),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
