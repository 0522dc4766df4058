//! Field identity and field state.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::document::{FabricGroup, Section, ShortcutGroup};

/// Typed address of one editable leaf value in the document.
///
/// The derived ordering follows tab order (folders, applications, shortcuts,
/// fabric models, pattern models, window settings), then group, then key,
/// so a `BTreeMap<FieldKey, _>` iterates in display order.
///
/// `Display` renders the qualified name, e.g. `shortcuts.appShortcuts.Cursor`,
/// and `FromStr` parses it back.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Folder(String),
    Application(String),
    Shortcut(ShortcutGroup, String),
    Model(String),
    PatternModel(String),
    WindowSetting(String),
}

impl FieldKey {
    pub fn section(&self) -> Section {
        match self {
            FieldKey::Folder(_) => Section::Folders,
            FieldKey::Application(_) => Section::Applications,
            FieldKey::Shortcut(..) => Section::Shortcuts,
            FieldKey::Model(_) | FieldKey::PatternModel(_) => Section::Fabric,
            FieldKey::WindowSetting(_) => Section::WindowManagement,
        }
    }

    /// The leaf key, used as the form row label.
    pub fn name(&self) -> &str {
        match self {
            FieldKey::Folder(k)
            | FieldKey::Application(k)
            | FieldKey::Shortcut(_, k)
            | FieldKey::Model(k)
            | FieldKey::PatternModel(k)
            | FieldKey::WindowSetting(k) => k,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Shortcut(group, key) => {
                write!(f, "{}.{}.{key}", Section::Shortcuts, group.json_key())
            }
            FieldKey::Model(key) => {
                write!(f, "{}.{}.{key}", Section::Fabric, FabricGroup::Models.json_key())
            }
            FieldKey::PatternModel(key) => write!(
                f,
                "{}.{}.{key}",
                Section::Fabric,
                FabricGroup::PatternModels.json_key()
            ),
            other => write!(f, "{}.{}", other.section(), other.name()),
        }
    }
}

/// A qualified field name that does not address any bindable value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid field name '{0}': expected section.key or section.group.key")]
pub struct ParseFieldKeyError(pub String);

impl FromStr for FieldKey {
    type Err = ParseFieldKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseFieldKeyError(s.to_string());
        let (section, rest) = s.split_once('.').ok_or_else(invalid)?;
        if rest.is_empty() {
            return Err(invalid());
        }
        let key = match section {
            "folders" => FieldKey::Folder(rest.to_string()),
            "applications" => FieldKey::Application(rest.to_string()),
            "windowManagement" => FieldKey::WindowSetting(rest.to_string()),
            "shortcuts" => {
                let (group, key) = rest.split_once('.').ok_or_else(invalid)?;
                let group = ShortcutGroup::from_json_key(group).ok_or_else(invalid)?;
                FieldKey::Shortcut(group, key.to_string())
            }
            "fabric" => {
                let (group, key) = rest.split_once('.').ok_or_else(invalid)?;
                match FabricGroup::from_json_key(group).ok_or_else(invalid)? {
                    FabricGroup::Models => FieldKey::Model(key.to_string()),
                    FabricGroup::PatternModels => FieldKey::PatternModel(key.to_string()),
                }
            }
            _ => return Err(invalid()),
        };
        if key.name().is_empty() {
            return Err(invalid());
        }
        Ok(key)
    }
}

/// The kind of input widget a field is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text copied verbatim (paths, application names, model names).
    Text,
    /// Comma-joined shortcut tokens.
    Shortcut,
    /// Decimal text that must parse as a float when collected.
    Number,
    /// A closed selection list.
    Choice,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldKind::Text => "text",
            FieldKind::Shortcut => "shortcut",
            FieldKind::Number => "number",
            FieldKind::Choice => "choice",
        })
    }
}

/// Current state of one editable field.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    Shortcut(String),
    Number(String),
    Choice {
        options: Vec<String>,
        selected: Option<String>,
    },
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Text(_) => FieldKind::Text,
            Field::Shortcut(_) => FieldKind::Shortcut,
            Field::Number(_) => FieldKind::Number,
            Field::Choice { .. } => FieldKind::Choice,
        }
    }

    /// The text a form would show for this field.  An unselected choice
    /// displays as empty text.
    pub fn text(&self) -> &str {
        match self {
            Field::Text(t) | Field::Shortcut(t) | Field::Number(t) => t,
            Field::Choice { selected, .. } => selected.as_deref().unwrap_or(""),
        }
    }

    /// Options of a choice field; empty for every other kind.
    pub fn options(&self) -> &[String] {
        match self {
            Field::Choice { options, .. } => options,
            _ => &[],
        }
    }
}
