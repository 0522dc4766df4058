//! Section binder: document ⇄ editable fields.
//!
//! [`populate`] flattens a [`ConfigDocument`] into a [`FieldSet`] with one
//! field per leaf value, and [`collect`] rebuilds a document from the
//! (possibly edited) field set.
//!
//! # Text representation
//!
//! | Document value              | Field kind | Text                          |
//! |-----------------------------|------------|-------------------------------|
//! | folder path, app/model name | `Text`     | verbatim                      |
//! | shortcut token list         | `Shortcut` | tokens joined with `,`        |
//! | window-management number    | `Number`   | locale-free decimal (`0.0`)   |
//! | pattern → model id          | `Choice`   | one of the `models` keys      |
//!
//! # Round-trip
//!
//! `collect(&populate(&doc)) == Ok(doc)` for every document whose pattern
//! models all name a known model, except that:
//!
//! - numbers come back in canonical form (`1e0` → `1.0`), and
//! - application keys that differ from an earlier key only by case are not
//!   bound, so they are dropped from the collected document.
//!
//! `collect` starts from the document the field set was populated from, so
//! sub-sections the file omitted stay omitted and unknown top-level keys are
//! kept.

mod error;
mod field;

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::domain::document::{ConfigDocument, FabricGroup, Section, ShortcutGroup};
use crate::domain::shortcut::{join_tokens, split_tokens};

pub use error::{BindError, CollectError};
pub use field::{Field, FieldKey, FieldKind, ParseFieldKeyError};

/// Editable fields bound to a document snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    base: ConfigDocument,
    fields: BTreeMap<FieldKey, Field>,
}

impl FieldSet {
    /// The document this field set was populated from.
    pub fn base(&self) -> &ConfigDocument {
        &self.base
    }

    pub fn get(&self, key: &FieldKey) -> Option<&Field> {
        self.fields.get(key)
    }

    /// All fields in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &Field)> {
        self.fields.iter()
    }

    /// The fields shown on one tab, in display order.
    pub fn fields_in(&self, section: Section) -> impl Iterator<Item = (&FieldKey, &Field)> {
        self.fields
            .iter()
            .filter(move |(key, _)| key.section() == section)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Replaces the text of a text, shortcut, or number field.
    ///
    /// Number text is not validated here; that happens in [`collect`], so a
    /// user can pass through invalid intermediate states while typing.
    ///
    /// # Errors
    ///
    /// [`BindError::UnknownField`] if no such field is bound, and
    /// [`BindError::WrongKind`] for choice fields.
    pub fn set_text(&mut self, key: &FieldKey, text: impl Into<String>) -> Result<(), BindError> {
        match self.field_mut(key)? {
            Field::Text(t) | Field::Shortcut(t) | Field::Number(t) => {
                *t = text.into();
                Ok(())
            }
            Field::Choice { .. } => Err(BindError::WrongKind {
                field: key.clone(),
                kind: FieldKind::Choice,
            }),
        }
    }

    /// Selects one option of a choice field.
    ///
    /// # Errors
    ///
    /// [`BindError::UnknownField`], [`BindError::WrongKind`] for non-choice
    /// fields, and [`BindError::InvalidChoice`] if `choice` is not an option.
    pub fn select(&mut self, key: &FieldKey, choice: &str) -> Result<(), BindError> {
        match self.field_mut(key)? {
            Field::Choice { options, selected } => {
                if !options.iter().any(|o| o == choice) {
                    return Err(BindError::InvalidChoice {
                        field: key.clone(),
                        choice: choice.to_string(),
                    });
                }
                *selected = Some(choice.to_string());
                Ok(())
            }
            other => Err(BindError::WrongKind {
                field: key.clone(),
                kind: other.kind(),
            }),
        }
    }

    fn field_mut(&mut self, key: &FieldKey) -> Result<&mut Field, BindError> {
        self.fields
            .get_mut(key)
            .ok_or_else(|| BindError::UnknownField(key.clone()))
    }
}

/// Builds the editable fields for every section of `document`.
pub fn populate(document: &ConfigDocument) -> FieldSet {
    let mut fields = BTreeMap::new();

    for (folder, path) in &document.folders {
        fields.insert(FieldKey::Folder(folder.clone()), Field::Text(path.clone()));
    }

    // Case-insensitive dedupe: BTreeMap order puts "Editor" before "editor",
    // so the first spelling in byte order wins.
    let mut seen_apps = HashSet::new();
    for (app, name) in &document.applications {
        if !seen_apps.insert(app.to_lowercase()) {
            debug!(application = %app, "skipping application key that differs only by case");
            continue;
        }
        fields.insert(FieldKey::Application(app.clone()), Field::Text(name.clone()));
    }

    for group in ShortcutGroup::ALL {
        let Some(shortcuts) = document.shortcuts.group(group) else {
            continue;
        };
        for (action, tokens) in shortcuts {
            fields.insert(
                FieldKey::Shortcut(group, action.clone()),
                Field::Shortcut(join_tokens(tokens)),
            );
        }
    }

    if let Some(models) = document.fabric.group(FabricGroup::Models) {
        for (model, name) in models {
            fields.insert(FieldKey::Model(model.clone()), Field::Text(name.clone()));
        }
    }

    if let Some(patterns) = document.fabric.group(FabricGroup::PatternModels) {
        let options = document.fabric.model_ids();
        for (pattern, model) in patterns {
            let selected = if options.contains(model) {
                Some(model.clone())
            } else {
                debug!(pattern = %pattern, model = %model, "pattern model not in model list; selecting first option");
                options.first().cloned()
            };
            fields.insert(
                FieldKey::PatternModel(pattern.clone()),
                Field::Choice {
                    options: options.clone(),
                    selected,
                },
            );
        }
    }

    for (setting, value) in &document.window_management {
        fields.insert(
            FieldKey::WindowSetting(setting.clone()),
            Field::Number(format_number(*value)),
        );
    }

    FieldSet {
        base: document.clone(),
        fields,
    }
}

/// Rebuilds a document from the current field state.
///
/// # Errors
///
/// Returns the first [`CollectError`] in display order: a number field whose
/// text does not parse as a finite float, or a choice field with nothing
/// selected.
pub fn collect(field_set: &FieldSet) -> Result<ConfigDocument, CollectError> {
    let mut document = field_set.base.clone();
    // Applications are rebuilt from the bound fields only.
    document.applications.clear();

    for (key, field) in &field_set.fields {
        match key {
            FieldKey::Folder(folder) => {
                document
                    .folders
                    .insert(folder.clone(), field.text().to_string());
            }
            FieldKey::Application(app) => {
                document
                    .applications
                    .insert(app.clone(), field.text().to_string());
            }
            FieldKey::Shortcut(group, action) => {
                document
                    .shortcuts
                    .group_mut(*group)
                    .get_or_insert_with(BTreeMap::new)
                    .insert(action.clone(), split_tokens(field.text()));
            }
            FieldKey::Model(model) => {
                document
                    .fabric
                    .group_mut(FabricGroup::Models)
                    .get_or_insert_with(BTreeMap::new)
                    .insert(model.clone(), field.text().to_string());
            }
            FieldKey::PatternModel(pattern) => {
                let Field::Choice {
                    selected: Some(model),
                    ..
                } = field
                else {
                    return Err(CollectError::NoSelection { field: key.clone() });
                };
                document
                    .fabric
                    .group_mut(FabricGroup::PatternModels)
                    .get_or_insert_with(BTreeMap::new)
                    .insert(pattern.clone(), model.clone());
            }
            FieldKey::WindowSetting(setting) => {
                let value =
                    parse_number(field.text()).ok_or_else(|| CollectError::InvalidNumber {
                        field: key.clone(),
                        text: field.text().to_string(),
                    })?;
                document.window_management.insert(setting.clone(), value);
            }
        }
    }

    Ok(document)
}

/// Formats a number the way it is shown in a form: shortest round-trip
/// decimal, with `.0` kept on integral values.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Parses number text, ignoring surrounding whitespace.  JSON cannot carry
/// NaN or infinity, so those are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
