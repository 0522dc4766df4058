//! The configuration document consumed by the automation host.
//!
//! ```json
//! {
//!   "applications": { "Editor": "Visual Studio Code" },
//!   "fabric": {
//!     "models": { "default": "gpt-4o-mini" },
//!     "patternModels": { "general": "default" }
//!   },
//!   "folders": { "Desktop": "~/Desktop" },
//!   "shortcuts": {
//!     "appShortcuts": { "Editor": ["ctrl", "alt", "cmd", "V"] },
//!     "folderShortcuts": {},
//!     "general": {},
//!     "windowManagement": {}
//!   },
//!   "windowManagement": { "animationDuration": 0.0 }
//! }
//! ```
//!
//! All five top-level sections are required.  The sub-sections inside
//! `shortcuts` and `fabric` are optional: a file that omits one loads fine and
//! is written back without it.  Unknown top-level keys are carried through
//! untouched so the wizard never drops settings it does not know about.
//!
//! Every mapping is a `BTreeMap`, which keeps keys sorted for stable output.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Maps an action key to its ordered modifier/key tokens.
pub type ShortcutMap = BTreeMap<String, Vec<String>>;

/// Error type for documents that parse as JSON but have the wrong shape.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The JSON root is an array, string, number, or `null`.
    #[error("configuration root must be a JSON object")]
    NotAnObject,

    /// One of the five required top-level sections is absent.
    #[error("configuration is missing the `{0}` section")]
    MissingSection(Section),

    /// A section is present but a value has the wrong type.
    #[error("configuration does not match the expected shape: {0}")]
    Schema(#[from] serde_json::Error),
}

// ── Section identifiers ───────────────────────────────────────────────────────

/// A top-level configuration subtree, listed in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Folders,
    Applications,
    Shortcuts,
    Fabric,
    WindowManagement,
}

impl Section {
    /// Every section in the order the form shows its tabs.
    pub const ALL: [Section; 5] = [
        Section::Folders,
        Section::Applications,
        Section::Shortcuts,
        Section::Fabric,
        Section::WindowManagement,
    ];

    /// The JSON object key for this section.
    pub fn json_key(self) -> &'static str {
        match self {
            Section::Folders => "folders",
            Section::Applications => "applications",
            Section::Shortcuts => "shortcuts",
            Section::Fabric => "fabric",
            Section::WindowManagement => "windowManagement",
        }
    }

    /// Human-readable tab label.
    pub fn label(self) -> &'static str {
        match self {
            Section::Folders => "Folders",
            Section::Applications => "Applications",
            Section::Shortcuts => "Shortcuts",
            Section::Fabric => "Fabric",
            Section::WindowManagement => "Window Management",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_key())
    }
}

impl FromStr for Section {
    type Err = String;

    /// Accepts either the JSON key (`windowManagement`) or, case-insensitively,
    /// the tab label without spaces (`window-management`, `WindowManagement`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        Section::ALL
            .into_iter()
            .find(|section| section.json_key().to_lowercase() == normalized)
            .ok_or_else(|| format!("unknown section '{s}'"))
    }
}

/// One of the four named shortcut groups, in the order the form lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShortcutGroup {
    AppShortcuts,
    FolderShortcuts,
    WindowManagement,
    General,
}

impl ShortcutGroup {
    pub const ALL: [ShortcutGroup; 4] = [
        ShortcutGroup::AppShortcuts,
        ShortcutGroup::FolderShortcuts,
        ShortcutGroup::WindowManagement,
        ShortcutGroup::General,
    ];

    pub fn json_key(self) -> &'static str {
        match self {
            ShortcutGroup::AppShortcuts => "appShortcuts",
            ShortcutGroup::FolderShortcuts => "folderShortcuts",
            ShortcutGroup::WindowManagement => "windowManagement",
            ShortcutGroup::General => "general",
        }
    }

    /// Heading shown above the group on the shortcuts tab.
    pub fn heading(self) -> &'static str {
        match self {
            ShortcutGroup::AppShortcuts => "Application Shortcuts",
            ShortcutGroup::FolderShortcuts => "Folder Shortcuts",
            ShortcutGroup::WindowManagement => "Window Management Shortcuts",
            ShortcutGroup::General => "General Shortcuts",
        }
    }

    pub fn from_json_key(key: &str) -> Option<Self> {
        ShortcutGroup::ALL.into_iter().find(|g| g.json_key() == key)
    }
}

/// One of the two sub-mappings of the `fabric` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FabricGroup {
    Models,
    PatternModels,
}

impl FabricGroup {
    pub fn json_key(self) -> &'static str {
        match self {
            FabricGroup::Models => "models",
            FabricGroup::PatternModels => "patternModels",
        }
    }

    pub fn from_json_key(key: &str) -> Option<Self> {
        match key {
            "models" => Some(FabricGroup::Models),
            "patternModels" => Some(FabricGroup::PatternModels),
            _ => None,
        }
    }
}

// ── Document tree ─────────────────────────────────────────────────────────────

/// The whole configuration file.
///
/// Fields are declared alphabetically by JSON key, but sorted output is
/// guaranteed by the store serializing through `serde_json::Value`, whose
/// object map is ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Application key → display/launch name.
    pub applications: BTreeMap<String, String>,
    pub fabric: Fabric,
    /// Folder key → path, possibly `~`-relative.  Never expanded here.
    pub folders: BTreeMap<String, String>,
    pub shortcuts: Shortcuts,
    /// Setting name → numeric value (e.g. `animationDuration`).
    #[serde(rename = "windowManagement")]
    pub window_management: BTreeMap<String, f64>,
    /// Top-level keys the wizard does not edit.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The `shortcuts` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shortcuts {
    #[serde(rename = "appShortcuts", default, skip_serializing_if = "Option::is_none")]
    pub app_shortcuts: Option<ShortcutMap>,
    #[serde(rename = "folderShortcuts", default, skip_serializing_if = "Option::is_none")]
    pub folder_shortcuts: Option<ShortcutMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<ShortcutMap>,
    #[serde(rename = "windowManagement", default, skip_serializing_if = "Option::is_none")]
    pub window_management: Option<ShortcutMap>,
}

impl Shortcuts {
    /// Returns the mapping for `group`, or `None` if the file omitted it.
    pub fn group(&self, group: ShortcutGroup) -> Option<&ShortcutMap> {
        match group {
            ShortcutGroup::AppShortcuts => self.app_shortcuts.as_ref(),
            ShortcutGroup::FolderShortcuts => self.folder_shortcuts.as_ref(),
            ShortcutGroup::WindowManagement => self.window_management.as_ref(),
            ShortcutGroup::General => self.general.as_ref(),
        }
    }

    /// Mutable slot for `group`; callers decide whether to create it.
    pub fn group_mut(&mut self, group: ShortcutGroup) -> &mut Option<ShortcutMap> {
        match group {
            ShortcutGroup::AppShortcuts => &mut self.app_shortcuts,
            ShortcutGroup::FolderShortcuts => &mut self.folder_shortcuts,
            ShortcutGroup::WindowManagement => &mut self.window_management,
            ShortcutGroup::General => &mut self.general,
        }
    }
}

/// The `fabric` section: AI model names and which model each pattern uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fabric {
    /// Model id → model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<BTreeMap<String, String>>,
    /// Pattern name → model id (a key of `models`).
    #[serde(rename = "patternModels", default, skip_serializing_if = "Option::is_none")]
    pub pattern_models: Option<BTreeMap<String, String>>,
}

impl Fabric {
    pub fn group(&self, group: FabricGroup) -> Option<&BTreeMap<String, String>> {
        match group {
            FabricGroup::Models => self.models.as_ref(),
            FabricGroup::PatternModels => self.pattern_models.as_ref(),
        }
    }

    pub fn group_mut(&mut self, group: FabricGroup) -> &mut Option<BTreeMap<String, String>> {
        match group {
            FabricGroup::Models => &mut self.models,
            FabricGroup::PatternModels => &mut self.pattern_models,
        }
    }

    /// Model ids a pattern may be assigned to, in sorted order.
    pub fn model_ids(&self) -> Vec<String> {
        self.models
            .as_ref()
            .map(|models| models.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl ConfigDocument {
    /// Builds a document from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotAnObject`] for a non-object root,
    /// [`DocumentError::MissingSection`] naming the first absent top-level
    /// section, and [`DocumentError::Schema`] for type mismatches.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let missing = {
            let object = value.as_object().ok_or(DocumentError::NotAnObject)?;
            Section::ALL
                .into_iter()
                .find(|section| !object.contains_key(section.json_key()))
        };
        if let Some(section) = missing {
            return Err(DocumentError::MissingSection(section));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Converts the document to a JSON value with every object key sorted.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Pattern assignments whose model id is not a key of `fabric.models`.
    pub fn dangling_pattern_models(&self) -> Vec<(&str, &str)> {
        let Some(patterns) = self.fabric.pattern_models.as_ref() else {
            return Vec::new();
        };
        patterns
            .iter()
            .filter(|(_, model)| {
                !self
                    .fabric
                    .models
                    .as_ref()
                    .is_some_and(|models| models.contains_key(model.as_str()))
            })
            .map(|(pattern, model)| (pattern.as_str(), model.as_str()))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
