//! Built-in baseline configuration used by "reset to default".
//!
//! [`defaults`] builds a brand-new [`ConfigDocument`] on every call.  There is
//! no shared static instance, so a caller that mutates the returned document
//! can never affect a later reset.

use std::collections::BTreeMap;

use super::document::{ConfigDocument, Fabric, ShortcutMap, Shortcuts};

const APPLICATIONS: &[(&str, &str)] = &[
    ("Cursor", "Cursor"),
    ("Editor", "Visual Studio Code"),
    ("Finder", "Finder"),
    ("Mail", "Mail"),
    ("Obsidian", "Obsidian"),
    ("PrimaryBrowser", "Zen Browser"),
    ("SecondaryBrowser", "Arc"),
    ("Spotify", "Spotify"),
    ("SystemSettings", "System Settings"),
    ("Terminal", "Warp"),
    ("WhatsApp", "WhatsApp"),
];

const FOLDERS: &[(&str, &str)] = &[
    ("Applications", "/Applications"),
    ("Desktop", "~/Desktop"),
    ("Documents", "~/Documents"),
    ("Downloads", "~/Downloads"),
    ("Home", "~"),
    (
        "Obsidian",
        "~/Library/Mobile Documents/iCloud~md~obsidian/Documents",
    ),
    ("School", "~/Documents/Radboud"),
];

const HYPER: &[&str] = &["ctrl", "alt", "cmd"];

const APP_SHORTCUT_KEYS: &[(&str, &str)] = &[
    ("Cursor", "C"),
    ("Editor", "V"),
    ("Finder", "F"),
    ("Mail", "M"),
    ("Obsidian", "O"),
    ("PrimaryBrowser", "Z"),
    ("SecondaryBrowser", "A"),
    ("Spotify", "S"),
    ("SystemSettings", "P"),
    ("Terminal", "T"),
    ("WhatsApp", "W"),
];

const FOLDER_SHORTCUT_KEYS: &[(&str, &str)] = &[
    ("applications", "A"),
    ("desktop", "D"),
    ("documents", "F"),
    ("downloads", "L"),
    ("home", "H"),
    ("obsidian", "O"),
    ("school", "R"),
];

const GENERAL_SHORTCUTS: &[(&str, &[&str])] = &[
    ("copyUrl", &["cmd", "shift", "C"]),
    ("setupWizard", &["ctrl", "alt", "cmd", "shift", "S"]),
];

const WINDOW_SHORTCUTS: &[(&str, &[&str])] = &[
    ("bottomHalf", &["alt", "S"]),
    ("center", &["alt", "C"]),
    ("fullScreen", &["alt", "F"]),
    ("leftHalf", &["alt", "A"]),
    ("leftScreen", &["ctrl", "alt", "A"]),
    ("loadLayout", &["alt", "cmd", "L"]),
    ("nextWindow", &["alt", "E"]),
    ("previousWindow", &["alt", "Q"]),
    ("rightHalf", &["alt", "D"]),
    ("rightScreen", &["ctrl", "alt", "D"]),
    ("saveLayout", &["alt", "cmd", "S"]),
    ("topHalf", &["alt", "W"]),
];

const MODELS: &[(&str, &str)] = &[
    ("default", "gpt-4o-mini"),
    ("model1", "gpt-4o"),
    ("model2", "llama-3.2-90b-text-preview"),
];

const PATTERN_MODELS: &[(&str, &str)] = &[
    ("correct", "default"),
    ("general", "model2"),
    ("improve", "default"),
    ("latex", "default"),
    ("latexPlus", "default"),
    ("noteName", "default"),
    ("overview", "default"),
    ("translate", "default"),
];

/// Returns a fresh copy of the built-in default configuration.
pub fn defaults() -> ConfigDocument {
    ConfigDocument {
        applications: string_map(APPLICATIONS),
        fabric: Fabric {
            models: Some(string_map(MODELS)),
            pattern_models: Some(string_map(PATTERN_MODELS)),
        },
        folders: string_map(FOLDERS),
        shortcuts: Shortcuts {
            app_shortcuts: Some(chords(HYPER, APP_SHORTCUT_KEYS)),
            folder_shortcuts: Some(chords(&["cmd", "shift"], FOLDER_SHORTCUT_KEYS)),
            general: Some(shortcut_map(GENERAL_SHORTCUTS)),
            window_management: Some(shortcut_map(WINDOW_SHORTCUTS)),
        },
        window_management: BTreeMap::from([("animationDuration".to_string(), 0.0)]),
        extra: BTreeMap::new(),
    }
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Builds shortcuts that share one modifier prefix and differ in the final key.
fn chords(modifiers: &[&str], keys: &[(&str, &str)]) -> ShortcutMap {
    keys.iter()
        .map(|(action, key)| {
            let tokens = modifiers
                .iter()
                .chain(std::iter::once(key))
                .map(|t| t.to_string())
                .collect();
            (action.to_string(), tokens)
        })
        .collect()
}

fn shortcut_map(entries: &[(&str, &[&str])]) -> ShortcutMap {
    entries
        .iter()
        .map(|(action, tokens)| {
            (
                action.to_string(),
                tokens.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect()
}
