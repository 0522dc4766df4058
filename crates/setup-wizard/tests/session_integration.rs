//! End-to-end tests: a real JSON file and a real reload marker in a temp dir.

use std::fs;
use std::path::{Path, PathBuf};

use setup_core::{defaults, FieldKey};
use setup_wizard::application::ports::ConfigError;
use setup_wizard::application::session::{
    ResetOutcome, SessionError, SessionState, SettingsSession,
};
use setup_wizard::infrastructure::reload::{SentinelReloadSignal, RELOAD_MARKER_FILE_NAME};
use setup_wizard::infrastructure::storage::config::{
    load_config, render_document, save_config, JsonConfigStore, CONFIG_FILE_NAME,
};
use setup_wizard::infrastructure::ui_bridge::{
    save_configuration, update_field, AppState, FieldUpdateDto,
};
use uuid::Uuid;

type FileSession = SettingsSession<JsonConfigStore, SentinelReloadSignal>;

/// A `~/.hammerspoon`-like directory seeded with the default configuration.
struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("setup_wizard_it_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        save_config(&dir.join(CONFIG_FILE_NAME), &defaults()).unwrap();
        Self { dir }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    fn marker_path(&self) -> PathBuf {
        self.dir.join(RELOAD_MARKER_FILE_NAME)
    }

    fn open(&self) -> FileSession {
        SettingsSession::open(
            JsonConfigStore::new(self.config_path()),
            SentinelReloadSignal::new(self.marker_path()),
        )
        .expect("open session")
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.dir).ok();
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_edited_application_survives_save_and_reload() {
    // Arrange
    let fx = Fixture::new();
    let mut session = fx.open();
    let editor = FieldKey::Application("Editor".to_string());
    assert_eq!(session.fields().get(&editor).unwrap().text(), "Visual Studio Code");

    // Act
    session.set_text(&editor, "Sublime Text").unwrap();
    let report = session.save().expect("save");

    // Assert
    assert!(report.reload_notified());
    let reloaded = load_config(&fx.config_path()).unwrap();
    assert_eq!(reloaded.applications["Editor"], "Sublime Text");
    assert_eq!(read(&fx.marker_path()), r#"{"reload":true}"#);
}

#[test]
fn test_selected_pattern_model_is_saved() {
    let fx = Fixture::new();
    let mut session = fx.open();

    session
        .select(&FieldKey::PatternModel("general".to_string()), "model1")
        .unwrap();
    session.save().unwrap();

    let reloaded = load_config(&fx.config_path()).unwrap();
    let pattern_models = reloaded.fabric.pattern_models.as_ref().unwrap();
    assert_eq!(pattern_models["general"], "model1");
}

#[test]
fn test_shortcut_edit_is_split_on_commas() {
    let fx = Fixture::new();
    let mut session = fx.open();
    let key = FieldKey::Shortcut(setup_core::ShortcutGroup::General, "copyUrl".to_string());

    session.set_text(&key, "cmd,alt,U").unwrap();
    session.save().unwrap();

    let reloaded = load_config(&fx.config_path()).unwrap();
    assert_eq!(
        reloaded.shortcuts.general.as_ref().unwrap()["copyUrl"],
        vec!["cmd", "alt", "U"]
    );
}

#[test]
fn test_invalid_number_leaves_file_and_marker_untouched() {
    // Arrange
    let fx = Fixture::new();
    let before = read(&fx.config_path());
    let mut session = fx.open();
    session
        .set_text(&FieldKey::WindowSetting("animationDuration".to_string()), "abc")
        .unwrap();

    // Act
    let result = session.save();

    // Assert
    assert!(matches!(result, Err(SessionError::Collect(_))));
    assert_eq!(read(&fx.config_path()), before);
    assert!(!fx.marker_path().exists());
}

#[test]
fn test_save_into_missing_directory_keeps_previous_content() {
    // Arrange: the session loaded fine, then the directory vanished.
    let fx = Fixture::new();
    let mut session = fx.open();
    let before = read(&fx.config_path());
    let moved = fx.dir.with_file_name(format!(
        "{}_moved",
        fx.dir.file_name().unwrap().to_string_lossy()
    ));
    fs::rename(&fx.dir, &moved).unwrap();
    session
        .set_text(&FieldKey::Application("Editor".to_string()), "Helix")
        .unwrap();

    // Act
    let result = session.save();

    // Assert
    assert!(matches!(
        result,
        Err(SessionError::Config(ConfigError::Io { .. }))
    ));
    assert_eq!(read(&moved.join(CONFIG_FILE_NAME)), before);
    assert_eq!(session.document(), &defaults());

    // Cleanup
    fs::remove_dir_all(&moved).ok();
}

#[test]
fn test_confirmed_reset_writes_defaults_without_marker() {
    // Arrange
    let fx = Fixture::new();
    let mut custom = defaults();
    custom.applications.insert("Editor".to_string(), "Zed".to_string());
    custom.folders.remove("School");
    save_config(&fx.config_path(), &custom).unwrap();
    let mut session = fx.open();

    // Act
    let outcome = session.reset(true).unwrap();

    // Assert
    assert_eq!(outcome, ResetOutcome::Persisted);
    assert_eq!(session.state(), SessionState::Persisted);
    assert_eq!(
        read(&fx.config_path()),
        render_document(&defaults()).unwrap()
    );
    assert!(!fx.marker_path().exists());
}

#[test]
fn test_declined_reset_leaves_file_untouched() {
    let fx = Fixture::new();
    let mut custom = defaults();
    custom.folders.insert("Music".to_string(), "~/Music".to_string());
    save_config(&fx.config_path(), &custom).unwrap();
    let before = read(&fx.config_path());
    let mut session = fx.open();

    let outcome = session.request_reset(|| false).unwrap();

    assert_eq!(outcome, ResetOutcome::Declined);
    assert_eq!(read(&fx.config_path()), before);
}

#[test]
fn test_unchanged_save_is_byte_identical() {
    let fx = Fixture::new();
    let before = fs::read(fx.config_path()).unwrap();
    let mut session = fx.open();

    session.save().unwrap();

    assert_eq!(fs::read(fx.config_path()).unwrap(), before);
}

#[test]
fn test_unknown_top_level_keys_survive_a_save() {
    // Arrange
    let fx = Fixture::new();
    let mut value = defaults().to_value().unwrap();
    value["experimental"] = serde_json::json!({ "beta": true });
    fs::write(fx.config_path(), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    let mut session = fx.open();

    // Act
    session
        .set_text(&FieldKey::Folder("Home".to_string()), "/Users/me")
        .unwrap();
    session.save().unwrap();

    // Assert
    let saved: serde_json::Value = serde_json::from_str(&read(&fx.config_path())).unwrap();
    assert_eq!(saved["experimental"], serde_json::json!({ "beta": true }));
    assert_eq!(saved["folders"]["Home"], "/Users/me");
}

#[test]
fn test_bridge_commands_drive_a_file_backed_session() {
    // Arrange
    let fx = Fixture::new();
    let mut state = AppState::new(fx.open());

    // Act
    let edit = update_field(
        &mut state,
        FieldUpdateDto {
            name: "windowManagement.animationDuration".to_string(),
            value: " 0.25 ".to_string(),
        },
    );
    let saved = save_configuration(&mut state);

    // Assert
    assert!(edit.success);
    assert!(saved.success, "{:?}", saved.error);
    assert!(saved.data.unwrap().reload_notified);
    let reloaded = load_config(&fx.config_path()).unwrap();
    assert_eq!(reloaded.window_management["animationDuration"], 0.25);
}

#[test]
fn test_missing_file_fails_to_open() {
    let fx = Fixture::new();
    fs::remove_file(fx.config_path()).unwrap();

    let result = SettingsSession::open(
        JsonConfigStore::new(fx.config_path()),
        SentinelReloadSignal::new(fx.marker_path()),
    );

    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}
