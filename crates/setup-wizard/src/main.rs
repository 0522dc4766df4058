//! Hammerspoon Setup Wizard: headless entry point.
//!
//! Loads `~/.hammerspoon/user_config.json`, shows or edits its settings, and
//! writes it back.  A successful save drops the reload marker so the running
//! automation host picks up the change.
//!
//! # Usage
//!
//! ```text
//! setup-wizard [OPTIONS] [COMMAND]
//!
//! Commands:
//!   show  [SECTION]         Print every tab, or one (default when no command)
//!   set   <FIELD=VALUE>...  Apply edits, then save and signal a reload
//!   reset [--yes]           Overwrite the configuration with the defaults
//!
//! Options:
//!   --config        <PATH>  Configuration file [default: ~/.hammerspoon/user_config.json]
//!   --reload-marker <PATH>  Reload marker [default: ~/.hammerspoon/temp_config.json]
//! ```
//!
//! Fields are addressed by qualified name, as printed by `show`:
//!
//! ```text
//! setup-wizard set applications.Editor="Sublime Text" fabric.patternModels.general=model1
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                     | Description                 |
//! |------------------------------|-----------------------------|
//! | `SETUP_WIZARD_CONFIG`        | Configuration file path     |
//! | `SETUP_WIZARD_RELOAD_MARKER` | Reload marker path          |
//! | `RUST_LOG`                   | Log filter (default `info`) |

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use setup_wizard::application::session::SettingsSession;
use setup_wizard::infrastructure::reload::SentinelReloadSignal;
use setup_wizard::infrastructure::storage::config::JsonConfigStore;
use setup_wizard::infrastructure::ui_bridge::{
    get_tab, get_tabs, reset_to_default, save_configuration, update_fields, AppState,
    CommandResult, FieldUpdateDto, TabDto,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Hammerspoon setup wizard.
#[derive(Debug, Parser)]
#[command(
    name = "setup-wizard",
    about = "Edit the Hammerspoon automation configuration",
    version
)]
struct Cli {
    /// Configuration file to edit.
    #[arg(long, global = true, env = "SETUP_WIZARD_CONFIG")]
    config: Option<PathBuf>,

    /// Marker file the automation host watches for reload requests.
    #[arg(long, global = true, env = "SETUP_WIZARD_RELOAD_MARKER")]
    reload_marker: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the settings of every tab, or of one tab.
    Show {
        /// Tab to print, e.g. `shortcuts` or `window-management`.
        section: Option<String>,
    },
    /// Apply `FIELD=VALUE` edits, then save and signal a reload.
    ///
    /// Choice fields (pattern models) take one of their listed options.
    Set {
        #[arg(required = true, value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },
    /// Replace the configuration with the built-in defaults.
    ///
    /// The defaults are saved immediately; no reload is signalled.
    Reset {
        /// Confirm the reset.  Without it the reset is declined.
        #[arg(long)]
        yes: bool,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so that `show` output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let store = match cli.config {
        Some(path) => JsonConfigStore::new(path),
        None => JsonConfigStore::at_default_location()
            .context("cannot locate the configuration file")?,
    };
    let signal = match cli.reload_marker {
        Some(path) => SentinelReloadSignal::new(path),
        None => SentinelReloadSignal::at_default_location()
            .context("cannot locate the reload marker")?,
    };
    info!(
        config = %store.path().display(),
        marker = %signal.marker_path().display(),
        "setup wizard starting"
    );

    let config_path = store.path().to_path_buf();
    let session = SettingsSession::open(store, signal).with_context(|| {
        format!(
            "failed to load configuration from {}",
            config_path.display()
        )
    })?;
    let mut state = AppState::new(session);

    match cli.command.unwrap_or(Command::Show { section: None }) {
        Command::Show { section: None } => {
            for tab in into_result(get_tabs(&state))? {
                print_tab(&tab);
            }
        }
        Command::Show {
            section: Some(section),
        } => print_tab(&into_result(get_tab(&state, &section))?),
        Command::Set { assignments } => {
            let updates = assignments
                .iter()
                .map(|a| parse_assignment(a))
                .collect::<anyhow::Result<Vec<_>>>()?;
            into_result(update_fields(&mut state, updates))?;
            let report = into_result(save_configuration(&mut state))?;
            println!("Configuration saved to {}", config_path.display());
            match report.reload_error {
                None => println!("Reload signalled"),
                Some(e) => warn!(error = %e, "configuration saved but reload was not signalled"),
            }
        }
        Command::Reset { yes } => {
            if into_result(reset_to_default(&mut state, yes))? {
                println!("Configuration reset to defaults");
            } else {
                println!("Reset declined; pass --yes to overwrite the configuration");
            }
        }
    }

    Ok(())
}

/// Unwraps a bridge response into an `anyhow` result.
fn into_result<T: Serialize>(result: CommandResult<T>) -> anyhow::Result<T> {
    if !result.success {
        bail!(result.error.unwrap_or_else(|| "command failed".to_string()));
    }
    result
        .data
        .ok_or_else(|| anyhow!("command succeeded without returning data"))
}

/// Splits `FIELD=VALUE` at the first `=`; the value may itself contain `=`.
fn parse_assignment(assignment: &str) -> anyhow::Result<FieldUpdateDto> {
    let (name, value) = assignment
        .split_once('=')
        .with_context(|| format!("expected FIELD=VALUE, got '{assignment}'"))?;
    Ok(FieldUpdateDto {
        name: name.trim().to_string(),
        value: value.to_string(),
    })
}

fn print_tab(tab: &TabDto) {
    println!("[{}]", tab.label);
    for group in &tab.groups {
        if let Some(heading) = &group.heading {
            println!("  # {heading}");
        }
        for field in &group.fields {
            if field.options.is_empty() {
                println!("  {} = {}", field.name, field.value);
            } else {
                println!(
                    "  {} = {}  ({})",
                    field.name,
                    field.value,
                    field.options.join(" | ")
                );
            }
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment_splits_at_first_equals() {
        let update = parse_assignment("folders.Home=~/a=b").unwrap();
        assert_eq!(update.name, "folders.Home");
        assert_eq!(update.value, "~/a=b");
    }

    #[test]
    fn test_parse_assignment_keeps_empty_value() {
        let update = parse_assignment("applications.Mail=").unwrap();
        assert_eq!(update.value, "");
    }

    #[test]
    fn test_parse_assignment_without_equals_fails() {
        assert!(parse_assignment("applications.Mail").is_err());
    }

    #[test]
    fn test_cli_parses_set_with_global_config_flag() {
        let cli = Cli::try_parse_from([
            "setup-wizard",
            "set",
            "applications.Editor=Zed",
            "--config",
            "/tmp/user_config.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/user_config.json")));
        assert!(matches!(cli.command, Some(Command::Set { ref assignments }) if assignments.len() == 1));
    }

    #[test]
    fn test_cli_reset_defaults_to_declined() {
        let cli = Cli::try_parse_from(["setup-wizard", "reset"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Reset { yes: false })));
    }

    #[test]
    fn test_into_result_surfaces_command_error() {
        let result: CommandResult<()> = CommandResult::err("boom");
        assert_eq!(into_result(result).unwrap_err().to_string(), "boom");
    }
}
