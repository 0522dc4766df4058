//! Storage infrastructure: configuration file persistence.
//!
//! - `config` reads and writes the JSON configuration document and resolves
//!   the default file locations under `~/.hammerspoon/`.
//! - `atomic` replaces a file by writing a sibling temp file and renaming it
//!   over the target, so the automation host never reads a half-written file.
//!
//! Keeping storage concerns here means the file format could change without
//! touching the session or the binder.

pub mod atomic;
pub mod config;
