//! # setup-core
//!
//! Shared library for the Hammerspoon setup wizard containing the
//! configuration document model, the built-in defaults, shortcut token
//! helpers, and the binder that maps a document onto editable form fields.
//!
//! It has zero dependencies on the file system, UI frameworks, or the
//! automation host.  Everything here can be unit-tested in isolation.
//!
//! # Architecture overview (for beginners)
//!
//! The wizard edits one JSON file that a long-running automation host
//! (Hammerspoon) reads to decide which keyboard shortcut launches which
//! application, which folders are bookmarked, and how windows are laid out.
//!
//! This crate (`setup-core`) is the pure foundation.  It defines:
//!
//! - **`domain`** – The [`ConfigDocument`] tree with its five fixed sections,
//!   the immutable [`defaults`] baseline used by "reset to default", and the
//!   `shortcut` helpers that turn a token list such as
//!   `["ctrl", "alt", "cmd", "C"]` into the `ctrl,alt,cmd,C` text a user edits.
//!
//! - **`binder`** – Turns a document into a [`FieldSet`] (one editable field
//!   per leaf value, grouped by section) and turns an edited field set back
//!   into a document.  This is the only place where typed values are
//!   converted to and from text.

pub mod binder;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `setup_core::ConfigDocument` instead of `setup_core::domain::document::ConfigDocument`.
pub use binder::{
    collect, populate, BindError, CollectError, Field, FieldKey, FieldKind, FieldSet,
    ParseFieldKeyError,
};
pub use domain::defaults::defaults;
pub use domain::document::{
    ConfigDocument, DocumentError, Fabric, FabricGroup, Section, ShortcutGroup, ShortcutMap,
    Shortcuts,
};
