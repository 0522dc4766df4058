//! Domain entities for the setup wizard.
//!
//! This module contains pure data and rules with no infrastructure
//! dependencies: no file I/O, no environment lookups, no UI.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer holds the types that make the program what it is.
//! Here that is the configuration document the automation host consumes.
//! Outer layers (file storage, the reload sentinel, the command bridge)
//! depend on these types, but the domain never depends on them.

/// The configuration document tree and its section identifiers.
pub mod document;

/// The built-in baseline document used by "reset to default".
pub mod defaults;

/// Joining, splitting, and checking shortcut token sequences.
pub mod shortcut;
