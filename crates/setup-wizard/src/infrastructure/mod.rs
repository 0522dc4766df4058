//! Infrastructure layer for the setup wizard.
//!
//! Contains the adapters that touch the outside world: the JSON
//! configuration file, the reload sentinel file, and the command bridge a
//! form front end calls into.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `setup_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod reload;
pub mod storage;
pub mod ui_bridge;
