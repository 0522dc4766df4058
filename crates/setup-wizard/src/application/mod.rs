//! Application layer for the setup wizard.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (`setup-core`: the document and the binder) and the infrastructure (the
//! JSON file, the reload sentinel, the command bridge).
//!
//! Code in this layer:
//!
//! - **Orchestrates** domain operations to fulfil a user goal ("save my
//!   edits", "reset everything to default").
//! - **Depends on abstractions** ([`ports::ConfigRepository`],
//!   [`ports::ReloadNotifier`]) rather than on files, so the flow can be
//!   tested with mocks.
//! - **Performs no file I/O itself**.
//!
//! # Sub-modules
//!
//! - **`ports`**   – The two traits the session needs from the outside world,
//!   plus their error types.
//! - **`session`** – The settings session: current document, editable fields,
//!   the save flow, and the reset state machine.

pub mod ports;
pub mod session;
