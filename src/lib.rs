//! Prompt/command-lifecycle state machine for shell-integration terminals.
//!
//! Shells with semantic prompt integration bracket their output with four
//! boundary markers: prompt-start (`A`), prompt-end (`B`), exec-start (`C`),
//! and exec-end (`D`). This crate decodes that protocol from a stream of
//! pre-classified terminal tokens, drives an external command-line composer
//! overlay through an injected boundary trait, reconstructs commands the
//! user had already begun typing before the composer activated, and
//! serializes its full state for session restore.
//!
//! # Architecture
//!
//! ```text
//! terminal stream → Token (pre-classified, external)
//!                 → PromptStateMachine::handle / did_capture_prompt / ...
//!                 → ComposerDelegate calls (reveal / dismiss / append)
//!                 ⇅ PersistedPromptState (snapshot / restore)
//! ```
//!
//! The machine is single-threaded and non-reentrant by contract: one
//! instance per terminal session, every entry point invoked serially from
//! that session's event stream. The stream itself is untrusted, so markers
//! arriving out of protocol order reset the machine to its ground state
//! rather than surfacing errors.

pub mod composer;
pub mod prompt;
pub mod protocol;
pub mod sync;

pub use composer::{ComposerDelegate, PromptLine};
pub use prompt::{PersistedPromptState, PromptState, PromptStateMachine, SnapshotError};
pub use protocol::{Marker, TextEncoding, Token, UnknownEncodingError};
