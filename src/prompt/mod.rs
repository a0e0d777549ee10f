//! Prompt lifecycle feature module.
//!
//! Decodes the four shell-integration boundary markers (prompt-start,
//! prompt-end, exec-start, exec-end) into composer overlay transitions and
//! reconstructs commands the user had begun typing before the composer took
//! over.
//!
//! - `state.rs` - the tagged-union protocol state
//! - `machine.rs` - transitions and composer boundary effects
//! - `persist.rs` - flat record codec and snapshot files for session restore

mod machine;
mod persist;
mod state;

pub use machine::PromptStateMachine;
pub use persist::{PersistedPromptState, SnapshotError};
pub use state::PromptState;
