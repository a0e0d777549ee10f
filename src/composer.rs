//! Composer overlay boundary.
//!
//! The state machine drives an external command-line editor (the composer)
//! through [`ComposerDelegate`]. The delegate is owned by the session that
//! owns the machine; the machine only ever holds a `Weak` handle to it, so a
//! torn-down UI silently absorbs any remaining calls.

use serde::{Deserialize, Serialize};

/// One captured terminal line of a prompt.
///
/// Opaque to the machine: it is stored with the state while the composer is
/// open and handed back on reveal, never inspected or mutated. Serializes to
/// a self-describing form so individual lines can be dropped on restore if
/// they fail to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptLine {
    pub text: String,

    /// Line continues onto the next row without a hard newline.
    #[serde(default)]
    pub soft_wrapped: bool,
}

impl PromptLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            soft_wrapped: false,
        }
    }
}

/// Operations the state machine invokes on the composer UI.
///
/// Calls are synchronous, single-shot, and never batched. The machine does
/// not debounce: the UI is responsible for making redundant calls safe
/// (dismissing an already-dismissed composer must be a no-op on its side).
pub trait ComposerDelegate {
    /// Open the composer over the given prompt.
    fn reveal_composer(&self, prompt: &[PromptLine]);

    /// Close the composer.
    fn dismiss_composer(&self);

    /// Append freshly decoded command text to the composer's buffer.
    fn append_command_to_composer(&self, command: &str);

    /// The most recent prompt the UI knows about, for re-query.
    fn last_prompt(&self) -> Option<Vec<PromptLine>>;
}
