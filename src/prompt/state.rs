//! Protocol state for the prompt lifecycle.

use std::fmt;

use crate::composer::PromptLine;

/// Where the machine is in the prompt/command lifecycle.
///
/// A true tagged union: the captured prompt travels with the states that
/// need it, so a prompt payload outside the composer-open states is
/// unrepresentable. The composer overlay is open if and only if the state is
/// `EnteringCommand` or `AccruingAlreadyEnteredCommand`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PromptState {
    /// Machine switched off by the owning session.
    Disabled,

    /// Between commands, nothing in flight.
    #[default]
    Ground,

    /// Prompt-start seen; waiting for the prompt capture.
    ReceivingPrompt,

    /// Composer is open over the captured prompt.
    EnteringCommand { prompt: Vec<PromptLine> },

    /// Composer is open and text the user typed before it activated is
    /// being reconstructed token by token.
    AccruingAlreadyEnteredCommand {
        command_so_far: String,
        prompt: Vec<PromptLine>,
    },

    /// Composer sent its command; the shell is echoing it back.
    EchoingBack,

    /// Command is running.
    Executing,
}

impl PromptState {
    /// Stable tag for the persisted record. Spelled to match the layout the
    /// machine has always snapshotted.
    pub fn name(&self) -> &'static str {
        match self {
            PromptState::Disabled => "disabled",
            PromptState::Ground => "ground",
            PromptState::ReceivingPrompt => "receivingPrompt",
            PromptState::EnteringCommand { .. } => "enteringCommand",
            PromptState::AccruingAlreadyEnteredCommand { .. } => "accruingAlreadyEnteredCommand",
            PromptState::EchoingBack => "echoingBack",
            PromptState::Executing => "executing",
        }
    }

    /// True in the two states where the composer overlay is open.
    pub fn is_entering_command(&self) -> bool {
        matches!(
            self,
            PromptState::EnteringCommand { .. }
                | PromptState::AccruingAlreadyEnteredCommand { .. }
        )
    }
}

impl fmt::Display for PromptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
