//! Transition logic for the prompt lifecycle.

use std::mem;
use std::sync::Weak;

use crate::composer::{ComposerDelegate, PromptLine};
use crate::protocol::{Marker, TextEncoding, Token};

use super::persist::PersistedPromptState;
use super::state::PromptState;

/// Decodes shell-integration markers into composer overlay transitions.
///
/// One instance per terminal session, driven serially from that session's
/// event stream. Every entry point completes its transition and all
/// resulting [`ComposerDelegate`] calls before returning; nothing here
/// blocks, retries, or errors. The upstream stream is untrusted, so every
/// out-of-protocol marker sequence resolves to the nearest safe state
/// (ground) instead of failing.
pub struct PromptStateMachine {
    state: PromptState,
    delegate: Weak<dyn ComposerDelegate>,
}

impl PromptStateMachine {
    /// Create a machine in the ground state.
    ///
    /// The delegate is held weakly; its lifetime belongs to the owning
    /// session, and calls after it is gone are silently absorbed.
    pub fn new(delegate: Weak<dyn ComposerDelegate>) -> Self {
        Self {
            state: PromptState::Ground,
            delegate,
        }
    }

    /// Replace the composer delegate.
    pub fn set_delegate(&mut self, delegate: Weak<dyn ComposerDelegate>) {
        self.delegate = delegate;
    }

    /// The current protocol state.
    pub fn state(&self) -> &PromptState {
        &self.state
    }

    /// True while the composer overlay is open.
    pub fn is_entering_command(&self) -> bool {
        self.state.is_entering_command()
    }

    /// Enable or disable the machine.
    ///
    /// Disabling always dismisses the composer, even when it is already
    /// closed; the UI side treats a redundant dismiss as a no-op. No
    /// debouncing: calling twice with the same value repeats the transition
    /// and the dismiss.
    pub fn set_allowed(&mut self, allowed: bool) {
        if allowed {
            self.set_state(PromptState::Ground, "allowed");
        } else {
            self.set_state(PromptState::Disabled, "disallowed");
            self.dismiss_composer();
        }
    }

    /// Feed one pre-classified terminal token through the machine.
    ///
    /// Markers route to their protocol handler; anything else is treated as
    /// content and only matters while the composer is reconstructing an
    /// already-entered command.
    pub fn handle(&mut self, token: &Token, encoding: TextEncoding) {
        match token {
            Token::Marker { payload } => self.handle_marker(payload),
            _ => self.handle_content(token, encoding),
        }
    }

    /// The UI is about to transmit the composed command.
    ///
    /// The shell will echo it back before the execution markers arrive, so
    /// the machine leaves the composer-open state here rather than at the
    /// next marker.
    pub fn will_send_command(&mut self) {
        match self.state {
            PromptState::EnteringCommand { .. } => {
                self.set_state(PromptState::EchoingBack, "will send command");
            }
            PromptState::Disabled
            | PromptState::Ground
            | PromptState::ReceivingPrompt
            | PromptState::AccruingAlreadyEnteredCommand { .. }
            | PromptState::EchoingBack
            | PromptState::Executing => {}
        }
    }

    /// An out-of-band event carrying the captured prompt text, normally
    /// delivered right after marker `B`.
    ///
    /// Out-of-order captures are never rejected: outside `ReceivingPrompt`
    /// this was most likely a trigger that pattern-matched the prompt, and
    /// the caller is trusted: the new prompt supersedes whatever was in
    /// progress.
    pub fn did_capture_prompt(&mut self, prompt: Vec<PromptLine>) {
        match self.state {
            PromptState::Disabled => {}
            PromptState::ReceivingPrompt => {
                self.reveal_composer(&prompt);
                self.set_state(PromptState::EnteringCommand { prompt }, "captured prompt");
            }
            PromptState::Ground
            | PromptState::EnteringCommand { .. }
            | PromptState::AccruingAlreadyEnteredCommand { .. }
            | PromptState::EchoingBack
            | PromptState::Executing => {
                self.reveal_composer(&prompt);
                self.set_state(
                    PromptState::EnteringCommand { prompt },
                    "trigger-detected prompt",
                );
            }
        }
    }

    /// Snapshot the current state as a flat record.
    pub fn persisted_state(&self) -> PersistedPromptState {
        PersistedPromptState::encode(&self.state)
    }

    /// Replace the state wholesale from a persisted record and bring the
    /// composer back in sync.
    ///
    /// States without an open composer issue a dismiss, since no composer
    /// should survive a cold restore in them. The accruing state replays the
    /// entire reconstructed command in one append.
    pub fn restore(&mut self, record: &PersistedPromptState) {
        self.state = record.decode();
        tracing::debug!(state = %self.state, "restored prompt state");
        match &self.state {
            PromptState::Disabled
            | PromptState::Ground
            | PromptState::ReceivingPrompt
            | PromptState::EchoingBack
            | PromptState::Executing => self.dismiss_composer(),
            PromptState::EnteringCommand { prompt } => self.reveal_composer(prompt),
            PromptState::AccruingAlreadyEnteredCommand {
                command_so_far,
                prompt,
            } => {
                self.reveal_composer(prompt);
                self.append_command_to_composer(command_so_far);
            }
        }
    }

    /// Re-query the most recent prompt from the composer UI.
    pub fn last_prompt(&self) -> Option<Vec<PromptLine>> {
        self.delegate.upgrade().and_then(|d| d.last_prompt())
    }

    fn handle_marker(&mut self, payload: &str) {
        match Marker::from_payload(payload) {
            Some(Marker::PromptStart) => self.handle_prompt_start(),
            Some(Marker::CommandStart) => self.handle_command_start(),
            Some(Marker::CommandExecuted) => self.handle_command_executed(),
            Some(Marker::CommandFinished) => self.handle_command_finished(),
            None => tracing::trace!(payload, "ignoring unrecognized marker"),
        }
    }

    // Marker A: a prompt will be received.
    fn handle_prompt_start(&mut self) {
        match self.state {
            PromptState::Disabled => {}
            PromptState::ReceivingPrompt => {}
            PromptState::EnteringCommand { .. } => {
                // A new prompt started while one was still being edited.
                self.dismiss_composer();
                self.set_state(PromptState::ReceivingPrompt, "A");
            }
            PromptState::AccruingAlreadyEnteredCommand { .. } => {
                // Composer stays open; the capture following B supersedes it.
                self.set_state(PromptState::ReceivingPrompt, "A");
            }
            PromptState::Ground | PromptState::EchoingBack | PromptState::Executing => {
                self.set_state(PromptState::ReceivingPrompt, "A");
            }
        }
    }

    // Marker B: the prompt ended. The capture call carries its text, so B
    // itself only matters when it arrives out of sequence.
    fn handle_command_start(&mut self) {
        match self.state {
            PromptState::Disabled => {}
            PromptState::ReceivingPrompt => {
                // Expect a did_capture_prompt call.
            }
            PromptState::EnteringCommand { .. }
            | PromptState::AccruingAlreadyEnteredCommand { .. } => {
                self.dismiss_composer();
                self.set_state(PromptState::Ground, "B");
            }
            PromptState::Ground | PromptState::EchoingBack | PromptState::Executing => {
                self.set_state(PromptState::Ground, "B");
            }
        }
    }

    // Marker C: the command began executing.
    fn handle_command_executed(&mut self) {
        match self.state {
            PromptState::Disabled => {}
            PromptState::Ground | PromptState::ReceivingPrompt | PromptState::Executing => {
                self.set_state(PromptState::Ground, "C");
            }
            PromptState::EnteringCommand { .. } => {
                // Anything typed into the composer is lost here.
                self.dismiss_composer();
                self.set_state(PromptState::Ground, "C");
            }
            PromptState::EchoingBack | PromptState::AccruingAlreadyEnteredCommand { .. } => {
                self.dismiss_composer();
                self.set_state(PromptState::Executing, "C");
            }
        }
    }

    // Marker D: the command finished executing.
    fn handle_command_finished(&mut self) {
        match self.state {
            PromptState::Disabled => {}
            PromptState::EnteringCommand { .. } => {
                self.dismiss_composer();
                self.set_state(PromptState::Ground, "D");
            }
            PromptState::Ground
            | PromptState::ReceivingPrompt
            | PromptState::AccruingAlreadyEnteredCommand { .. }
            | PromptState::EchoingBack
            | PromptState::Executing => {
                self.set_state(PromptState::Ground, "D");
            }
        }
    }

    fn handle_content(&mut self, token: &Token, encoding: TextEncoding) {
        match mem::take(&mut self.state) {
            passive @ (PromptState::Disabled
            | PromptState::Ground
            | PromptState::ReceivingPrompt
            | PromptState::EchoingBack
            | PromptState::Executing) => self.state = passive,
            PromptState::EnteringCommand { prompt } => {
                let text = token.decoded_text(encoding).unwrap_or_default();
                if text.is_empty() {
                    // Let focus reporting and similar sequences pass through.
                    self.state = PromptState::EnteringCommand { prompt };
                    return;
                }
                // Leading whitespace is stripped only on the first accrual.
                self.accrue(text.trim_start().to_string(), String::new(), prompt);
            }
            PromptState::AccruingAlreadyEnteredCommand {
                command_so_far,
                prompt,
            } => {
                let part = token.decoded_text(encoding).unwrap_or_default();
                self.accrue(part, command_so_far, prompt);
            }
        }
    }

    fn accrue(&mut self, part: String, command_so_far: String, prompt: Vec<PromptLine>) {
        self.set_state(
            PromptState::AccruingAlreadyEnteredCommand {
                command_so_far: format!("{command_so_far}{part}"),
                prompt,
            },
            "content token",
        );
        if !part.is_empty() {
            self.append_command_to_composer(&part);
        }
    }

    fn set_state(&mut self, new: PromptState, event: &str) {
        tracing::debug!(event, from = %self.state, to = %new, "prompt state transition");
        self.state = new;
    }

    fn reveal_composer(&self, prompt: &[PromptLine]) {
        tracing::trace!(state = %self.state, "reveal composer");
        if let Some(delegate) = self.delegate.upgrade() {
            delegate.reveal_composer(prompt);
        }
    }

    fn dismiss_composer(&self) {
        tracing::trace!(state = %self.state, "dismiss composer");
        if let Some(delegate) = self.delegate.upgrade() {
            delegate.dismiss_composer();
        }
    }

    fn append_command_to_composer(&self, command: &str) {
        tracing::trace!(state = %self.state, command, "append command to composer");
        if let Some(delegate) = self.delegate.upgrade() {
            delegate.append_command_to_composer(command);
        }
    }
}
