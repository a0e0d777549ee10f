//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use promptwire::{ComposerDelegate, PromptLine, PromptStateMachine, TextEncoding, Token};

/// A single recorded composer boundary call.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerCall {
    Reveal(Vec<PromptLine>),
    Dismiss,
    Append(String),
}

/// Delegate that records every boundary call for later assertions.
#[derive(Default)]
pub struct RecordingComposer {
    calls: Mutex<Vec<ComposerCall>>,
    last_prompt: Mutex<Option<Vec<PromptLine>>>,
}

impl RecordingComposer {
    pub fn calls(&self) -> Vec<ComposerCall> {
        self.calls.lock().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn dismiss_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, ComposerCall::Dismiss))
            .count()
    }

    pub fn set_last_prompt(&self, prompt: Vec<PromptLine>) {
        *self.last_prompt.lock() = Some(prompt);
    }
}

impl ComposerDelegate for RecordingComposer {
    fn reveal_composer(&self, prompt: &[PromptLine]) {
        self.calls.lock().push(ComposerCall::Reveal(prompt.to_vec()));
    }

    fn dismiss_composer(&self) {
        self.calls.lock().push(ComposerCall::Dismiss);
    }

    fn append_command_to_composer(&self, command: &str) {
        self.calls.lock().push(ComposerCall::Append(command.to_string()));
    }

    fn last_prompt(&self) -> Option<Vec<PromptLine>> {
        self.last_prompt.lock().clone()
    }
}

/// Surface transition logs in test output when `RUST_LOG` is set.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a machine wired to a recording composer.
pub fn machine_with_composer() -> (PromptStateMachine, Arc<RecordingComposer>) {
    init_tracing();
    let composer = Arc::new(RecordingComposer::default());
    let delegate: Arc<dyn ComposerDelegate> = composer.clone();
    let weak: Weak<dyn ComposerDelegate> = Arc::downgrade(&delegate);
    (PromptStateMachine::new(weak), composer)
}

pub fn prompt_lines(texts: &[&str]) -> Vec<PromptLine> {
    texts.iter().copied().map(PromptLine::new).collect()
}

pub fn marker(payload: &str) -> Token {
    Token::Marker {
        payload: payload.to_string(),
    }
}

pub fn text(content: &str) -> Token {
    Token::Text {
        text: content.to_string(),
    }
}

/// Drive a machine through `A` + capture into the composer-open state, then
/// clear the recorded calls.
pub fn enter_command(
    machine: &mut PromptStateMachine,
    composer: &RecordingComposer,
    prompt: &[PromptLine],
) {
    machine.handle(&marker("A"), TextEncoding::UTF8);
    machine.did_capture_prompt(prompt.to_vec());
    composer.clear();
}
