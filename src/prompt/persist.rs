//! Flat record codec and snapshot files for session restore.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::composer::PromptLine;

use super::state::PromptState;

/// Errors reading or writing a snapshot file.
///
/// Only file IO and top-level parsing can fail; decoding a loaded record
/// into a state never does.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode snapshot: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write snapshot '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flat serializable form of a [`PromptState`].
///
/// Key spelling (`name` / `prompt` / `commandSoFar`) matches the layout the
/// machine has always snapshotted, so existing session files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPromptState {
    /// State tag. Missing or unrecognized tags decode to ground.
    #[serde(default)]
    pub name: String,

    /// Captured prompt lines, one self-describing value per line. Present
    /// only for the composer-open states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Vec<Value>>,

    /// Reconstructed command text, present only while accruing.
    #[serde(
        default,
        rename = "commandSoFar",
        skip_serializing_if = "Option::is_none"
    )]
    pub command_so_far: Option<String>,
}

impl PersistedPromptState {
    /// Flatten a state into its persisted record.
    pub fn encode(state: &PromptState) -> Self {
        let mut record = Self {
            name: state.name().to_string(),
            prompt: None,
            command_so_far: None,
        };
        match state {
            PromptState::Disabled
            | PromptState::Ground
            | PromptState::ReceivingPrompt
            | PromptState::EchoingBack
            | PromptState::Executing => {}
            PromptState::EnteringCommand { prompt } => {
                record.prompt = Some(serialize_prompt(prompt));
            }
            PromptState::AccruingAlreadyEnteredCommand {
                command_so_far,
                prompt,
            } => {
                record.prompt = Some(serialize_prompt(prompt));
                record.command_so_far = Some(command_so_far.clone());
            }
        }
        record
    }

    /// Rebuild the state this record describes.
    ///
    /// Never fails: an unrecognized tag falls back to ground, a missing
    /// command defaults to empty, and each prompt line that fails to
    /// deserialize is dropped on its own; a partial prompt restore beats
    /// losing the whole state.
    pub fn decode(&self) -> PromptState {
        match self.name.as_str() {
            "disabled" => PromptState::Disabled,
            "ground" => PromptState::Ground,
            "receivingPrompt" => PromptState::ReceivingPrompt,
            "enteringCommand" => PromptState::EnteringCommand {
                prompt: self.decoded_prompt(),
            },
            "accruingAlreadyEnteredCommand" => PromptState::AccruingAlreadyEnteredCommand {
                command_so_far: self.command_so_far.clone().unwrap_or_default(),
                prompt: self.decoded_prompt(),
            },
            "echoingBack" => PromptState::EchoingBack,
            "executing" => PromptState::Executing,
            other => {
                tracing::warn!(tag = other, "unrecognized persisted state tag, using ground");
                PromptState::Ground
            }
        }
    }

    fn decoded_prompt(&self) -> Vec<PromptLine> {
        self.prompt
            .iter()
            .flatten()
            .filter_map(|value| serde_json::from_value(value.clone()).ok())
            .collect()
    }

    /// Load a snapshot record from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write this record to a JSON file.
    pub fn save_to(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|source| SnapshotError::Encode { source })?;
        fs::write(path, json).map_err(|source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn serialize_prompt(prompt: &[PromptLine]) -> Vec<Value> {
    prompt
        .iter()
        .filter_map(|line| serde_json::to_value(line).ok())
        .collect()
}
