//! Terminal token model and marker classification.

use super::encoding::TextEncoding;

/// A pre-classified terminal event.
///
/// Produced by the terminal-protocol layer; this crate never sees raw escape
/// sequences. Marker payloads are semicolon-delimited with the protocol
/// letter in the first field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Shell-integration marker, e.g. `"A"` or `"D;0"`.
    Marker { payload: String },

    /// Plain decoded text.
    Text { text: String },

    /// Fixed-width byte text; needs a caller-supplied encoding to decode.
    Bytes { bytes: Vec<u8> },

    /// Line feed control; decodes to a single newline.
    LineFeed,
}

impl Token {
    /// Decode this token to text content.
    ///
    /// Markers carry no content and decode to `None`. Byte buffers that are
    /// malformed for `encoding` also decode to `None`; callers treat both as
    /// a no-op so pass-through sequences flow without affecting state.
    pub fn decoded_text(&self, encoding: TextEncoding) -> Option<String> {
        match self {
            Token::Marker { .. } => None,
            Token::Text { text } => Some(text.clone()),
            Token::Bytes { bytes } => encoding.decode(bytes),
            Token::LineFeed => Some("\n".to_string()),
        }
    }
}

/// Shell-integration protocol boundary codes.
///
/// Semantic prompt markers as emitted by shells with integration enabled:
/// `A` opens a prompt, `B` ends it (user input begins), `C` starts command
/// output, `D` ends the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `A` - fresh line, start of prompt.
    PromptStart,
    /// `B` - end of prompt, start of user input.
    CommandStart,
    /// `C` - user input done, command began executing.
    CommandExecuted,
    /// `D` - command finished executing.
    CommandFinished,
}

impl Marker {
    /// Classify a marker payload by its first semicolon-delimited field.
    ///
    /// Unrecognized letters return `None` and are ignored by the machine.
    pub fn from_payload(payload: &str) -> Option<Self> {
        match payload.split(';').next() {
            Some("A") => Some(Marker::PromptStart),
            Some("B") => Some(Marker::CommandStart),
            Some("C") => Some(Marker::CommandExecuted),
            Some("D") => Some(Marker::CommandFinished),
            _ => None,
        }
    }
}
