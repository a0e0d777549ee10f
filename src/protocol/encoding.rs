//! Caller-supplied text encodings for byte-buffer tokens.

use thiserror::Error;

/// Error returned when an encoding label is not recognized.
#[derive(Debug, Error)]
#[error("unknown text encoding label '{label}'")]
pub struct UnknownEncodingError {
    pub label: String,
}

/// A text encoding identified by a WHATWG label, e.g. `"utf-8"` or
/// `"shift_jis"`.
///
/// Byte-buffer tokens are decoded strictly: input that is malformed for the
/// selected encoding decodes to `None` rather than to replacement
/// characters, and the machine treats it as a benign no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static encoding_rs::Encoding);

impl TextEncoding {
    pub const UTF8: TextEncoding = TextEncoding(encoding_rs::UTF_8);

    /// Look up an encoding by label.
    pub fn from_label(label: &str) -> Result<Self, UnknownEncodingError> {
        encoding_rs::Encoding::for_label(label.as_bytes())
            .map(TextEncoding)
            .ok_or_else(|| UnknownEncodingError {
                label: label.to_string(),
            })
    }

    /// Decode `bytes`, returning `None` if any of it is malformed for this
    /// encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (text, had_errors) = self.0.decode_without_bom_handling(bytes);
        if had_errors {
            None
        } else {
            Some(text.into_owned())
        }
    }

    /// The canonical name of this encoding.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_label_resolves() {
        let encoding = TextEncoding::from_label("utf-8").unwrap();
        assert_eq!(encoding, TextEncoding::UTF8);
    }

    #[test]
    fn label_lookup_is_case_insensitive() {
        assert!(TextEncoding::from_label("UTF-8").is_ok());
        assert!(TextEncoding::from_label("Shift_JIS").is_ok());
    }

    #[test]
    fn unknown_label_errors() {
        let err = TextEncoding::from_label("not-an-encoding").unwrap_err();
        assert_eq!(err.label, "not-an-encoding");
    }

    #[test]
    fn strict_decode_rejects_malformed_input() {
        assert_eq!(TextEncoding::UTF8.decode(&[0xc3, 0x28]), None);
    }

    #[test]
    fn decode_accepts_well_formed_input() {
        assert_eq!(
            TextEncoding::UTF8.decode("héllo".as_bytes()),
            Some("héllo".to_string())
        );
    }
}
