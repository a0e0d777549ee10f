//! Pre-classified terminal tokens and the shell-integration marker protocol.
//!
//! The terminal layer tokenizes raw escape sequences before this crate sees
//! them; what arrives here is a [`Token`] that is either a shell-integration
//! marker or printable content. [`Marker`] classifies the four protocol
//! boundary codes, and [`TextEncoding`] decodes byte-buffer tokens with a
//! caller-supplied encoding.

mod encoding;
mod token;

pub use encoding::{TextEncoding, UnknownEncodingError};
pub use token::{Marker, Token};
