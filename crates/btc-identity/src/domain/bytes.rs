//! # Byte Normalizer
//!
//! Decoders accept either raw bytes or hex text. Only byte-like and
//! string-like values convert into [`ByteInput`], so any other input kind is
//! rejected by the compiler.

use super::errors::{EncodingError, Result};
use std::borrow::Cow;

/// Raw bytes or hex text handed to a decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteInput<'a> {
    /// Bytes used as-is
    Raw(&'a [u8]),
    /// Hexadecimal text, decoded before use
    Hex(&'a str),
}

impl<'a> ByteInput<'a> {
    /// Return the canonical byte sequence.
    ///
    /// Raw input is borrowed; hex text is decoded into an owned buffer.
    /// Surrounding whitespace in hex text is ignored.
    pub fn to_bytes(self) -> Result<Cow<'a, [u8]>> {
        match self {
            ByteInput::Raw(bytes) => Ok(Cow::Borrowed(bytes)),
            ByteInput::Hex(text) => hex::decode(text.trim())
                .map(Cow::Owned)
                .map_err(|e| EncodingError::Hex(e.to_string()).into()),
        }
    }
}

impl<'a> From<&'a [u8]> for ByteInput<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteInput::Raw(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteInput<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        ByteInput::Raw(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for ByteInput<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        ByteInput::Raw(bytes)
    }
}

impl<'a> From<&'a str> for ByteInput<'a> {
    fn from(text: &'a str) -> Self {
        ByteInput::Hex(text)
    }
}

impl<'a> From<&'a String> for ByteInput<'a> {
    fn from(text: &'a String) -> Self {
        ByteInput::Hex(text)
    }
}

/// Normalize any supported input into bytes.
pub fn get_bytes<'a>(input: impl Into<ByteInput<'a>>) -> Result<Cow<'a, [u8]>> {
    input.into().to_bytes()
}
