// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

/// An ISO 15924 script code as it appears in a language tag.
///
/// Stored in canonical `Titlecase` (`Latn`, `Hans`), so equality is case-insensitive with
/// respect to the parsed input.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Script {
    raw: [u8; 4],
}

impl Script {
    /// Latin (`Latn`).
    pub const LATIN: Self = Self::from_bytes(*b"Latn");

    /// Cyrillic (`Cyrl`).
    pub const CYRILLIC: Self = Self::from_bytes(*b"Cyrl");

    /// Arabic (`Arab`).
    pub const ARABIC: Self = Self::from_bytes(*b"Arab");

    /// Greek (`Grek`).
    pub const GREEK: Self = Self::from_bytes(*b"Grek");

    /// Devanagari (`Deva`).
    pub const DEVANAGARI: Self = Self::from_bytes(*b"Deva");

    /// Simplified Han (`Hans`).
    pub const HAN_SIMPLIFIED: Self = Self::from_bytes(*b"Hans");

    /// Traditional Han (`Hant`).
    pub const HAN_TRADITIONAL: Self = Self::from_bytes(*b"Hant");

    /// Han with Hiragana and Katakana (`Jpan`).
    pub const JAPANESE: Self = Self::from_bytes(*b"Jpan");

    /// Han with Hangul (`Kore`).
    pub const KOREAN: Self = Self::from_bytes(*b"Kore");

    /// Code for unwritten documents (`Zxxx`), used by audio writing systems.
    pub const UNWRITTEN: Self = Self::from_bytes(*b"Zxxx");

    /// `raw` must already be titlecase ASCII letters.
    const fn from_bytes(raw: [u8; 4]) -> Self {
        Self { raw }
    }

    /// Returns the canonical string form (e.g. `Latn`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.raw).expect("only ASCII")
    }

    /// Parses a script code, normalizing to `Titlecase` (`LATN` → `Latn`).
    pub fn parse(s: &str) -> Result<Self, ParseScriptError> {
        s.parse()
    }

    pub(crate) fn is_script_subtag(bytes: &[u8]) -> bool {
        bytes.len() == 4 && bytes.iter().all(|b| b.is_ascii_alphabetic())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Script").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Script {
    type Err = ParseScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 {
            return Err(ParseScriptError::InvalidLength);
        }
        if !Self::is_script_subtag(bytes) {
            return Err(ParseScriptError::InvalidBytes);
        }
        let mut raw = [0_u8; 4];
        for (out, byte) in raw.iter_mut().zip(bytes) {
            *out = byte.to_ascii_lowercase();
        }
        raw[0].make_ascii_uppercase();
        Ok(Self::from_bytes(raw))
    }
}

/// An error returned from parsing a [`Script`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseScriptError {
    /// The input was not exactly four bytes.
    InvalidLength,
    /// The input contained bytes other than ASCII letters.
    InvalidBytes,
}

impl fmt::Display for ParseScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength => f.write_str("script code must be four letters"),
            Self::InvalidBytes => f.write_str("script code must contain only ASCII letters"),
        }
    }
}

impl core::error::Error for ParseScriptError {}
