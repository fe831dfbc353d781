// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// A single alphanumeric language tag subtag of at most eight bytes.
///
/// Subtags are stored already normalized to the casing convention of their position in a
/// tag, so two `Subtag`s compare equal exactly when their canonical forms do.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subtag {
    bytes: [u8; 8],
    len: u8,
}

#[derive(Clone, Copy)]
pub(crate) enum Casing {
    Lower,
    Upper,
}

impl Subtag {
    /// The maximum length of a subtag in bytes.
    pub const MAX_LEN: usize = 8;

    /// Returns the canonical string form.
    #[must_use]
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.bytes[..self.len as usize]).expect("only ASCII")
    }

    /// Returns the subtag length in bytes.
    #[must_use]
    #[expect(
        clippy::len_without_is_empty,
        reason = "subtags are never empty by construction"
    )]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Builds a subtag from raw input, applying `casing`.
    ///
    /// Returns `None` if the input is empty, longer than [`Self::MAX_LEN`], or contains bytes
    /// other than ASCII letters and digits.
    pub(crate) fn from_bytes(input: &[u8], casing: Casing) -> Option<Self> {
        if input.is_empty()
            || input.len() > Self::MAX_LEN
            || !input.iter().all(|b| b.is_ascii_alphanumeric())
        {
            return None;
        }
        let mut bytes = [0_u8; 8];
        for (dst, src) in bytes.iter_mut().zip(input) {
            *dst = match casing {
                Casing::Lower => src.to_ascii_lowercase(),
                Casing::Upper => src.to_ascii_uppercase(),
            };
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "length checked against MAX_LEN above"
        )]
        let len = input.len() as u8;
        Some(Self { bytes, len })
    }
}

impl fmt::Debug for Subtag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subtag").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Subtag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
