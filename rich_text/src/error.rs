// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// Error returned when an edit is given a malformed range.
///
/// Carries the [`EditErrorKind`], the range the caller passed, and the text length at the time
/// of the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditError {
    kind: EditErrorKind,
    start: usize,
    end: usize,
    len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`EditError::len` reports the length of the edited text, not of the error."
)]
impl EditError {
    /// The category of this error.
    pub fn kind(&self) -> EditErrorKind {
        self.kind
    }

    /// The range the caller passed.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The length in bytes of the text being edited.
    pub fn len(&self) -> usize {
        self.len
    }
}

impl core::fmt::Display for EditError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            EditErrorKind::Reversed => {
                write!(f, "edit range {}..{} ends before it starts", self.start, self.end)
            }
            EditErrorKind::OutOfBounds => write!(
                f,
                "edit range {}..{} exceeds text length {}",
                self.start, self.end, self.len
            ),
            EditErrorKind::SplitsCharacter {
                offset,
                char_start,
                char_end,
            } => write!(
                f,
                "edit range {}..{}: offset {offset} falls inside the character at {char_start}..{char_end}",
                self.start, self.end
            ),
        }
    }
}

impl core::error::Error for EditError {}

/// What was wrong with an edit range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum EditErrorKind {
    /// The range had `start > end`.
    Reversed,

    /// The range extended past the end of the text.
    OutOfBounds,

    /// An endpoint of the range was not on a UTF-8 character boundary.
    SplitsCharacter {
        /// The offending offset.
        offset: usize,
        /// Start of the character containing `offset`.
        char_start: usize,
        /// End (exclusive) of the character containing `offset`.
        char_end: usize,
    },
}

/// Checks that `range` is a well-formed edit range for `text`.
pub(crate) fn validate_range(text: &str, range: &Range<usize>) -> Result<(), EditError> {
    let len = text.len();
    let error = |kind| EditError {
        kind,
        start: range.start,
        end: range.end,
        len,
    };
    if range.start > range.end {
        return Err(error(EditErrorKind::Reversed));
    }
    if range.end > len {
        return Err(error(EditErrorKind::OutOfBounds));
    }
    for offset in [range.start, range.end] {
        if !text.is_char_boundary(offset) {
            let (char_start, char_end) = enclosing_char(text, offset);
            return Err(error(EditErrorKind::SplitsCharacter {
                offset,
                char_start,
                char_end,
            }));
        }
    }
    Ok(())
}

/// Returns the byte span of the character containing `offset`, which must be in bounds.
fn enclosing_char(text: &str, offset: usize) -> (usize, usize) {
    // A UTF-8 sequence is at most four bytes, so both boundaries are within three bytes.
    let start = (offset.saturating_sub(3)..=offset)
        .rev()
        .find(|&ix| text.is_char_boundary(ix))
        .unwrap_or(0);
    let end = (offset..=(offset + 3).min(text.len()))
        .find(|&ix| text.is_char_boundary(ix))
        .unwrap_or(text.len());
    (start, end)
}
