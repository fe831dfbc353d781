// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};
use core::fmt;

use text_props::{compare_with, PropsDiff, WiggleRoom};

use crate::normalization::normalize;
use crate::{CommonSegments, NormalizationForm, RichString};

/// The first difference found between an expected and an actual [`RichString`].
///
/// Offsets and text are reported in NFD, the form both strings are compared in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StringDiff {
    /// Text and properties agree.
    Same,
    /// Neither string exists.
    BothAbsent,
    /// No string was expected but one exists.
    ExpectedAbsent {
        /// The actual text.
        actual: String,
    },
    /// A string was expected but none exists.
    ActualAbsent {
        /// The expected text.
        expected: String,
    },
    /// The texts differ.
    Text {
        /// The expected text.
        expected: String,
        /// The actual text.
        actual: String,
    },
    /// The texts agree but the properties of some segment differ.
    Props {
        /// Byte offset of the segment.
        offset: usize,
        /// Text of the segment.
        text: String,
        /// How the properties differ.
        diff: PropsDiff,
    },
}

impl StringDiff {
    /// Returns `true` if the strings are considered equal.
    #[must_use]
    pub fn is_same(&self) -> bool {
        matches!(self, Self::Same | Self::BothAbsent)
    }
}

impl fmt::Display for StringDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Same => f.write_str("Strings appear to be equal."),
            Self::BothAbsent => f.write_str("Both strings are null."),
            Self::ExpectedAbsent { actual } => {
                write!(f, "Expected a null string, but was <{actual}>.")
            }
            Self::ActualAbsent { expected } => {
                write!(f, "Expected <{expected}>, but was a null string.")
            }
            Self::Text { expected, actual } => write!(
                f,
                "Strings differ in text. Expected <{expected}>, but was <{actual}>."
            ),
            Self::Props { offset, text, diff } => write!(
                f,
                "Strings differ in format of <{text}> at offset {offset}. {diff}"
            ),
        }
    }
}

/// Compares two optional strings, ignoring run splits and normalization form.
///
/// The whole texts are decomposed to NFD and compared, so canonical reordering across run
/// boundaries does not count as a difference. When the texts agree, both strings are
/// normalized run by run, re-segmented at the union of their run boundaries and the
/// properties of each segment compared with [`compare_with`], so the first property difference
/// in text order is reported.
pub fn strings_are_equal(
    expected: Option<&RichString>,
    actual: Option<&RichString>,
    wiggle: &WiggleRoom,
) -> StringDiff {
    let (expected, actual) = match (expected, actual) {
        (None, None) => return StringDiff::BothAbsent,
        (None, Some(actual)) => {
            return StringDiff::ExpectedAbsent {
                actual: actual.text().to_string(),
            }
        }
        (Some(expected), None) => {
            return StringDiff::ActualAbsent {
                expected: expected.text().to_string(),
            }
        }
        (Some(expected), Some(actual)) => (expected, actual),
    };

    let expected_text = normalize(expected.text(), NormalizationForm::Nfd);
    let actual_text = normalize(actual.text(), NormalizationForm::Nfd);
    if expected_text != actual_text {
        return StringDiff::Text {
            expected: expected_text.into_owned(),
            actual: actual_text.into_owned(),
        };
    }

    let expected = expected.normalized(NormalizationForm::Nfd);
    let actual = actual.normalized(NormalizationForm::Nfd);

    for segment in CommonSegments::new(&expected, &actual) {
        let diff = compare_with(segment.first, segment.second, wiggle);
        if !diff.is_same() {
            return StringDiff::Props {
                offset: segment.range.start,
                text: expected
                    .text()
                    .get(segment.range)
                    .unwrap_or_default()
                    .to_string(),
                diff,
            };
        }
    }
    StringDiff::Same
}
