// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use text_props::TextProps;

use crate::error::validate_range;
use crate::normalization::{is_normalized, normalize};
use crate::{EditError, NormalizationForm, ObjectRef, RichStringBuilder, Run};

/// An immutable string of text partitioned into property-carrying runs.
///
/// Runs are contiguous and non-overlapping, the first starts at `0` and the last ends at
/// [`len`](Self::len); an empty string has no runs. Cloning is a pair of reference count
/// increments.
///
/// `==` compares text and run structure exactly. For comparison that ignores how runs are
/// split and which normalization form the text is in, see
/// [`strings_are_equal`](crate::strings_are_equal).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct RichString {
    text: Arc<str>,
    runs: Arc<[Run]>,
}

impl RichString {
    /// Returns the empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a string holding `text` in a single run with `props`.
    #[must_use]
    pub fn from_text(text: &str, props: &TextProps) -> Self {
        let mut builder = RichStringBuilder::new();
        builder.append(text, props);
        builder.build()
    }

    pub(crate) fn from_parts(text: &str, runs: &[Run]) -> Self {
        debug_assert!(
            runs.first().map_or(text.is_empty(), |r| r.start == 0)
                && runs.last().map_or(true, |r| r.end == text.len())
                && runs.windows(2).all(|w| w[0].end == w[1].start),
            "runs must cover the text contiguously"
        );
        Self {
            text: text.into(),
            runs: runs.into(),
        }
    }

    /// Returns the text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the length of the text, in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of runs.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Returns the runs in text order.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Returns the run at `index`.
    pub fn run(&self, index: usize) -> Option<&Run> {
        self.runs.get(index)
    }

    /// Returns the text of the run at `index`.
    pub fn run_text(&self, index: usize) -> Option<&str> {
        self.runs.get(index).map(|run| &self.text[run.range()])
    }

    /// Returns the properties of the run at `index`.
    pub fn properties(&self, index: usize) -> Option<&TextProps> {
        self.runs.get(index).map(Run::props)
    }

    /// Returns the index of the run containing the byte at `offset`.
    ///
    /// An offset equal to the length resolves to the last run. Returns `None` for an empty
    /// string or an offset past the end.
    pub fn run_at(&self, offset: usize) -> Option<usize> {
        if offset > self.len() || self.runs.is_empty() {
            return None;
        }
        let ix = self.runs.partition_point(|run| run.end <= offset);
        Some(ix.min(self.runs.len() - 1))
    }

    /// Returns the properties in effect at `offset`, as resolved by [`run_at`](Self::run_at).
    pub fn props_at(&self, offset: usize) -> Option<&TextProps> {
        self.run_at(offset).and_then(|ix| self.properties(ix))
    }

    /// Returns the sub-string covering `range`, keeping run properties.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, EditError> {
        validate_range(&self.text, &range)?;
        let runs: Vec<Run> = self
            .runs
            .iter()
            .filter(|run| run.end > range.start && run.start < range.end)
            .map(|run| {
                Run::new(
                    run.start.max(range.start) - range.start,
                    run.end.min(range.end) - range.start,
                    run.props.clone(),
                )
            })
            .collect();
        Ok(Self::from_parts(&self.text[range], &runs))
    }

    /// Returns a builder seeded with this string.
    pub fn to_builder(&self) -> RichStringBuilder {
        RichStringBuilder::from(self)
    }

    /// Returns `true` if the text is in normalization form `form`.
    pub fn is_normalized(&self, form: NormalizationForm) -> bool {
        is_normalized(&self.text, form)
    }

    /// Returns this string with its text converted to normalization form `form`.
    ///
    /// Each run is normalized on its own, so run boundaries and properties carry over.
    /// Normalization can reorder combining marks only within a run.
    pub fn normalized(&self, form: NormalizationForm) -> Self {
        if self.is_normalized(form) {
            return self.clone();
        }
        let mut text = String::with_capacity(self.len());
        let mut runs = Vec::with_capacity(self.runs.len());
        for run in self.runs.iter() {
            let start = text.len();
            match normalize(&self.text[run.range()], form) {
                Cow::Borrowed(s) => text.push_str(s),
                Cow::Owned(s) => text.push_str(&s),
            }
            runs.push(Run::new(start, text.len(), run.props.clone()));
        }
        Self::from_parts(&text, &runs)
    }

    /// Iterates over the object references in this string with their byte offsets.
    pub fn object_refs(&self) -> impl Iterator<Item = (usize, ObjectRef)> + '_ {
        self.runs
            .iter()
            .filter_map(|run| run.object_ref().map(|obj| (run.start, obj)))
    }
}

impl fmt::Debug for RichString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichString")
            .field("text", &&*self.text)
            .field("runs", &&*self.runs)
            .finish()
    }
}

impl fmt::Display for RichString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
