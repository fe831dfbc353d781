// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aligning the runs of two strings.
//!
//! Two strings with the same text may split it into runs differently. [`CommonSegments`]
//! re-segments both at the union of their run boundaries, so each yielded segment lies within
//! exactly one run of each string.

use alloc::vec::Vec;
use core::ops::Range;

use text_props::TextProps;

use crate::{RichString, Run};

/// A segment lying within one run of each of two strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonSegment<'a> {
    /// The byte range of the segment.
    pub range: Range<usize>,
    /// Properties of the first string over the segment.
    pub first: &'a TextProps,
    /// Properties of the second string over the segment.
    pub second: &'a TextProps,
}

/// Iterator over the [`CommonSegment`]s of two strings.
///
/// Stops at the end of the shorter string.
#[derive(Clone, Debug)]
pub struct CommonSegments<'a> {
    first: &'a [Run],
    second: &'a [Run],
    boundaries: Vec<usize>,
    index: usize,
    first_ix: usize,
    second_ix: usize,
}

impl<'a> CommonSegments<'a> {
    /// Aligns the runs of `first` and `second`.
    pub fn new(first: &'a RichString, second: &'a RichString) -> Self {
        let len = first.len().min(second.len());
        let mut boundaries = Vec::with_capacity(first.run_count() + second.run_count() + 1);
        boundaries.push(0);
        for run in first.runs().iter().chain(second.runs()) {
            if run.end() <= len {
                boundaries.push(run.end());
            }
        }
        boundaries.push(len);
        boundaries.sort_unstable();
        boundaries.dedup();
        Self {
            first: first.runs(),
            second: second.runs(),
            boundaries,
            index: 0,
            first_ix: 0,
            second_ix: 0,
        }
    }
}

impl<'a> Iterator for CommonSegments<'a> {
    type Item = CommonSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = *self.boundaries.get(self.index)?;
        let end = *self.boundaries.get(self.index + 1)?;
        self.index += 1;
        while self.first.get(self.first_ix)?.end() <= start {
            self.first_ix += 1;
        }
        while self.second.get(self.second_ix)?.end() <= start {
            self.second_ix += 1;
        }
        Some(CommonSegment {
            range: start..end,
            first: self.first[self.first_ix].props(),
            second: self.second[self.second_ix].props(),
        })
    }
}
