// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use text_props::TextProps;

use crate::ObjectRef;

/// A maximal span of a [`RichString`](crate::RichString) sharing one property set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Run {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) props: TextProps,
}

impl Run {
    pub(crate) fn new(start: usize, end: usize, props: TextProps) -> Self {
        debug_assert!(start < end, "runs are never empty ({start}..{end})");
        Self { start, end, props }
    }

    /// The start byte offset.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end byte offset (exclusive).
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The byte range covered by this run.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The length of this run in bytes.
    #[expect(
        clippy::len_without_is_empty,
        reason = "runs are never empty by construction"
    )]
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The properties of this run.
    #[inline]
    pub fn props(&self) -> &TextProps {
        &self.props
    }

    /// The object reference this run carries, if it is an object marker.
    pub fn object_ref(&self) -> Option<ObjectRef> {
        ObjectRef::from_props(&self.props)
    }
}
