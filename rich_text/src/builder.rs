// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use lang_primitives::WsHandle;
use text_props::{IntPropType, PropVariant, StrPropType, TextProps};

use crate::error::validate_range;
use crate::{EditError, ObjectRef, RichString, Run, OBJECT_REPLACEMENT_CHAR};

/// The mutable form of a [`RichString`].
///
/// Every edit is a replacement of a byte range: the old text is removed, the new text is
/// inserted with its own properties, and the runs on either side of the edit are kept and
/// renumbered. Adjacent runs that end up with equal properties are merged.
///
/// [`build`](Self::build) takes a snapshot; the builder stays usable afterwards.
#[derive(Clone, Debug, Default)]
pub struct RichStringBuilder {
    text: String,
    runs: Vec<Run>,
}

impl RichStringBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the length of the current text, in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the current text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the current number of runs.
    #[inline]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Returns the current runs.
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Replaces the text in `range` with `text`.
    ///
    /// The new text gets `props`, or when `None`, the properties of the character before
    /// `range.start` (of the first character when replacing at the start; empty properties
    /// when the builder is empty). Replacing an empty range with empty text does nothing.
    pub fn replace(
        &mut self,
        range: Range<usize>,
        text: &str,
        props: Option<&TextProps>,
    ) -> Result<(), EditError> {
        validate_range(&self.text, &range)?;
        let props = match props {
            Some(props) => props.clone(),
            None => self.props_before(range.start),
        };
        let inserted = if text.is_empty() {
            Vec::new()
        } else {
            alloc::vec![Run::new(0, text.len(), props)]
        };
        self.splice(range, text, inserted);
        Ok(())
    }

    /// Replaces the text in `range` with the contents of `string`, keeping its runs.
    pub fn replace_with_string(
        &mut self,
        range: Range<usize>,
        string: &RichString,
    ) -> Result<(), EditError> {
        validate_range(&self.text, &range)?;
        self.splice(range, string.text(), string.runs().to_vec());
        Ok(())
    }

    /// Inserts `text` with `props` at `offset`.
    pub fn insert(
        &mut self,
        offset: usize,
        text: &str,
        props: &TextProps,
    ) -> Result<(), EditError> {
        self.replace(offset..offset, text, Some(props))
    }

    /// Appends `text` with `props`.
    pub fn append(&mut self, text: &str, props: &TextProps) -> &mut Self {
        let end = self.len();
        if !text.is_empty() {
            self.splice(end..end, text, alloc::vec![Run::new(0, text.len(), props.clone())]);
        }
        self
    }

    /// Appends the contents of `string`, keeping its runs.
    pub fn append_string(&mut self, string: &RichString) -> &mut Self {
        let end = self.len();
        self.splice(end..end, string.text(), string.runs().to_vec());
        self
    }

    /// Inserts an object reference marker at `offset` in writing system `ws`.
    pub fn insert_object_ref(
        &mut self,
        offset: usize,
        obj: ObjectRef,
        ws: WsHandle,
    ) -> Result<(), EditError> {
        let mut buf = [0_u8; 4];
        let marker = OBJECT_REPLACEMENT_CHAR.encode_utf8(&mut buf);
        self.insert(offset, marker, &obj.marker_props(ws))
    }

    /// Replaces the properties of the text in `range`.
    pub fn set_properties(
        &mut self,
        range: Range<usize>,
        props: &TextProps,
    ) -> Result<(), EditError> {
        self.update_properties(range, |_| props.clone())
    }

    /// Sets one integer property on all text in `range`, keeping the other properties.
    pub fn set_int_prop(
        &mut self,
        range: Range<usize>,
        prop: IntPropType,
        variant: PropVariant,
        value: i32,
    ) -> Result<(), EditError> {
        self.update_properties(range, |old| {
            let mut builder = old.to_builder();
            builder.set_int(prop, variant, value);
            builder.build()
        })
    }

    /// Sets one string property on all text in `range`, keeping the other properties.
    pub fn set_str_prop(
        &mut self,
        range: Range<usize>,
        prop: StrPropType,
        value: &str,
    ) -> Result<(), EditError> {
        self.update_properties(range, |old| {
            let mut builder = old.to_builder();
            builder.set_str(prop, value);
            builder.build()
        })
    }

    /// Removes all text and runs.
    pub fn clear(&mut self) {
        self.text.clear();
        self.runs.clear();
    }

    /// Returns an immutable snapshot of the current contents.
    pub fn build(&self) -> RichString {
        RichString::from_parts(&self.text, &self.runs)
    }

    fn props_before(&self, offset: usize) -> TextProps {
        let probe = offset.saturating_sub(1);
        self.runs
            .iter()
            .find(|run| run.end > probe)
            .or(self.runs.last())
            .map(|run| run.props.clone())
            .unwrap_or_default()
    }

    /// Replaces `range` (already validated) with `text`, whose runs are relative to its start.
    fn splice(&mut self, range: Range<usize>, text: &str, inserted: Vec<Run>) {
        if range.is_empty() && text.is_empty() {
            return;
        }
        let Range { start, end } = range;
        let shift = |offset: usize| offset - end + start + text.len();

        let mut before = Vec::with_capacity(self.runs.len() + inserted.len() + 1);
        let mut after = Vec::new();
        for run in self.runs.drain(..) {
            if run.start < start {
                before.push(Run::new(run.start, run.end.min(start), run.props.clone()));
            }
            if run.end > end {
                after.push(Run::new(shift(run.start.max(end)), shift(run.end), run.props));
            }
        }
        before.extend(
            inserted
                .into_iter()
                .map(|run| Run::new(run.start + start, run.end + start, run.props)),
        );
        before.append(&mut after);

        self.text.replace_range(start..end, text);
        self.runs = coalesce(before);
    }

    fn update_properties(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(&TextProps) -> TextProps,
    ) -> Result<(), EditError> {
        validate_range(&self.text, &range)?;
        if range.is_empty() {
            return Ok(());
        }
        self.split_at(range.start);
        self.split_at(range.end);
        for run in &mut self.runs {
            if run.start >= range.start && run.end <= range.end {
                run.props = f(&run.props);
            }
        }
        self.runs = coalesce(core::mem::take(&mut self.runs));
        Ok(())
    }

    /// Ensures a run boundary at `offset`.
    fn split_at(&mut self, offset: usize) {
        let Some(ix) = self
            .runs
            .iter()
            .position(|run| run.start < offset && offset < run.end)
        else {
            return;
        };
        let tail = Run::new(offset, self.runs[ix].end, self.runs[ix].props.clone());
        self.runs[ix].end = offset;
        self.runs.insert(ix + 1, tail);
    }
}

impl From<&RichString> for RichStringBuilder {
    fn from(string: &RichString) -> Self {
        Self {
            text: string.text().into(),
            runs: string.runs().to_vec(),
        }
    }
}

fn coalesce(runs: Vec<Run>) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs {
        match out.last_mut() {
            Some(last) if last.end == run.start && last.props == run.props => last.end = run.end,
            _ => out.push(run),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::RichStringBuilder;
    use crate::{EditErrorKind, ObjDataKind, ObjectRef, RichString, OBJECT_REPLACEMENT_CHAR};
    use alloc::vec::Vec;
    use lang_primitives::WsHandle;
    use text_props::{IntPropType, PropVariant, TextProps};
    use uuid::Uuid;

    fn ws() -> WsHandle {
        WsHandle::new(1).unwrap()
    }

    fn styled(style: &str) -> TextProps {
        TextProps::make(Some(style), ws())
    }

    fn ranges(s: &RichString) -> Vec<core::ops::Range<usize>> {
        s.runs().iter().map(|r| r.range()).collect()
    }

    #[test]
    fn replace_middle_of_run_splits_it() {
        let mut b = RichStringBuilder::new();
        b.append("abcdef", &styled("a"));
        b.replace(2..4, "XYZ", Some(&styled("b"))).unwrap();
        let s = b.build();
        assert_eq!(s.text(), "abXYZef");
        assert_eq!(ranges(&s), [0..2, 2..5, 5..7]);
        assert_eq!(s.properties(0), s.properties(2));
    }

    #[test]
    fn replace_spanning_runs_renumbers_tail() {
        let mut b = RichStringBuilder::new();
        b.append("aaa", &styled("a"))
            .append("bbb", &styled("b"))
            .append("ccc", &styled("c"));
        b.replace(2..7, "-", Some(&styled("x"))).unwrap();
        let s = b.build();
        assert_eq!(s.text(), "aa-cc");
        assert_eq!(ranges(&s), [0..2, 2..3, 3..5]);
        assert_eq!(s.properties(2), Some(&styled("c")));
    }

    #[test]
    fn replace_length_arithmetic() {
        let mut b = RichStringBuilder::new();
        b.append("Hello world", &styled("a"));
        let before = b.len();
        b.replace(0..5, "Goodbye", None).unwrap();
        assert_eq!(b.len(), before - 5 + 7);
        let s = b.build();
        assert_eq!(s.run_count(), 1);
        assert_eq!(s.run(0).map(|r| r.range()), Some(0..s.len()));
    }

    #[test]
    fn deleting_a_whole_run_merges_neighbors() {
        let mut b = RichStringBuilder::new();
        b.append("aa", &styled("a"))
            .append("bb", &styled("b"))
            .append("aa", &styled("a"));
        b.replace(2..4, "", None).unwrap();
        let s = b.build();
        assert_eq!(s.text(), "aaaa");
        assert_eq!(s.run_count(), 1);
    }

    #[test]
    fn none_props_inherit_from_previous_character() {
        let mut b = RichStringBuilder::new();
        b.append("aa", &styled("a")).append("bb", &styled("b"));
        b.replace(2..2, "!", None).unwrap();
        assert_eq!(b.build().props_at(2).and_then(TextProps::named_style), Some("a"));
        b.replace(0..0, "?", None).unwrap();
        assert_eq!(b.build().props_at(0).and_then(TextProps::named_style), Some("a"));

        let mut empty = RichStringBuilder::new();
        empty.replace(0..0, "x", None).unwrap();
        assert!(empty.build().properties(0).unwrap().is_empty());
    }

    #[test]
    fn none_props_inside_a_run_inherit_that_run() {
        let mut b = RichStringBuilder::new();
        b.append("aaaa", &styled("a")).append("bb", &styled("b"));
        b.replace(1..5, "XY", None).unwrap();
        let s = b.build();
        assert_eq!(s.text(), "aXYb");
        assert_eq!(ranges(&s), [0..3, 3..4]);
        assert_eq!(s.properties(0), Some(&styled("a")));
        assert_eq!(s.properties(1), Some(&styled("b")));

        b.replace(3..3, "zz", None).unwrap();
        b.replace(4..5, "", None).unwrap();
        let s = b.build();
        assert_eq!(s.text(), "aXYzb");
        assert_eq!(ranges(&s), [0..4, 4..5]);
    }

    #[test]
    fn empty_replace_is_a_no_op() {
        let mut b = RichStringBuilder::new();
        b.append("abc", &styled("a"));
        let before = b.build();
        b.replace(1..1, "", Some(&styled("b"))).unwrap();
        assert_eq!(b.build(), before);
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        let mut b = RichStringBuilder::new();
        b.append("h\u{e9}llo", &styled("a"));
        let before = b.build();
        let err = b.replace(2..3, "x", None).unwrap_err();
        assert!(matches!(err.kind(), EditErrorKind::SplitsCharacter { offset: 2, .. }));
        assert_eq!(
            b.replace(0..99, "x", None).unwrap_err().kind(),
            EditErrorKind::OutOfBounds
        );
        assert_eq!(b.build(), before);
    }

    #[test]
    fn builder_is_reusable_after_build() {
        let mut b = RichStringBuilder::new();
        b.append("one", &styled("a"));
        let first = b.build();
        b.append(" two", &styled("b"));
        let second = b.build();
        assert_eq!(first.text(), "one");
        assert_eq!(second.text(), "one two");
        assert_eq!(second.run_count(), 2);

        let mut seeded = second.to_builder();
        seeded.replace(0..3, "zero", None).unwrap();
        assert_eq!(seeded.build().text(), "zero two");
        assert_eq!(second.text(), "one two");
    }

    #[test]
    fn set_int_prop_splits_and_keeps_other_props() {
        let mut b = RichStringBuilder::new();
        b.append("abcdef", &styled("a"));
        b.set_int_prop(1..3, IntPropType::BOLD, PropVariant::TOGGLE, 1)
            .unwrap();
        let s = b.build();
        assert_eq!(ranges(&s), [0..1, 1..3, 3..6]);
        let mid = s.properties(1).unwrap();
        assert_eq!(mid.named_style(), Some("a"));
        assert_eq!(mid.int_prop(IntPropType::BOLD).map(|v| v.value), Some(1));
    }

    #[test]
    fn object_refs_are_found_by_properties() {
        let guid = Uuid::from_u128(42);
        let obj = ObjectRef::new(ObjDataKind::NameGuidHot, guid);
        let mut b = RichStringBuilder::new();
        b.append("Matches ", &TextProps::make(None, ws()))
            .append("\u{FFFC}", &TextProps::make(None, ws()));
        b.insert_object_ref(8, obj, ws()).unwrap();
        let s = b.build();
        let refs: Vec<_> = s.object_refs().collect();
        assert_eq!(refs, [(8, obj)]);
        assert_eq!(s.text().matches(OBJECT_REPLACEMENT_CHAR).count(), 2);
    }

    #[test]
    fn replace_with_string_keeps_runs() {
        let mut inner = RichStringBuilder::new();
        inner.append("X", &styled("x")).append("Y", &styled("y"));
        let inner = inner.build();

        let mut b = RichStringBuilder::new();
        b.append("abc", &styled("a"));
        b.replace_with_string(1..2, &inner).unwrap();
        let s = b.build();
        assert_eq!(s.text(), "aXYc");
        assert_eq!(ranges(&s), [0..1, 1..2, 2..3, 3..4]);
    }
}
