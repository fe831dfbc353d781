// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich strings, their builder and string equality.

use rich_text::{
    strings_are_equal, EditErrorKind, NormalizationForm, ObjDataKind, ObjectRef, RichString,
    RichStringBuilder, OBJECT_REPLACEMENT_CHAR,
};
use text_props::{IntPropType, PropVariant, WiggleRoom};
use uuid::Uuid;
use writing_systems::WsHandle;

use crate::util::{assert_runs_cover, styled};

fn ws() -> WsHandle {
    WsHandle::new(1).unwrap()
}

fn hello_world() -> RichStringBuilder {
    let mut builder = RichStringBuilder::new();
    builder
        .append("Hello ", &styled("a", ws()))
        .append("world", &styled("b", ws()));
    builder
}

#[test]
fn strings_replace_length_and_coverage() {
    let mut builder = hello_world();
    let before = builder.len();
    for (range, text) in [(0..5, "Goodbye"), (3..9, ""), (2..2, "xyz"), (0..0, "")] {
        let len = builder.len();
        builder.replace(range.clone(), text, None).unwrap();
        assert_eq!(builder.len(), len - range.len() + text.len());
        assert_runs_cover(&builder.build());
    }
    assert_ne!(builder.len(), before);
}

#[test]
fn strings_replace_inherits_preceding_props() {
    let mut builder = hello_world();
    builder.replace(11..11, "!", None).unwrap();
    let s = builder.build();
    assert_eq!(s.run_count(), 2);
    assert_eq!(s.run_text(1), Some("world!"));

    let mut builder = hello_world();
    builder.replace(0..0, ">", None).unwrap();
    assert_eq!(builder.build().run_text(0), Some(">Hello "));
}

#[test]
fn strings_bad_ranges_are_rejected() {
    let mut builder = RichStringBuilder::new();
    builder.append("caf\u{e9}", &styled("a", ws()));
    let (start, end) = (3, 1);
    let reversed = builder.replace(start..end, "x", None).unwrap_err();
    assert_eq!(reversed.kind(), EditErrorKind::Reversed);
    let out_of_bounds = builder.replace(0..10, "x", None).unwrap_err();
    assert_eq!(out_of_bounds.kind(), EditErrorKind::OutOfBounds);
    let split = builder.replace(4..5, "x", None).unwrap_err();
    assert_eq!(
        split.kind(),
        EditErrorKind::SplitsCharacter {
            offset: 4,
            char_start: 3,
            char_end: 5,
        }
    );
    assert_eq!(builder.text(), "caf\u{e9}");
}

#[test]
fn strings_builder_is_reusable_after_build() {
    let mut builder = hello_world();
    let first = builder.build();
    builder
        .set_int_prop(0..5, IntPropType::BOLD, PropVariant::TOGGLE, 1)
        .unwrap();
    let second = builder.build();
    assert_eq!(first.run_count(), 2);
    assert_eq!(second.run_count(), 3);
    assert_eq!(first.text(), second.text());
    assert!(!strings_are_equal(Some(&first), Some(&second), &WiggleRoom::new()).is_same());
}

#[test]
fn strings_to_builder_round_trip() {
    let s = hello_world().build();
    assert_eq!(s.to_builder().build(), s);
    assert_rich_eq!(s, s.normalized(NormalizationForm::Nfc));
}

#[test]
fn strings_null_comparisons() {
    let s = hello_world().build();
    let wiggle = WiggleRoom::new();
    assert_eq!(strings_are_equal(None, None, &wiggle).to_string(), "Both strings are null.");
    assert_eq!(
        strings_are_equal(Some(&s), None, &wiggle).to_string(),
        "Expected <Hello world>, but was a null string."
    );
    assert_eq!(
        strings_are_equal(None, Some(&s), &wiggle).to_string(),
        "Expected a null string, but was <Hello world>."
    );
}

#[test]
fn strings_normalization_queries_do_not_mutate() {
    let s = RichString::from_text("re\u{301}sume\u{301}", &styled("a", ws()));
    assert!(s.is_normalized(NormalizationForm::Nfd));
    assert!(!s.is_normalized(NormalizationForm::Nfc));
    let nfc = s.normalized(NormalizationForm::Nfc);
    assert_eq!(nfc.text(), "r\u{e9}sum\u{e9}");
    assert_eq!(s.text(), "re\u{301}sume\u{301}");
    assert_rich_eq!(s, nfc);
}

#[test]
fn strings_object_refs_are_found_by_properties() {
    let guid = Uuid::from_u128(0xfeed);
    let mut builder = RichStringBuilder::new();
    let mut buf = [0_u8; 4];
    builder.append(OBJECT_REPLACEMENT_CHAR.encode_utf8(&mut buf), &styled("a", ws()));
    builder
        .insert_object_ref(0, ObjectRef::new(ObjDataKind::GuidMoveableObjDisp, guid), ws())
        .unwrap();
    let s = builder.build();
    let refs: Vec<_> = s.object_refs().collect();
    assert_eq!(refs, [(0, ObjectRef::new(ObjDataKind::GuidMoveableObjDisp, guid))]);
    assert_eq!(s.run(1).and_then(|run| run.object_ref()), None);
}
