// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the integration tests.

use rich_text::{strings_are_equal, RichString};
use text_props::{compare, TextProps, WiggleRoom};
use writing_systems::{Registry, RegistryConfig, WsHandle};

/// Asserts that two rich strings are equal ignoring run splits and normalization form.
macro_rules! assert_rich_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::util::assert_strings_equal(Some(&$expected), Some(&$actual))
    };
}

/// Panics with the difference message unless the strings compare equal.
#[track_caller]
pub(crate) fn assert_strings_equal(expected: Option<&RichString>, actual: Option<&RichString>) {
    let diff = strings_are_equal(expected, actual, &WiggleRoom::new());
    assert!(diff.is_same(), "{diff}");
}

/// Panics with the difference message unless the property sets compare equal.
#[track_caller]
pub(crate) fn assert_props_equal(expected: &TextProps, actual: &TextProps) {
    let diff = compare(expected, actual);
    assert!(diff.is_same(), "{diff}");
}

/// Asserts that the runs of `string` are contiguous, start at `0` and end at its length.
#[track_caller]
pub(crate) fn assert_runs_cover(string: &RichString) {
    let mut expected_start = 0;
    for run in string.runs() {
        assert_eq!(run.start(), expected_start, "gap or overlap before {run:?}");
        assert!(run.start() < run.end(), "empty run {run:?}");
        expected_start = run.end();
    }
    assert_eq!(expected_start, string.len(), "runs do not reach the end");
}

/// Returns an in-memory registry.
pub(crate) fn registry() -> Registry {
    Registry::new(RegistryConfig::in_memory())
}

/// Returns properties with a named style and writing system.
pub(crate) fn styled(style: &str, ws: WsHandle) -> TextProps {
    TextProps::make(Some(style), ws)
}
