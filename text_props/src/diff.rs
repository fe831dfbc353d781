// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explaining the difference between two property sets.

use alloc::sync::Arc;
use core::fmt;

use smallvec::SmallVec;

use crate::{IntPropType, IntPropValue, StrPropType, TextProps};

/// The first difference found between an expected and an actual [`TextProps`].
///
/// The [`Display`](fmt::Display) form is the human-readable explanation, and is stable so that
/// test assertions can match on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropsDiff {
    /// No difference.
    Same,
    /// The sets hold different numbers of integer properties.
    IntCount {
        /// Count in the expected set.
        expected: usize,
        /// Count in the actual set.
        actual: usize,
    },
    /// The sets hold different numbers of string properties.
    StrCount {
        /// Count in the expected set.
        expected: usize,
        /// Count in the actual set.
        actual: usize,
    },
    /// An integer property differs in value or variant, or is missing from the actual set.
    Int {
        /// The property type.
        prop: IntPropType,
        /// The expected value.
        expected: IntPropValue,
        /// The actual value, or `None` if unset.
        actual: Option<IntPropValue>,
    },
    /// A string property differs, or is missing from the actual set.
    Str {
        /// The property type.
        prop: StrPropType,
        /// The expected value.
        expected: Arc<str>,
        /// The actual value, or `None` if unset.
        actual: Option<Arc<str>>,
    },
}

impl PropsDiff {
    /// Returns `true` if no difference was found.
    #[must_use]
    pub fn is_same(&self) -> bool {
        matches!(self, Self::Same)
    }
}

impl fmt::Display for PropsDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Same => f.write_str("TextProps objects appear to contain the same properties."),
            Self::IntCount { expected, actual } => write!(
                f,
                "Props differ in count of intProps. Expected <{expected}>, but was <{actual}>."
            ),
            Self::StrCount { expected, actual } => write!(
                f,
                "Props differ in count of strProps. Expected <{expected}>, but was <{actual}>."
            ),
            Self::Int {
                prop,
                expected,
                actual,
            } => match prop.diff_name() {
                Some(name) if *prop == IntPropType::WS => {
                    write!(
                        f,
                        "Props differ in {name} property. Expected ws <{}> and var <{}>, but was ",
                        expected.value, expected.variant
                    )?;
                    match actual {
                        Some(actual) => {
                            write!(f, "ws <{}> and var <{}>.", actual.value, actual.variant)
                        }
                        None => f.write_str("<unset>."),
                    }
                }
                Some(name) => {
                    write!(f, "Props differ in {name} property. Expected <{expected}>, but was ")?;
                    write_actual(f, actual.as_ref())
                }
                None => {
                    write!(f, "Props differ in intProp type {prop}. Expected <{expected}>, but was ")?;
                    write_actual(f, actual.as_ref())
                }
            },
            Self::Str {
                prop,
                expected,
                actual,
            } => {
                match prop.diff_name() {
                    Some(name) => write!(f, "Props differ in {name} property. ")?,
                    None => write!(f, "Props differ in strProp type {prop}. ")?,
                }
                write!(f, "Expected <{expected}>, but was ")?;
                write_actual(f, actual.as_deref())
            }
        }
    }
}

fn write_actual<T: fmt::Display + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    actual: Option<&T>,
) -> fmt::Result {
    match actual {
        Some(actual) => write!(f, "<{actual}>."),
        None => f.write_str("<unset>."),
    }
}

/// Per-property tolerances for integer values in [`compare_with`].
///
/// Useful when comparing against values that went through lossy unit conversions, such as
/// font sizes derived from a different resolution.
#[derive(Clone, Debug, Default)]
pub struct WiggleRoom {
    allowances: SmallVec<[(IntPropType, u32); 2]>,
}

impl WiggleRoom {
    /// Creates an empty set of tolerances: every value must match exactly.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows values of `prop` to differ by up to `delta`.
    #[must_use]
    pub fn allow(mut self, prop: IntPropType, delta: u32) -> Self {
        match self.allowances.iter_mut().find(|(p, _)| *p == prop) {
            Some(entry) => entry.1 = delta,
            None => self.allowances.push((prop, delta)),
        }
        self
    }

    /// Returns the tolerance for `prop`.
    #[must_use]
    pub fn tolerance(&self, prop: IntPropType) -> u32 {
        self.allowances
            .iter()
            .find(|(p, _)| *p == prop)
            .map_or(0, |(_, d)| *d)
    }

    /// Returns `true` if no tolerances are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowances.is_empty()
    }

    fn accepts(&self, prop: IntPropType, expected: IntPropValue, actual: IntPropValue) -> bool {
        expected.variant == actual.variant
            && expected.value.abs_diff(actual.value) <= self.tolerance(prop)
    }
}

/// Finds the first difference between `expected` and `actual`.
///
/// Counts are checked first (integer, then string), and only when both agree are values
/// compared: integer properties in ascending type order, then string properties.
#[must_use]
pub fn compare(expected: &TextProps, actual: &TextProps) -> PropsDiff {
    compare_with(expected, actual, &WiggleRoom::new())
}

/// Like [`compare`], allowing integer values to differ within the tolerances of `wiggle`.
///
/// Variants must always match, and string properties are compared exactly.
#[must_use]
pub fn compare_with(expected: &TextProps, actual: &TextProps, wiggle: &WiggleRoom) -> PropsDiff {
    if expected.int_prop_count() != actual.int_prop_count() {
        return PropsDiff::IntCount {
            expected: expected.int_prop_count(),
            actual: actual.int_prop_count(),
        };
    }
    if expected.str_prop_count() != actual.str_prop_count() {
        return PropsDiff::StrCount {
            expected: expected.str_prop_count(),
            actual: actual.str_prop_count(),
        };
    }

    for &(prop, value) in expected.int_entries() {
        let other = actual.int_prop(prop);
        let matches = other.is_some_and(|other| wiggle.accepts(prop, value, other));
        if !matches {
            return PropsDiff::Int {
                prop,
                expected: value,
                actual: other,
            };
        }
    }

    for (prop, value) in expected.str_entries() {
        let prop = *prop;
        let other = actual
            .str_entries()
            .binary_search_by_key(&prop, |(p, _)| *p)
            .ok()
            .map(|ix| actual.str_entries()[ix].1.clone());
        if other.as_deref() != Some(&**value) {
            return PropsDiff::Str {
                prop,
                expected: value.clone(),
                actual: other,
            };
        }
    }

    PropsDiff::Same
}
