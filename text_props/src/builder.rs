// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;

use crate::props::{IntEntries, StrEntries};
use crate::{IntPropType, IntPropValue, PropVariant, StrPropType, TextProps};

/// The mutable form of a [`TextProps`].
///
/// Setters overwrite any previous value of the same type. [`build`](Self::build) takes a
/// snapshot; the builder stays usable and later edits never reach sets it already produced.
#[derive(Clone, Debug, Default)]
pub struct TextPropsBuilder {
    ints: IntEntries,
    strs: StrEntries,
}

impl TextPropsBuilder {
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(ints: IntEntries, strs: StrEntries) -> Self {
        Self { ints, strs }
    }

    /// Sets an integer property.
    pub fn set_int(&mut self, prop: IntPropType, variant: PropVariant, value: i32) -> &mut Self {
        let entry = IntPropValue::new(variant, value);
        match self.ints.binary_search_by_key(&prop, |(p, _)| *p) {
            Ok(ix) => self.ints[ix].1 = entry,
            Err(ix) => self.ints.insert(ix, (prop, entry)),
        }
        self
    }

    /// Sets a string property.
    pub fn set_str(&mut self, prop: StrPropType, value: &str) -> &mut Self {
        let value: Arc<str> = value.into();
        match self.strs.binary_search_by_key(&prop, |(p, _)| *p) {
            Ok(ix) => self.strs[ix].1 = value,
            Err(ix) => self.strs.insert(ix, (prop, value)),
        }
        self
    }

    /// Removes an integer property, returning its previous value.
    pub fn clear_int(&mut self, prop: IntPropType) -> Option<IntPropValue> {
        let ix = self.ints.binary_search_by_key(&prop, |(p, _)| *p).ok()?;
        Some(self.ints.remove(ix).1)
    }

    /// Removes a string property, returning whether it was set.
    pub fn clear_str(&mut self, prop: StrPropType) -> bool {
        match self.strs.binary_search_by_key(&prop, |(p, _)| *p) {
            Ok(ix) => {
                self.strs.remove(ix);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns the integer property of type `prop` as currently set.
    pub fn int_prop(&self, prop: IntPropType) -> Option<IntPropValue> {
        self.ints
            .binary_search_by_key(&prop, |(p, _)| *p)
            .ok()
            .map(|ix| self.ints[ix].1)
    }

    /// Returns the string property of type `prop` as currently set.
    pub fn str_prop(&self, prop: StrPropType) -> Option<&str> {
        self.strs
            .binary_search_by_key(&prop, |(p, _)| *p)
            .ok()
            .map(|ix| &*self.strs[ix].1)
    }

    /// Removes every property.
    pub fn clear(&mut self) {
        self.ints.clear();
        self.strs.clear();
    }

    /// Returns an immutable snapshot of the current properties.
    pub fn build(&self) -> TextProps {
        TextProps::from_entries(self.ints.clone(), self.strs.clone())
    }
}
