// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use core::fmt;

use lang_primitives::WsHandle;
use smallvec::SmallVec;

use crate::{IntPropType, PropVariant, StrPropType, TextPropsBuilder};

pub(crate) type IntEntries = SmallVec<[(IntPropType, IntPropValue); 4]>;
pub(crate) type StrEntries = SmallVec<[(StrPropType, Arc<str>); 2]>;

/// The value of an integer text property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntPropValue {
    /// The raw value.
    pub value: i32,
    /// How [`value`](Self::value) is interpreted.
    pub variant: PropVariant,
}

impl IntPropValue {
    /// Creates a value.
    #[must_use]
    pub const fn new(variant: PropVariant, value: i32) -> Self {
        Self { value, variant }
    }
}

impl fmt::Display for IntPropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.value, self.variant)
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
struct PropsData {
    ints: IntEntries,
    strs: StrEntries,
}

/// An immutable set of text properties.
///
/// Entries are held sorted by property type, so two sets built from the same properties are
/// equal regardless of the order the builder was given them in. Cloning is a reference count
/// increment.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TextProps {
    data: Arc<PropsData>,
}

impl TextProps {
    /// Returns the empty property set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical properties for text in writing system `ws` with an optional named
    /// style.
    #[must_use]
    pub fn make(style: Option<&str>, ws: WsHandle) -> Self {
        let mut builder = TextPropsBuilder::new();
        builder.set_int(IntPropType::WS, PropVariant::DEFAULT, ws.to_prop_value());
        if let Some(style) = style {
            builder.set_str(StrPropType::NAMED_STYLE, style);
        }
        builder.build()
    }

    pub(crate) fn from_entries(ints: IntEntries, strs: StrEntries) -> Self {
        Self {
            data: Arc::new(PropsData { ints, strs }),
        }
    }

    pub(crate) fn int_entries(&self) -> &[(IntPropType, IntPropValue)] {
        &self.data.ints
    }

    pub(crate) fn str_entries(&self) -> &[(StrPropType, Arc<str>)] {
        &self.data.strs
    }

    /// Returns a builder seeded with these properties.
    #[must_use]
    pub fn to_builder(&self) -> TextPropsBuilder {
        TextPropsBuilder::from_entries(self.data.ints.clone(), self.data.strs.clone())
    }

    /// Returns the integer property of type `prop`, if set.
    #[must_use]
    pub fn int_prop(&self, prop: IntPropType) -> Option<IntPropValue> {
        let ints = &self.data.ints;
        ints.binary_search_by_key(&prop, |(p, _)| *p)
            .ok()
            .map(|ix| ints[ix].1)
    }

    /// Returns the string property of type `prop`, if set.
    #[must_use]
    pub fn str_prop(&self, prop: StrPropType) -> Option<&str> {
        let strs = &self.data.strs;
        strs.binary_search_by_key(&prop, |(p, _)| *p)
            .ok()
            .map(|ix| &*strs[ix].1)
    }

    /// Returns the writing system the properties specify, if any.
    #[must_use]
    pub fn ws(&self) -> Option<WsHandle> {
        self.int_prop(IntPropType::WS)
            .and_then(|v| WsHandle::from_prop_value(v.value))
    }

    /// Returns the named style, if any.
    #[must_use]
    pub fn named_style(&self) -> Option<&str> {
        self.str_prop(StrPropType::NAMED_STYLE)
    }

    /// Returns the number of integer properties.
    #[must_use]
    pub fn int_prop_count(&self) -> usize {
        self.data.ints.len()
    }

    /// Returns the number of string properties.
    #[must_use]
    pub fn str_prop_count(&self) -> usize {
        self.data.strs.len()
    }

    /// Returns `true` if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.ints.is_empty() && self.data.strs.is_empty()
    }

    /// Iterates over the integer properties in ascending type order.
    pub fn int_props(&self) -> impl ExactSizeIterator<Item = (IntPropType, IntPropValue)> + '_ {
        self.data.ints.iter().copied()
    }

    /// Iterates over the string properties in ascending type order.
    pub fn str_props(&self) -> impl ExactSizeIterator<Item = (StrPropType, &str)> + '_ {
        self.data.strs.iter().map(|(p, s)| (*p, &**s))
    }
}

impl fmt::Debug for TextProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Ints<'a>(&'a TextProps);
        impl fmt::Debug for Ints<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map().entries(self.0.int_props()).finish()
            }
        }
        struct Strs<'a>(&'a TextProps);
        impl fmt::Debug for Strs<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map().entries(self.0.str_props()).finish()
            }
        }
        f.debug_struct("TextProps")
            .field("ints", &Ints(self))
            .field("strs", &Strs(self))
            .finish()
    }
}
