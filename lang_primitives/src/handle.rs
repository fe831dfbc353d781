// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::num::NonZeroU32;

/// Handle identifying a registered writing system.
///
/// Handles are small positive integers allocated by a writing system registry. They are stable
/// for the life of that registry but carry no meaning outside it; persisted data refers to
/// writing systems by language tag instead.
///
/// The raw value `0` means "no writing system" and is not representable by this type. Every
/// handle also fits in the signed integer slot of a text property.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WsHandle(NonZeroU32);

impl WsHandle {
    /// The first handle a registry allocates.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Largest raw value a handle can take.
    pub const MAX_RAW: u32 = i32::MAX as u32;

    /// Creates a handle from its raw value, or `None` for `0` or values above [`Self::MAX_RAW`].
    #[must_use]
    pub const fn new(raw: u32) -> Option<Self> {
        if raw > Self::MAX_RAW {
            return None;
        }
        match NonZeroU32::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Returns the raw value.
    #[must_use]
    #[inline(always)]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the raw value of `handle`, or `0` when there is none.
    #[must_use]
    pub const fn raw_or_zero(handle: Option<Self>) -> u32 {
        match handle {
            Some(handle) => handle.get(),
            None => 0,
        }
    }

    /// Returns the handle allocated after this one, if any remain.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.get() + 1)
    }

    /// Interprets a text property value as a handle.
    #[must_use]
    pub fn from_prop_value(value: i32) -> Option<Self> {
        u32::try_from(value).ok().and_then(Self::new)
    }

    /// Returns the value stored in a text property for this handle.
    #[must_use]
    pub fn to_prop_value(self) -> i32 {
        i32::try_from(self.get()).expect("handles never exceed i32::MAX")
    }
}

impl fmt::Debug for WsHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WsHandle").field(&self.get()).finish()
    }
}

impl fmt::Display for WsHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
