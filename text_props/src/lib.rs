// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text property sets.
//!
//! A [`TextProps`] is the formatting attached to a run of rich text: an ordered set of integer
//! properties (each a value plus a [`PropVariant`]) and an ordered set of string properties,
//! keyed by [`IntPropType`] and [`StrPropType`]. Sets are immutable and cheap to clone; the
//! only way to make one is through a [`TextPropsBuilder`].
//!
//! [`compare`] explains the first difference between two sets in a stable, human-readable
//! form, which is what test assertions over stored text are built on.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use lang_primitives::WsHandle;
//! use text_props::{compare, IntPropType, PropVariant, TextProps, TextPropsBuilder};
//!
//! let ws = WsHandle::new(7).unwrap();
//! let expected = TextProps::make(Some("Emphasis"), ws);
//!
//! let mut builder = expected.to_builder();
//! builder.set_int(IntPropType::BACK_COLOR, PropVariant::DEFAULT, 98);
//! let actual = builder.build();
//!
//! assert_eq!(
//!     compare(&expected, &actual).to_string(),
//!     "Props differ in count of intProps. Expected <1>, but was <2>."
//! );
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod builder;
mod diff;
mod prop_type;
mod props;

pub use builder::TextPropsBuilder;
pub use diff::{compare, compare_with, PropsDiff, WiggleRoom};
pub use prop_type::{IntPropType, PropVariant, StrPropType};
pub use props::{IntPropValue, TextProps};
