// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich text strings.
//!
//! A [`RichString`] is an immutable text buffer partitioned into [`Run`]s, each carrying a
//! [`TextProps`](text_props::TextProps). Runs are contiguous and cover the whole text: the first
//! starts at `0`, the last ends at the text length, and an empty string has no runs.
//! Strings are only made by a [`RichStringBuilder`], which supports replacing any range of
//! text while keeping the runs around the edit intact.
//!
//! ## Indices
//!
//! All offsets are **byte indices** into UTF-8 text and must lie on character boundaries.
//! Edits with ranges that are reversed, out of bounds or inside a character fail with an
//! [`EditError`]; they are never clamped.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use lang_primitives::WsHandle;
//! use rich_text::{NormalizationForm, RichStringBuilder};
//! use text_props::TextProps;
//!
//! let ws = WsHandle::new(1).unwrap();
//! let plain = TextProps::make(None, ws);
//! let strong = TextProps::make(Some("Strong"), ws);
//!
//! let mut builder = RichStringBuilder::new();
//! builder.append("Hello world", &plain);
//! builder.set_properties(6..11, &strong).unwrap();
//! let string = builder.build();
//!
//! assert_eq!(string.run_count(), 2);
//! assert_eq!(string.run_text(1), Some("world"));
//! assert!(string.is_normalized(NormalizationForm::Nfd));
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
mod equality;
mod error;
mod normalization;
mod object_ref;
mod rich_string;
mod run;
mod segments;

pub use crate::builder::RichStringBuilder;
pub use crate::equality::{strings_are_equal, StringDiff};
pub use crate::error::{EditError, EditErrorKind};
pub use crate::normalization::NormalizationForm;
pub use crate::object_ref::{ObjDataKind, ObjectRef, OBJECT_REPLACEMENT_CHAR};
pub use crate::rich_string::RichString;
pub use crate::run::Run;
pub use crate::segments::{CommonSegment, CommonSegments};
