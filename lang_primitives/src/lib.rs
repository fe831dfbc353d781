// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Language tag and writing system handle primitives.
//!
//! This crate is the `no_std` vocabulary layer shared by the rich text and writing system
//! crates: a canonicalizing parser for the subset of BCP 47 that writing systems are keyed by,
//! ISO 15924 scripts, and the small integer handle that text properties embed.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use lang_primitives::{LanguageTag, Script};
//!
//! let tag = LanguageTag::parse("EN-latn-us-FONIPA").unwrap();
//! assert_eq!(tag.to_string(), "en-Latn-US-fonipa");
//! assert_eq!(tag.script(), Some(Script::LATIN));
//! assert_eq!(tag.region(), Some("US"));
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

#[cfg(test)]
extern crate alloc;

mod handle;
mod language_tag;
mod script;
mod subtag;

pub use handle::WsHandle;
pub use language_tag::{LanguageTag, ParseLanguageTagError};
pub use script::{ParseScriptError, Script};
pub use subtag::Subtag;
