// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Patterns for storing domain values in rich text and in model properties.
//!
//! - [`MatchCriteria`] encodes a filter cell as a [`RichString`](rich_text::RichString), with
//!   the target object embedded as an object reference marker, and parses it back.
//! - [`set_value_from_bool`] and [`get_bool_value`] store a logical boolean in a field that
//!   the model may declare as either a boolean or an integer.
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

mod criteria;
mod int_bool;

pub use crate::criteria::{
    ComparisonType, CriteriaError, IntComparison, MatchCriteria, ObjectHierarchy,
};
pub use crate::int_bool::{get_bool_value, set_value_from_bool, DataAccess, FieldType};
