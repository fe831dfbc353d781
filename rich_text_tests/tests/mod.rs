// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `rich_text` and `writing_systems`.
//!
//! - The `util` module contains shared helpers: a registry fixture and assertions that
//!   report differences with the same messages applications see.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so the helpers are compiled once.
//! - Put new tests into the module for their topic and start the test name with the topic,
//!   e.g. `registry_reload_keeps_handles` rather than `reload_keeps_registry_handles`.
//! - End-to-end flows that cross crates go into `scenarios.rs`.

#![allow(missing_docs, reason = "we don't need docs for testing")]

#[macro_use]
mod util;

mod scenarios;
mod strings;
