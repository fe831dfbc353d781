// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Writing system registry.
//!
//! Every run of rich text names its writing system by a [`WsHandle`], a small integer that is
//! only meaningful within one [`Registry`]. The registry interns canonical language tags to
//! handles, creates [`WritingSystemDefinition`]s on demand from [`LanguageMetadata`], and
//! persists definitions, keyed by tag, to a directory of XML files.
//!
//! Handles are stable for the life of a registry but not across registries: code that stores
//! text must store tags and re-resolve them after loading.
//!
//! ## Example
//!
//! ```
//! use writing_systems::{Registry, RegistryConfig};
//!
//! let registry = Registry::new(RegistryConfig::in_memory());
//! let en = registry.get_or_create_handle("en").unwrap();
//! assert_eq!(registry.handle_to_tag(en).as_deref(), Some("en"));
//!
//! // The script subtag is implied for English, so this is the same writing system.
//! let (handle, def, was_preexisting) = registry.get_or_create_definition("en-Latn").unwrap();
//! assert_eq!(handle, en);
//! assert!(was_preexisting);
//! assert_eq!(def.abbreviation, "Eng");
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

mod config;
mod definition;
mod error;
mod handle_table;
mod lookup;
mod metadata;
mod registry;
pub mod spelling;
mod store;

pub use config::{ExtensionPolicy, RegistryConfig, DEFAULT_FONT};
pub use definition::{
    CharacterSet, Collation, MatchedPair, WritingSystemDefinition, AUDIO_PRIVATE_USE,
    UNLISTED_LANGUAGE,
};
pub use error::{RegistryError, StoreError};
pub use handle_table::HandleTable;
pub use lookup::{PrefixLookup, PrefixPreference, PrivacyRule, PrivateUseTags};
pub use metadata::{BuiltinMetadata, LanguageInfo, LanguageMetadata};
pub use registry::{EntryState, Registry, RegistrySnapshot};

pub use lang_primitives::{LanguageTag, ParseLanguageTagError, Script, WsHandle};
