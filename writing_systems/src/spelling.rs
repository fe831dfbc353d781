// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interface to a spell-checking service and dictionary selection.
//!
//! Dictionaries themselves are managed elsewhere. A [`WritingSystemDefinition`] only names the
//! dictionary it wants through its `spell_checking_id`, and [`select_dictionary`] resolves that
//! name against what is installed.

use crate::{PrefixLookup, PrefixPreference, WritingSystemDefinition};

/// A spelling dictionary.
pub trait SpellChecker {
    /// Returns `true` if `word` is spelled correctly. Matching is case-sensitive.
    fn check(&self, word: &str) -> bool;

    /// Marks `word` as correct or incorrect.
    fn set_status(&mut self, word: &str, correct: bool);

    /// Returns replacement suggestions for `word`, best first.
    fn suggest(&self, word: &str) -> Vec<String>;
}

/// An installed dictionary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryInfo {
    /// Dictionary identifier.
    pub id: String,
    /// Whether the dictionary belongs to one project rather than being shared.
    pub private: bool,
}

/// Finds the dictionary for `id` among `available`.
///
/// An exact identifier match is always returned. A shorter `id` matches a unique dictionary
/// whose identifier extends it, but never a private one.
pub fn select_dictionary<'a>(
    available: &'a [DictionaryInfo],
    id: &str,
) -> Option<&'a DictionaryInfo> {
    let is_private = |candidate: &str| available.iter().any(|d| d.private && d.id == candidate);
    let lookup = PrefixLookup::new(is_private, PrefixPreference::PublicOnly);
    let found = lookup.resolve(id, available.iter().map(|d| d.id.as_str()))?;
    available.iter().find(|d| d.id == found)
}

/// Finds the dictionary for a writing system, if it names one.
pub fn dictionary_for<'a>(
    definition: &WritingSystemDefinition,
    available: &'a [DictionaryInfo],
) -> Option<&'a DictionaryInfo> {
    let id = definition.spell_checking_id.as_deref()?;
    select_dictionary(available, id)
}
