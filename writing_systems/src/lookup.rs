// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving a possibly abbreviated identifier against a set of candidates.

use lang_primitives::LanguageTag;

/// Decides whether an identifier is private to a project.
pub trait PrivacyRule {
    /// Returns `true` if `id` names a private entry.
    fn is_private(&self, id: &str) -> bool;
}

impl<F: Fn(&str) -> bool> PrivacyRule for F {
    fn is_private(&self, id: &str) -> bool {
        self(id)
    }
}

/// Treats a language tag as private if it has private-use subtags or a private-use primary
/// language (`qaa`–`qtz`).
#[derive(Clone, Copy, Debug, Default)]
pub struct PrivateUseTags;

impl PrivacyRule for PrivateUseTags {
    fn is_private(&self, id: &str) -> bool {
        LanguageTag::parse(id)
            .map(|tag| tag.has_private_use() || tag.is_private_use_language())
            .unwrap_or(false)
    }
}

/// Which candidates a prefix match may return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrefixPreference {
    /// Only private candidates.
    #[default]
    PrivateOnly,
    /// Only public candidates.
    PublicOnly,
    /// Any candidate.
    Any,
}

/// Lookup that prefers an exact match and otherwise accepts a unique prefix match.
#[derive(Clone, Debug)]
pub struct PrefixLookup<R> {
    rule: R,
    preference: PrefixPreference,
    separator: Option<char>,
}

impl<R: PrivacyRule> PrefixLookup<R> {
    /// Creates a lookup that matches prefixes at any character.
    pub fn new(rule: R, preference: PrefixPreference) -> Self {
        Self {
            rule,
            preference,
            separator: None,
        }
    }

    /// Requires a prefix to end at `separator`, so `en` matches `en-x-foo` but not `eng`.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Resolves `key` against `candidates`.
    ///
    /// An exact match always wins. Otherwise the result is the single candidate that extends
    /// `key` and passes the preference filter; no candidate or several give `None`.
    pub fn resolve<'a, I>(&self, key: &str, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut found = None;
        let mut ambiguous = false;
        for candidate in candidates {
            if candidate == key {
                return Some(candidate);
            }
            if ambiguous || !self.extends(candidate, key) || !self.allowed(candidate) {
                continue;
            }
            if found.is_some() {
                ambiguous = true;
            } else {
                found = Some(candidate);
            }
        }
        if ambiguous {
            None
        } else {
            found
        }
    }

    fn extends(&self, candidate: &str, key: &str) -> bool {
        match candidate.strip_prefix(key) {
            Some(rest) if !rest.is_empty() => {
                self.separator.map_or(true, |sep| rest.starts_with(sep))
            }
            _ => false,
        }
    }

    fn allowed(&self, candidate: &str) -> bool {
        match self.preference {
            PrefixPreference::PrivateOnly => self.rule.is_private(candidate),
            PrefixPreference::PublicOnly => !self.rule.is_private(candidate),
            PrefixPreference::Any => true,
        }
    }
}
