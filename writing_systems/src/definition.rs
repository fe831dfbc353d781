// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use lang_primitives::{LanguageTag, ParseLanguageTagError, Script};

/// Primary language subtag used for languages that have no code of their own.
pub const UNLISTED_LANGUAGE: &str = "qaa";

/// Private-use subtag marking an audio writing system (script `Zxxx`).
pub const AUDIO_PRIVATE_USE: &str = "audio";

/// Names of character sets whose members do not form words.
const NON_WORD_FORMING_SETS: [&str; 2] = ["numeric", "punctuation"];

/// How text in a writing system is sorted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Collation {
    /// ICU tailoring rules.
    Icu {
        /// Identifier of the collation.
        name: String,
        /// Tailoring rules, empty for the root collation.
        rules: String,
    },
    /// The platform collation for a language tag.
    System {
        /// Tag whose collation is used.
        tag: String,
    },
    /// Simple ordering rules, one sort group per line.
    Simple {
        /// The rules.
        rules: String,
    },
}

impl Collation {
    /// The untailored ICU collation assigned to new writing systems.
    pub fn standard() -> Self {
        Self::Icu {
            name: "standard".to_owned(),
            rules: String::new(),
        }
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::standard()
    }
}

/// A named set of characters, such as `main`, `numeric` or `punctuation`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterSet {
    /// Set name.
    pub name: String,
    /// Members in display order. Each member may be a multi-character grapheme.
    pub characters: Vec<String>,
}

impl CharacterSet {
    /// Creates a named set.
    pub fn new<I, S>(name: impl Into<String>, characters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            characters: characters.into_iter().map(Into::into).collect(),
        }
    }
}

/// An opening and closing punctuation pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedPair {
    /// Opening string.
    pub open: String,
    /// Closing string.
    pub close: String,
    /// Whether the end of a paragraph closes the pair.
    pub paragraph_closing: bool,
}

/// Everything known about one writing system.
///
/// Identity is the canonical [`tag`](Self::tag), derived from the subtags. The script subtag
/// is left out of the tag when it is the language's implied script, so `en` and `en-Latn`
/// resolve to the same definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WritingSystemDefinition {
    subtags: LanguageTag,
    implied_script: Option<Script>,
    /// Human-readable name.
    pub display_name: String,
    /// Short label used where space is limited.
    pub abbreviation: String,
    /// Font used for new text.
    pub default_font: String,
    /// Sort order.
    pub collation: Collation,
    /// Character sets in the order they were defined.
    pub character_sets: Vec<CharacterSet>,
    /// Identifier of the spelling dictionary, if any.
    pub spell_checking_id: Option<String>,
    /// Name of a legacy encoding converter.
    pub legacy_mapping: Option<String>,
    /// Windows locale identifier, as text.
    pub windows_lcid: Option<String>,
    /// Punctuation pairs.
    pub matched_pairs: Vec<MatchedPair>,
}

impl WritingSystemDefinition {
    /// Creates a definition with empty metadata.
    ///
    /// A missing script in `subtags` is filled with `implied_script`.
    pub fn new(mut subtags: LanguageTag, implied_script: Option<Script>) -> Self {
        if subtags.script().is_none() {
            subtags.set_script(implied_script);
        }
        Self {
            subtags,
            implied_script,
            display_name: String::new(),
            abbreviation: String::new(),
            default_font: String::new(),
            collation: Collation::standard(),
            character_sets: Vec::new(),
            spell_checking_id: None,
            legacy_mapping: None,
            windows_lcid: None,
            matched_pairs: Vec::new(),
        }
    }

    /// Returns the canonical language tag.
    pub fn language_tag(&self) -> LanguageTag {
        let mut tag = self.subtags.clone();
        if tag.script().is_some() && tag.script() == self.implied_script {
            tag.set_script(None);
        }
        tag
    }

    /// Returns the canonical tag as text.
    pub fn tag(&self) -> String {
        self.language_tag().to_string()
    }

    /// Returns the primary language subtag.
    pub fn language(&self) -> &str {
        self.subtags.language()
    }

    /// Returns the resolved script, explicit or implied.
    pub fn script(&self) -> Option<Script> {
        self.subtags.script()
    }

    /// Returns the language's default script, which the tag leaves implicit.
    pub fn implied_script(&self) -> Option<Script> {
        self.implied_script
    }

    /// Returns the region subtag.
    pub fn region(&self) -> Option<&str> {
        self.subtags.region()
    }

    /// Returns the variant subtags.
    pub fn variants(&self) -> impl ExactSizeIterator<Item = &str> + Clone + '_ {
        self.subtags.variants()
    }

    /// Returns the private-use subtags.
    pub fn private_use(&self) -> impl ExactSizeIterator<Item = &str> + Clone + '_ {
        self.subtags.private_use()
    }

    /// Sets the script. `None` restores the implied script.
    pub fn set_script(&mut self, script: Option<Script>) {
        self.subtags.set_script(script.or(self.implied_script));
    }

    /// Sets the region.
    pub fn set_region(&mut self, region: Option<&str>) -> Result<(), ParseLanguageTagError> {
        self.subtags.set_region(region)
    }

    /// Adds a variant, returning `false` if it was already present.
    pub fn add_variant(&mut self, variant: &str) -> Result<bool, ParseLanguageTagError> {
        self.subtags.push_variant(variant)
    }

    /// Removes a variant, returning whether it was present.
    pub fn remove_variant(&mut self, variant: &str) -> bool {
        self.subtags.remove_variant(variant)
    }

    /// Adds a private-use subtag, returning `false` if it was already present.
    pub fn add_private_use(&mut self, subtag: &str) -> Result<bool, ParseLanguageTagError> {
        self.subtags.push_private_use(subtag)
    }

    /// Removes a private-use subtag, returning whether it was present.
    pub fn remove_private_use(&mut self, subtag: &str) -> bool {
        self.subtags.remove_private_use(subtag)
    }

    /// Returns `true` for an audio writing system: script `Zxxx` with the `audio` private-use
    /// subtag.
    pub fn is_audio(&self) -> bool {
        self.script() == Some(Script::UNWRITTEN)
            && self.private_use().any(|s| s == AUDIO_PRIVATE_USE)
    }

    /// Returns the character set called `name`.
    pub fn character_set(&self, name: &str) -> Option<&CharacterSet> {
        self.character_sets.iter().find(|set| set.name == name)
    }

    /// Returns `true` if `ch` belongs to a character set other than `numeric` and
    /// `punctuation`.
    pub fn is_word_forming(&self, ch: char) -> bool {
        let mut buf = [0_u8; 4];
        let ch = &*ch.encode_utf8(&mut buf);
        self.character_sets
            .iter()
            .filter(|set| !NON_WORD_FORMING_SETS.contains(&set.name.as_str()))
            .any(|set| set.characters.iter().any(|c| c == ch))
    }
}

#[cfg(test)]
mod tests {
    use super::{CharacterSet, WritingSystemDefinition, AUDIO_PRIVATE_USE, UNLISTED_LANGUAGE};
    use lang_primitives::{LanguageTag, Script};

    fn definition(tag: &str, implied: Option<Script>) -> WritingSystemDefinition {
        WritingSystemDefinition::new(LanguageTag::parse(tag).unwrap(), implied)
    }

    #[test]
    fn implied_script_is_left_out_of_tag() {
        let en = definition("en-Latn-US", Some(Script::LATIN));
        assert_eq!(en.tag(), "en-US");
        assert_eq!(en.script(), Some(Script::LATIN));

        let mut en = definition("en", Some(Script::LATIN));
        assert_eq!(en.script(), Some(Script::LATIN));
        en.set_script(Some(Script::CYRILLIC));
        assert_eq!(en.tag(), "en-Cyrl");
        en.set_script(None);
        assert_eq!(en.tag(), "en");
    }

    #[test]
    fn audio_subtags_in_either_order() {
        let mut a = definition(UNLISTED_LANGUAGE, None);
        a.set_script(Some(Script::UNWRITTEN));
        a.add_private_use(AUDIO_PRIVATE_USE).unwrap();

        let mut b = definition(UNLISTED_LANGUAGE, None);
        b.add_private_use(AUDIO_PRIVATE_USE).unwrap();
        b.set_script(Some(Script::UNWRITTEN));

        assert_eq!(a.tag(), "qaa-Zxxx-x-audio");
        assert_eq!(a.tag(), b.tag());
        assert!(a.is_audio());
        assert!(!definition("en", Some(Script::LATIN)).is_audio());
    }

    #[test]
    fn subtag_edits() {
        let mut def = definition("fr", Some(Script::LATIN));
        def.set_region(Some("ca")).unwrap();
        assert!(def.add_variant("1996").unwrap());
        assert!(!def.add_variant("1996").unwrap());
        assert_eq!(def.tag(), "fr-CA-1996");
        assert!(def.remove_variant("1996"));
        assert!(def.set_region(Some("France")).is_err());
        assert_eq!(def.tag(), "fr-CA");
    }

    #[test]
    fn word_forming_characters() {
        let mut def = definition("en", Some(Script::LATIN));
        def.character_sets = vec![
            CharacterSet::new("main", ["a", "b", "c"]),
            CharacterSet::new("numeric", ["1", "2"]),
            CharacterSet::new("punctuation", ["-"]),
            CharacterSet::new("auxiliary", ["\u{e9}"]),
        ];
        assert!(def.is_word_forming('a'));
        assert!(def.is_word_forming('\u{e9}'));
        assert!(!def.is_word_forming('1'));
        assert!(!def.is_word_forming('-'));
        assert!(!def.is_word_forming('z'));
        assert_eq!(def.character_set("numeric").map(|s| s.characters.len()), Some(2));
    }
}
