// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Language metadata used to populate new definitions.

use lang_primitives::Script;

/// What is known about a primary language subtag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageInfo {
    /// English name of the language.
    pub name: String,
    /// Script assumed when a tag names none.
    pub default_script: Option<Script>,
    /// Whether new writing systems sort with the platform collation instead of ICU rules.
    pub system_collation: bool,
}

/// Source of language and region names and default scripts.
pub trait LanguageMetadata {
    /// Returns what is known about the language `code`.
    fn language(&self, code: &str) -> Option<LanguageInfo>;

    /// Returns the script implied for `language` when written in `region`.
    fn default_script(&self, language: &str, region: Option<&str>) -> Option<Script> {
        let _ = region;
        self.language(language).and_then(|info| info.default_script)
    }

    /// Returns the English name of the region `code`.
    fn region_name(&self, code: &str) -> Option<String>;
}

/// Built-in metadata for a small set of common languages.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinMetadata;

// (code, name, default script, system collation)
const LANGUAGES: &[(&str, &str, Option<Script>, bool)] = &[
    ("ar", "Arabic", Some(Script::ARABIC), false),
    ("de", "German", Some(Script::LATIN), false),
    ("el", "Greek", Some(Script::GREEK), false),
    ("en", "English", Some(Script::LATIN), false),
    ("es", "Spanish", Some(Script::LATIN), false),
    ("fr", "French", Some(Script::LATIN), false),
    ("hi", "Hindi", Some(Script::DEVANAGARI), false),
    ("ja", "Japanese", Some(Script::JAPANESE), true),
    ("ko", "Korean", Some(Script::KOREAN), true),
    ("pt", "Portuguese", Some(Script::LATIN), false),
    ("ru", "Russian", Some(Script::CYRILLIC), false),
    ("tpi", "Tok Pisin", Some(Script::LATIN), false),
    ("zh", "Chinese", Some(Script::HAN_SIMPLIFIED), true),
];

const REGIONS: &[(&str, &str)] = &[
    ("419", "Latin America"),
    ("AU", "Australia"),
    ("BR", "Brazil"),
    ("CA", "Canada"),
    ("CN", "China"),
    ("DE", "Germany"),
    ("EG", "Egypt"),
    ("ES", "Spain"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("HK", "Hong Kong"),
    ("IN", "India"),
    ("JP", "Japan"),
    ("KR", "South Korea"),
    ("MO", "Macao"),
    ("MX", "Mexico"),
    ("PG", "Papua New Guinea"),
    ("PT", "Portugal"),
    ("RU", "Russia"),
    ("TW", "Taiwan"),
    ("US", "United States"),
];

impl LanguageMetadata for BuiltinMetadata {
    fn language(&self, code: &str) -> Option<LanguageInfo> {
        if let Ok(ix) = LANGUAGES.binary_search_by(|(c, ..)| (*c).cmp(code)) {
            let (_, name, default_script, system_collation) = LANGUAGES[ix];
            return Some(LanguageInfo {
                name: name.to_owned(),
                default_script,
                system_collation,
            });
        }
        let b = code.as_bytes();
        (b.len() == 3 && b[0] == b'q' && (b'a'..=b't').contains(&b[1]) && b[2].is_ascii_lowercase())
            .then(|| LanguageInfo {
                name: "Unlisted Language".to_owned(),
                default_script: None,
                system_collation: false,
            })
    }

    fn default_script(&self, language: &str, region: Option<&str>) -> Option<Script> {
        if language == "zh" && matches!(region, Some("TW" | "HK" | "MO")) {
            return Some(Script::HAN_TRADITIONAL);
        }
        self.language(language).and_then(|info| info.default_script)
    }

    fn region_name(&self, code: &str) -> Option<String> {
        REGIONS
            .binary_search_by(|(c, _)| (*c).cmp(code))
            .ok()
            .map(|ix| REGIONS[ix].1.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{BuiltinMetadata, LanguageMetadata, LANGUAGES, REGIONS};
    use lang_primitives::Script;

    #[test]
    fn tables_are_sorted() {
        assert!(LANGUAGES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(REGIONS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn default_script_depends_on_region() {
        let meta = BuiltinMetadata;
        assert_eq!(meta.default_script("zh", None), Some(Script::HAN_SIMPLIFIED));
        assert_eq!(meta.default_script("zh", Some("TW")), Some(Script::HAN_TRADITIONAL));
        assert_eq!(meta.default_script("en", Some("GB")), Some(Script::LATIN));
        assert_eq!(meta.default_script("xx", None), None);
    }

    #[test]
    fn private_use_languages_are_unlisted() {
        let meta = BuiltinMetadata;
        let info = meta.language("qaa").unwrap();
        assert_eq!(info.name, "Unlisted Language");
        assert_eq!(info.default_script, None);
        assert!(meta.language("qua").is_none());
        assert_eq!(meta.region_name("PG").as_deref(), Some("Papua New Guinea"));
    }
}
