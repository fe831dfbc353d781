// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use smallvec::SmallVec;

use crate::subtag::Casing;
use crate::{Script, Subtag};

/// A canonicalized language tag identifying a writing system.
///
/// This models the subset of BCP 47 that writing systems are keyed by:
/// `language[-Script][-REGION][-variant]*[-x-private]*`, normalized to the usual casing
/// conventions:
/// - language: lowercase (2–3 letters)
/// - script: titlecase (4 letters)
/// - region: uppercase (2 letters) or digits (3 digits)
/// - variants and private-use subtags: lowercase
///
/// Both `-` and `_` are accepted as separators and surrounding whitespace is ignored, so
/// `" EN_us "` and `"en-US"` parse to the same tag. Extension subtags (`-u-`, `-t-`, ...)
/// are rejected.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LanguageTag {
    language: Subtag,
    script: Option<Script>,
    region: Option<Subtag>,
    variants: SmallVec<[Subtag; 2]>,
    private_use: SmallVec<[Subtag; 2]>,
}

impl LanguageTag {
    /// Parses and canonicalizes a language tag.
    #[inline(always)]
    pub fn parse(s: &str) -> Result<Self, ParseLanguageTagError> {
        s.parse()
    }

    /// Creates a tag consisting of just a primary language subtag.
    pub fn from_language(language: &str) -> Result<Self, ParseLanguageTagError> {
        Ok(Self {
            language: parse_language(language.as_bytes())?,
            script: None,
            region: None,
            variants: SmallVec::new(),
            private_use: SmallVec::new(),
        })
    }

    /// Returns the primary language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        self.language.as_str()
    }

    /// Returns the script subtag, if present.
    #[must_use]
    pub fn script(&self) -> Option<Script> {
        self.script
    }

    /// Returns the region subtag, if present.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_ref().map(Subtag::as_str)
    }

    /// Returns the registered variant subtags in tag order.
    pub fn variants(&self) -> impl ExactSizeIterator<Item = &str> + Clone + '_ {
        self.variants.iter().map(Subtag::as_str)
    }

    /// Returns the private-use subtags (those following `x-`) in tag order.
    pub fn private_use(&self) -> impl ExactSizeIterator<Item = &str> + Clone + '_ {
        self.private_use.iter().map(Subtag::as_str)
    }

    /// Returns `true` if the primary language is in the private-use range `qaa`–`qtz`.
    #[must_use]
    pub fn is_private_use_language(&self) -> bool {
        let b = self.language().as_bytes();
        b.len() == 3 && b[0] == b'q' && (b'a'..=b't').contains(&b[1])
    }

    /// Returns `true` if the tag carries any private-use subtag.
    #[must_use]
    pub fn has_private_use(&self) -> bool {
        !self.private_use.is_empty()
    }

    /// Replaces the script subtag.
    pub fn set_script(&mut self, script: Option<Script>) {
        self.script = script;
    }

    /// Returns this tag with the script subtag replaced.
    #[must_use]
    pub fn with_script(mut self, script: Option<Script>) -> Self {
        self.script = script;
        self
    }

    /// Replaces the region subtag.
    pub fn set_region(&mut self, region: Option<&str>) -> Result<(), ParseLanguageTagError> {
        self.region = match region {
            Some(region) => Some(
                parse_region(region.as_bytes()).ok_or(ParseLanguageTagError::InvalidRegion)?,
            ),
            None => None,
        };
        Ok(())
    }

    /// Appends a registered variant, returning `false` if it was already present.
    pub fn push_variant(&mut self, variant: &str) -> Result<bool, ParseLanguageTagError> {
        let bytes = variant.as_bytes();
        if !is_variant(bytes) {
            return Err(ParseLanguageTagError::InvalidVariant);
        }
        let subtag =
            Subtag::from_bytes(bytes, Casing::Lower).ok_or(ParseLanguageTagError::InvalidVariant)?;
        Ok(push_unique(&mut self.variants, subtag))
    }

    /// Appends a private-use subtag, returning `false` if it was already present.
    ///
    /// The subtag is given without the `x-` introducer.
    pub fn push_private_use(&mut self, subtag: &str) -> Result<bool, ParseLanguageTagError> {
        let subtag = Subtag::from_bytes(subtag.as_bytes(), Casing::Lower)
            .ok_or(ParseLanguageTagError::InvalidPrivateUse)?;
        Ok(push_unique(&mut self.private_use, subtag))
    }

    /// Removes a registered variant, returning whether it was present.
    pub fn remove_variant(&mut self, variant: &str) -> bool {
        remove_matching(&mut self.variants, variant)
    }

    /// Removes a private-use subtag, returning whether it was present.
    pub fn remove_private_use(&mut self, subtag: &str) -> bool {
        remove_matching(&mut self.private_use, subtag)
    }

    /// Returns `true` if `self` is `base` with one or more variant or private-use subtags
    /// appended, and nothing else changed.
    #[must_use]
    pub fn is_strict_extension_of(&self, base: &Self) -> bool {
        self.language == base.language
            && self.script == base.script
            && self.region == base.region
            && self.variants.starts_with(&base.variants)
            && self.private_use.starts_with(&base.private_use)
            && (self.variants.len() + self.private_use.len()
                > base.variants.len() + base.private_use.len())
    }
}

fn push_unique(list: &mut SmallVec<[Subtag; 2]>, subtag: Subtag) -> bool {
    if list.contains(&subtag) {
        return false;
    }
    list.push(subtag);
    true
}

fn remove_matching(list: &mut SmallVec<[Subtag; 2]>, subtag: &str) -> bool {
    let before = list.len();
    list.retain(|s| !s.as_str().eq_ignore_ascii_case(subtag));
    list.len() != before
}

fn parse_language(bytes: &[u8]) -> Result<Subtag, ParseLanguageTagError> {
    if !(2..=3).contains(&bytes.len()) || !bytes.iter().all(|b| b.is_ascii_alphabetic()) {
        return Err(ParseLanguageTagError::InvalidLanguage);
    }
    Subtag::from_bytes(bytes, Casing::Lower).ok_or(ParseLanguageTagError::InvalidLanguage)
}

fn parse_region(bytes: &[u8]) -> Option<Subtag> {
    let is_alpha2 = bytes.len() == 2 && bytes.iter().all(|c| c.is_ascii_alphabetic());
    let is_digit3 = bytes.len() == 3 && bytes.iter().all(|c| c.is_ascii_digit());
    if !(is_alpha2 || is_digit3) {
        return None;
    }
    Subtag::from_bytes(bytes, Casing::Upper)
}

fn looks_like_region(bytes: &[u8]) -> bool {
    (bytes.len() == 2 && bytes.iter().all(|c| c.is_ascii_alphabetic()))
        || (bytes.len() == 3 && bytes.iter().all(|c| c.is_ascii_digit()))
}

fn is_variant(bytes: &[u8]) -> bool {
    // BCP 47 variant: 5-8 alphanum or 4 alphanum starting with a digit.
    if bytes.len() == 4 {
        bytes[0].is_ascii_digit() && bytes.iter().all(|b| b.is_ascii_alphanumeric())
    } else if (5..=8).contains(&bytes.len()) {
        bytes.iter().all(|b| b.is_ascii_alphanumeric())
    } else {
        false
    }
}

impl FromStr for LanguageTag {
    type Err = ParseLanguageTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Subtags must appear in this order; each state is the earliest position still open.
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        enum State {
            Script,
            Region,
            Variant,
            Private,
        }

        let mut parts = s.trim().split(['-', '_']);
        let language = parse_language(parts.next().unwrap_or_default().as_bytes())?;
        let mut tag = Self {
            language,
            script: None,
            region: None,
            variants: SmallVec::new(),
            private_use: SmallVec::new(),
        };

        let mut state = State::Script;
        let mut needs_payload = false;
        for part in parts {
            let bytes = part.as_bytes();
            if bytes.is_empty() {
                return Err(ParseLanguageTagError::InvalidSubtag);
            }

            if state == State::Private {
                let subtag = Subtag::from_bytes(bytes, Casing::Lower)
                    .ok_or(ParseLanguageTagError::InvalidPrivateUse)?;
                if !push_unique(&mut tag.private_use, subtag) {
                    return Err(ParseLanguageTagError::DuplicateSubtag);
                }
                needs_payload = false;
                continue;
            }

            if bytes.len() == 1 {
                if bytes[0].eq_ignore_ascii_case(&b'x') {
                    state = State::Private;
                    needs_payload = true;
                    continue;
                }
                if bytes[0].is_ascii_alphanumeric() {
                    return Err(ParseLanguageTagError::UnsupportedExtension);
                }
                return Err(ParseLanguageTagError::InvalidSubtag);
            }

            if Script::is_script_subtag(bytes) {
                if state > State::Script {
                    return Err(ParseLanguageTagError::InvalidScript);
                }
                tag.script = Some(part.parse().map_err(|_| ParseLanguageTagError::InvalidScript)?);
                state = State::Region;
                continue;
            }

            if looks_like_region(bytes) {
                if state > State::Region {
                    return Err(ParseLanguageTagError::InvalidRegion);
                }
                tag.region = parse_region(bytes);
                state = State::Variant;
                continue;
            }

            if is_variant(bytes) {
                let subtag = Subtag::from_bytes(bytes, Casing::Lower)
                    .ok_or(ParseLanguageTagError::InvalidVariant)?;
                if !push_unique(&mut tag.variants, subtag) {
                    return Err(ParseLanguageTagError::DuplicateSubtag);
                }
                state = State::Variant;
                continue;
            }

            if bytes.len() == 2 || bytes.len() == 3 {
                return Err(ParseLanguageTagError::InvalidRegion);
            }
            return Err(ParseLanguageTagError::InvalidSubtag);
        }

        if needs_payload {
            return Err(ParseLanguageTagError::InvalidPrivateUse);
        }
        Ok(tag)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language.as_str())?;
        if let Some(script) = self.script {
            write!(f, "-{script}")?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{region}")?;
        }
        for variant in &self.variants {
            write!(f, "-{variant}")?;
        }
        if !self.private_use.is_empty() {
            f.write_str("-x")?;
            for subtag in &self.private_use {
                write!(f, "-{subtag}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LanguageTag(\"{self}\")")
    }
}

/// An error returned when parsing a [`LanguageTag`] fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseLanguageTagError {
    /// The input did not start with a valid primary language subtag.
    InvalidLanguage,
    /// The script subtag was malformed or appeared in an invalid position.
    InvalidScript,
    /// The region subtag was malformed or appeared in an invalid position.
    InvalidRegion,
    /// A variant subtag was malformed.
    InvalidVariant,
    /// The private-use section was empty or contained a malformed subtag.
    InvalidPrivateUse,
    /// A variant or private-use subtag appeared twice.
    DuplicateSubtag,
    /// The tag contained an extension section, which writing system tags do not use.
    UnsupportedExtension,
    /// The tag contained an invalid subtag sequence.
    InvalidSubtag,
}

impl fmt::Display for ParseLanguageTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLanguage => f.write_str("invalid primary language subtag"),
            Self::InvalidScript => f.write_str("invalid script subtag"),
            Self::InvalidRegion => f.write_str("invalid region subtag"),
            Self::InvalidVariant => f.write_str("invalid variant subtag"),
            Self::InvalidPrivateUse => f.write_str("invalid private-use section"),
            Self::DuplicateSubtag => f.write_str("duplicate variant or private-use subtag"),
            Self::UnsupportedExtension => f.write_str("extension subtags are not supported"),
            Self::InvalidSubtag => f.write_str("invalid language subtag sequence"),
        }
    }
}

impl core::error::Error for ParseLanguageTagError {}
