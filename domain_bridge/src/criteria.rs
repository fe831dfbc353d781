// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter cell criteria stored as rich text.
//!
//! Integer criteria are written as an operator and a number: `= 5`, `>= 5`, `<= 5`.
//!
//! Object criteria are written as `Matches ` or `Empty or Matches `, followed by a
//! [`NameGuidHot`](ObjDataKind::NameGuidHot) reference to the target object if there is one,
//! followed by ` +subitems` when sub-items of the target also match. Without a target the
//! suffix is `+subitems`, so the text never has two spaces in a row.

use alloc::format;
use core::fmt;

use lang_primitives::WsHandle;
use rich_text::{ObjDataKind, ObjectRef, RichString, RichStringBuilder, OBJECT_REPLACEMENT_CHAR};
use text_props::TextProps;
use uuid::Uuid;

const MATCHES: &str = "Matches ";
const EMPTY_OR_MATCHES: &str = "Empty or Matches ";
const SUBITEMS: &str = "+subitems";

/// The comparison a filter cell performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonType {
    /// Value equals the criterion.
    Equals,
    /// Value is at least the criterion.
    GreaterThanEqual,
    /// Value is at most the criterion.
    LessThanEqual,
    /// Object is the target, or optionally one of its sub-items.
    Matches,
}

/// Comparison operators available to integer criteria.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntComparison {
    /// `=`
    Equals,
    /// `>=`
    GreaterThanEqual,
    /// `<=`
    LessThanEqual,
}

impl IntComparison {
    fn operator(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::GreaterThanEqual => ">=",
            Self::LessThanEqual => "<=",
        }
    }
}

impl From<IntComparison> for ComparisonType {
    fn from(value: IntComparison) -> Self {
        match value {
            IntComparison::Equals => Self::Equals,
            IntComparison::GreaterThanEqual => Self::GreaterThanEqual,
            IntComparison::LessThanEqual => Self::LessThanEqual,
        }
    }
}

/// Ownership relation between objects, used to match sub-items.
pub trait ObjectHierarchy {
    /// Returns the owner of `id`, or `None` for a root object.
    fn owner(&self, id: Uuid) -> Option<Uuid>;
}

/// What a filter cell matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchCriteria {
    /// Compare an integer value.
    Integer {
        /// The operator.
        comparison: IntComparison,
        /// The right-hand side.
        value: i32,
    },
    /// Match objects against a target.
    Object {
        /// The target object. With no target only the empty case can match.
        target: Option<Uuid>,
        /// Whether objects owned, directly or indirectly, by the target also match.
        match_subitems: bool,
        /// Whether an empty value matches.
        match_empty: bool,
    },
}

impl MatchCriteria {
    /// Returns the comparison performed.
    pub fn comparison_type(&self) -> ComparisonType {
        match self {
            Self::Integer { comparison, .. } => (*comparison).into(),
            Self::Object { .. } => ComparisonType::Matches,
        }
    }

    /// Encodes the criteria as text in writing system `ws`.
    pub fn to_rich_string(&self, ws: WsHandle) -> RichString {
        let props = TextProps::make(None, ws);
        let mut builder = RichStringBuilder::new();
        match *self {
            Self::Integer { comparison, value } => {
                builder.append(&format!("{} {value}", comparison.operator()), &props);
            }
            Self::Object {
                target,
                match_subitems,
                match_empty,
            } => {
                builder.append(if match_empty { EMPTY_OR_MATCHES } else { MATCHES }, &props);
                if let Some(guid) = target {
                    let obj = ObjectRef::new(ObjDataKind::NameGuidHot, guid);
                    let mut marker = [0; 4];
                    builder.append(
                        OBJECT_REPLACEMENT_CHAR.encode_utf8(&mut marker),
                        &obj.marker_props(ws),
                    );
                }
                if match_subitems {
                    let suffix = if target.is_some() { " +subitems" } else { SUBITEMS };
                    builder.append(suffix, &props);
                }
            }
        }
        builder.build()
    }

    /// Parses criteria from the contents of a filter cell.
    ///
    /// Surrounding whitespace is ignored for integer criteria. The target of object criteria
    /// is the first object reference after the prefix that identifies an object by GUID.
    pub fn parse(string: &RichString) -> Result<Self, CriteriaError> {
        let text = string.text();
        let (prefix_len, match_empty) = if text.starts_with(EMPTY_OR_MATCHES) {
            (EMPTY_OR_MATCHES.len(), true)
        } else if text.starts_with(MATCHES) {
            (MATCHES.len(), false)
        } else {
            return parse_integer(text);
        };

        let target = string
            .object_refs()
            .filter(|(offset, obj)| *offset >= prefix_len && obj.kind.has_guid())
            .map(|(_, obj)| obj.guid)
            .next();
        let rest: alloc::string::String = text[prefix_len..]
            .chars()
            .filter(|&c| c != OBJECT_REPLACEMENT_CHAR)
            .collect();
        let match_subitems = match rest.trim() {
            "" => false,
            SUBITEMS => true,
            _ => return Err(CriteriaError::UnexpectedText),
        };
        Ok(Self::Object {
            target,
            match_subitems,
            match_empty,
        })
    }

    /// Returns `true` if `value` satisfies integer criteria. Object criteria never match an
    /// integer.
    pub fn matches_int(&self, value: i32) -> bool {
        match *self {
            Self::Integer { comparison, value: rhs } => match comparison {
                IntComparison::Equals => value == rhs,
                IntComparison::GreaterThanEqual => value >= rhs,
                IntComparison::LessThanEqual => value <= rhs,
            },
            Self::Object { .. } => false,
        }
    }

    /// Returns `true` if an atomic reference to `item` satisfies object criteria.
    pub fn matches_object(&self, item: Option<Uuid>, hierarchy: &impl ObjectHierarchy) -> bool {
        match item {
            Some(item) => self.matches_item(item, hierarchy),
            None => matches!(self, Self::Object { match_empty: true, .. }),
        }
    }

    /// Returns `true` if a reference vector holding `items` satisfies object criteria.
    ///
    /// The vector matches if any item does.
    pub fn matches_objects(&self, items: &[Uuid], hierarchy: &impl ObjectHierarchy) -> bool {
        if items.is_empty() {
            return matches!(self, Self::Object { match_empty: true, .. });
        }
        items.iter().any(|&item| self.matches_item(item, hierarchy))
    }

    fn matches_item(&self, item: Uuid, hierarchy: &impl ObjectHierarchy) -> bool {
        let Self::Object {
            target: Some(target),
            match_subitems,
            ..
        } = *self
        else {
            return false;
        };
        if item == target {
            return true;
        }
        if !match_subitems {
            return false;
        }
        let mut current = hierarchy.owner(item);
        while let Some(owner) = current {
            if owner == target {
                return true;
            }
            current = hierarchy.owner(owner);
        }
        false
    }
}

fn parse_integer(text: &str) -> Result<MatchCriteria, CriteriaError> {
    let text = text.trim();
    let (comparison, rest) = if let Some(rest) = text.strip_prefix(">=") {
        (IntComparison::GreaterThanEqual, rest)
    } else if let Some(rest) = text.strip_prefix("<=") {
        (IntComparison::LessThanEqual, rest)
    } else if let Some(rest) = text.strip_prefix('=') {
        (IntComparison::Equals, rest)
    } else {
        return Err(CriteriaError::UnknownComparison);
    };
    let value = rest
        .trim()
        .parse()
        .map_err(|_| CriteriaError::InvalidNumber)?;
    Ok(MatchCriteria::Integer { comparison, value })
}

/// An error returned when filter cell contents are not valid criteria.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CriteriaError {
    /// The text starts with neither an operator nor a `Matches` prefix.
    UnknownComparison,
    /// The operand of an integer comparison is not a number.
    InvalidNumber,
    /// Object criteria are followed by something other than `+subitems`.
    UnexpectedText,
}

impl fmt::Display for CriteriaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownComparison => f.write_str("unrecognized comparison"),
            Self::InvalidNumber => f.write_str("comparison value is not an integer"),
            Self::UnexpectedText => f.write_str("unexpected text after object criteria"),
        }
    }
}

impl core::error::Error for CriteriaError {}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{ComparisonType, CriteriaError, IntComparison, MatchCriteria, ObjectHierarchy};
    use lang_primitives::WsHandle;
    use rich_text::{ObjDataKind, RichString};
    use text_props::TextProps;
    use uuid::Uuid;

    const GRAMMAR: Uuid = Uuid::from_u128(0x1000);
    const PRONOMINAL: Uuid = Uuid::from_u128(0x1001);
    const DISCOURSE: Uuid = Uuid::from_u128(0x2000);

    struct Tree(Vec<(Uuid, Uuid)>);

    impl ObjectHierarchy for Tree {
        fn owner(&self, id: Uuid) -> Option<Uuid> {
            self.0.iter().find(|(child, _)| *child == id).map(|&(_, owner)| owner)
        }
    }

    fn tree() -> Tree {
        Tree(alloc::vec![(PRONOMINAL, GRAMMAR)])
    }

    fn ws() -> WsHandle {
        WsHandle::new(1).unwrap()
    }

    fn plain(text: &str) -> RichString {
        RichString::from_text(text, &TextProps::make(None, ws()))
    }

    #[test]
    fn integer_round_trip() {
        for (text, comparison, value) in [
            ("= 0", IntComparison::Equals, 0),
            (">= 5", IntComparison::GreaterThanEqual, 5),
            ("<= 10", IntComparison::LessThanEqual, 10),
        ] {
            let criteria = MatchCriteria::Integer { comparison, value };
            assert_eq!(criteria.to_rich_string(ws()).text(), text);
            assert_eq!(MatchCriteria::parse(&plain(text)), Ok(criteria));
        }
        assert_eq!(
            MatchCriteria::parse(&plain(">= 5")).unwrap().comparison_type(),
            ComparisonType::GreaterThanEqual
        );
    }

    #[test]
    fn integer_parse_errors() {
        assert_eq!(MatchCriteria::parse(&plain("< 5")), Err(CriteriaError::UnknownComparison));
        assert_eq!(MatchCriteria::parse(&plain("= five")), Err(CriteriaError::InvalidNumber));
    }

    #[test]
    fn integer_matching() {
        let eq = MatchCriteria::Integer {
            comparison: IntComparison::Equals,
            value: 9,
        };
        assert!(eq.matches_int(9));
        assert!(!eq.matches_int(8));
        assert!(!eq.matches_int(10));
        let ge = MatchCriteria::Integer {
            comparison: IntComparison::GreaterThanEqual,
            value: 9,
        };
        assert!(ge.matches_int(10));
        assert!(!ge.matches_int(8));
    }

    #[test]
    fn object_text_forms() {
        let none = MatchCriteria::Object {
            target: None,
            match_subitems: false,
            match_empty: false,
        };
        assert_eq!(none.to_rich_string(ws()).text(), "Matches ");

        let none_sub = MatchCriteria::Object {
            target: None,
            match_subitems: true,
            match_empty: false,
        };
        assert_eq!(none_sub.to_rich_string(ws()).text(), "Matches +subitems");

        let full = MatchCriteria::Object {
            target: Some(GRAMMAR),
            match_subitems: true,
            match_empty: true,
        };
        let s = full.to_rich_string(ws());
        assert_eq!(s.text(), "Empty or Matches \u{fffc} +subitems");
        let refs: Vec<_> = s.object_refs().collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].0, 17);
        assert_eq!(refs[0].1.kind, ObjDataKind::NameGuidHot);
        assert_eq!(refs[0].1.guid, GRAMMAR);
        assert_eq!(s.props_at(17), Some(&refs[0].1.marker_props(ws())));
        assert_eq!(s.run_count(), 3);
    }

    #[test]
    fn object_parse_exposes_flags() {
        for criteria in [
            MatchCriteria::Object {
                target: None,
                match_subitems: false,
                match_empty: false,
            },
            MatchCriteria::Object {
                target: Some(GRAMMAR),
                match_subitems: false,
                match_empty: false,
            },
            MatchCriteria::Object {
                target: Some(GRAMMAR),
                match_subitems: true,
                match_empty: false,
            },
            MatchCriteria::Object {
                target: Some(DISCOURSE),
                match_subitems: false,
                match_empty: true,
            },
        ] {
            let parsed = MatchCriteria::parse(&criteria.to_rich_string(ws())).unwrap();
            assert_eq!(parsed, criteria);
            assert_eq!(parsed.comparison_type(), ComparisonType::Matches);
        }
        assert_eq!(
            MatchCriteria::parse(&plain("Matches everything")),
            Err(CriteriaError::UnexpectedText)
        );
    }

    #[test]
    fn vector_matching() {
        let tree = tree();
        let exact = MatchCriteria::Object {
            target: Some(GRAMMAR),
            match_subitems: false,
            match_empty: false,
        };
        assert!(exact.matches_objects(&[GRAMMAR], &tree));
        assert!(!exact.matches_objects(&[PRONOMINAL], &tree));
        assert!(exact.matches_objects(&[PRONOMINAL, GRAMMAR], &tree));
        assert!(!exact.matches_objects(&[DISCOURSE], &tree));
        assert!(!exact.matches_objects(&[], &tree));

        let with_subitems = MatchCriteria::Object {
            target: Some(GRAMMAR),
            match_subitems: true,
            match_empty: false,
        };
        assert!(with_subitems.matches_objects(&[PRONOMINAL], &tree));
        assert!(!with_subitems.matches_objects(&[DISCOURSE], &tree));

        let or_empty = MatchCriteria::Object {
            target: Some(GRAMMAR),
            match_subitems: false,
            match_empty: true,
        };
        assert!(or_empty.matches_objects(&[], &tree));
        assert!(!or_empty.matches_objects(&[PRONOMINAL], &tree));
    }

    #[test]
    fn atomic_matching() {
        let tree = tree();
        let criteria = MatchCriteria::Object {
            target: Some(GRAMMAR),
            match_subitems: false,
            match_empty: false,
        };
        assert!(criteria.matches_object(Some(GRAMMAR), &tree));
        assert!(!criteria.matches_object(Some(DISCOURSE), &tree));
        assert!(!criteria.matches_object(None, &tree));
        assert!(!criteria.matches_int(3));
    }
}
