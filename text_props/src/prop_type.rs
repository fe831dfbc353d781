// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property type and variant vocabularies.
//!
//! Integer and string properties live in separate numeric spaces: `IntPropType::WS` and
//! `StrPropType::FONT_FAMILY` are both `1`. Ids not listed here are still representable, so
//! sets read back from storage never lose properties this crate does not know about.

use core::fmt;

/// The type of an integer text property.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntPropType(pub u32);

impl IntPropType {
    /// Writing system handle of the text.
    pub const WS: Self = Self(1);
    /// Italic toggle.
    pub const ITALIC: Self = Self(2);
    /// Bold toggle.
    pub const BOLD: Self = Self(3);
    /// Superscript/subscript enumeration.
    pub const SUPERSCRIPT: Self = Self(4);
    /// Underline style enumeration.
    pub const UNDERLINE: Self = Self(5);
    /// Font size.
    pub const FONT_SIZE: Self = Self(6);
    /// Baseline offset.
    pub const OFFSET: Self = Self(7);
    /// Foreground color.
    pub const FORE_COLOR: Self = Self(8);
    /// Background color.
    pub const BACK_COLOR: Self = Self(9);
    /// Underline color.
    pub const UNDER_COLOR: Self = Self(10);
    /// Writing system of the paragraph.
    pub const BASE_WS: Self = Self(16);
    /// Paragraph alignment.
    pub const ALIGN: Self = Self(17);
    /// First-line indent.
    pub const FIRST_INDENT: Self = Self(18);
    /// Leading indent.
    pub const LEADING_INDENT: Self = Self(19);
    /// Trailing indent.
    pub const TRAILING_INDENT: Self = Self(20);
    /// Space before a paragraph.
    pub const SPACE_BEFORE: Self = Self(21);
    /// Space after a paragraph.
    pub const SPACE_AFTER: Self = Self(22);
    /// Default tab width.
    pub const TAB_DEF: Self = Self(23);
    /// Line height.
    pub const LINE_HEIGHT: Self = Self(24);
    /// Paragraph background color.
    pub const PARA_COLOR: Self = Self(25);
    /// Top border width.
    pub const BORDER_TOP: Self = Self(41);
    /// Bottom border width.
    pub const BORDER_BOTTOM: Self = Self(42);
    /// Leading border width.
    pub const BORDER_LEADING: Self = Self(43);
    /// Trailing border width.
    pub const BORDER_TRAILING: Self = Self(44);
    /// Border color.
    pub const BORDER_COLOR: Self = Self(45);
    /// Right-to-left paragraph toggle.
    pub const RIGHT_TO_LEFT: Self = Self(128);

    /// The name used in difference explanations, for the types that have one.
    ///
    /// Types without a name are explained by number.
    #[must_use]
    pub fn diff_name(self) -> Option<&'static str> {
        match self {
            Self::WS => Some("ktptWs"),
            _ => None,
        }
    }
}

impl fmt::Debug for IntPropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntPropType({})", self.0)
    }
}

impl fmt::Display for IntPropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The type of a string text property.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrPropType(pub u32);

impl StrPropType {
    /// Font family name.
    pub const FONT_FAMILY: Self = Self(1);
    /// Character style name.
    pub const CHAR_STYLE: Self = Self(2);
    /// Paragraph style name.
    pub const PARA_STYLE: Self = Self(3);
    /// Tab stop list.
    pub const TAB_LIST: Self = Self(4);
    /// Tag list.
    pub const TAGS: Self = Self(5);
    /// Embedded object data, carried by object replacement characters.
    pub const OBJ_DATA: Self = Self(6);
    /// Font variation settings.
    pub const FONT_VARIATIONS: Self = Self(7);
    /// Named style applied to the text.
    pub const NAMED_STYLE: Self = Self(133);

    /// The name used in difference explanations, for the types that have one.
    #[must_use]
    pub fn diff_name(self) -> Option<&'static str> {
        match self {
            Self::NAMED_STYLE => Some("ktptNamedStyle"),
            _ => None,
        }
    }
}

impl fmt::Debug for StrPropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StrPropType({})", self.0)
    }
}

impl fmt::Display for StrPropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an integer property value is to be interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropVariant(pub u32);

impl PropVariant {
    /// Plain value.
    pub const DEFAULT: Self = Self(0);
    /// Thousandths of a typographic point.
    pub const MILLI_POINT: Self = Self(1);
    /// Relative to the inherited value, in ten-thousandths.
    pub const RELATIVE: Self = Self(2);
    /// A member of an enumeration.
    pub const ENUM: Self = Self(3);
    /// A toggle relative to the inherited value.
    pub const TOGGLE: Self = Self(4);
}

impl fmt::Debug for PropVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropVariant({})", self.0)
    }
}

impl fmt::Display for PropVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
