// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Embedded object references.
//!
//! An object reference is a single [`OBJECT_REPLACEMENT_CHAR`] whose run carries an
//! [`StrPropType::OBJ_DATA`] property. The property value is one character holding the
//! [`ObjDataKind`] code followed by the hyphenated GUID of the referenced object.
//!
//! Whether a run is a reference is decided by its properties; the marker character on its own
//! means nothing.

use alloc::string::String;

use lang_primitives::WsHandle;
use text_props::{IntPropType, PropVariant, StrPropType, TextProps, TextPropsBuilder};
use uuid::Uuid;

/// The character standing in for an embedded object (U+FFFC).
pub const OBJECT_REPLACEMENT_CHAR: char = '\u{FFFC}';

/// How an embedded object is to be displayed or followed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjDataKind {
    /// Picture, even-numbered variant.
    PictEvenHot,
    /// Picture, odd-numbered variant.
    PictOddHot,
    /// Hot link showing the name of the object.
    NameGuidHot,
    /// Path to an external file.
    ExternalPathName,
    /// Owned object shown by name.
    OwnNameGuidHot,
    /// Object data embedded inline.
    EmbeddedObjectData,
    /// Context-dependent string.
    ContextString,
    /// Owned object displayed at a movable position, such as a footnote.
    GuidMoveableObjDisp,
}

impl ObjDataKind {
    /// Returns the code stored in the object data property.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::PictEvenHot => 1,
            Self::PictOddHot => 2,
            Self::NameGuidHot => 3,
            Self::ExternalPathName => 4,
            Self::OwnNameGuidHot => 5,
            Self::EmbeddedObjectData => 6,
            Self::ContextString => 7,
            Self::GuidMoveableObjDisp => 8,
        }
    }

    /// Returns the kind with the given code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::PictEvenHot,
            2 => Self::PictOddHot,
            3 => Self::NameGuidHot,
            4 => Self::ExternalPathName,
            5 => Self::OwnNameGuidHot,
            6 => Self::EmbeddedObjectData,
            7 => Self::ContextString,
            8 => Self::GuidMoveableObjDisp,
            _ => return None,
        })
    }

    /// Returns `true` for the kinds that identify their target by GUID.
    #[must_use]
    pub const fn has_guid(self) -> bool {
        matches!(
            self,
            Self::NameGuidHot | Self::OwnNameGuidHot | Self::GuidMoveableObjDisp
        )
    }
}

/// A reference from rich text to another object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// How the reference is displayed.
    pub kind: ObjDataKind,
    /// The referenced object.
    pub guid: Uuid,
}

impl ObjectRef {
    /// Creates a reference.
    #[must_use]
    pub const fn new(kind: ObjDataKind, guid: Uuid) -> Self {
        Self { kind, guid }
    }

    /// Encodes this reference as an object data property value.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(37);
        out.push(char::from(self.kind.code()));
        out.push_str(self.guid.hyphenated().encode_lower(&mut Uuid::encode_buffer()));
        out
    }

    /// Decodes an object data property value, or returns `None` if it is not a reference.
    #[must_use]
    pub fn decode(data: &str) -> Option<Self> {
        let mut chars = data.chars();
        let code = u8::try_from(u32::from(chars.next()?)).ok()?;
        let kind = ObjDataKind::from_code(code)?;
        let guid = Uuid::parse_str(chars.as_str()).ok()?;
        Some(Self { kind, guid })
    }

    /// Returns the properties of the marker character for this reference in writing system
    /// `ws`.
    #[must_use]
    pub fn marker_props(&self, ws: WsHandle) -> TextProps {
        let mut builder = TextPropsBuilder::new();
        builder
            .set_int(IntPropType::WS, PropVariant::DEFAULT, ws.to_prop_value())
            .set_str(StrPropType::OBJ_DATA, &self.encode());
        builder.build()
    }

    /// Returns the reference carried by `props`, if any.
    #[must_use]
    pub fn from_props(props: &TextProps) -> Option<Self> {
        props.str_prop(StrPropType::OBJ_DATA).and_then(Self::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::{ObjDataKind, ObjectRef};
    use lang_primitives::WsHandle;
    use text_props::StrPropType;
    use uuid::Uuid;

    const GUID: Uuid = Uuid::from_u128(0x6b6c_9f1a_2c43_4d9e_9a0b_51f3_0c2e_7d11);

    #[test]
    fn encoded_form() {
        let obj = ObjectRef::new(ObjDataKind::NameGuidHot, GUID);
        let data = obj.encode();
        assert!(data.starts_with('\u{3}'));
        assert_eq!(&data[1..], "6b6c9f1a-2c43-4d9e-9a0b-51f30c2e7d11");
        assert_eq!(ObjectRef::decode(&data), Some(obj));
    }

    #[test]
    fn decode_rejects_other_data() {
        assert_eq!(ObjectRef::decode(""), None);
        assert_eq!(ObjectRef::decode("\u{3}not a guid"), None);
        assert_eq!(
            ObjectRef::decode("\u{63}6b6c9f1a-2c43-4d9e-9a0b-51f30c2e7d11"),
            None
        );
    }

    #[test]
    fn marker_props_carry_ws_and_data() {
        let ws = WsHandle::new(2).unwrap();
        let obj = ObjectRef::new(ObjDataKind::OwnNameGuidHot, GUID);
        let props = obj.marker_props(ws);
        assert_eq!(props.ws(), Some(ws));
        assert!(props.str_prop(StrPropType::OBJ_DATA).is_some());
        assert_eq!(ObjectRef::from_props(&props), Some(obj));
        assert!(obj.kind.has_guid());
        assert!(!ObjDataKind::PictOddHot.has_guid());
    }
}
