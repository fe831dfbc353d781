// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Storing a logical boolean in a field that may be modeled as an integer.

/// Storage type of a model field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FieldType {
    /// `true` or `false`.
    Boolean,
    /// 32-bit signed integer.
    Integer,
    /// Date and time.
    Time,
    /// Globally unique identifier.
    Guid,
    /// Date with uncertain precision.
    GenDate,
    /// Uninterpreted bytes.
    Binary,
    /// Rich text string.
    String,
    /// Rich text string per writing system.
    MultiString,
    /// Plain text.
    Unicode,
    /// Plain text per writing system.
    MultiUnicode,
    /// Owned object.
    OwningAtomic,
    /// Referenced object.
    ReferenceAtomic,
    /// Unordered owned objects.
    OwningCollection,
    /// Unordered referenced objects.
    ReferenceCollection,
    /// Ordered owned objects.
    OwningSequence,
    /// Ordered referenced objects.
    ReferenceSequence,
}

/// Access to the scalar fields of model objects.
pub trait DataAccess {
    /// Identifies an object.
    type Object: Copy;
    /// Identifies a field.
    type Field: Copy;

    /// Returns how `field` is stored.
    fn field_type(&self, field: Self::Field) -> FieldType;

    /// Reads a boolean field.
    fn get_bool(&self, object: Self::Object, field: Self::Field) -> bool;

    /// Reads an integer field.
    fn get_int(&self, object: Self::Object, field: Self::Field) -> i32;

    /// Writes a boolean field.
    fn set_bool(&mut self, object: Self::Object, field: Self::Field, value: bool);

    /// Writes an integer field.
    fn set_int(&mut self, object: Self::Object, field: Self::Field, value: i32);
}

/// Writes `value` to `field`, as a boolean if the field is boolean and as `0` or `1`
/// otherwise.
pub fn set_value_from_bool<D: DataAccess + ?Sized>(
    data: &mut D,
    object: D::Object,
    field: D::Field,
    value: bool,
) {
    if data.field_type(field) == FieldType::Boolean {
        data.set_bool(object, field, value);
    } else {
        data.set_int(object, field, i32::from(value));
    }
}

/// Reads `field` as a boolean. Any non-zero integer is `true`.
pub fn get_bool_value<D: DataAccess + ?Sized>(
    data: &D,
    object: D::Object,
    field: D::Field,
) -> bool {
    if data.field_type(field) == FieldType::Boolean {
        data.get_bool(object, field)
    } else {
        data.get_int(object, field) != 0
    }
}
