//! Primitive fast path.
//!
//! Pure text → value rules for the primitive kinds and their boxed forms. The
//! mapper tries these before any registered converter, so a converter can never
//! override how an `int` or a `Boolean` is parsed.

use std::str::FromStr;

use strmap_api::{MapError, PrimitiveKind, TypeDescriptor, Value};

/// Convert `text` when `ty` is a primitive or boxed type.
///
/// `Ok(None)` means "not applicable": the caller continues with enum mapping
/// and the converter registry.
pub fn convert_primitive(text: &str, ty: &TypeDescriptor) -> Result<Option<Value>, MapError> {
    match ty.primitive_kind() {
        Some(kind) => parse_kind(text, kind).map(Some),
        None => Ok(None),
    }
}

/// Parse `text` as `kind`. Always yields the boxed-form value.
pub fn parse_kind(text: &str, kind: PrimitiveKind) -> Result<Value, MapError> {
    match kind {
        PrimitiveKind::String => Ok(Value::String(text.to_string())),
        PrimitiveKind::Bool => Ok(Value::Bool(text.eq_ignore_ascii_case("true"))),
        PrimitiveKind::Char => parse_char(text).map(Value::Char),
        PrimitiveKind::Byte => parse_number(text, kind).map(Value::Byte),
        PrimitiveKind::Short => parse_number(text, kind).map(Value::Short),
        PrimitiveKind::Int => parse_number(text, kind).map(Value::Int),
        PrimitiveKind::Long => parse_number(text, kind).map(Value::Long),
        PrimitiveKind::Float => parse_number(text, kind).map(Value::Float),
        PrimitiveKind::Double => parse_number(text, kind).map(Value::Double),
    }
}

fn parse_char(text: &str) -> Result<char, MapError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(MapError::InvalidCharacterLength {
            text: text.to_string(),
            length: text.chars().count(),
        }),
    }
}

// Integers: signed decimal with an optional sign, range-checked by the target
// width. Floats: surrounding whitespace is ignored, decimal/exponent forms plus
// inf/infinity/nan in any case. Type suffixes (`1.5f`, `2d`) are rejected.
fn parse_number<T>(text: &str, kind: PrimitiveKind) -> Result<T, MapError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let literal = if kind.is_floating() { text.trim() } else { text };
    literal
        .parse::<T>()
        .map_err(|e| MapError::number_format(text, kind, e))
}
