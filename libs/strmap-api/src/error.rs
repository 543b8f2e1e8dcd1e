use crate::converter::ConverterError;
use crate::kind::PrimitiveKind;
use crate::types::{TypeDescriptor, TypeKind};

/// Error kind of a failed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NumberFormat,
    InvalidCharacterLength,
    UnknownEnumCase,
    UnsupportedType,
    Converter,
}

/// Conversion error returned by `map`.
///
/// A failed conversion never changes mapper state; every kind is fatal to the
/// single conversion and recoverable by the caller.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("'{text}' is not a valid {kind} literal: {reason}")]
    NumberFormat {
        text: String,
        kind: PrimitiveKind,
        reason: String,
    },

    #[error("'{text}' is not a single character (length {length})")]
    InvalidCharacterLength { text: String, length: usize },

    #[error("'{text}' is not a case of enum {ty}")]
    UnknownEnumCase { text: String, ty: TypeDescriptor },

    #[error("unsupported type {0}: no converter registered")]
    UnsupportedType(TypeDescriptor),

    #[error("converter for {ty} rejected '{text}': {source}")]
    Converter {
        ty: TypeDescriptor,
        text: String,
        #[source]
        source: ConverterError,
    },
}

impl MapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapError::NumberFormat { .. } => ErrorKind::NumberFormat,
            MapError::InvalidCharacterLength { .. } => ErrorKind::InvalidCharacterLength,
            MapError::UnknownEnumCase { .. } => ErrorKind::UnknownEnumCase,
            MapError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            MapError::Converter { .. } => ErrorKind::Converter,
        }
    }

    pub fn number_format(
        text: &str,
        kind: PrimitiveKind,
        reason: impl std::fmt::Display,
    ) -> Self {
        MapError::NumberFormat {
            text: text.to_string(),
            kind,
            reason: reason.to_string(),
        }
    }
}

/// Descriptor construction error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("type name must not be empty")]
    EmptyName,

    #[error("{kind} '{ty}' cannot have a parent: only classes extend other types")]
    ParentNotAllowed { ty: String, kind: TypeKind },

    #[error("type '{ty}' cannot extend '{parent}': parent is not a class")]
    InvalidParent { ty: String, parent: String },

    #[error("type '{ty}' cannot implement '{capability}': not a capability")]
    NotACapability { ty: String, capability: String },

    #[error("enum '{ty}' declares no cases")]
    NoEnumCases { ty: String },

    #[error("enum '{ty}' declares case '{case}' more than once")]
    DuplicateCase { ty: String, case: String },

    #[error("converter for '{ty}' cannot report '{reported}': not a subtype")]
    NotASubtype { ty: String, reported: String },
}
