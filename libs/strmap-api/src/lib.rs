//! Data model shared by the mapper and its converters: type descriptors, the
//! primitive identity table, converted values and errors.

pub mod converter;
pub mod error;
pub mod kind;
pub mod types;
pub mod value;

pub use converter::{ConverterError, ConverterSlot, Payload, TextConverter};
pub use error::{ErrorKind, MapError, TypeError};
pub use kind::PrimitiveKind;
pub use types::{TypeBuilder, TypeDescriptor, TypeKind, boxed_form_of};
pub use value::{EnumCase, Object, Value};
