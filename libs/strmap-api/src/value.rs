use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, Serializer};

use crate::converter::Payload;
use crate::kind::PrimitiveKind;
use crate::types::TypeDescriptor;

/// Result of a successful conversion.
///
/// Always in boxed form: [`Value::type_descriptor`] reports the boxed
/// descriptor for primitive variants, the enum type for enum cases and the
/// registered type for converter results.
#[derive(Clone, Debug)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Enum(EnumCase),
    /// Produced by a registered converter.
    Object(Object),
}

impl Value {
    fn classify(&self) -> Result<PrimitiveKind, &TypeDescriptor> {
        match self {
            Value::Bool(_) => Ok(PrimitiveKind::Bool),
            Value::Byte(_) => Ok(PrimitiveKind::Byte),
            Value::Char(_) => Ok(PrimitiveKind::Char),
            Value::Short(_) => Ok(PrimitiveKind::Short),
            Value::Int(_) => Ok(PrimitiveKind::Int),
            Value::Long(_) => Ok(PrimitiveKind::Long),
            Value::Float(_) => Ok(PrimitiveKind::Float),
            Value::Double(_) => Ok(PrimitiveKind::Double),
            Value::String(_) => Ok(PrimitiveKind::String),
            Value::Enum(case) => Err(&case.ty),
            Value::Object(object) => Err(&object.ty),
        }
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        self.classify().ok()
    }

    /// Reported runtime type of the value.
    pub fn type_descriptor(&self) -> TypeDescriptor {
        match self.classify() {
            Ok(kind) => TypeDescriptor::boxed(kind),
            Err(ty) => ty.clone(),
        }
    }

    pub fn as_enum(&self) -> Option<&EnumCase> {
        match self {
            Value::Enum(case) => Some(case),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Borrow a converter result as `T`. `None` for other variants or types.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.as_object()?.downcast_ref()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

/// Textual form; mapping it back with the same type yields an equal value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Char(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Enum(case) => f.write_str(case.name()),
            Value::Object(object) => write!(f, "{:?}", object.inner),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Byte(v) => serializer.serialize_i8(*v),
            Value::Char(v) => serializer.serialize_char(*v),
            Value::Short(v) => serializer.serialize_i16(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Enum(case) => serializer.serialize_str(case.name()),
            // Payloads are opaque; their debug form is the only rendering we have.
            Value::Object(object) => serializer.serialize_str(&format!("{:?}", object.inner)),
        }
    }
}

/// One case of an enum descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumCase {
    ty: TypeDescriptor,
    ordinal: usize,
}

impl EnumCase {
    /// `None` if `ty` is not an enum or has no case at `ordinal`.
    pub fn new(ty: &TypeDescriptor, ordinal: usize) -> Option<Self> {
        let cases = ty.enum_cases()?;
        (ordinal < cases.len()).then(|| Self {
            ty: ty.clone(),
            ordinal,
        })
    }

    pub fn type_descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn name(&self) -> &str {
        self.ty
            .enum_cases()
            .and_then(|cases| cases.get(self.ordinal))
            .map_or("", String::as_str)
    }
}

/// Converter result tagged with the type it was registered under.
#[derive(Clone)]
pub struct Object {
    ty: TypeDescriptor,
    inner: Arc<dyn Payload>,
}

impl Object {
    pub fn new(ty: TypeDescriptor, inner: Arc<dyn Payload>) -> Self {
        Self { ty, inner }
    }

    pub fn type_descriptor(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn payload(&self) -> &Arc<dyn Payload> {
        &self.inner
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        (*self.inner).as_any().downcast_ref()
    }
}

/// Same reported type and the same shared payload.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("ty", &self.ty)
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn primitive_values_report_their_boxed_type() {
        assert_eq!(
            Value::Int(7).type_descriptor(),
            TypeDescriptor::boxed(PrimitiveKind::Int)
        );
        assert_eq!(
            Value::Char('x').type_descriptor(),
            TypeDescriptor::boxed(PrimitiveKind::Char)
        );
        assert_eq!(
            Value::String("s".into()).type_descriptor(),
            TypeDescriptor::string()
        );
    }

    #[test]
    fn objects_downcast_to_their_payload() {
        let ty = TypeDescriptor::class("Point").build().unwrap();
        let value = Value::Object(Object::new(ty.clone(), Arc::new(Point { x: 1, y: 2 })));

        assert_eq!(value.type_descriptor(), ty);
        assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
        assert_eq!(value.downcast_ref::<String>(), None);
        assert_eq!(value.to_string(), "Point { x: 1, y: 2 }");
    }

    #[test]
    fn enum_cases_know_their_name() {
        let month = TypeDescriptor::enumeration("Month", ["JANUARY", "APRIL"])
            .build()
            .unwrap();
        let april = EnumCase::new(&month, 1).unwrap();

        assert_eq!(april.name(), "APRIL");
        assert_eq!(Value::Enum(april.clone()).type_descriptor(), month);
        assert_eq!(Value::Enum(april).to_string(), "APRIL");
        assert!(EnumCase::new(&month, 2).is_none());
        assert!(EnumCase::new(&TypeDescriptor::string(), 0).is_none());
    }

    #[test]
    fn values_serialize_as_plain_json() {
        let json = serde_json::to_string(&vec![
            Value::Bool(true),
            Value::Char('é'),
            Value::Long(-3),
            Value::String("text".into()),
        ])
        .unwrap();
        assert_eq!(json, r#"[true,"é",-3,"text"]"#);
    }

    #[test]
    fn float_equality_follows_ieee() {
        assert_eq!(Value::Double(0.5), Value::Double(0.5));
        assert_ne!(Value::Float(f32::NAN), Value::Float(f32::NAN));
        assert_ne!(Value::Int(1), Value::Long(1));
    }
}
