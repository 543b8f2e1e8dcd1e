use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::types::TypeDescriptor;

/// Error a user converter may return. Anything implementing `std::error::Error`
/// (or a plain message) converts into it.
pub type ConverterError = Box<dyn std::error::Error + Send + Sync>;

/// Type-erased result of a user converter.
///
/// Blanket-implemented for every `Debug + Send + Sync` value; callers get the
/// concrete value back through [`crate::value::Object::downcast_ref`].
pub trait Payload: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> Payload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Text → value converter registered for one type.
///
/// Solves one task: build a value from its textual form. The mapper never
/// inspects a converter, it only calls it. Closures
/// `Fn(&str) -> Result<Arc<dyn Payload>, ConverterError>` implement it
/// directly; [`from_fn`] adapts closures returning concrete types.
pub trait TextConverter: Send + Sync {
    fn convert(&self, text: &str) -> Result<Arc<dyn Payload>, ConverterError>;

    /// Type reported for converted values. `None` reports the type the
    /// converter was registered under.
    fn reported_type(&self) -> Option<&TypeDescriptor> {
        None
    }
}

impl<F> TextConverter for F
where
    F: Fn(&str) -> Result<Arc<dyn Payload>, ConverterError> + Send + Sync,
{
    fn convert(&self, text: &str) -> Result<Arc<dyn Payload>, ConverterError> {
        self(text)
    }
}

/// Wrap a closure returning a concrete value into a shareable converter.
pub fn from_fn<F, T, E>(f: F) -> Arc<dyn TextConverter>
where
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    T: Payload,
    E: Into<ConverterError>,
{
    Arc::new(move |text: &str| -> Result<Arc<dyn Payload>, ConverterError> {
        match f(text) {
            Ok(value) => Ok(Arc::new(value)),
            Err(e) => Err(e.into()),
        }
    })
}

/// Wrap `inner` so its values report `reported`, typically a subtype of the
/// type the converter is registered under.
pub fn reporting(reported: TypeDescriptor, inner: Arc<dyn TextConverter>) -> Arc<dyn TextConverter> {
    Arc::new(Reporting { reported, inner })
}

struct Reporting {
    reported: TypeDescriptor,
    inner: Arc<dyn TextConverter>,
}

impl TextConverter for Reporting {
    fn convert(&self, text: &str) -> Result<Arc<dyn Payload>, ConverterError> {
        self.inner.convert(text)
    }

    fn reported_type(&self) -> Option<&TypeDescriptor> {
        Some(&self.reported)
    }
}

/// Registry value for one type.
///
/// Both variants are distinct from "no entry": `Unsupported` matches the type
/// during lookup and then fails, it never falls through to another converter.
#[derive(Clone)]
pub enum ConverterSlot {
    /// Registered converter, invoked on match.
    Present(Arc<dyn TextConverter>),
    /// Registered-but-unsupported marker (tombstone).
    Unsupported,
}

impl ConverterSlot {
    pub fn is_present(&self) -> bool {
        matches!(self, ConverterSlot::Present(_))
    }
}

impl fmt::Debug for ConverterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterSlot::Present(_) => f.write_str("Present(..)"),
            ConverterSlot::Unsupported => f.write_str("Unsupported"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Celsius(f64);

    #[test]
    fn from_fn_boxes_concrete_values() {
        let converter = from_fn(|text: &str| text.parse::<f64>().map(Celsius));

        let payload = converter.convert("21.5").unwrap();
        assert_eq!(
            (*payload).as_any().downcast_ref::<Celsius>(),
            Some(&Celsius(21.5))
        );
    }

    #[test]
    fn from_fn_keeps_the_converter_error() {
        let converter = from_fn(|text: &str| text.parse::<f64>().map(Celsius));

        let err = converter.convert("warm").unwrap_err();
        assert_eq!(err.to_string(), "invalid float literal");
    }

    #[test]
    fn reporting_converters_name_their_type() {
        let circle = TypeDescriptor::class("Circle").build().unwrap();
        let plain = from_fn(|text: &str| text.parse::<f64>().map(Celsius));
        assert!(plain.reported_type().is_none());

        let converter = reporting(circle.clone(), plain);
        assert_eq!(converter.reported_type(), Some(&circle));

        let payload = converter.convert("3").unwrap();
        assert_eq!(
            (*payload).as_any().downcast_ref::<Celsius>(),
            Some(&Celsius(3.0))
        );
    }

    #[test]
    fn closures_returning_payloads_are_converters() {
        let converter = |text: &str| -> Result<Arc<dyn Payload>, ConverterError> {
            if text.is_empty() {
                return Err("empty".into());
            }
            Ok(Arc::new(text.len()))
        };

        let payload = TextConverter::convert(&converter, "four").unwrap();
        assert_eq!((*payload).as_any().downcast_ref::<usize>(), Some(&4));
        assert!(TextConverter::convert(&converter, "").is_err());
    }
}
