use std::sync::Arc;

use strmap_api::converter::{self, ConverterError, Payload, TextConverter};
use strmap_api::{ConverterSlot, EnumCase, MapError, Object, TypeDescriptor, TypeError, Value};

use crate::bound::BoundText;
use crate::hierarchy;
use crate::primitive;
use crate::registry::ConverterRegistry;

/// Literal that absent text is normalized to, and that maps to "no value" for
/// every non-primitive type.
pub const NULL_TEXT: &str = "null";

/// Maps text to typed values.
///
/// Owns its converter registry and the enum-mapping switch. Mutation takes
/// `&mut self`, so registration can never overlap a `map` call on the same
/// instance; share an instance across threads behind your own lock.
#[derive(Default, Clone)]
pub struct Mapper {
    registry: ConverterRegistry,
    enum_mapping: bool,
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("converters", &self.registry.len())
            .field("enum_mapping", &self.enum_mapping)
            .finish()
    }
}

impl Mapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` as the converter for `ty`, replacing any previous entry.
    ///
    /// The value `f` returns is reported as `ty` (see [`Value::type_descriptor`]).
    pub fn add_converter<F, T, E>(&mut self, ty: &TypeDescriptor, f: F) -> &mut Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        T: Payload,
        E: Into<ConverterError>,
    {
        self.insert(ty, ConverterSlot::Present(converter::from_fn(f)))
    }

    /// Register `f` for `ty` with its values reported as `reported`, a subtype
    /// or implementor of `ty`.
    pub fn add_converter_as<F, T, E>(
        &mut self,
        ty: &TypeDescriptor,
        reported: &TypeDescriptor,
        f: F,
    ) -> Result<&mut Self, TypeError>
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        T: Payload,
        E: Into<ConverterError>,
    {
        self.add_shared_converter(ty, converter::reporting(reported.clone(), converter::from_fn(f)))
    }

    /// Register an already shared converter for `ty`.
    ///
    /// Fails if the converter reports a type that does not conform to `ty`.
    pub fn add_shared_converter(
        &mut self,
        ty: &TypeDescriptor,
        converter: Arc<dyn TextConverter>,
    ) -> Result<&mut Self, TypeError> {
        if let Some(reported) = converter.reported_type() {
            if !hierarchy::is_reachable(&ty.boxed_form(), &reported.boxed_form()) {
                return Err(TypeError::NotASubtype {
                    ty: ty.name().to_string(),
                    reported: reported.name().to_string(),
                });
            }
        }
        Ok(self.insert(ty, ConverterSlot::Present(converter)))
    }

    /// Mark `ty` as registered-but-unsupported.
    ///
    /// Requests resolving to this entry fail with `UnsupportedType` instead of
    /// falling back to another reachable converter.
    pub fn add_unsupported(&mut self, ty: &TypeDescriptor) -> &mut Self {
        self.insert(ty, ConverterSlot::Unsupported)
    }

    fn insert(&mut self, ty: &TypeDescriptor, slot: ConverterSlot) -> &mut Self {
        let present = slot.is_present();
        if present && ty.primitive_kind().is_some() {
            tracing::warn!(ty = %ty, "converter registered for a primitive type is never consulted");
        }
        if self.registry.insert(ty, slot).is_some() {
            tracing::debug!(ty = %ty, present, "replaced converter");
        } else {
            tracing::debug!(ty = %ty, present, "registered converter");
        }
        self
    }

    /// Remove the entry for `ty`. Removing an absent entry is a no-op.
    pub fn remove_converter(&mut self, ty: &TypeDescriptor) -> &mut Self {
        if self.registry.remove(ty).is_some() {
            tracing::debug!(ty = %ty, "removed converter");
        }
        self
    }

    pub fn enable_enum_mapping(&mut self) -> &mut Self {
        self.enum_mapping = true;
        self
    }

    pub fn disable_enum_mapping(&mut self) -> &mut Self {
        self.enum_mapping = false;
        self
    }

    pub fn is_enum_mapping_enabled(&self) -> bool {
        self.enum_mapping
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Bind `text` for repeated conversions to different types.
    pub fn bind<'m>(&'m self, text: Option<&str>) -> BoundText<'m> {
        BoundText::new(self, text)
    }

    /// Convert `text` into a value of type `ty`. See [`Mapper::map_opt`].
    pub fn map(&self, text: &str, ty: &TypeDescriptor) -> Result<Option<Value>, MapError> {
        self.map_opt(Some(text), ty)
    }

    /// Convert possibly absent `text` into a value of type `ty`.
    ///
    /// Precedence:
    /// 1. absent text is treated as `"null"`;
    /// 2. `"null"` for a non-primitive type yields `Ok(None)`;
    /// 3. primitive and boxed types use the primitive rules;
    /// 4. with enum mapping enabled, enums match case names exactly;
    /// 5. the exact converter for `ty`, else any registered converter for a
    ///    subtype or implementor of `ty` (which one is unspecified);
    /// 6. otherwise `UnsupportedType`.
    pub fn map_opt(
        &self,
        text: Option<&str>,
        ty: &TypeDescriptor,
    ) -> Result<Option<Value>, MapError> {
        let text = text.unwrap_or(NULL_TEXT);

        if !ty.is_primitive() && text == NULL_TEXT {
            tracing::trace!(ty = %ty, "null text, no value");
            return Ok(None);
        }

        if let Some(value) = primitive::convert_primitive(text, ty)? {
            tracing::trace!(ty = %ty, "converted by primitive rule");
            return Ok(Some(value));
        }

        if self.enum_mapping && ty.is_enum() {
            return map_enum(text, ty).map(Some);
        }

        let Some((key, slot)) = self.registry.lookup(ty) else {
            tracing::debug!(ty = %ty, "no reachable converter");
            return Err(MapError::UnsupportedType(ty.clone()));
        };

        if key != ty {
            tracing::debug!(requested = %ty, resolved = %key, "resolved converter through type hierarchy");
        }

        match slot {
            ConverterSlot::Unsupported => {
                tracing::debug!(requested = %ty, resolved = %key, "converter registered as unsupported");
                Err(MapError::UnsupportedType(ty.clone()))
            }
            ConverterSlot::Present(converter) => match converter.convert(text) {
                Ok(payload) => {
                    let reported = converter.reported_type().unwrap_or(key);
                    Ok(Some(Value::Object(Object::new(reported.clone(), payload))))
                }
                Err(source) => Err(MapError::Converter {
                    ty: key.clone(),
                    text: text.to_string(),
                    source,
                }),
            },
        }
    }
}

fn map_enum(text: &str, ty: &TypeDescriptor) -> Result<Value, MapError> {
    ty.case_ordinal(text)
        .and_then(|ordinal| EnumCase::new(ty, ordinal))
        .map(Value::Enum)
        .ok_or_else(|| MapError::UnknownEnumCase {
            text: text.to_string(),
            ty: ty.clone(),
        })
}
