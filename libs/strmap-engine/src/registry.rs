use std::collections::HashMap;

use strmap_api::{ConverterSlot, TypeDescriptor};

use crate::hierarchy;

/// Registry of converters, keyed by type.
///
/// Keys are normalized to their boxed form, so `int` and `Integer` share one
/// entry. Iteration order is unspecified.
#[derive(Debug, Default, Clone)]
pub struct ConverterRegistry {
    entries: HashMap<TypeDescriptor, ConverterSlot>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `slot` for `ty`, returning the slot it replaced.
    pub fn insert(&mut self, ty: &TypeDescriptor, slot: ConverterSlot) -> Option<ConverterSlot> {
        self.entries.insert(ty.boxed_form(), slot)
    }

    /// Remove the entry for `ty`. Absent entries are not an error.
    pub fn remove(&mut self, ty: &TypeDescriptor) -> Option<ConverterSlot> {
        self.entries.remove(&ty.boxed_form())
    }

    pub fn get(&self, ty: &TypeDescriptor) -> Option<&ConverterSlot> {
        self.entries.get(&ty.boxed_form())
    }

    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.entries.contains_key(&ty.boxed_form())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeDescriptor, &ConverterSlot)> + '_ {
        self.entries.iter()
    }

    /// Exact entry for `requested`, or else the first entry (in unspecified
    /// order) whose key is reachable from `requested`.
    ///
    /// Returns the matched key along with its slot.
    pub fn lookup(&self, requested: &TypeDescriptor) -> Option<(&TypeDescriptor, &ConverterSlot)> {
        let key = requested.boxed_form();
        self.entries.get_key_value(&key).or_else(|| {
            self.entries
                .iter()
                .find(|(candidate, _)| hierarchy::is_reachable(&key, candidate))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strmap_api::PrimitiveKind;

    fn slot() -> ConverterSlot {
        ConverterSlot::Present(strmap_api::converter::from_fn(|text: &str| {
            Ok::<_, std::convert::Infallible>(text.to_string())
        }))
    }

    #[test]
    fn insert_overwrites_and_remove_is_idempotent() {
        let mut registry = ConverterRegistry::new();
        let date = TypeDescriptor::class("LocalDate").build().unwrap();

        assert!(registry.insert(&date, slot()).is_none());
        let replaced = registry.insert(&date, ConverterSlot::Unsupported);
        assert!(replaced.is_some_and(|s| s.is_present()));
        assert_eq!(registry.len(), 1);
        assert!(!registry.get(&date).unwrap().is_present());

        assert!(registry.remove(&date).is_some());
        assert!(registry.remove(&date).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn primitive_keys_are_normalized_to_boxed() {
        let mut registry = ConverterRegistry::new();
        registry.insert(&TypeDescriptor::primitive(PrimitiveKind::Int), slot());

        assert!(registry.contains(&TypeDescriptor::boxed(PrimitiveKind::Int)));
        registry.remove(&TypeDescriptor::boxed(PrimitiveKind::Int));
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_prefers_the_exact_entry() {
        let mut registry = ConverterRegistry::new();
        let parent = TypeDescriptor::class("Parent").build().unwrap();
        let child = TypeDescriptor::class("Child").extends(&parent).build().unwrap();

        registry.insert(&parent, ConverterSlot::Unsupported);
        registry.insert(&child, slot());

        let (key, found) = registry.lookup(&parent).unwrap();
        assert_eq!(key, &parent);
        assert!(!found.is_present());
    }

    #[test]
    fn lookup_falls_back_to_reachable_subtypes_only() {
        let mut registry = ConverterRegistry::new();
        let parent = TypeDescriptor::class("Parent").build().unwrap();
        let child = TypeDescriptor::class("Child").extends(&parent).build().unwrap();
        let grandchild = TypeDescriptor::class("Grandchild").extends(&child).build().unwrap();

        registry.insert(&child, slot());

        let (key, _) = registry.lookup(&parent).unwrap();
        assert_eq!(key, &child);
        assert!(registry.lookup(&grandchild).is_none());
    }
}
