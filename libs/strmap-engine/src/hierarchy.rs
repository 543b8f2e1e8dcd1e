//! Type hierarchy queries used when no exact converter is registered.
//!
//! A registered type is *reachable* from a requested type when the requested
//! type shows up in the registered type's ancestry: the registered type is the
//! requested type itself, one of its subclasses, or an implementor of the
//! requested capability. Converters for supertypes are never reachable from a
//! subtype request.

use strmap_api::TypeDescriptor;

/// Ancestry of `ty` in walk order.
///
/// The type itself comes first. At each level every directly implemented
/// capability is visited (depth-first through capabilities that extend other
/// capabilities) before moving on to the parent. Each type appears once.
pub fn ancestry(ty: &TypeDescriptor) -> Vec<TypeDescriptor> {
    let mut order: Vec<TypeDescriptor> = Vec::new();
    let mut level = Some(ty);

    while let Some(current) = level {
        if !order.contains(current) {
            order.push(current.clone());
        }
        for capability in current.capabilities() {
            visit_capability(&mut order, capability);
        }
        level = current.parent();
    }

    order
}

fn visit_capability(order: &mut Vec<TypeDescriptor>, capability: &TypeDescriptor) {
    if order.contains(capability) {
        return;
    }
    order.push(capability.clone());
    for inherited in capability.capabilities() {
        visit_capability(order, inherited);
    }
}

/// Whether a converter registered for `candidate` may serve a request for
/// `requested`.
pub fn is_reachable(requested: &TypeDescriptor, candidate: &TypeDescriptor) -> bool {
    candidate == requested || ancestry(candidate).iter().any(|ty| ty == requested)
}
