use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::TypeError;
use crate::kind::PrimitiveKind;

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

/// Broad category of a [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Unboxed value kind (`int`, `boolean`, ...).
    Primitive,
    /// Canonical boxed counterpart of a primitive kind (`Integer`, `String`, ...).
    Boxed,
    /// Declared type with an optional parent class.
    Class,
    /// Named contract a type can implement, independent of its parent chain.
    Capability,
    /// Declared enumeration with a fixed, ordered list of case names.
    Enum,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Primitive => "primitive",
            TypeKind::Boxed => "boxed",
            TypeKind::Class => "class",
            TypeKind::Capability => "capability",
            TypeKind::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// Runtime type descriptor.
///
/// Cheap to clone. Primitive and boxed descriptors compare by kind; declared
/// descriptors (classes, capabilities, enums) compare by the identity assigned
/// when they were built, so two declarations sharing a name are still distinct
/// types.
///
/// The hierarchy is immutable: a builder only accepts parents and
/// capabilities that already exist, which keeps every ancestor chain finite and
/// acyclic.
#[derive(Clone)]
pub struct TypeDescriptor {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Primitive(PrimitiveKind),
    Boxed(PrimitiveKind),
    Declared(Arc<DeclaredType>),
}

struct DeclaredType {
    id: u64,
    name: String,
    kind: TypeKind,
    parent: Option<TypeDescriptor>,
    capabilities: Vec<TypeDescriptor>,
    cases: Vec<String>,
}

impl TypeDescriptor {
    /// Unboxed descriptor for `kind`. `String` has no unboxed form and yields
    /// its boxed descriptor.
    pub const fn primitive(kind: PrimitiveKind) -> Self {
        let repr = if matches!(kind, PrimitiveKind::String) {
            Repr::Boxed(kind)
        } else {
            Repr::Primitive(kind)
        };
        Self { repr }
    }

    /// Boxed descriptor for `kind`.
    pub const fn boxed(kind: PrimitiveKind) -> Self {
        Self {
            repr: Repr::Boxed(kind),
        }
    }

    pub const fn string() -> Self {
        Self::boxed(PrimitiveKind::String)
    }

    pub fn class(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder::new(name.into(), TypeKind::Class, Vec::new())
    }

    /// Capabilities may extend other capabilities through
    /// [`TypeBuilder::implements`].
    pub fn capability(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder::new(name.into(), TypeKind::Capability, Vec::new())
    }

    pub fn enumeration<I, S>(name: impl Into<String>, cases: I) -> TypeBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cases = cases.into_iter().map(Into::into).collect();
        TypeBuilder::new(name.into(), TypeKind::Enum, cases)
    }

    pub fn name(&self) -> &str {
        match &self.repr {
            Repr::Primitive(kind) => kind.primitive_name().unwrap_or(kind.boxed_name()),
            Repr::Boxed(kind) => kind.boxed_name(),
            Repr::Declared(declared) => &declared.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match &self.repr {
            Repr::Primitive(_) => TypeKind::Primitive,
            Repr::Boxed(_) => TypeKind::Boxed,
            Repr::Declared(declared) => declared.kind,
        }
    }

    /// True only for unboxed primitive descriptors.
    pub const fn is_primitive(&self) -> bool {
        matches!(self.repr, Repr::Primitive(_))
    }

    /// Primitive kind of a primitive *or* boxed descriptor.
    pub const fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match &self.repr {
            Repr::Primitive(kind) | Repr::Boxed(kind) => Some(*kind),
            Repr::Declared(_) => None,
        }
    }

    pub fn is_enum(&self) -> bool {
        self.kind() == TypeKind::Enum
    }

    pub fn parent(&self) -> Option<&TypeDescriptor> {
        match &self.repr {
            Repr::Declared(declared) => declared.parent.as_ref(),
            _ => None,
        }
    }

    /// Directly implemented capabilities, in declaration order.
    pub fn capabilities(&self) -> &[TypeDescriptor] {
        match &self.repr {
            Repr::Declared(declared) => &declared.capabilities,
            _ => &[],
        }
    }

    /// Case names of an enum descriptor, in declaration order.
    pub fn enum_cases(&self) -> Option<&[String]> {
        match &self.repr {
            Repr::Declared(declared) if declared.kind == TypeKind::Enum => Some(&declared.cases),
            _ => None,
        }
    }

    /// Ordinal of the case named exactly `name` (case-sensitive).
    pub fn case_ordinal(&self, name: &str) -> Option<usize> {
        self.enum_cases()?.iter().position(|case| case == name)
    }

    /// Canonical boxed form: primitives map to their boxed counterpart,
    /// everything else to itself.
    pub fn boxed_form(&self) -> TypeDescriptor {
        match self.repr {
            Repr::Primitive(kind) => Self::boxed(kind),
            _ => self.clone(),
        }
    }
}

/// Free-standing form of [`TypeDescriptor::boxed_form`], for callers that want
/// to predict the reported type of a successful conversion.
pub fn boxed_form_of(ty: &TypeDescriptor) -> TypeDescriptor {
    ty.boxed_form()
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Primitive(a), Repr::Primitive(b)) | (Repr::Boxed(a), Repr::Boxed(b)) => a == b,
            (Repr::Declared(a), Repr::Declared(b)) => a.id == b.id,
            _ => false,
        }
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.repr {
            Repr::Primitive(kind) => {
                0u8.hash(state);
                kind.hash(state);
            }
            Repr::Boxed(kind) => {
                1u8.hash(state);
                kind.hash(state);
            }
            Repr::Declared(declared) => {
                2u8.hash(state);
                declared.id.hash(state);
            }
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder for declared descriptors. See [`TypeDescriptor::class`],
/// [`TypeDescriptor::capability`] and [`TypeDescriptor::enumeration`].
#[derive(Debug)]
pub struct TypeBuilder {
    name: String,
    kind: TypeKind,
    parent: Option<TypeDescriptor>,
    capabilities: Vec<TypeDescriptor>,
    cases: Vec<String>,
}

impl TypeBuilder {
    fn new(name: String, kind: TypeKind, cases: Vec<String>) -> Self {
        Self {
            name,
            kind,
            parent: None,
            capabilities: Vec::new(),
            cases,
        }
    }

    /// Set the parent class. Only classes may have (and be) a parent.
    pub fn extends(mut self, parent: &TypeDescriptor) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    /// Add a directly implemented capability.
    pub fn implements(mut self, capability: &TypeDescriptor) -> Self {
        self.capabilities.push(capability.clone());
        self
    }

    pub fn build(self) -> Result<TypeDescriptor, TypeError> {
        if self.name.trim().is_empty() {
            return Err(TypeError::EmptyName);
        }

        if let Some(parent) = &self.parent {
            if self.kind != TypeKind::Class {
                return Err(TypeError::ParentNotAllowed {
                    ty: self.name,
                    kind: self.kind,
                });
            }
            if parent.kind() != TypeKind::Class {
                return Err(TypeError::InvalidParent {
                    ty: self.name,
                    parent: parent.name().to_string(),
                });
            }
        }

        if let Some(capability) = self
            .capabilities
            .iter()
            .find(|c| c.kind() != TypeKind::Capability)
        {
            return Err(TypeError::NotACapability {
                ty: self.name,
                capability: capability.name().to_string(),
            });
        }

        if self.kind == TypeKind::Enum {
            if self.cases.is_empty() {
                return Err(TypeError::NoEnumCases { ty: self.name });
            }
            for (i, case) in self.cases.iter().enumerate() {
                if self.cases[..i].contains(case) {
                    return Err(TypeError::DuplicateCase {
                        ty: self.name.clone(),
                        case: case.clone(),
                    });
                }
            }
        }

        Ok(TypeDescriptor {
            repr: Repr::Declared(Arc::new(DeclaredType {
                id: NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed),
                name: self.name,
                kind: self.kind,
                parent: self.parent,
                capabilities: self.capabilities,
                cases: self.cases,
            })),
        })
    }
}
