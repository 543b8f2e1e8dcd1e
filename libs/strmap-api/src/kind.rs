use std::fmt;

/// Value kinds handled by the primitive fast path.
///
/// Every kind has exactly one boxed counterpart (see [`IDENTITY_TABLE`]).
/// `String` is the odd one out: it has no unboxed form, so its primitive and
/// boxed descriptors coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Bool,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
}

/// One row of the identity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindEntry {
    pub kind: PrimitiveKind,
    /// Name of the unboxed form. `None` when the kind only exists boxed.
    pub primitive_name: Option<&'static str>,
    /// Name of the canonical boxed form.
    pub boxed_name: &'static str,
}

/// Static primitive → boxed mapping, indexed by `PrimitiveKind as usize`.
pub static IDENTITY_TABLE: [KindEntry; 9] = [
    KindEntry { kind: PrimitiveKind::Bool, primitive_name: Some("boolean"), boxed_name: "Boolean" },
    KindEntry { kind: PrimitiveKind::Byte, primitive_name: Some("byte"), boxed_name: "Byte" },
    KindEntry { kind: PrimitiveKind::Char, primitive_name: Some("char"), boxed_name: "Character" },
    KindEntry { kind: PrimitiveKind::Short, primitive_name: Some("short"), boxed_name: "Short" },
    KindEntry { kind: PrimitiveKind::Int, primitive_name: Some("int"), boxed_name: "Integer" },
    KindEntry { kind: PrimitiveKind::Long, primitive_name: Some("long"), boxed_name: "Long" },
    KindEntry { kind: PrimitiveKind::Float, primitive_name: Some("float"), boxed_name: "Float" },
    KindEntry { kind: PrimitiveKind::Double, primitive_name: Some("double"), boxed_name: "Double" },
    KindEntry { kind: PrimitiveKind::String, primitive_name: None, boxed_name: "String" },
];

impl PrimitiveKind {
    /// All kinds in identity-table order.
    pub const ALL: [Self; 9] = [
        Self::Bool,
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::String,
    ];

    pub fn entry(self) -> &'static KindEntry {
        &IDENTITY_TABLE[self as usize]
    }

    pub fn primitive_name(self) -> Option<&'static str> {
        self.entry().primitive_name
    }

    pub fn boxed_name(self) -> &'static str {
        self.entry().boxed_name
    }

    /// Whether the kind has a distinct unboxed form.
    pub fn has_unboxed_form(self) -> bool {
        self.entry().primitive_name.is_some()
    }

    /// Floating-point kinds, whose literals tolerate surrounding whitespace.
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Look a kind up by either of its names.
    ///
    /// Returns the kind and whether `name` referred to the boxed form.
    pub fn from_name(name: &str) -> Option<(Self, bool)> {
        IDENTITY_TABLE.iter().find_map(|entry| {
            if entry.boxed_name == name {
                Some((entry.kind, true))
            } else if entry.primitive_name == Some(name) {
                Some((entry.kind, false))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.primitive_name().unwrap_or(self.boxed_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(kind.entry().kind, kind);
        }
    }

    #[test]
    fn from_name_distinguishes_boxed_and_primitive_names() {
        assert_eq!(PrimitiveKind::from_name("int"), Some((PrimitiveKind::Int, false)));
        assert_eq!(PrimitiveKind::from_name("Integer"), Some((PrimitiveKind::Int, true)));
        assert_eq!(PrimitiveKind::from_name("Character"), Some((PrimitiveKind::Char, true)));
        assert_eq!(PrimitiveKind::from_name("String"), Some((PrimitiveKind::String, true)));
        assert_eq!(PrimitiveKind::from_name("string"), None);
        assert_eq!(PrimitiveKind::from_name("LocalDate"), None);
    }

    #[test]
    fn only_float_and_double_are_floating() {
        let floating: Vec<_> = PrimitiveKind::ALL
            .into_iter()
            .filter(|kind| kind.is_floating())
            .collect();
        assert_eq!(floating, [PrimitiveKind::Float, PrimitiveKind::Double]);
    }

    #[test]
    fn string_has_no_unboxed_form() {
        assert!(!PrimitiveKind::String.has_unboxed_form());
        assert_eq!(PrimitiveKind::String.to_string(), "String");
        assert_eq!(PrimitiveKind::Double.to_string(), "double");
    }
}
