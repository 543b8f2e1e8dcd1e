use std::collections::HashMap;

use strmap_api::{PrimitiveKind, TypeDescriptor};

use crate::config::{DeclKind, TypeDecl, TypeTableConfig};
use crate::error::EngineError;

/// Named type descriptors built from a [`TypeTableConfig`].
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: HashMap<String, TypeDescriptor>,
    order: Vec<String>,
}

impl TypeTable {
    /// Build every declared type.
    ///
    /// Declarations may reference each other in any order. Unknown references,
    /// duplicate names, names taken by primitive types and inheritance cycles
    /// are errors.
    pub fn from_config(config: &TypeTableConfig) -> Result<Self, EngineError> {
        let mut decls: HashMap<&str, &TypeDecl> = HashMap::new();
        for decl in &config.types {
            if PrimitiveKind::from_name(&decl.name).is_some() {
                return Err(EngineError::Config(format!(
                    "type name '{}' is reserved",
                    decl.name
                )));
            }
            if decls.insert(decl.name.as_str(), decl).is_some() {
                return Err(EngineError::Config(format!(
                    "type '{}' declared twice",
                    decl.name
                )));
            }
        }

        let mut builder = TableBuilder {
            decls,
            built: HashMap::new(),
            visiting: Vec::new(),
        };
        for decl in &config.types {
            builder.build(&decl.name)?;
        }

        tracing::debug!(types = config.types.len(), "built type table");
        Ok(Self {
            types: builder.built,
            order: config.types.iter().map(|d| d.name.clone()).collect(),
        })
    }

    /// Declared type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Resolve a declared, primitive (`int`) or boxed (`Integer`, `String`)
    /// type name.
    pub fn resolve(&self, name: &str) -> Result<TypeDescriptor, EngineError> {
        if let Some(ty) = builtin(name) {
            return Ok(ty);
        }
        self.get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownType(name.to_string()))
    }

    /// Declared types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> + '_ {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn builtin(name: &str) -> Option<TypeDescriptor> {
    PrimitiveKind::from_name(name).map(|(kind, boxed)| {
        if boxed {
            TypeDescriptor::boxed(kind)
        } else {
            TypeDescriptor::primitive(kind)
        }
    })
}

struct TableBuilder<'a> {
    decls: HashMap<&'a str, &'a TypeDecl>,
    built: HashMap<String, TypeDescriptor>,
    visiting: Vec<&'a str>,
}

impl<'a> TableBuilder<'a> {
    fn build(&mut self, name: &'a str) -> Result<TypeDescriptor, EngineError> {
        if let Some(ty) = self.built.get(name) {
            return Ok(ty.clone());
        }
        let Some(decl) = self.decls.get(name).copied() else {
            // Built-in names are handed to the type builder, which reports
            // them as invalid parents or capabilities.
            return builtin(name).ok_or_else(|| EngineError::UnknownType(name.to_string()));
        };

        if let Some(start) = self.visiting.iter().position(|v| *v == name) {
            let mut chain = self.visiting[start..].to_vec();
            chain.push(name);
            return Err(EngineError::Config(format!(
                "inheritance cycle: {}",
                chain.join(" -> ")
            )));
        }

        self.visiting.push(name);
        let result = self.build_decl(decl);
        self.visiting.pop();

        let ty = result.map_err(|e| e.with_context(format!("type '{name}'")))?;
        self.built.insert(name.to_string(), ty.clone());
        Ok(ty)
    }

    fn build_decl(&mut self, decl: &'a TypeDecl) -> Result<TypeDescriptor, EngineError> {
        if decl.kind != DeclKind::Enum && !decl.cases.is_empty() {
            return Err(EngineError::Config("only enums declare cases".into()));
        }

        let mut builder = match decl.kind {
            DeclKind::Class => TypeDescriptor::class(&decl.name),
            DeclKind::Capability => TypeDescriptor::capability(&decl.name),
            DeclKind::Enum => TypeDescriptor::enumeration(&decl.name, decl.cases.iter().cloned()),
        };
        if let Some(parent) = &decl.extends {
            let parent = self.build(parent)?;
            builder = builder.extends(&parent);
        }
        for capability in &decl.implements {
            let capability = self.build(capability)?;
            builder = builder.implements(&capability);
        }

        Ok(builder.build()?)
    }
}
