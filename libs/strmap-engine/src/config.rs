use std::path::Path;

use serde::Deserialize;

use crate::error::EngineError;

/// Root of a type table file.
///
/// ```toml
/// enum_mapping = true
///
/// [[types]]
/// name = "Shape"
/// kind = "capability"
///
/// [[types]]
/// name = "Circle"
/// kind = "class"
/// implements = ["Shape"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeTableConfig {
    /// Type declarations, in any order.
    #[serde(default)]
    pub types: Vec<TypeDecl>,

    /// Enable enum mapping on mappers configured from this file.
    #[serde(default)]
    pub enum_mapping: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub kind: DeclKind,
    /// Parent class (classes only).
    #[serde(default)]
    pub extends: Option<String>,
    /// Directly implemented capabilities.
    #[serde(default)]
    pub implements: Vec<String>,
    /// Case names (enums only).
    #[serde(default)]
    pub cases: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Class,
    Capability,
    Enum,
}

/// Parser for one configuration format, selected by file extension.
pub trait ConfigParser {
    fn extensions(&self) -> &[&str];

    fn parse(&self, content: &str) -> Result<TypeTableConfig, EngineError>;
}

pub struct TomlParser;

impl ConfigParser for TomlParser {
    fn extensions(&self) -> &[&str] {
        &["toml"]
    }

    fn parse(&self, content: &str) -> Result<TypeTableConfig, EngineError> {
        TypeTableConfig::parse(content)
    }
}

impl TypeTableConfig {
    /// Load a TOML type table.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        Self::load_with(Path::new(path), &[&TomlParser])
    }

    /// Load a type table, picking the parser by file extension.
    pub fn load_with(path: &Path, parsers: &[&dyn ConfigParser]) -> Result<Self, EngineError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let parser = parsers
            .iter()
            .find(|p| p.extensions().contains(&ext))
            .ok_or_else(|| {
                EngineError::Config(format!(
                    "{}: no parser for extension '{ext}'",
                    path.display()
                ))
            })?;

        let content = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parser
            .parse(&content)
            .map_err(|e| e.with_context(path.display()))
    }

    /// Parse a type table from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_declarations_with_defaults() {
        let config = TypeTableConfig::parse(
            r#"
            [[types]]
            name = "Shape"
            kind = "capability"

            [[types]]
            name = "Circle"
            kind = "class"
            extends = "Figure"
            implements = ["Shape"]

            [[types]]
            name = "Month"
            kind = "enum"
            cases = ["JANUARY", "FEBRUARY"]
            "#,
        )
        .unwrap();

        assert!(!config.enum_mapping);
        assert_eq!(config.types.len(), 3);
        assert_eq!(config.types[0].kind, DeclKind::Capability);
        assert_eq!(config.types[0].extends, None);
        assert_eq!(config.types[1].extends.as_deref(), Some("Figure"));
        assert_eq!(config.types[1].implements, ["Shape"]);
        assert_eq!(config.types[2].cases, ["JANUARY", "FEBRUARY"]);
    }

    #[test]
    fn empty_file_is_an_empty_table() {
        let config = TypeTableConfig::parse("").unwrap();
        assert!(config.types.is_empty());
    }

    #[test]
    fn unknown_kind_is_a_config_error() {
        let err = TypeTableConfig::parse(
            r#"
            [[types]]
            name = "Thing"
            kind = "struct"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn load_with_rejects_unknown_extensions() {
        let err = TypeTableConfig::load_with(Path::new("types.yaml"), &[&TomlParser]).unwrap_err();
        assert!(err.to_string().contains("no parser for extension 'yaml'"));
    }

    #[test]
    fn missing_files_are_io_errors() {
        let path = std::env::temp_dir().join("strmap-config-missing.toml");
        let err = TypeTableConfig::load_with(&path, &[&TomlParser]).unwrap_err();

        match err {
            EngineError::Io { path: reported, source } => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_reads_toml_files() {
        let path = std::env::temp_dir().join(format!("strmap-config-{}.toml", std::process::id()));
        std::fs::write(&path, "enum_mapping = true\n").unwrap();

        let config = TypeTableConfig::load(path.to_str().unwrap()).unwrap();
        assert!(config.enum_mapping);

        std::fs::remove_file(&path).unwrap();
    }
}
