use strmap_engine::config::{ConfigParser, TypeTableConfig};
use strmap_engine::error::EngineError;

pub struct HclParser;

impl ConfigParser for HclParser {
    fn extensions(&self) -> &[&str] {
        &["hcl"]
    }

    fn parse(&self, content: &str) -> Result<TypeTableConfig, EngineError> {
        hcl::from_str(content).map_err(|e| EngineError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strmap_engine::config::DeclKind;
    use strmap_engine::TypeTable;

    #[test]
    fn parses_type_tables() {
        let config = HclParser
            .parse(
                r#"
                enum_mapping = true

                types = [
                  { name = "Circle", kind = "class", implements = ["Shape"] },
                  { name = "Shape", kind = "capability" },
                  { name = "Month", kind = "enum", cases = ["JANUARY", "FEBRUARY"] },
                ]
                "#,
            )
            .unwrap();

        assert!(config.enum_mapping);
        assert_eq!(config.types[1].kind, DeclKind::Capability);

        let table = TypeTable::from_config(&config).unwrap();
        let shape = table.get("Shape").unwrap();
        assert_eq!(table.get("Circle").unwrap().capabilities(), [shape.clone()]);
        assert_eq!(table.get("Month").unwrap().case_ordinal("JANUARY"), Some(0));
    }

    #[test]
    fn malformed_input_is_a_config_error() {
        let err = HclParser.parse("types = [").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
