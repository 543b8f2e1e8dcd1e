//! Text-to-value mapping: primitive parsing, the converter registry with
//! hierarchy fallback, enum mapping and type tables loaded from config.

pub mod bound;
pub mod config;
pub mod default;
pub mod error;
pub mod hierarchy;
pub mod mapper;
pub mod primitive;
pub mod registry;
pub mod table;

pub use bound::BoundText;
pub use config::{ConfigParser, DeclKind, TomlParser, TypeDecl, TypeTableConfig};
pub use default::{with_default, with_default_mut};
pub use error::EngineError;
pub use mapper::{Mapper, NULL_TEXT};
pub use registry::ConverterRegistry;
pub use table::TypeTable;
