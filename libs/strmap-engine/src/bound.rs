use std::fmt;

use strmap_api::{MapError, TypeDescriptor, Value};

use crate::mapper::{Mapper, NULL_TEXT};

/// Text fixed at construction, convertible to any number of types.
#[derive(Debug, Clone)]
pub struct BoundText<'m> {
    mapper: &'m Mapper,
    text: Option<String>,
}

impl<'m> BoundText<'m> {
    pub fn new(mapper: &'m Mapper, text: Option<&str>) -> Self {
        Self {
            mapper,
            text: text.map(str::to_string),
        }
    }

    pub fn map(&self, ty: &TypeDescriptor) -> Result<Option<Value>, MapError> {
        self.mapper.map_opt(self.text.as_deref(), ty)
    }

    /// The bound text, `None` when it was absent.
    pub fn to_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Absent text renders as `null`, the literal it maps as.
impl fmt::Display for BoundText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.as_deref().unwrap_or(NULL_TEXT))
    }
}
