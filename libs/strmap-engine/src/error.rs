use strmap_api::{MapError, TypeError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("type error: {0}")]
    Type(#[from] TypeError),

    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("mapping error: {0}")]
    Map(#[from] MapError),

    #[error("io error: {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    /// Add context to the error.
    ///
    /// String-carrying variants get the context prepended; `Type` errors are
    /// turned into `Config` errors so the context is not lost.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            EngineError::Type(e) => EngineError::Config(format!("{ctx}: {e}")),
            EngineError::UnknownType(name) => EngineError::UnknownType(format!("{ctx}: {name}")),
            other => other,
        }
    }
}
