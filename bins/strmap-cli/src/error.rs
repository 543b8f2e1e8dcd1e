use strmap_engine::EngineError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("json output: {0}")]
    Json(#[from] serde_json::Error),
}
