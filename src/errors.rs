use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnitBenchError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to launch inference tool '{tool}': {reason}")]
    ToolLaunch { tool: String, reason: String },

    #[error("statistic '{key}' not found in {source_name}")]
    MissingStatistic { key: String, source_name: String },

    #[error("statistic '{key}' has malformed value '{value}'")]
    MalformedStatistic { key: String, value: String },

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("logging error: {0}")]
    Logging(String),
}

impl UnitBenchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
