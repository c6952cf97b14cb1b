use thiserror::Error;

/// Terminal failure while analyzing a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("cannot parse fragment: {reason}")]
    Parse { reason: String },
}

/// Failure handing an analysis over to the block store.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("analysis is not valid: {0}")]
    InvalidAnalysis(String),
    #[error("block store rejected record: {0}")]
    Store(String),
}

/// Reason a single styleset variable value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableError {
    #[error("value of `{name}` contains a dangerous pattern")]
    Dangerous { name: String },
    #[error("`{value}` is not a valid color for `{name}`")]
    InvalidColor { name: String, value: String },
    #[error("`{value}` is not a valid font family for `{name}`")]
    InvalidFontFamily { name: String, value: String },
    #[error("`{value}` is not a valid size for `{name}`")]
    InvalidSize { name: String, value: String },
}
