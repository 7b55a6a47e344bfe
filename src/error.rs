use thiserror::Error;

use crate::graph::CycleError;
use crate::record::RecordError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error("invalid input: {0}")]
    Record(#[from] RecordError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("analysis document: {0}")]
    Analysis(String),
    #[error("unknown input type: {0}")]
    UnknownInputType(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
