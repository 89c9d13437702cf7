use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("vertex not present: {0}")]
    VertexMissing(String),
    #[error("vertex still referenced by an edge: {0}")]
    VertexInUse(String),
    #[error("edge not present: {0}")]
    EdgeMissing(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
