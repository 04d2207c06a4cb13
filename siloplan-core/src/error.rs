use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiloError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No supporting post matches '{0}'")]
    UnknownPost(String),
}

pub type Result<T> = std::result::Result<T, SiloError>;
