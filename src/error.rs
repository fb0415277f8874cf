use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrewbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, CrewbookError>;
