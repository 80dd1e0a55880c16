use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("storage error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt persisted session: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("no storage directory available; set session.storage_dir")]
    NoStorageDir,
}
