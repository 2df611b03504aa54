use thiserror::Error;

/// Errors raised by the pipeline and its collaborators.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("listing {path} failed: {reason}")]
    Listing { path: String, reason: String },

    #[error("download of {path} failed: {reason}")]
    Download { path: String, reason: String },

    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("image encode failed: {0}")]
    Encode(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IndexError {
    pub fn listing(path: impl Into<String>, reason: impl ToString) -> Self {
        IndexError::Listing {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn download(path: impl Into<String>, reason: impl ToString) -> Self {
        IndexError::Download {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<rusqlite::Error> for IndexError {
    fn from(e: rusqlite::Error) -> Self {
        IndexError::Storage(e.to_string())
    }
}

pub type IndexResult<T> = std::result::Result<T, IndexError>;
