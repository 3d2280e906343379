use std::fmt;

use thiserror::Error;
use ums_model::UserId;

use crate::validation::ValidationError;

/// Failure of a single request to the remote API
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Which of the two collections an id was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Active,
    Trash,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active list"),
            Self::Trash => f.write_str("trash"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("User {id} is not in the {set}")]
    NotFound { id: UserId, set: CollectionKind },

    #[error("Page {page} is out of range (total pages: {total_pages})")]
    PageOutOfRange { page: u32, total_pages: u32 },

    #[error("User collection has been closed")]
    Closed,
}

/// Failure reading or writing the token store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Token store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Not authenticated")]
    NotAuthenticated,
}
