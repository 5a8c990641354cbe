use thiserror::Error;

/// Failures reported by a [`StorageAdapter`](crate::storage::StorageAdapter).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("could not reach the storage provider: {0}")]
    Connectivity(String),

    #[error("bucket `{0}` is not empty")]
    BucketNotEmpty(String),

    #[error("could not delete `{key}`: {message}")]
    DeleteFailed { key: String, message: String },

    #[error("{0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum BucketUtilError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("No such bucket: {0}")]
    NoSuchBucket(usize),

    #[error("Please specify a bucket number to {0}")]
    MissingTarget(&'static str),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
