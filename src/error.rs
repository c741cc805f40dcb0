use thiserror::Error;

/// Errors raised by the filtering core before any band is dispatched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("thread count must be at least 1, got {threads}")]
    InvalidThreadCount { threads: usize },

    #[error("{threads} threads exceed image height {height}; bands would be empty")]
    TooManyThreads { threads: usize, height: usize },

    #[error("grid data has {actual} samples, expected {expected}")]
    GridSize { expected: usize, actual: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for FilterError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        FilterError::ThreadPool(err.to_string())
    }
}
