//! General type definitions.

/// A worker's rank within the communicator.
pub type Rank = i32;

/// Message tag identifying one round of the network.
pub type Tag = i32;

/// Sort order produced by a merge or exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Monotonically non-decreasing output.
    Ascending,
    /// Monotonically non-increasing output.
    Descending,
}

/// Generic error type
#[derive(thiserror::Error, Debug)]
pub enum SortError {
    /// The communicator size is not a power of two.
    #[error("worker count must be a power of two, got {0}")]
    WorkerCount(Rank),
    /// A local partition length is not a power of two.
    #[error("partition length must be a power of two, got {0}")]
    PartitionLen(usize),
}

/// Result Type
pub type Result<T> = std::result::Result<T, SortError>;
