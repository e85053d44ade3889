//! # Distributed Bitonic Sort
//!
//! A bitonic sorting network distributed across a fixed, power-of-two number
//! of MPI workers. Each worker owns one equal-length partition of the global
//! sequence, sorts it locally with the sequential merge engine, and then
//! drives the pairwise compare-exchange schedule of the network; after the
//! final stage the concatenation of the partitions in rank order is globally
//! sorted.
//!
//! The schedule and the merge engine are pure and usable without MPI; the
//! cross-worker layer is enabled with the `mpi` feature.
//!
//! ## References
//!
//! \[1\] Batcher, K. E. "Sorting networks and their applications." Proceedings
//! of the April 30--May 2, 1968, spring joint computer conference. ACM (1968).
//!
//! \[2\] Grama, A., Gupta, A., Karypis, G., and Kumar, V. "Introduction to
//! Parallel Computing." 2nd ed., Addison-Wesley (2003), chapter 9.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod constants;
#[cfg(feature = "mpi")]
pub mod distributed;
pub mod merge;
pub mod network;
pub mod types;
