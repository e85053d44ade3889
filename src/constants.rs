//! Crate level constants.
use crate::types::Rank;

/// Rank of the coordinator that gathers and verifies the final sequence.
pub const ROOT_RANK: Rank = 0;

/// Base RNG seed used by the driver when none is supplied.
pub const DEFAULT_SEED: u64 = 0;
