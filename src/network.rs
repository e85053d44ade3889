//! Network stage schedule for the distributed sort.
//!
//! The bitonic network over P workers runs log2(P) stages; stage `i` runs
//! substages `j = i, i - 1, .., 1`. Substage `j` pairs the ranks that lie in
//! the same block of `2^j` ranks and differ by `2^(j - 1)`; the enclosing
//! block of `2^(i + 1)` ranks fixes whether a pair merges ascending or
//! descending. Every worker computes the identical schedule from the
//! communicator size alone, so no coordinator or barrier is needed: workers
//! stay synchronized purely through the data dependency of the pairwise
//! blocking exchanges.

use crate::merge;
use crate::types::{Direction, Rank, Tag};

/// One pairwise compare-exchange in the network schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exchange {
    /// Message tag for this round, shared by all pairs of one substage and
    /// never reused by a later substage.
    pub tag: Tag,
    /// Lower rank of the pair. Sends first, receives second, and keeps the
    /// first half of the merged buffer.
    pub partner_a: Rank,
    /// Higher rank of the pair. Receives first, sends second, and keeps the
    /// second half of the merged buffer.
    pub partner_b: Rank,
    /// Order the pair's combined buffer is sorted into.
    pub direction: Direction,
}

/// Number of network stages for a communicator of `size` workers.
///
/// A single worker needs no stages: the network degenerates to one local
/// sort.
pub fn stage_count(size: Rank) -> u32 {
    debug_assert!(size > 0 && (size as usize).is_power_of_two());
    size.trailing_zeros()
}

/// Tag for the substage `(stage, substage)`, with `1 <= substage <= stage`.
///
/// Tags are assigned by triangular numbering in issue order, starting at 1,
/// so they are strictly increasing over the run and no shared counter is
/// needed: every worker derives the same tag independently.
pub fn round_tag(stage: u32, substage: u32) -> Tag {
    debug_assert!(stage >= 1 && (1..=stage).contains(&substage));
    let preceding = stage * (stage - 1) / 2;
    (preceding + (stage - substage) + 1) as Tag
}

/// The full compare-exchange schedule for `size` workers, in issue order.
///
/// Every worker iterates the returned rounds in order, acting only on those
/// that name its own rank. `size` must be a power of two; a single worker
/// yields an empty schedule.
pub fn schedule(size: Rank) -> Vec<Exchange> {
    assert!(
        size > 0 && (size as usize).is_power_of_two(),
        "worker count must be a power of two, got {}",
        size
    );

    let mut rounds = Vec::new();
    for stage in 1..=stage_count(size) {
        for substage in (1..=stage).rev() {
            let tag = round_tag(stage, substage);
            let block: Rank = 1 << substage;
            let half = block / 2;
            for base in (0..size).step_by(block as usize) {
                for offset in 0..half {
                    let partner_a = base + offset;
                    // The pair's position within the enclosing 2^(stage + 1)
                    // block decides the merge order.
                    let direction = if partner_a & (1 << stage) == 0 {
                        Direction::Ascending
                    } else {
                        Direction::Descending
                    };
                    rounds.push(Exchange {
                        tag,
                        partner_a,
                        partner_b: partner_a + half,
                        direction,
                    });
                }
            }
        }
    }
    rounds
}

/// Per-worker partition length for `total` requested elements over `size`
/// workers.
///
/// The requested count is split evenly and rounded up to the next power of
/// two, so the effective sorted sequence holds `size * partition_len(total,
/// size)` elements; the count is never truncated.
pub fn partition_len(total: usize, size: Rank) -> usize {
    debug_assert!(total > 0 && size > 0);
    let per_worker = total.div_ceil(size as usize);
    per_worker.next_power_of_two()
}

/// Apply one scheduled exchange to in-process partitions.
///
/// This is the serial twin of the cross-worker protocol: merge the pair's
/// combined buffer, then `partner_a` keeps the first half and `partner_b`
/// the second.
pub fn apply_exchange<T: Ord + Clone>(partitions: &mut [Vec<T>], exchange: &Exchange) {
    let (a, b) = (exchange.partner_a as usize, exchange.partner_b as usize);
    let half = partitions[a].len();
    let combined = merge::merge_partitions(&partitions[a], &partitions[b], exchange.direction);
    partitions[a] = combined[..half].to_vec();
    partitions[b] = combined[half..].to_vec();
}

/// Run the full sort in-process over a set of equal-length partitions.
///
/// Sorts each partition locally, then applies the whole schedule with
/// [`apply_exchange`]. Afterwards the concatenation of the partitions in
/// index order is sorted ascending. Used by the tests as a reference
/// rendition of the distributed run, and by the degenerate single-worker
/// case.
pub fn sort_serial<T: Ord + Clone>(partitions: &mut [Vec<T>]) {
    let size = partitions.len() as Rank;
    assert!(
        size > 0 && (size as usize).is_power_of_two(),
        "worker count must be a power of two, got {}",
        size
    );
    let len = partitions[0].len();
    assert!(
        partitions.iter().all(|p| p.len() == len),
        "partitions must have equal lengths"
    );

    for partition in partitions.iter_mut() {
        merge::sort(partition, Direction::Ascending);
    }
    for exchange in schedule(size) {
        apply_exchange(partitions, &exchange);
    }
}
