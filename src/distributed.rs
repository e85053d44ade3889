//! Cross-worker compare-exchange and the distributed network driver.
//!
//! All coordination is point-to-point rendezvous between the two workers of
//! one scheduled exchange; there is no broadcast and no barrier between
//! stages. A blocked rendezvous that never completes deadlocks the run:
//! the static, fully connected, fixed-membership model has no timeout or
//! partial-failure recovery, and any message failure aborts the whole
//! process group.

use log::debug;
use mpi::topology::SimpleCommunicator;
use mpi::traits::{Communicator, Destination, Equivalence, Root, Source};

use crate::constants::ROOT_RANK;
use crate::merge;
use crate::network::{self, Exchange};
use crate::types::{Direction, Result, SortError};

/// Perform one scheduled compare-exchange between the two named workers.
///
/// Ranks other than `partner_a` and `partner_b` return immediately, so the
/// routine is safe to call identically, in lockstep, on every rank. The
/// acting pair swap their full partitions under the round's tag, sort the
/// combined buffer in the round's direction, and retain one half each:
/// `partner_a` the first, `partner_b` the second.
///
/// Protocol rule: `partner_a` sends then receives while `partner_b`
/// receives then sends. Both operations block, so the fixed order is what
/// keeps the symmetric rendezvous deadlock-free.
pub fn compare_exchange<T>(world: &SimpleCommunicator, partition: &mut [T], exchange: &Exchange)
where
    T: Equivalence + Ord + Default + Clone,
{
    let rank = world.rank();
    if rank != exchange.partner_a && rank != exchange.partner_b {
        return;
    }

    let other = if rank == exchange.partner_a {
        exchange.partner_b
    } else {
        exchange.partner_a
    };
    let partner = world.process_at_rank(other);

    let mut received = vec![T::default(); partition.len()];
    if rank == exchange.partner_a {
        partner.send_with_tag(&partition[..], exchange.tag);
        partner.receive_into_with_tag(&mut received[..], exchange.tag);
    } else {
        partner.receive_into_with_tag(&mut received[..], exchange.tag);
        partner.send_with_tag(&partition[..], exchange.tag);
    }

    let combined = merge::merge_partitions(partition, &received, exchange.direction);
    let half = partition.len();
    if rank == exchange.partner_a {
        partition.clone_from_slice(&combined[..half]);
    } else {
        partition.clone_from_slice(&combined[half..]);
    }
}

/// Sort the sequence distributed over the communicator's workers.
///
/// Every rank must call this with a partition of the same power-of-two
/// length. The partition is sorted locally, then driven through the
/// network schedule; on return the concatenation of all partitions in rank
/// order is sorted ascending.
pub fn sort<T>(world: &SimpleCommunicator, partition: &mut [T]) -> Result<()>
where
    T: Equivalence + Ord + Default + Clone,
{
    let size = world.size();
    if !(size as usize).is_power_of_two() {
        return Err(SortError::WorkerCount(size));
    }
    if !partition.len().is_power_of_two() {
        return Err(SortError::PartitionLen(partition.len()));
    }

    merge::sort(partition, Direction::Ascending);

    let rounds = network::schedule(size);
    debug!(
        "rank {} entering {} compare-exchange rounds over {} workers",
        world.rank(),
        rounds.len(),
        size
    );
    for exchange in &rounds {
        compare_exchange(world, partition, exchange);
    }
    Ok(())
}

/// Gather every worker's partition to the root rank, in rank order.
///
/// Returns the concatenated sequence on the root and `None` elsewhere.
/// Partitions keep their fixed equal length throughout the sort, so a
/// plain equal-count gather preserves rank order.
pub fn gather_to_root<T>(world: &SimpleCommunicator, partition: &[T]) -> Option<Vec<T>>
where
    T: Equivalence + Default + Clone,
{
    let size = world.size();
    let root_process = world.process_at_rank(ROOT_RANK);

    if world.rank() == ROOT_RANK {
        let mut gathered = vec![T::default(); partition.len() * size as usize];
        root_process.gather_into_root(partition, &mut gathered[..]);
        Some(gathered)
    } else {
        root_process.gather_into(partition);
        None
    }
}
