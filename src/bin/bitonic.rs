//! Driver for the distributed bitonic sort.
//!
//! Run with `mpirun -n <workers> bitonic <count> [seed]`, where `workers`
//! is a power of two. The requested count is split evenly over the workers
//! and rounded up to the next power of two per worker, so the effective
//! sorted length is `workers * partition_len(count, workers)`. Each worker
//! draws its own partition from a seeded RNG, offset by its rank so that
//! ranks never collapse onto the same stream.

use std::process::ExitCode;

use log::debug;
use mpi::traits::Communicator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bitonic_sort::constants::{DEFAULT_SEED, ROOT_RANK};
use bitonic_sort::types::Rank;
use bitonic_sort::{distributed, merge, network};

fn usage(rank: Rank) -> ExitCode {
    if rank == ROOT_RANK {
        eprintln!("Usage: mpirun -n <workers> bitonic <count> [seed]");
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    env_logger::init();

    let universe = mpi::initialize().expect("failed to initialize MPI");
    let world = universe.world();
    let rank = world.rank();
    let size = world.size();

    let mut args = std::env::args().skip(1);
    let total = match args.next().map(|arg| arg.parse::<usize>()) {
        Some(Ok(n)) if n > 0 => n,
        _ => return usage(rank),
    };
    let seed = match args.next().map(|arg| arg.parse::<u64>()) {
        Some(Ok(s)) => s,
        None => DEFAULT_SEED,
        Some(Err(_)) => return usage(rank),
    };

    if !(size as usize).is_power_of_two() {
        if rank == ROOT_RANK {
            eprintln!("Error: worker count must be a power of two, got {}.", size);
        }
        return ExitCode::FAILURE;
    }

    let len = network::partition_len(total, size);
    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(rank as u64));
    let mut partition: Vec<u64> = (0..len).map(|_| rng.gen()).collect();

    debug!(
        "rank {}: sorting a partition of {} of {} requested elements",
        rank,
        len,
        total
    );

    if let Err(err) = distributed::sort(&world, &mut partition) {
        eprintln!("Error: {}", err);
        world.abort(1);
    }

    if let Some(global) = distributed::gather_to_root(&world, &partition) {
        if merge::is_sorted(&global) {
            println!("Successfully sorted {} elements.", global.len());
        } else {
            eprintln!("Error: gathered sequence is not sorted.");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
