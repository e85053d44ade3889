//! Sequential bitonic merge engine.
//!
//! Recursive routines over `(buffer, low, count, direction)` that sort or
//! merge an in-memory range. They sort each worker's local partition and
//! re-sort the combined buffer inside a cross-worker exchange. All ranges
//! are required to have power-of-two lengths.

use itertools::Itertools;

use crate::types::Direction;

/// Compare the elements at `i` and `j` and swap them if they are out of
/// order for `direction`.
pub fn compare_at<T: Ord>(buffer: &mut [T], i: usize, j: usize, direction: Direction) {
    let out_of_order = match direction {
        Direction::Ascending => buffer[i] > buffer[j],
        Direction::Descending => buffer[i] < buffer[j],
    };
    if out_of_order {
        buffer.swap(i, j);
    }
}

/// Merge the bitonic range `buffer[low..low + count)` into monotonic order.
///
/// Precondition: the range holds a bitonic sequence, i.e. one ascending run
/// followed by one descending run or vice versa. Pairs at distance
/// `count / 2` are compare-exchanged, then both halves are merged
/// recursively with the same direction.
pub fn bitonic_merge<T: Ord>(buffer: &mut [T], low: usize, count: usize, direction: Direction) {
    if count > 1 {
        let half = count / 2;
        for k in low..(low + half) {
            compare_at(buffer, k, k + half, direction);
        }
        bitonic_merge(buffer, low, half, direction);
        bitonic_merge(buffer, low + half, half, direction);
    }
}

/// Sort the arbitrary range `buffer[low..low + count)` into monotonic order
/// by recursively building an ascending first half and a descending second
/// half, then merging the resulting bitonic range.
pub fn build_bitonic<T: Ord>(buffer: &mut [T], low: usize, count: usize, direction: Direction) {
    if count > 1 {
        let half = count / 2;
        build_bitonic(buffer, low, half, Direction::Ascending);
        build_bitonic(buffer, low + half, half, Direction::Descending);
        bitonic_merge(buffer, low, count, direction);
    }
}

/// Sort a whole slice with the merge engine.
///
/// The length must be a power of two; lengths 0 and 1 are trivially sorted.
pub fn sort<T: Ord>(slice: &mut [T], direction: Direction) {
    let n = slice.len();
    if n <= 1 {
        return;
    }
    assert!(
        n.is_power_of_two(),
        "bitonic sort requires a power of two length, got {}",
        n
    );
    build_bitonic(slice, 0, n, direction);
}

/// Concatenate two equal-length partitions into a combined buffer of twice
/// the partition size and sort it monotonically in `direction`.
///
/// This is the pure half of a cross-worker compare-exchange: the caller
/// keeps either the first or the second half of the returned buffer. The
/// buffer is owned by this call alone and dropped once split.
pub fn merge_partitions<T: Ord + Clone>(local: &[T], remote: &[T], direction: Direction) -> Vec<T> {
    debug_assert_eq!(local.len(), remote.len());
    let mut combined = Vec::with_capacity(local.len() + remote.len());
    combined.extend_from_slice(local);
    combined.extend_from_slice(remote);
    sort(&mut combined, direction);
    combined
}

/// Check that a slice is sorted in non-decreasing order.
pub fn is_sorted<T: Ord>(slice: &[T]) -> bool {
    slice.iter().tuple_windows().all(|(a, b)| a <= b)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::prelude::*;
    use rand::SeedableRng;

    fn random_values(n: usize, seed: u64) -> Vec<u64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(0..1000)).collect()
    }

    #[test]
    fn test_sort_matches_reference_ascending() {
        for n in [0usize, 1, 2, 8, 64, 1024] {
            let mut values = random_values(n, 42);
            let mut expected = values.clone();
            expected.sort();

            sort(&mut values, Direction::Ascending);
            assert_eq!(values, expected);
        }
    }

    #[test]
    fn test_sort_matches_reference_descending() {
        for n in [0usize, 1, 2, 8, 64, 1024] {
            let mut values = random_values(n, 43);
            let mut expected = values.clone();
            expected.sort();
            expected.reverse();

            sort(&mut values, Direction::Descending);
            assert_eq!(values, expected);
        }
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn test_sort_rejects_non_power_of_two_lengths() {
        let mut values = random_values(6, 44);
        sort(&mut values, Direction::Ascending);
    }

    #[test]
    fn test_compare_at() {
        let mut buffer = vec![5, 3];
        compare_at(&mut buffer, 0, 1, Direction::Ascending);
        assert_eq!(buffer, vec![3, 5]);

        compare_at(&mut buffer, 0, 1, Direction::Descending);
        assert_eq!(buffer, vec![5, 3]);

        // In-order pairs are left alone
        compare_at(&mut buffer, 0, 1, Direction::Descending);
        assert_eq!(buffer, vec![5, 3]);
    }

    #[test]
    fn test_bitonic_merge_on_bitonic_input() {
        // One ascending run followed by one descending run
        let mut buffer = vec![1, 4, 6, 9, 8, 5, 3, 0];
        let mut expected = buffer.clone();
        expected.sort();

        bitonic_merge(&mut buffer, 0, 8, Direction::Ascending);
        assert_eq!(buffer, expected);

        // Descending then ascending also qualifies
        let mut buffer = vec![9, 7, 2, 0, 1, 5, 6, 8];
        let mut expected = buffer.clone();
        expected.sort();
        expected.reverse();

        bitonic_merge(&mut buffer, 0, 8, Direction::Descending);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_merge_partitions_sorts_the_pair() {
        let mut local = random_values(32, 45);
        let mut remote = random_values(32, 46);
        sort(&mut local, Direction::Ascending);
        sort(&mut remote, Direction::Ascending);

        let combined = merge_partitions(&local, &remote, Direction::Ascending);
        assert!(is_sorted(&combined));
        assert_eq!(combined.len(), 64);

        // Each retained half is individually sorted
        assert!(is_sorted(&combined[..32]));
        assert!(is_sorted(&combined[32..]));
    }

    #[test]
    fn test_merge_partitions_is_partner_order_independent() {
        let local = random_values(16, 47);
        let remote = random_values(16, 48);

        let ab = merge_partitions(&local, &remote, Direction::Ascending);
        let ba = merge_partitions(&remote, &local, Direction::Ascending);
        assert_eq!(ab, ba);

        let ab = merge_partitions(&local, &remote, Direction::Descending);
        let ba = merge_partitions(&remote, &local, Direction::Descending);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted::<u64>(&[]));
        assert!(is_sorted(&[1]));
        assert!(is_sorted(&[1, 1, 2, 3]));
        assert!(!is_sorted(&[2, 1]));
    }
}
