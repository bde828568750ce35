//! The `should-read` predicate (§4.3's central design decision) as a pure
//! function over the shared per-worker slot array, so its invariants can
//! be derived and tested independently of the threading harness.

/// Decide whether worker `idx` (out of `n` total) may read its next
/// record, given every worker's current in-flight record count in
/// `slots[]`, whether the input channel is closed, and whether it is
/// currently empty.
///
/// `slots[j]` is the number of records worker `j` has accumulated into its
/// local buffer since its last flush; it resets to 0 after a flush and
/// saturates below `batch_size` (a flush is triggered once it reaches
/// `batch_size`, at which point the worker is mid-flush rather than
/// "in progress" in the sense this predicate cares about).
#[must_use]
pub fn should_read(
    slots: &[usize],
    idx: usize,
    batch_size: usize,
    channel_closed: bool,
    input_empty: bool,
) -> bool {
    let n = slots.len();
    if n == 1 {
        return true;
    }

    let in_progress = slots
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != idx)
        .filter(|&(_, &s)| s > 0 && s < batch_size)
        .count();

    if channel_closed && input_empty {
        return true;
    }
    if channel_closed {
        // Input channel closed but records remain: already-in-progress
        // workers keep draining; if nobody is in progress, exactly one new
        // worker is allowed to start (enforced naturally since checks
        // serialize under the shared lock).
        return in_progress > 0 && is_self_in_progress(slots, idx, batch_size) || in_progress == 0;
    }

    in_progress == 0 || is_self_in_progress(slots, idx, batch_size)
}

fn is_self_in_progress(slots: &[usize], idx: usize, batch_size: usize) -> bool {
    slots[idx] > 0 && slots[idx] < batch_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_worker_always_reads() {
        assert!(should_read(&[0], 0, 100, false, false));
        assert!(should_read(&[50], 0, 100, false, false));
    }

    #[test]
    fn idle_pool_lets_any_worker_start() {
        let slots = vec![0, 0, 0];
        assert!(should_read(&slots, 0, 100, false, false));
        assert!(should_read(&slots, 2, 100, false, false));
    }

    #[test]
    fn a_worker_in_progress_blocks_new_starters() {
        let slots = vec![40, 0, 0];
        assert!(should_read(&slots, 0, 100, false, false), "in-progress worker keeps reading");
        assert!(!should_read(&slots, 1, 100, false, false), "idle worker must wait");
    }

    #[test]
    fn closed_and_empty_lets_everyone_drain() {
        let slots = vec![10, 0, 5];
        for idx in 0..3 {
            assert!(should_read(&slots, idx, 100, true, true));
        }
    }

    #[test]
    fn closed_and_nonempty_with_no_progress_allows_one_new_reader() {
        let slots = vec![0, 0, 0];
        assert!(should_read(&slots, 1, 100, true, false));
    }

    #[test]
    fn closed_and_nonempty_with_progress_only_allows_in_progress_worker() {
        let slots = vec![30, 0, 0];
        assert!(should_read(&slots, 0, 100, true, false));
        assert!(!should_read(&slots, 1, 100, true, false));
    }
}
