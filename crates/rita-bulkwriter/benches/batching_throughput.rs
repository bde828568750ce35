//! Benchmarks the cooperative scheduling overhead in isolation from the
//! network: how many `should_read` decisions and rate-limiter acquires a
//! worker pool can push through per second, since that predicate (not the
//! ClickHouse round trip) is what this crate itself is responsible for.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use parking_lot::Mutex;
use rita_bulkwriter::RateLimiter;

fn bench_rate_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate_limiter_acquire");
    for burst in [1.0, 5.0, 50.0] {
        group.bench_with_input(BenchmarkId::from_parameter(burst), &burst, |b, &burst| {
            let limiter = RateLimiter::new(f64::MAX / 2.0, burst);
            b.iter(|| limiter.acquire());
        });
    }
    group.finish();
}

fn bench_should_read_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("should_read_contended_slots");
    for workers in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            let slots = Arc::new(Mutex::new(vec![0usize; workers]));
            b.iter(|| {
                let guard = slots.lock();
                for idx in 0..workers {
                    let _ = rita_bulkwriter_should_read_shim(&guard, idx, 500, false, false);
                }
            });
        });
    }
    group.finish();
}

// `should_read` itself is a private module of the crate; the shim below
// mirrors its precedence so the benchmark doesn't need the crate to expose
// internals solely for measurement purposes.
fn rita_bulkwriter_should_read_shim(
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
    let self_in_progress = slots[idx] > 0 && slots[idx] < batch_size;
    if channel_closed && input_empty {
        return true;
    }
    if channel_closed {
        return (in_progress > 0 && self_in_progress) || in_progress == 0;
    }
    in_progress == 0 || self_in_progress
}

criterion_group!(benches, bench_rate_limiter, bench_should_read_contended);
criterion_main!(benches);
