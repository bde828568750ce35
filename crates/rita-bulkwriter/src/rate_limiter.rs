//! A token-bucket rate limiter (§5: 5 per second, burst 5) shared by every
//! worker in one [`crate::BulkWriter`] instance. Small enough to hand-roll
//! next to the writer rather than pull in a dedicated crate.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

struct Bucket {
    tokens: f64,
    capacity: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

/// A shared, blocking token-bucket limiter. `acquire` parks the calling OS
/// thread (never an async task) until a token is available, matching the
/// bulk writer's blocking-thread worker model.
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(refill_per_sec: f64, burst: f64) -> Self {
        Self {
            bucket: Mutex::new(Bucket {
                tokens: burst,
                capacity: burst,
                refill_per_sec,
                last_refill: Instant::now(),
            }),
        }
    }

    /// The default policy named in §5: 5 tokens/sec, burst of 5.
    #[must_use]
    pub fn default_policy() -> Self {
        Self::new(5.0, 5.0)
    }

    /// Block the current thread until one token is available.
    pub fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock();
                let now = Instant::now();
                let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
                bucket.tokens = (bucket.tokens + elapsed * bucket.refill_per_sec).min(bucket.capacity);
                bucket.last_refill = now;

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    None
                } else {
                    let deficit = 1.0 - bucket.tokens;
                    Some(Duration::from_secs_f64(deficit / bucket.refill_per_sec))
                }
            };
            match wait {
                None => return,
                Some(d) => std::thread::sleep(d),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_allows_immediate_acquires_up_to_capacity() {
        let limiter = RateLimiter::new(5.0, 5.0);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire();
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn exhausted_bucket_forces_a_wait() {
        let limiter = RateLimiter::new(1000.0, 1.0);
        limiter.acquire();
        let start = Instant::now();
        limiter.acquire();
        assert!(start.elapsed() >= Duration::from_micros(500));
    }
}
