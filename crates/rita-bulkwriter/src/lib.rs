//! Cooperative multi-worker batching engine (§4.3, §5).
//!
//! Every analytic stage that needs to push rows into ClickHouse goes
//! through a [`BulkWriter`]: producers send rows over an unbounded
//! channel, a fixed pool of OS-thread workers cooperatively drains it in
//! `batch_size`-sized chunks (at most one worker mid-batch at a time,
//! enforced by [`scheduling::should_read`]), and a shared token-bucket
//! [`RateLimiter`] paces the resulting `INSERT`s.

mod rate_limiter;
mod scheduling;
mod writer;

pub use rate_limiter::RateLimiter;
pub use writer::{BulkWriter, WriterConfig, WriterStats};
