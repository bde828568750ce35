//! Store Session (§2, §5): a pooled connection to the columnar store,
//! parameterized query/exec, and cancellation propagation.
//!
//! Every suspension point here accepts the shared cancellation token so a
//! top-level cancel aborts in-flight queries the same way it aborts the
//! bulk writer's condvar waits.

mod pool;
mod session;

pub use pool::PoolConfig;
pub use session::Session;
