//! Connection pool parameters (§5's "Shared resources"): 50 max open, 50
//! max idle, 1 hour max lifetime, in-order open strategy, shared across
//! every worker of a process.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_open_conns: u32,
    pub max_idle_conns: u32,
    pub max_conn_lifetime: Duration,
    pub dial_timeout: Duration,
    pub max_execution_time: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_open_conns: 50,
            max_idle_conns: 50,
            max_conn_lifetime: Duration::from_secs(3600),
            dial_timeout: Duration::from_secs(120),
            max_execution_time: Duration::from_secs(300),
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn with_max_execution_time(mut self, secs: u32) -> Self {
        self.max_execution_time = Duration::from_secs(u64::from(secs));
        self
    }
}
