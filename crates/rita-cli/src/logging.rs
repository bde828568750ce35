//! Translates `LOG_LEVEL` (§6: an integer 0-6) into a `tracing_subscriber`
//! filter, and installs the global subscriber.

/// `LOG_LEVEL` 0 disables logging entirely; 1-6 map onto the five
/// standard severities, with 6 ("trace" and below) the most verbose.
fn level_filter(log_level: u8) -> &'static str {
    match log_level {
        0 => "off",
        1 => "error",
        2 => "warn",
        3 => "info",
        4 => "debug",
        _ => "trace",
    }
}

/// Install the global `tracing` subscriber. `logging_enabled = false`
/// forces the filter to `off` regardless of `log_level`.
pub fn init(log_level: u8, logging_enabled: bool) {
    let directive = if logging_enabled { level_filter(log_level) } else { "off" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_documented_level() {
        assert_eq!(level_filter(0), "off");
        assert_eq!(level_filter(3), "info");
        assert_eq!(level_filter(6), "trace");
        assert_eq!(level_filter(99), "trace");
    }
}
