//! Cross-field validation (§6). Every violation is collected into one
//! combined message, newline-joined, so the test suite can assert on
//! individual lines while callers get one coherent report.

use rita_types::score::is_user_assignable;

use crate::model::Config;

#[must_use]
pub fn validate(cfg: &Config) -> Vec<String> {
    let mut errors = Vec::new();

    if !(25_000..=2_000_000).contains(&cfg.batch_size) {
        errors.push(format!(
            "batch_size ({}) must be within [25000, 2000000]",
            cfg.batch_size
        ));
    }
    if !(1..=2_000_000).contains(&cfg.max_query_execution_time) {
        errors.push(format!(
            "max_query_execution_time ({}) must be within [1, 2000000]",
            cfg.max_query_execution_time
        ));
    }
    if !(1..=60).contains(&cfg.months_to_keep_historical_first_seen) {
        errors.push(format!(
            "months_to_keep_historical_first_seen ({}) must be within [1, 60]",
            cfg.months_to_keep_historical_first_seen
        ));
    }

    for url in &cfg.threat_intel.online_feeds {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("threat_intel.online_feeds: {url:?} is not a valid URL"));
        }
    }

    if cfg.filtering.internal_subnets.is_empty() {
        errors.push("filtering.internal_subnets must be non-empty after load".to_string());
    }

    for domain in cfg
        .filtering
        .always_included_domains
        .iter()
        .chain(cfg.filtering.never_included_domains.iter())
    {
        if let Err(reason) = rita_types::domain::validate_config_domain(domain) {
            errors.push(format!("filtering domain {domain:?} is invalid: {reason}"));
        }
    }

    let beacon = &cfg.scoring.beacon;
    let weight_sum = beacon.weights.sum();
    if (weight_sum - 1.0).abs() > 0.0 {
        errors.push(format!(
            "scoring.beacon weights must sum to exactly 1.0, got {weight_sum}"
        ));
    }
    for (name, value) in [
        ("timestamp", beacon.weights.timestamp),
        ("datasize", beacon.weights.datasize),
        ("duration", beacon.weights.duration),
        ("histogram", beacon.weights.histogram),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(format!("scoring.beacon.weights.{name} ({value}) must be within [0, 1]"));
        }
    }
    if !(1..=24).contains(&beacon.duration_min_hours_seen) {
        errors.push(format!(
            "scoring.beacon.duration_min_hours_seen ({}) must be within [1, 24]",
            beacon.duration_min_hours_seen
        ));
    }
    if !(1..=24).contains(&beacon.unique_conn_threshold_hours) {
        errors.push(format!(
            "scoring.beacon.unique_conn_threshold_hours ({}) must be within [1, 24]",
            beacon.unique_conn_threshold_hours
        ));
    }
    if !(0.0..=1.0).contains(&beacon.sensitivity) {
        errors.push(format!(
            "scoring.beacon.sensitivity ({}) must be within [0, 1]",
            beacon.sensitivity
        ));
    }
    errors.extend(
        beacon
            .score_thresholds
            .validate(Some(0), Some(100))
            .into_iter()
            .map(|e| format!("scoring.beacon.score_thresholds: {e}")),
    );

    errors.extend(
        cfg.scoring
            .long_connection_score_thresholds
            .validate(Some(1), Some(86_400))
            .into_iter()
            .map(|e| format!("scoring.long_connection_score_thresholds: {e}")),
    );
    errors.extend(
        cfg.scoring
            .c2_score_thresholds
            .validate(Some(1), None)
            .into_iter()
            .map(|e| format!("scoring.c2_score_thresholds: {e}")),
    );

    if !is_user_assignable(cfg.scoring.strobe_impact) {
        errors.push("scoring.strobe_impact must not be 'critical'".to_string());
    }
    if !is_user_assignable(cfg.scoring.threat_intel_impact) {
        errors.push("scoring.threat_intel_impact must not be 'critical'".to_string());
    }

    let modifiers = &cfg.modifiers;
    if modifiers.decrease_threshold_days <= modifiers.increase_threshold_days {
        errors.push(format!(
            "modifiers.decrease_threshold_days ({}) must be > increase_threshold_days ({})",
            modifiers.decrease_threshold_days, modifiers.increase_threshold_days
        ));
    }
    if modifiers.decrease_threshold_bytes <= modifiers.increase_threshold_bytes {
        errors.push(format!(
            "modifiers.decrease_threshold_bytes ({}) must be > increase_threshold_bytes ({})",
            modifiers.decrease_threshold_bytes, modifiers.increase_threshold_bytes
        ));
    }

    if cfg.zone_transfer.enabled {
        if cfg.zone_transfer.domain_name.as_deref().unwrap_or("").is_empty() {
            errors.push("zone_transfer.domain_name is required when zone_transfer.enabled is true".to_string());
        }
        if cfg.zone_transfer.name_server.as_deref().unwrap_or("").is_empty() {
            errors.push("zone_transfer.name_server is required when zone_transfer.enabled is true".to_string());
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rita_types::ScoreThresholds;

    #[test]
    fn default_config_is_valid_once_internal_subnets_are_set() {
        let mut cfg = Config::defaults();
        cfg.filtering.internal_subnets = vec![rita_types::subnet::parse_cidr("10.0.0.0/8").unwrap()];
        assert!(validate(&cfg).is_empty(), "{:?}", validate(&cfg));
    }

    #[test]
    fn rejects_score_thresholds_out_of_order() {
        let mut cfg = Config::defaults();
        cfg.filtering.internal_subnets = vec![rita_types::subnet::parse_cidr("10.0.0.0/8").unwrap()];
        cfg.scoring.beacon.score_thresholds = ScoreThresholds::new(75, 75, 90, 100);
        let errs = validate(&cfg);
        assert!(errs.iter().any(|e| e.contains("base") && e.contains("low")));
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let mut cfg = Config::defaults();
        cfg.filtering.internal_subnets = vec![rita_types::subnet::parse_cidr("10.0.0.0/8").unwrap()];
        cfg.scoring.beacon.weights.timestamp = 0.5;
        let errs = validate(&cfg);
        assert!(errs.iter().any(|e| e.contains("sum to exactly 1.0")));
    }

    #[test]
    fn rejects_modifier_threshold_ordering_violation() {
        let mut cfg = Config::defaults();
        cfg.filtering.internal_subnets = vec![rita_types::subnet::parse_cidr("10.0.0.0/8").unwrap()];
        cfg.modifiers.decrease_threshold_days = 5;
        cfg.modifiers.increase_threshold_days = 7;
        let errs = validate(&cfg);
        assert!(errs.iter().any(|e| e.contains("decrease_threshold_days")));
    }
}
