//! Configuration root and its defaults. `Config::defaults()` is a pure
//! function; every other construction path starts from it and overlays
//! user-supplied fields so a partial document can never yield an invalid
//! config silently.

use std::path::PathBuf;

use rita_types::score::ImpactCategory;
use rita_types::{ScoreThresholds, Subnet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub db_address: String,
    pub clickhouse_username: String,
    pub clickhouse_password: String,
    pub http_extensions_csv_path: PathBuf,
    pub threat_intel_dir: PathBuf,
    pub log_level: u8,
    pub syslog_address: Option<String>,
    pub logging_enabled: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            db_address: "127.0.0.1:9000".to_string(),
            clickhouse_username: "default".to_string(),
            clickhouse_password: String::new(),
            http_extensions_csv_path: PathBuf::from("/etc/rita/http_extensions_list.csv"),
            threat_intel_dir: PathBuf::from("/etc/rita/threat_intel_feeds"),
            log_level: 3,
            syslog_address: None,
            logging_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatIntelConfig {
    pub online_feeds: Vec<String>,
    pub custom_feeds_directory: Option<String>,
}

impl Default for ThreatIntelConfig {
    fn default() -> Self {
        Self {
            online_feeds: Vec::new(),
            custom_feeds_directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub internal_subnets: Vec<Subnet>,
    pub always_included_subnets: Vec<Subnet>,
    pub never_included_subnets: Vec<Subnet>,
    pub always_included_domains: Vec<String>,
    pub never_included_domains: Vec<String>,
    pub filter_external_to_internal: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            internal_subnets: Vec::new(),
            always_included_subnets: Vec::new(),
            never_included_subnets: Vec::new(),
            always_included_domains: Vec::new(),
            never_included_domains: Vec::new(),
            filter_external_to_internal: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconWeights {
    pub timestamp: f64,
    pub datasize: f64,
    pub duration: f64,
    pub histogram: f64,
}

impl Default for BeaconWeights {
    fn default() -> Self {
        Self {
            timestamp: 0.25,
            datasize: 0.25,
            duration: 0.25,
            histogram: 0.25,
        }
    }
}

impl BeaconWeights {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.timestamp + self.datasize + self.duration + self.histogram
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconConfig {
    pub weights: BeaconWeights,
    pub duration_min_hours_seen: i32,
    pub unique_conn_threshold_hours: i32,
    pub sensitivity: f64,
    pub score_thresholds: ScoreThresholds,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            weights: BeaconWeights::default(),
            duration_min_hours_seen: 4,
            unique_conn_threshold_hours: 4,
            sensitivity: 0.2,
            score_thresholds: ScoreThresholds::new(50, 75, 90, 100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub beacon: BeaconConfig,
    pub long_connection_score_thresholds: ScoreThresholds,
    pub c2_score_thresholds: ScoreThresholds,
    pub strobe_impact: ImpactCategory,
    pub threat_intel_impact: ImpactCategory,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            beacon: BeaconConfig::default(),
            long_connection_score_thresholds: ScoreThresholds::new(3600, 14400, 28800, 43200),
            c2_score_thresholds: ScoreThresholds::new(10, 100, 1000, 10000),
            strobe_impact: ImpactCategory::High,
            threat_intel_impact: ImpactCategory::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifiersConfig {
    pub prevalence_weight: f64,
    pub first_seen_weight: f64,
    pub rare_signature_weight: f64,
    pub mime_mismatch_weight: f64,
    pub missing_host_weight: f64,
    pub threat_intel_size_weight: f64,
    pub decrease_threshold_days: i32,
    pub increase_threshold_days: i32,
    pub decrease_threshold_bytes: u64,
    pub increase_threshold_bytes: u64,
}

impl Default for ModifiersConfig {
    fn default() -> Self {
        Self {
            prevalence_weight: 0.1,
            first_seen_weight: 0.1,
            rare_signature_weight: 0.1,
            mime_mismatch_weight: 0.1,
            missing_host_weight: 0.1,
            threat_intel_size_weight: 0.1,
            decrease_threshold_days: 30,
            increase_threshold_days: 7,
            decrease_threshold_bytes: 10_000_000,
            increase_threshold_bytes: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneTransferConfig {
    pub enabled: bool,
    pub domain_name: Option<String>,
    pub name_server: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub env: Environment,
    pub update_check_enabled: bool,
    pub batch_size: u32,
    pub max_query_execution_time: u32,
    pub months_to_keep_historical_first_seen: u32,
    pub threat_intel: ThreatIntelConfig,
    pub filtering: FilterConfig,
    pub scoring: ScoringConfig,
    pub modifiers: ModifiersConfig,
    pub zone_transfer: ZoneTransferConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env: Environment::default(),
            update_check_enabled: true,
            batch_size: 100_000,
            max_query_execution_time: 300,
            months_to_keep_historical_first_seen: 3,
            threat_intel: ThreatIntelConfig::default(),
            filtering: FilterConfig::default(),
            scoring: ScoringConfig::default(),
            modifiers: ModifiersConfig::default(),
            zone_transfer: ZoneTransferConfig::default(),
        }
    }
}

impl Config {
    /// A fully populated defaults value. Pure function, no I/O.
    #[must_use]
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Restore every field to its default, except `env`, which is
    /// preserved verbatim (invariant #8 in the design spec).
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            env: self.env.clone(),
            ..Self::default()
        }
    }
}
