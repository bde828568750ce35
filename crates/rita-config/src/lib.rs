//! Configuration: defaults, the on-disk schema, the mandatory never-include
//! subnet list, the process-environment overlay, and cross-field
//! validation.

pub mod env;
pub mod loader;
pub mod mandatory;
pub mod model;
pub mod validator;

pub use loader::load;
pub use model::{
    BeaconConfig, BeaconWeights, Config, Environment, FilterConfig, ModifiersConfig,
    ScoringConfig, ThreatIntelConfig, ZoneTransferConfig,
};
