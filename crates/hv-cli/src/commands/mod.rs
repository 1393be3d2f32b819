//! Command handler modules for hv-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod show;
pub mod summarize;

use anyhow::Result;
use hv_config::HoldingsConfig;
use tracing::warn;

/// Env-var name for the endpoint override.
pub const ENV_HOLDINGS_URL: &str = "HV_HOLDINGS_URL";

/// Load config layers over the built-in defaults and apply the endpoint
/// override. Precedence: `--url`, then `HV_HOLDINGS_URL`, then config.
pub fn resolve_config(config_paths: &[String], url: Option<String>) -> Result<HoldingsConfig> {
    let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = hv_config::load_with_defaults(&path_refs)?;

    for ptr in loaded.unknown_keys()? {
        warn!(key = %ptr, "unknown config key ignored");
    }

    let endpoint = url.or_else(|| std::env::var(ENV_HOLDINGS_URL).ok());
    loaded.holdings()?.with_endpoint_override(endpoint)
}
