use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bottom layer applied by [`crate::load_with_defaults`].
pub const DEFAULT_CONFIG_YAML: &str = r#"
source:
  endpoint: "https://json-jvjm.onrender.com/test"
  holdings_field: "userHolding"
  timeout_ms: 15000
view:
  splash_delay_ms: 2000
  currency_symbol: "₹"
"#;

/// Where and how to fetch holdings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    /// Response field holding the records array.
    pub holdings_field: String,
    pub timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://json-jvjm.onrender.com/test".to_string(),
            holdings_field: "userHolding".to_string(),
            timeout_ms: 15_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Delay before the splash view hands over to the holdings list.
    pub splash_delay_ms: u64,
    pub currency_symbol: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            splash_delay_ms: 2_000,
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Typed settings read from the merged config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldingsConfig {
    pub source: SourceConfig,
    pub view: ViewConfig,
}

impl HoldingsConfig {
    /// Deserialize and validate. Unknown keys are ignored here; see
    /// [`crate::LoadedConfig::unknown_keys`].
    pub fn from_json(config_json: &Value) -> Result<Self> {
        let cfg: HoldingsConfig = serde_json::from_value(config_json.clone())
            .context("config does not match the holdings settings shape")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let endpoint = self.source.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            bail!(
                "CONFIG_INVALID /source/endpoint must be an http(s) URL, got '{}'",
                self.source.endpoint
            );
        }
        if self.source.holdings_field.trim().is_empty() {
            bail!("CONFIG_INVALID /source/holdings_field must not be empty");
        }
        if self.source.timeout_ms == 0 {
            bail!("CONFIG_INVALID /source/timeout_ms must be > 0");
        }
        Ok(())
    }

    /// Replace the endpoint (e.g. from `HV_HOLDINGS_URL`) and re-validate.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Result<Self> {
        if let Some(url) = endpoint.filter(|u| !u.trim().is_empty()) {
            self.source.endpoint = url.trim().to_string();
            self.validate()?;
        }
        Ok(self)
    }
}

/// Walk `doc` against the serialized shape of [`HoldingsConfig`] and collect
/// pointers to keys the shape lacks.
pub(crate) fn unknown_keys(doc: &Value) -> Result<Vec<String>> {
    let shape = serde_json::to_value(HoldingsConfig::default())
        .context("serialize holdings settings shape")?;
    let mut out = Vec::new();
    collect_unknown(doc, &shape, "", &mut out);
    out.sort();
    Ok(out)
}

fn collect_unknown(doc: &Value, shape: &Value, pointer: &str, out: &mut Vec<String>) {
    // Type mismatches below a known key are from_json's problem.
    let (Value::Object(doc), Value::Object(shape)) = (doc, shape) else {
        return;
    };
    for (key, value) in doc {
        let child = format!("{pointer}/{}", key.replace('~', "~0").replace('/', "~1"));
        match shape.get(key) {
            Some(known) => collect_unknown(value, known, &child, out),
            None => out.push(child),
        }
    }
}
