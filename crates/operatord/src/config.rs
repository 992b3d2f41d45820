//! Layered configuration for a single operator process: defaults, overridden
//! by an optional `config/default.toml`, overridden in turn by environment
//! variables. None of these are protocol inputs — they are deployment knobs
//! like listen address and rate limits.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    pub operator_id: u64,
    pub listen_addr: String,
    pub rsa_key_path: String,
    pub init_rate_limit_per_min: usize,
    pub dkg_rate_limit_per_min: usize,
    pub max_instances: usize,
    pub idle_timeout_secs: u64,
    pub store_share: bool,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            operator_id: 1,
            listen_addr: "0.0.0.0:8080".to_string(),
            rsa_key_path: "operator_key.pem".to_string(),
            init_rate_limit_per_min: 5,
            dkg_rate_limit_per_min: 500,
            max_instances: dkg_types::MAX_INSTANCES,
            idle_timeout_secs: dkg_types::INSTANCE_IDLE_TIMEOUT.as_secs(),
            store_share: false,
        }
    }
}

impl OperatorConfig {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if Path::new("config/default.toml").exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name("config/default"))
                .build()
                .context("failed to load config/default.toml")?;
            if let Ok(file_config) = settings.try_deserialize::<OperatorConfig>() {
                config = file_config;
            }
        }

        Self::override_from_env(&mut config)?;
        Ok(config)
    }

    fn override_from_env(config: &mut OperatorConfig) -> Result<()> {
        if let Ok(v) = std::env::var("OPERATOR_ID") {
            config.operator_id = v.parse().context("invalid OPERATOR_ID")?;
        }
        if let Ok(v) = std::env::var("LISTEN_ADDR") {
            config.listen_addr = v;
        }
        if let Ok(v) = std::env::var("RSA_KEY_PATH") {
            config.rsa_key_path = v;
        }
        if let Ok(v) = std::env::var("INIT_RATE_LIMIT_PER_MIN") {
            config.init_rate_limit_per_min = v.parse().context("invalid INIT_RATE_LIMIT_PER_MIN")?;
        }
        if let Ok(v) = std::env::var("DKG_RATE_LIMIT_PER_MIN") {
            config.dkg_rate_limit_per_min = v.parse().context("invalid DKG_RATE_LIMIT_PER_MIN")?;
        }
        if let Ok(v) = std::env::var("MAX_INSTANCES") {
            config.max_instances = v.parse().context("invalid MAX_INSTANCES")?;
        }
        if let Ok(v) = std::env::var("IDLE_TIMEOUT_SECS") {
            config.idle_timeout_secs = v.parse().context("invalid IDLE_TIMEOUT_SECS")?;
        }
        if let Ok(v) = std::env::var("STORE_SHARE") {
            config.store_share = v.parse().context("invalid STORE_SHARE")?;
        }
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OperatorConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.init_rate_limit_per_min, 5);
        assert_eq!(config.dkg_rate_limit_per_min, 500);
        assert!(!config.store_share);
    }
}
