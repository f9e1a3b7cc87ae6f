//! CLI configuration.
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! [gateway]
//! api_url = "https://mtf.onepay.vn"
//! merchant = "TESTONEPAY"
//! access_code = "6BEB2546"
//! hash_key = "${PAYGATE_HASH_KEY}"
//!
//! [shop]
//! host = "shop.example.com"
//! ```
//!
//! `${VAR}` references are expanded from the environment, and `PAYGATE_*`
//! variables override individual gateway credentials.

use paygate_client::GatewayConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Expand `${VAR}` references. Unset variables are left as written.
fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    })
    .to_string()
}

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Merchant credentials and gateway endpoints.
    pub gateway: GatewayConfig,

    /// The merchant site the gateway sends browsers back to.
    pub shop: ShopConfig,
}

impl CliConfig {
    /// Load configuration from a file, or defaults if it does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.expand_env();
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn expand_env(&mut self) {
        let gateway = &mut self.gateway;
        for value in [
            &mut gateway.api_url,
            &mut gateway.user,
            &mut gateway.password,
            &mut gateway.access_code,
            &mut gateway.merchant,
            &mut gateway.hash_key,
        ] {
            *value = expand_env_vars(value);
        }
        self.shop.host = expand_env_vars(&self.shop.host);
    }

    /// Override gateway credentials from `PAYGATE_*` variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let gateway = &mut self.gateway;
        for (name, value) in [
            ("PAYGATE_API_URL", &mut gateway.api_url),
            ("PAYGATE_USER", &mut gateway.user),
            ("PAYGATE_PASSWORD", &mut gateway.password),
            ("PAYGATE_ACCESS_CODE", &mut gateway.access_code),
            ("PAYGATE_MERCHANT", &mut gateway.merchant),
            ("PAYGATE_HASH_KEY", &mut gateway.hash_key),
        ] {
            if let Some(v) = lookup(name).filter(|v| !v.is_empty()) {
                *value = v;
            }
        }
    }
}

/// Where the merchant site is reachable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub scheme: String,
    pub host: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            host: "localhost".to_string(),
        }
    }
}

/// Get the default configuration directory.
pub fn default_base_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PAYGATE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("io", "paygate", "paygate")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".paygate")
        })
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    default_base_dir().join("config.toml")
}
