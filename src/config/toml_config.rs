use crate::core::provisioner::WiringGuard;
use crate::core::{NetworkAddressSet, NetworkRegistry};
use crate::utils::error::{ProvisionError, Result};
use crate::utils::validation::{
    validate_nonzero_address, validate_path, validate_positive_number, validate_url, Validate,
};
use alloy::primitives::Address;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIRMATION_TIMEOUT_SECONDS: u64 = 120;
const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub rpc: RpcConfig,
    pub deployments: DeploymentsConfig,
    pub provision: Option<ProvisionSettings>,
    #[serde(default)]
    pub networks: HashMap<String, NetworkAddressSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub url: String,
    pub from: Address,
    pub confirmation_timeout_seconds: Option<u64>,
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentsConfig {
    pub directory: String,
    pub artifacts: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisionSettings {
    pub guard: Option<WiringGuard>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProvisionError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProvisionError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DEPLOYER_ADDRESS})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProvisionError::ConfigError {
            message: format!("Invalid env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("rpc.url", &self.rpc.url)?;
        validate_nonzero_address("rpc.from", &self.rpc.from)?;
        validate_positive_number(
            "rpc.confirmation_timeout_seconds",
            self.confirmation_timeout().as_secs(),
            1,
        )?;
        validate_positive_number(
            "rpc.poll_interval_ms",
            self.poll_interval().as_millis() as u64,
            1,
        )?;

        validate_path("deployments.directory", &self.deployments.directory)?;
        validate_path("deployments.artifacts", &self.deployments.artifacts)?;

        self.registry().validate()
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(
            self.rpc
                .confirmation_timeout_seconds
                .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT_SECONDS),
        )
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.rpc.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }

    pub fn guard(&self) -> WiringGuard {
        self.provision
            .as_ref()
            .and_then(|p| p.guard)
            .unwrap_or_default()
    }

    pub fn registry(&self) -> NetworkRegistry {
        NetworkRegistry::new(self.networks.clone())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
