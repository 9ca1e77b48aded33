use crate::adapters::rpc::ChainClient;
use crate::core::{Deployer, Deployment, DeploymentRecord, Storage};
use crate::utils::error::{ProvisionError, Result};
use alloy::primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 部署記錄檔，格式與 hardhat-deploy 的 `deployments/<network>/<Name>.json` 相容
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDeployment {
    pub address: Address,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
    #[serde(default)]
    pub deployed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ContractArtifact {
    bytecode: Bytes,
}

/// Deploy-or-fetch backed by per-network record files; new contracts are
/// created from compiled artifacts through the chain client.
pub struct FileDeployer<S: Storage> {
    records: S,
    artifacts: S,
    network: String,
    chain: Arc<ChainClient>,
}

impl<S: Storage> FileDeployer<S> {
    pub fn new(records: S, artifacts: S, network: &str, chain: Arc<ChainClient>) -> Self {
        Self {
            records,
            artifacts,
            network: network.to_string(),
            chain,
        }
    }

    fn record_path(&self, name: &str) -> String {
        format!("{}/{}.json", self.network, name)
    }

    async fn load_record(&self, name: &str) -> Result<Option<Deployment>> {
        let path = self.record_path(name);
        if !self.records.exists(&path).await {
            return Ok(None);
        }

        let data = self.records.read_file(&path).await?;
        let stored: StoredDeployment = serde_json::from_slice(&data)?;
        Ok(Some(Deployment {
            name: name.to_string(),
            address: stored.address,
            transaction_hash: stored.transaction_hash,
        }))
    }

    async fn load_bytecode(&self, name: &str) -> Result<Bytes> {
        let path = format!("{}.json", name);
        if !self.artifacts.exists(&path).await {
            return Err(ProvisionError::ConfigError {
                message: format!("No compiled artifact for {} ({})", name, path),
            });
        }

        let data = self.artifacts.read_file(&path).await?;
        let artifact: ContractArtifact = serde_json::from_slice(&data)?;
        if artifact.bytecode.is_empty() {
            return Err(ProvisionError::ConfigError {
                message: format!("Artifact for {} has empty bytecode", name),
            });
        }
        Ok(artifact.bytecode)
    }
}

#[async_trait]
impl<S: Storage> Deployer for FileDeployer<S> {
    async fn deploy(&self, name: &str, constructor_args: &[u8]) -> Result<DeploymentRecord> {
        if let Some(deployment) = self.load_record(name).await? {
            tracing::info!("♻️  Reusing {} at {}", name, deployment.address);
            return Ok(DeploymentRecord {
                deployment,
                newly_deployed: false,
            });
        }

        let bytecode = self.load_bytecode(name).await?;
        let mut data = bytecode.to_vec();
        data.extend_from_slice(constructor_args);

        tracing::info!("🚀 Deploying {} on {}", name, self.network);
        let step = format!("deploy {}", name);
        let receipt = self.chain.deploy(&step, data.into()).await?;
        let address = receipt
            .contract_address
            .ok_or_else(|| ProvisionError::TransactionFailure {
                step: step.clone(),
                reason: format!(
                    "receipt {} has no contract address",
                    receipt.transaction_hash
                ),
            })?;

        let stored = StoredDeployment {
            address,
            transaction_hash: Some(receipt.transaction_hash),
            deployed_at: Some(Utc::now()),
        };
        self.records
            .write_file(&self.record_path(name), &serde_json::to_vec_pretty(&stored)?)
            .await?;

        Ok(DeploymentRecord {
            deployment: Deployment {
                name: name.to_string(),
                address,
                transaction_hash: Some(receipt.transaction_hash),
            },
            newly_deployed: true,
        })
    }

    fn network(&self) -> Option<&str> {
        Some(&self.network)
    }

    async fn get(&self, name: &str) -> Result<Deployment> {
        self.load_record(name)
            .await?
            .ok_or_else(|| ProvisionError::MissingDependency {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardhat_deploy_record_parses() {
        let json = r#"{
            "address": "0x1234567890123456789012345678901234567890",
            "abi": [],
            "transactionHash": "0x0000000000000000000000000000000000000000000000000000000000000abc",
            "receipt": {}
        }"#;

        let stored: StoredDeployment = serde_json::from_str(json).unwrap();
        assert_eq!(
            stored.address,
            "0x1234567890123456789012345678901234567890"
                .parse::<Address>()
                .unwrap()
        );
        assert!(stored.transaction_hash.is_some());
        assert!(stored.deployed_at.is_none());
    }
}
