use crate::domain::model::{
    CheckpointRecord, Deployment, DeploymentRecord, TxReceipt, WiringCall,
};
use crate::utils::error::Result;
use alloy::primitives::Address;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Deploy-or-fetch and fetch-existing primitives, keyed by logical contract name.
#[async_trait]
pub trait Deployer: Send + Sync {
    async fn deploy(&self, name: &str, constructor_args: &[u8]) -> Result<DeploymentRecord>;

    /// Network whose records this deployer reads, when it is bound to one.
    fn network(&self) -> Option<&str> {
        None
    }

    /// Fails with `MissingDependency` when `name` was never deployed.
    async fn get(&self, name: &str) -> Result<Deployment>;
}

/// Submits one transaction and waits for its confirmation.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn exec(&self, target: Address, call: &WiringCall) -> Result<TxReceipt>;
}

/// Per-step completion records for the checkpointed wiring guard.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    async fn load(&self, network: &str) -> Result<Option<CheckpointRecord>>;
    async fn save(&self, record: &CheckpointRecord) -> Result<()>;
}

pub trait ProvisionLogger: Send + Sync {
    fn log(&self, label: &str, value: &str);
}
