use crate::core::plan::{
    farm_registrations, wiring_keys, wiring_plan, ADAPTER_CONTRACT, TRACKER_CONTRACT,
};
use crate::core::unit::MASTERCHEF_BALANCE_ADAPTER_ID;
use crate::core::{
    CheckpointRecord, CheckpointStore, Deployer, Executor, FarmRegistration, NetworkAddressSet,
    NetworkRegistry, ProvisionLogger, ProvisionReport,
};
use crate::utils::error::{ProvisionError, Result};
use crate::utils::validation::Validate;
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

pub const ADAPTER_LOG_LABEL: &str = "MasterchefBalanceAdapter ";

/// 決定是否需要重新接線的依據
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WiringGuard {
    /// Wire only when the adapter was created by this run.
    #[default]
    Deployment,
    /// Track each wiring step in a checkpoint journal and resume unfinished ones.
    Checkpoint,
}

pub struct Provisioner<D: Deployer, E: Executor, L: ProvisionLogger> {
    registry: NetworkRegistry,
    deployer: D,
    executor: E,
    logger: L,
    checkpoints: Option<Box<dyn CheckpointStore>>,
}

impl<D: Deployer, E: Executor, L: ProvisionLogger> Provisioner<D, E, L> {
    pub fn new(registry: NetworkRegistry, deployer: D, executor: E, logger: L) -> Self {
        Self {
            registry,
            deployer,
            executor,
            logger,
            checkpoints: None,
        }
    }

    /// Switches the provisioner to the checkpointed guard.
    pub fn with_checkpoints(mut self, store: Box<dyn CheckpointStore>) -> Self {
        self.checkpoints = Some(store);
        self
    }

    pub fn guard(&self) -> WiringGuard {
        if self.checkpoints.is_some() {
            WiringGuard::Checkpoint
        } else {
            WiringGuard::Deployment
        }
    }

    /// Resolves and validates the network's addresses without touching the chain.
    pub fn preview(&self, network: &str) -> Result<[FarmRegistration; 3]> {
        let addresses = self.resolve(network)?;
        Ok(farm_registrations(&addresses))
    }

    pub async fn provision(&self, network: &str) -> Result<ProvisionReport> {
        let addresses = self.resolve(network)?;
        tracing::info!("🔧 Provisioning {} on {}", ADAPTER_CONTRACT, network);

        let record = self.deployer.deploy(ADAPTER_CONTRACT, &[]).await?;
        let adapter = record.deployment.address;
        tracing::debug!(
            "{} at {} (newly deployed: {})",
            ADAPTER_CONTRACT,
            adapter,
            record.newly_deployed
        );

        let mut report = ProvisionReport {
            network: network.to_string(),
            adapter,
            newly_deployed: record.newly_deployed,
            executed: Vec::new(),
            skipped: Vec::new(),
        };

        match self.pending_checkpoint(network, adapter, record.newly_deployed).await? {
            Some(mut checkpoint) => {
                self.wire(&addresses, adapter, Some(&mut checkpoint), &mut report)
                    .await?;
            }
            None if record.newly_deployed && self.checkpoints.is_none() => {
                self.wire(&addresses, adapter, None, &mut report).await?;
            }
            None => {
                tracing::info!("⏭️  {} already wired, skipping", ADAPTER_CONTRACT);
                report.skipped = wiring_keys();
            }
        }

        self.logger.log(ADAPTER_LOG_LABEL, &adapter.to_string());
        Ok(report)
    }

    fn resolve(&self, network: &str) -> Result<NetworkAddressSet> {
        let addresses = *self.registry.for_network(network)?;
        addresses.validate()?;

        // 部署記錄與地址必須來自同一個網路
        if let Some(bound) = self.deployer.network() {
            if bound != network {
                return Err(ProvisionError::NetworkMismatch {
                    requested: network.to_string(),
                    bound: bound.to_string(),
                });
            }
        }
        Ok(addresses)
    }

    /// Journal to wire against when the checkpointed guard is active.
    async fn pending_checkpoint(
        &self,
        network: &str,
        adapter: Address,
        newly_deployed: bool,
    ) -> Result<Option<CheckpointRecord>> {
        let Some(store) = &self.checkpoints else {
            return Ok(None);
        };

        if newly_deployed {
            let record = CheckpointRecord::new(MASTERCHEF_BALANCE_ADAPTER_ID, network, adapter);
            store.save(&record).await?;
            return Ok(Some(record));
        }

        match store.load(network).await? {
            Some(record) if record.adapter != adapter => {
                tracing::warn!(
                    "Checkpoint belongs to adapter {}, deployed adapter is {}; ignoring it",
                    record.adapter,
                    adapter
                );
                Ok(None)
            }
            Some(record) => {
                let keys = wiring_keys();
                if keys.iter().all(|key| record.is_done(key)) {
                    Ok(None)
                } else {
                    tracing::info!(
                        "♻️  Resuming wiring: {}/{} step(s) already confirmed",
                        record.completed.len(),
                        keys.len()
                    );
                    Ok(Some(record))
                }
            }
            None => Ok(None),
        }
    }

    async fn wire(
        &self,
        addresses: &NetworkAddressSet,
        adapter: Address,
        mut checkpoint: Option<&mut CheckpointRecord>,
        report: &mut ProvisionReport,
    ) -> Result<()> {
        let tracker = self.deployer.get(TRACKER_CONTRACT).await?;

        for step in wiring_plan(addresses, tracker.address, adapter) {
            if checkpoint.as_ref().is_some_and(|c| c.is_done(&step.key)) {
                tracing::debug!("Step {} already confirmed", step.key);
                report.skipped.push(step.key);
                continue;
            }

            tracing::info!("📤 {} → {}", step.key, step.target);
            let receipt = self.executor.exec(step.target, &step.call).await?;
            if !receipt.succeeded() {
                return Err(ProvisionError::TransactionFailure {
                    step: step.key,
                    reason: format!("transaction {} reverted", receipt.transaction_hash),
                });
            }

            if let (Some(record), Some(store)) = (checkpoint.as_deref_mut(), &self.checkpoints) {
                record.mark(&step.key, receipt.transaction_hash);
                store.save(record).await?;
            }
            report.executed.push(step.key);
        }

        Ok(())
    }
}
