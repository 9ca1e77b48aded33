use alloy::primitives::{Address, B256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 每個網路的外部合約地址，啟動時由設定檔載入，之後不再變動
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAddressSet {
    pub monolith_pool: Address,
    pub beets_masterchef: Address,
    pub fbeets_bar: Address,
    pub demeter_degree: Address,
}

/// A contract known to the deployer, new or pre-existing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub name: String,
    pub address: Address,
    pub transaction_hash: Option<B256>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRecord {
    pub deployment: Deployment,
    pub newly_deployed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmInfo {
    pub contract_address: Address,
    pub pid: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmRegistration {
    pub pool: Address,
    pub farm: FarmInfo,
}

/// Tracker → adapter link: the adapter becomes a balance source of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterLink {
    pub tracker: Address,
    pub adapter: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WiringCall {
    AddAdapter { adapter: Address },
    AddFarm(FarmRegistration),
}

/// One write call of the wiring plan. `key` is stable across runs and is what
/// the checkpoint journal records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiringStep {
    pub key: String,
    pub target: Address,
    pub call: WiringCall,
}

impl WiringStep {
    pub const ADD_ADAPTER_KEY: &'static str = "add_adapter";

    pub fn farm_key(pid: u64) -> String {
        format!("add_farm_{}", pid)
    }

    pub fn link(link: AdapterLink) -> Self {
        Self {
            key: Self::ADD_ADAPTER_KEY.to_string(),
            target: link.tracker,
            call: WiringCall::AddAdapter {
                adapter: link.adapter,
            },
        }
    }

    pub fn farm(adapter: Address, registration: FarmRegistration) -> Self {
        Self {
            key: Self::farm_key(registration.farm.pid),
            target: adapter,
            call: WiringCall::AddFarm(registration),
        }
    }
}

/// Confirmed transaction as seen by the provisioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub contract_address: Option<Address>,
    pub status: bool,
}

impl TxReceipt {
    pub fn succeeded(&self) -> bool {
        self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedStep {
    pub key: String,
    pub transaction_hash: B256,
    pub completed_at: DateTime<Utc>,
}

/// 接線進度記錄，每個步驟確認後寫入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointRecord {
    pub unit: String,
    pub network: String,
    pub adapter: Address,
    pub started_at: DateTime<Utc>,
    pub completed: Vec<CompletedStep>,
}

impl CheckpointRecord {
    pub fn new(unit: &str, network: &str, adapter: Address) -> Self {
        Self {
            unit: unit.to_string(),
            network: network.to_string(),
            adapter,
            started_at: Utc::now(),
            completed: Vec::new(),
        }
    }

    pub fn is_done(&self, key: &str) -> bool {
        self.completed.iter().any(|step| step.key == key)
    }

    pub fn mark(&mut self, key: &str, transaction_hash: B256) {
        if !self.is_done(key) {
            self.completed.push(CompletedStep {
                key: key.to_string(),
                transaction_hash,
                completed_at: Utc::now(),
            });
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub network: String,
    pub adapter: Address,
    pub newly_deployed: bool,
    pub executed: Vec<String>,
    pub skipped: Vec<String>,
}
