use crate::core::{CheckpointRecord, CheckpointStore, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;

/// JSON checkpoint files stored next to the deployment records:
/// `<network>/.checkpoints/<unit>.json`.
pub struct CheckpointJournal<S: Storage> {
    storage: S,
    unit_id: String,
}

impl<S: Storage> CheckpointJournal<S> {
    pub fn new(storage: S, unit_id: &str) -> Self {
        Self {
            storage,
            unit_id: unit_id.to_string(),
        }
    }

    fn path(&self, network: &str) -> String {
        format!("{}/.checkpoints/{}.json", network, self.unit_id)
    }
}

#[async_trait]
impl<S: Storage> CheckpointStore for CheckpointJournal<S> {
    async fn load(&self, network: &str) -> Result<Option<CheckpointRecord>> {
        let path = self.path(network);
        if !self.storage.exists(&path).await {
            return Ok(None);
        }

        let data = self.storage.read_file(&path).await?;
        let record: CheckpointRecord = serde_json::from_slice(&data)?;
        tracing::debug!(
            "Loaded checkpoint for {} on {}: {} step(s) done",
            record.unit,
            network,
            record.completed.len()
        );
        Ok(Some(record))
    }

    async fn save(&self, record: &CheckpointRecord) -> Result<()> {
        let json = serde_json::to_vec_pretty(record)?;
        self.storage
            .write_file(&self.path(&record.network), &json)
            .await
    }
}
