pub mod checkpoint;
pub mod plan;
pub mod provisioner;
pub mod registry;
pub mod unit;

pub use crate::domain::model::{
    AdapterLink, CheckpointRecord, CompletedStep, Deployment, DeploymentRecord, FarmInfo,
    FarmRegistration, NetworkAddressSet, ProvisionReport, TxReceipt, WiringCall, WiringStep,
};
pub use crate::domain::ports::{CheckpointStore, Deployer, Executor, ProvisionLogger, Storage};
pub use crate::utils::error::Result;
pub use registry::NetworkRegistry;
