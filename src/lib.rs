pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{ChainClient, FileDeployer, LocalStorage, RpcExecutor, TracingLogger};
pub use crate::config::TomlConfig;
pub use crate::core::checkpoint::CheckpointJournal;
pub use crate::core::provisioner::{Provisioner, WiringGuard};
pub use crate::core::unit::MASTERCHEF_BALANCE_ADAPTER;
pub use crate::core::NetworkRegistry;
pub use crate::utils::error::{ProvisionError, Result};
