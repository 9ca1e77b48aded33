// Adapters layer: concrete implementations of the domain ports (chain provider, deployment files, logging).

pub mod abi;
pub mod deployments;
pub mod logging;
pub mod rpc;
pub mod storage;

pub use deployments::FileDeployer;
pub use logging::TracingLogger;
pub use rpc::{ChainClient, RpcExecutor};
pub use storage::LocalStorage;
