use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Unknown network: {network}")]
    UnknownNetwork { network: String },

    #[error("Missing dependency: {name} has not been deployed")]
    MissingDependency { name: String },

    #[error("Transaction failed ({step}): {reason}")]
    TransactionFailure { step: String, reason: String },

    #[error("Transaction {tx_hash} not confirmed after {timeout_seconds}s")]
    ConfirmationTimeout { tx_hash: String, timeout_seconds: u64 },

    #[error("JSON-RPC error {code} from {method}: {message}")]
    RpcError {
        method: String,
        code: i64,
        message: String,
    },

    #[error("Node unreachable during {method}: {message}")]
    TransportError { method: String, message: String },

    #[error("Deployer is bound to network {bound}, provisioning requested {requested}")]
    NetworkMismatch { requested: String, bound: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Dependency,
    Chain,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ProvisionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProvisionError::UnknownNetwork { .. } => ErrorCategory::Network,
            ProvisionError::MissingDependency { .. } => ErrorCategory::Dependency,
            ProvisionError::TransactionFailure { .. }
            | ProvisionError::ConfirmationTimeout { .. }
            | ProvisionError::RpcError { .. }
            | ProvisionError::TransportError { .. } => ErrorCategory::Chain,
            ProvisionError::IoError(_) | ProvisionError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            ProvisionError::ConfigError { .. }
            | ProvisionError::NetworkMismatch { .. }
            | ProvisionError::ConfigValidationError { .. }
            | ProvisionError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 節點暫時無回應，可重試
            ProvisionError::ConfirmationTimeout { .. } | ProvisionError::TransportError { .. } => {
                ErrorSeverity::Medium
            }
            ProvisionError::TransactionFailure { .. } | ProvisionError::RpcError { .. } => {
                ErrorSeverity::High
            }
            ProvisionError::IoError(_) | ProvisionError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ProvisionError::UnknownNetwork { network } => format!(
                "Add a [networks.{}] table with all four farm addresses to the config",
                network
            ),
            ProvisionError::MissingDependency { name } => format!(
                "Run the provisioning unit that deploys {} before this one",
                name
            ),
            ProvisionError::TransactionFailure { .. } => {
                "Inspect the reverted call on-chain; the adapter may now be partially wired, \
                 re-run with guard = \"checkpoint\" or finish the remaining calls manually"
                    .to_string()
            }
            ProvisionError::ConfirmationTimeout { .. } => {
                "Check that the node is mining and raise rpc.confirmation_timeout_seconds"
                    .to_string()
            }
            ProvisionError::RpcError { .. } | ProvisionError::TransportError { .. } => {
                "Verify rpc.url points at a reachable node with rpc.from unlocked".to_string()
            }
            ProvisionError::IoError(_) | ProvisionError::SerializationError(_) => {
                "Check the deployments and artifacts directories are readable and writable"
                    .to_string()
            }
            ProvisionError::NetworkMismatch { .. } => {
                "Build the deployer and run the provisioner against the same network".to_string()
            }
            _ => "Fix the configuration file and try again".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Network is not configured: {}", self),
            ErrorCategory::Dependency => format!("A required contract is missing: {}", self),
            ErrorCategory::Chain => format!("On-chain call did not complete: {}", self),
            ErrorCategory::Storage => format!("Deployment records unavailable: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
