use crate::adapters::abi::{describe_call, IMasterchefBalanceAdapter, ITreasuryTracker};
use crate::core::{Executor, TxReceipt, WiringCall};
use crate::utils::error::{ProvisionError, Result};
use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::providers::{
    PendingTransactionBuilder, PendingTransactionError, Provider, RootProvider, WatchTxError,
};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::{RpcError, TransportError, TransportErrorKind};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// JSON-RPC error object carried in a non-2xx HTTP response body.
#[derive(Debug, Deserialize)]
struct RejectedBody {
    error: RejectedError,
}

#[derive(Debug, Deserialize)]
struct RejectedError {
    message: String,
}

/// 連線到節點的 provider，交易由節點上已解鎖的 `from` 帳戶簽署
pub struct ChainClient {
    provider: RootProvider,
    from: Address,
    confirmation_timeout: Duration,
}

impl ChainClient {
    pub fn new(
        rpc_url: &str,
        from: Address,
        poll_interval: Duration,
        confirmation_timeout: Duration,
    ) -> Result<Self> {
        let url = Url::parse(rpc_url).map_err(|e| ProvisionError::InvalidConfigValueError {
            field: "rpc.url".to_string(),
            value: rpc_url.to_string(),
            reason: e.to_string(),
        })?;
        let client = RpcClient::new_http(url).with_poll_interval(poll_interval);

        Ok(Self {
            provider: RootProvider::new(client),
            from,
            confirmation_timeout,
        })
    }

    pub fn provider(&self) -> &RootProvider {
        &self.provider
    }

    pub fn sender(&self) -> Address {
        self.from
    }

    /// Sends a contract-creation transaction and waits for it to be mined.
    pub async fn deploy(&self, step: &str, code: Bytes) -> Result<TxReceipt> {
        let tx = TransactionRequest::default()
            .with_from(self.from)
            .with_deploy_code(code);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| rejected(step, e))?;
        self.confirm(step, pending).await
    }

    /// Waits for one confirmation; a reverted receipt becomes `TransactionFailure`.
    pub async fn confirm(
        &self,
        step: &str,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> Result<TxReceipt> {
        let tx_hash = *pending.tx_hash();
        tracing::debug!("{} submitted as {}", step, tx_hash);

        let receipt = pending
            .with_required_confirmations(1)
            .with_timeout(Some(self.confirmation_timeout))
            .get_receipt()
            .await
            .map_err(|e| match e {
                PendingTransactionError::TxWatcher(WatchTxError::Timeout) => {
                    ProvisionError::ConfirmationTimeout {
                        tx_hash: tx_hash.to_string(),
                        timeout_seconds: self.confirmation_timeout.as_secs(),
                    }
                }
                PendingTransactionError::TransportError(e) => {
                    unavailable("eth_getTransactionReceipt", e)
                }
                other => ProvisionError::TransportError {
                    method: "eth_getTransactionReceipt".to_string(),
                    message: other.to_string(),
                },
            })?;

        let receipt = to_receipt(&receipt);
        tracing::debug!(
            "Transaction {} mined in block {:?}",
            tx_hash,
            receipt.block_number
        );
        if !receipt.succeeded() {
            return Err(ProvisionError::TransactionFailure {
                step: step.to_string(),
                reason: format!("transaction {} reverted", tx_hash),
            });
        }
        Ok(receipt)
    }
}

fn to_receipt(receipt: &TransactionReceipt) -> TxReceipt {
    TxReceipt {
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        contract_address: receipt.contract_address,
        status: receipt.status(),
    }
}

/// Maps a failed submission. The node refusing the transaction (JSON-RPC
/// error, whatever the HTTP status) is a `TransactionFailure`.
fn rejected(step: &str, error: TransportError) -> ProvisionError {
    match error {
        RpcError::ErrorResp(payload) => ProvisionError::TransactionFailure {
            step: step.to_string(),
            reason: payload.message.to_string(),
        },
        RpcError::Transport(TransportErrorKind::HttpError(http)) => {
            match serde_json::from_str::<RejectedBody>(&http.body) {
                Ok(body) => ProvisionError::TransactionFailure {
                    step: step.to_string(),
                    reason: body.error.message,
                },
                Err(_) => ProvisionError::TransportError {
                    method: "eth_sendTransaction".to_string(),
                    message: format!("HTTP {}: {}", http.status, http.body),
                },
            }
        }
        other => unavailable("eth_sendTransaction", other),
    }
}

fn unavailable(method: &str, error: TransportError) -> ProvisionError {
    match error {
        RpcError::ErrorResp(payload) => ProvisionError::RpcError {
            method: method.to_string(),
            code: payload.code,
            message: payload.message.to_string(),
        },
        other => ProvisionError::TransportError {
            method: method.to_string(),
            message: other.to_string(),
        },
    }
}

fn rejected_call(step: &str, error: alloy::contract::Error) -> ProvisionError {
    match error {
        alloy::contract::Error::TransportError(e) => rejected(step, e),
        other => ProvisionError::TransactionFailure {
            step: step.to_string(),
            reason: other.to_string(),
        },
    }
}

/// Executor that submits wiring calls through the generated contract bindings.
#[derive(Clone)]
pub struct RpcExecutor {
    chain: Arc<ChainClient>,
}

impl RpcExecutor {
    pub fn new(chain: Arc<ChainClient>) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl Executor for RpcExecutor {
    async fn exec(&self, target: Address, call: &WiringCall) -> Result<TxReceipt> {
        let step = describe_call(call);
        let provider = self.chain.provider().clone();
        let from = self.chain.sender();

        let sent = match call {
            WiringCall::AddAdapter { adapter } => {
                ITreasuryTracker::new(target, provider)
                    .addAdapter(*adapter)
                    .from(from)
                    .send()
                    .await
            }
            WiringCall::AddFarm(registration) => {
                IMasterchefBalanceAdapter::new(target, provider)
                    .addFarm(registration.pool, (&registration.farm).into())
                    .from(from)
                    .send()
                    .await
            }
        };

        let pending = sent.map_err(|e| rejected_call(&step, e))?;
        self.chain.confirm(&step, pending).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_rejection_with_rpc_body_is_transaction_failure() {
        let error = TransportErrorKind::http_error(
            400,
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted: farm exists"}}"#
                .to_string(),
        );

        match rejected("addFarm", error) {
            ProvisionError::TransactionFailure { step, reason } => {
                assert_eq!(step, "addFarm");
                assert!(reason.contains("farm exists"));
            }
            other => panic!("expected TransactionFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_http_failure_without_rpc_body_is_transport_error() {
        let error = TransportErrorKind::http_error(502, "Bad Gateway".to_string());

        assert!(matches!(
            rejected("addAdapter", error),
            ProvisionError::TransportError { .. }
        ));
    }

    #[test]
    fn test_invalid_rpc_url_is_config_error() {
        let result = ChainClient::new(
            "not a url",
            Address::with_last_byte(1),
            Duration::from_millis(10),
            Duration::from_secs(1),
        );
        assert!(matches!(
            result,
            Err(ProvisionError::InvalidConfigValueError { .. })
        ));
    }
}
