use alloy::primitives::Address;
use anyhow::Result;
use httpmock::prelude::*;
use masterchef_provisioner::core::{Deployer, Executor, NetworkAddressSet, WiringCall};
use masterchef_provisioner::{
    ChainClient, FileDeployer, LocalStorage, NetworkRegistry, ProvisionError, Provisioner,
    RpcExecutor, TracingLogger,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const TX_HASH: &str = "0x00000000000000000000000000000000000000000000000000000000000000f1";
const ADAPTER: &str = "0x0000000000000000000000000000000000001234";
const TRACKER: &str = "0x0000000000000000000000000000000000007777";
const BLOCK_HASH: &str = "0x00000000000000000000000000000000000000000000000000000000000000b1";

fn address(hex: &str) -> Address {
    hex.parse().unwrap()
}

fn registry() -> NetworkRegistry {
    NetworkRegistry::default().with_network(
        "sonic-main",
        NetworkAddressSet {
            monolith_pool: Address::with_last_byte(0xaa),
            beets_masterchef: Address::with_last_byte(0xbe),
            fbeets_bar: Address::with_last_byte(0xfb),
            demeter_degree: Address::with_last_byte(0xde),
        },
    )
}

struct Workspace {
    _temp_dir: TempDir,
    records: LocalStorage,
    artifacts: LocalStorage,
    records_path: std::path::PathBuf,
}

fn workspace(with_adapter_record: bool) -> Result<Workspace> {
    let temp_dir = TempDir::new()?;
    let records_path = temp_dir.path().join("deployments");
    let artifacts_path = temp_dir.path().join("artifacts");
    std::fs::create_dir_all(records_path.join("sonic-main"))?;
    std::fs::create_dir_all(&artifacts_path)?;

    std::fs::write(
        records_path.join("sonic-main/TreasuryTracker.json"),
        json!({ "address": TRACKER, "abi": [] }).to_string(),
    )?;
    if with_adapter_record {
        std::fs::write(
            records_path.join("sonic-main/MasterchefBalanceAdapter.json"),
            json!({ "address": ADAPTER, "transactionHash": TX_HASH }).to_string(),
        )?;
    }
    std::fs::write(
        artifacts_path.join("MasterchefBalanceAdapter.json"),
        json!({ "contractName": "MasterchefBalanceAdapter", "bytecode": "0x6080604052" })
            .to_string(),
    )?;

    Ok(Workspace {
        records: LocalStorage::new(records_path.to_str().unwrap().to_string()),
        artifacts: LocalStorage::new(artifacts_path.to_str().unwrap().to_string()),
        records_path,
        _temp_dir: temp_dir,
    })
}

fn chain_client(server: &MockServer, timeout: Duration) -> Arc<ChainClient> {
    Arc::new(
        ChainClient::new(
            &server.url("/"),
            Address::with_last_byte(0xf1),
            Duration::from_millis(10),
            timeout,
        )
        .unwrap(),
    )
}

/// Keeps the provider's block watcher fed while transactions are pending.
fn mock_chain_head(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST).path("/").body_contains("eth_blockNumber");
        then.status(200)
            .json_body(json!({ "jsonrpc": "2.0", "id": 1, "result": "0x10" }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/").body_contains("eth_getBlockByNumber");
        then.status(200)
            .json_body(json!({ "jsonrpc": "2.0", "id": 1, "result": null }));
    });
}

fn receipt(status: &str) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": BLOCK_HASH,
            "blockNumber": "0x10",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "from": "0x00000000000000000000000000000000000000f1",
            "to": null,
            "contractAddress": ADAPTER,
        }
    })
}

#[tokio::test]
async fn test_end_to_end_provision_against_json_rpc_node() -> Result<()> {
    let ws = workspace(false)?;
    let server = MockServer::start();
    mock_chain_head(&server);

    let send_mock = server.mock(|when, then| {
        when.method(POST).path("/").body_contains("eth_sendTransaction");
        then.status(200)
            .json_body(json!({ "jsonrpc": "2.0", "id": 1, "result": TX_HASH }));
    });
    let receipt_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("eth_getTransactionReceipt");
        then.status(200).json_body(receipt("0x1"));
    });

    let chain = chain_client(&server, Duration::from_secs(5));
    let deployer = FileDeployer::new(
        ws.records.clone(),
        ws.artifacts.clone(),
        "sonic-main",
        chain.clone(),
    );
    let provisioner = Provisioner::new(registry(), deployer, RpcExecutor::new(chain), TracingLogger);

    let report = provisioner.provision("sonic-main").await?;

    // deploy + addAdapter + 3 × addFarm
    send_mock.assert_hits(5);
    assert!(receipt_mock.hits() >= 5);
    assert!(report.newly_deployed);
    assert_eq!(report.adapter, address(ADAPTER));
    assert_eq!(report.executed.len(), 4);

    let record: serde_json::Value = serde_json::from_slice(&std::fs::read(
        ws.records_path
            .join("sonic-main/MasterchefBalanceAdapter.json"),
    )?)?;
    assert_eq!(
        record["address"].as_str().unwrap().to_lowercase(),
        ADAPTER.to_lowercase()
    );
    assert!(record["deployedAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_existing_record_makes_no_rpc_calls() -> Result<()> {
    let ws = workspace(true)?;
    let server = MockServer::start();
    let any_mock = server.mock(|when, then| {
        when.method(POST).path("/");
        then.status(500);
    });

    let chain = chain_client(&server, Duration::from_secs(1));
    let provisioner = Provisioner::new(
        registry(),
        FileDeployer::new(ws.records.clone(), ws.artifacts.clone(), "sonic-main", chain.clone()),
        RpcExecutor::new(chain),
        TracingLogger,
    );

    let report = provisioner.provision("sonic-main").await?;

    any_mock.assert_hits(0);
    assert!(!report.newly_deployed);
    assert_eq!(report.adapter, address(ADAPTER));
    Ok(())
}

#[tokio::test]
async fn test_get_missing_record_is_missing_dependency() -> Result<()> {
    let ws = workspace(false)?;
    let server = MockServer::start();
    let deployer = FileDeployer::new(
        ws.records.clone(),
        ws.artifacts.clone(),
        "sonic-main",
        chain_client(&server, Duration::from_secs(1)),
    );

    let tracker = deployer.get("TreasuryTracker").await?;
    assert_eq!(tracker.address, address(TRACKER));

    match deployer.get("StakingBar").await {
        Err(ProvisionError::MissingDependency { name }) => assert_eq!(name, "StakingBar"),
        other => panic!("expected MissingDependency, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_reverted_receipt_is_transaction_failure() -> Result<()> {
    let ws = workspace(false)?;
    let server = MockServer::start();
    mock_chain_head(&server);
    server.mock(|when, then| {
        when.method(POST).path("/").body_contains("eth_sendTransaction");
        then.status(200)
            .json_body(json!({ "jsonrpc": "2.0", "id": 1, "result": TX_HASH }));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("eth_getTransactionReceipt");
        then.status(200).json_body(receipt("0x0"));
    });

    let deployer = FileDeployer::new(
        ws.records.clone(),
        ws.artifacts.clone(),
        "sonic-main",
        chain_client(&server, Duration::from_secs(1)),
    );

    let err = deployer
        .deploy("MasterchefBalanceAdapter", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ProvisionError::TransactionFailure { .. }));
    assert!(!ws
        .records_path
        .join("sonic-main/MasterchefBalanceAdapter.json")
        .exists());
    Ok(())
}

fn add_adapter_call() -> WiringCall {
    WiringCall::AddAdapter {
        adapter: address(ADAPTER),
    }
}

#[tokio::test]
async fn test_rpc_error_on_send_is_transaction_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/").body_contains("eth_sendTransaction");
        then.status(200).json_body(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "execution reverted: farm exists" }
        }));
    });

    let executor = RpcExecutor::new(chain_client(&server, Duration::from_secs(1)));
    let err = executor
        .exec(address(TRACKER), &add_adapter_call())
        .await
        .unwrap_err();

    match err {
        ProvisionError::TransactionFailure { reason, .. } => {
            assert!(reason.contains("farm exists"))
        }
        other => panic!("expected TransactionFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejection_with_http_error_status_is_transaction_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/").body_contains("eth_sendTransaction");
        then.status(400).json_body(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": 3, "message": "execution reverted: adapter exists" }
        }));
    });

    let executor = RpcExecutor::new(chain_client(&server, Duration::from_secs(1)));
    let err = executor
        .exec(address(TRACKER), &add_adapter_call())
        .await
        .unwrap_err();

    match err {
        ProvisionError::TransactionFailure { reason, .. } => {
            assert!(reason.contains("adapter exists"))
        }
        other => panic!("expected TransactionFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unmined_transaction_times_out() -> Result<()> {
    let ws = workspace(false)?;
    let server = MockServer::start();
    mock_chain_head(&server);
    server.mock(|when, then| {
        when.method(POST).path("/").body_contains("eth_sendTransaction");
        then.status(200)
            .json_body(json!({ "jsonrpc": "2.0", "id": 1, "result": TX_HASH }));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/")
            .body_contains("eth_getTransactionReceipt");
        then.status(200)
            .json_body(json!({ "jsonrpc": "2.0", "id": 1, "result": null }));
    });

    let deployer = FileDeployer::new(
        ws.records.clone(),
        ws.artifacts.clone(),
        "sonic-main",
        chain_client(&server, Duration::from_millis(200)),
    );
    let err = deployer
        .deploy("MasterchefBalanceAdapter", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, ProvisionError::ConfirmationTimeout { .. }));
    Ok(())
}
