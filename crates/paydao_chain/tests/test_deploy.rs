mod common;

use std::time::Duration;

use common::{MockTransport, hash};
use paydao_chain::{
    Address, ContractArtifact, DeployParams, DeploymentInfo, GatewayError, Network,
    TransactionReceipt, deploy_contract,
};

const VERIFIER: &str = "0x1111111111111111111111111111111111111111";
const DEPLOYED: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

fn artifact() -> ContractArtifact {
    ContractArtifact {
        bytecode: vec![0x60, 0x80, 0x60, 0x40],
    }
}

fn params() -> DeployParams {
    DeployParams {
        poll_interval: Duration::from_millis(1),
        poll_attempts: 5,
        ..DeployParams::new(VERIFIER.parse().unwrap(), Network::Localhost)
    }
}

fn receipt(contract: Option<Address>, status: bool) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: hash(0xaa),
        contract_address: contract,
        status: Some(status),
        block_number: Some(1),
        gas_used: Some(1_000_000),
    }
}

#[tokio::test]
async fn deploy_sends_creation_tx_and_waits_for_receipt() {
    let transport = MockTransport::new();
    transport.push_receipt(None);
    transport.push_receipt(None);
    transport.push_receipt(Some(receipt(Some(DEPLOYED.parse().unwrap()), true)));

    let info = deploy_contract(&transport, &artifact(), &params()).await.unwrap();

    assert_eq!(info.address.to_string(), DEPLOYED);
    assert_eq!(info.verifier, VERIFIER.parse().unwrap());
    assert_eq!(info.network, "localhost");
    assert_eq!(*transport.receipt_polls.lock(), 3);

    let sent = transport.last_sent();
    assert!(sent.to.is_none());
    assert_eq!(&sent.data[..4], &[0x60, 0x80, 0x60, 0x40]);
    assert_eq!(sent.data.len(), 4 + 32);
    assert_eq!(&sent.data[4 + 12..], info.verifier.as_bytes());
}

#[tokio::test]
async fn reverted_creation_is_a_deployment_error() {
    let transport = MockTransport::new();
    transport.push_receipt(Some(receipt(None, false)));

    let err = deploy_contract(&transport, &artifact(), &params())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Deployment(_)));
}

#[tokio::test]
async fn receipt_without_contract_address_fails() {
    let transport = MockTransport::new();
    transport.push_receipt(Some(receipt(None, true)));

    let err = deploy_contract(&transport, &artifact(), &params())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Deployment(_)));
}

#[tokio::test]
async fn gives_up_after_poll_attempts() {
    let transport = MockTransport::new();

    let err = deploy_contract(&transport, &artifact(), &params())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Deployment(_)));
    assert_eq!(*transport.receipt_polls.lock(), 5);
}

#[tokio::test]
async fn send_failure_propagates() {
    let transport = MockTransport::new();
    transport.push_send(Err(GatewayError::Rpc {
        code: -32000,
        message: "insufficient funds for gas".into(),
    }));

    let err = deploy_contract(&transport, &artifact(), &params())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Rpc { .. }));
    assert_eq!(*transport.receipt_polls.lock(), 0);
}

#[test]
fn deployment_info_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("deployment-info.json");
    let info = DeploymentInfo {
        address: DEPLOYED.parse().unwrap(),
        verifier: VERIFIER.parse().unwrap(),
        network: "sepolia".into(),
        deployed_at: chrono::Utc::now(),
    };
    info.save(&path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["address"], DEPLOYED);
    assert!(raw["deployedAt"].is_string());

    assert_eq!(DeploymentInfo::load(&path).unwrap(), info);
}

#[test]
fn artifact_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("PrivatePayDAO.json");
    std::fs::write(&path, r#"{"contractName":"PrivatePayDAO","bytecode":"0x60806040"}"#).unwrap();

    let artifact = ContractArtifact::load(&path).unwrap();
    assert_eq!(artifact.bytecode, vec![0x60, 0x80, 0x60, 0x40]);
    assert!(ContractArtifact::load(&dir.path().join("missing.json")).is_err());
}
