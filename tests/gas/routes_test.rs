use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use std::time::Duration;

use crate::common::{contract_calls, test_state, transfers, MockChainSource};

async fn server(sources: Vec<MockChainSource>, timeout: Duration) -> TestServer {
    let app = gas_tracker::create_app(test_state(sources, timeout)).await;
    TestServer::new(app).expect("Failed to create test server")
}

#[tokio::test]
async fn test_get_gas_price() {
    let mainnet = MockChainSource::new("mainnet", 1_000)
        .with_block(1_000, transfers(&[1_000_000_000; 4]))
        .with_block(999, contract_calls(&[2_000_000_000, 3_000_000_000]));
    let server = server(vec![mainnet], Duration::from_secs(5)).await;

    let response = server.get("/gas/mainnet").await;

    response.assert_status_ok();
    let body: Value = response.json();
    // reference is the two contract calls: ratio 0.5 is the medium band
    assert_eq!(body["safeLow"], "2000000000");
    assert_eq!(body["standard"], "2000000000");
    assert_eq!(body["fast"], "3000000000");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_network_name_is_case_insensitive() {
    let server = server(vec![MockChainSource::new("testnet", 10)], Duration::from_secs(5)).await;

    let response = server.get("/gas/TestNet").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["safeLow"], "70");
    assert_eq!(body["standard"], "100");
    assert_eq!(body["fast"], "150");
}

#[tokio::test]
async fn test_unknown_network() {
    let server = server(vec![MockChainSource::new("mainnet", 10)], Duration::from_secs(5)).await;

    let response = server.get("/gas/ropsten").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("ropsten"));
}

#[tokio::test]
async fn test_failed_block_fetch_returns_bad_gateway() {
    let mainnet = MockChainSource::new("mainnet", 1_000)
        .with_block(1_000, transfers(&[10, 20]))
        .failing_block(990);
    let server = server(vec![mainnet], Duration::from_secs(5)).await;

    let response = server.get("/gas/mainnet").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("block 990"));
    assert_eq!(body["network"], "mainnet");
    assert!(body.get("safeLow").is_none());
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let mainnet = MockChainSource::new("mainnet", 1_000).slow_blocks(Duration::from_secs(5));
    let server = server(vec![mainnet], Duration::from_millis(50)).await;

    let response = server.get("/gas/mainnet").await;

    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_health_and_metrics() {
    let server = server(vec![MockChainSource::new("mainnet", 10)], Duration::from_secs(5)).await;

    server.get("/health").await.assert_status_ok();
    server.get("/gas/mainnet").await.assert_status_ok();
    server.get("/gas/unknown-chain").await.assert_status(StatusCode::NOT_FOUND);

    let response = server.get("/metrics").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("gas_tracker_estimations_total"));
    assert!(text.contains("basis=\"fallback\""));
    assert!(text.contains("kind=\"unknown_network\""));
    assert!(text.contains("endpoint=\"/gas/:network\""));
    assert!(!text.contains("unknown-chain"));
}
