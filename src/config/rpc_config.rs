use std::collections::HashMap;
use std::time::Duration;

/// RPC endpoint configuration for a network
#[derive(Debug, Clone)]
pub struct NetworkEndpoint {
    /// JSON-RPC URL of the node
    pub rpc_url: String,

    /// Timeout for a single RPC call
    pub timeout: Duration,
}

pub const MAINNET: &str = "mainnet";
pub const TESTNET: &str = "testnet";

/// Load the network table, RPC URLs overridable from the environment
pub fn load_network_config() -> HashMap<String, NetworkEndpoint> {
    let mut config = HashMap::new();

    config.insert(
        MAINNET.to_string(),
        NetworkEndpoint {
            rpc_url: std::env::var("MAINNET_RPC_URL")
                .unwrap_or("https://ethereum-rpc.publicnode.com".to_string()),
            timeout: Duration::from_secs(10),
        },
    );

    config.insert(
        TESTNET.to_string(),
        NetworkEndpoint {
            rpc_url: std::env::var("TESTNET_RPC_URL")
                .unwrap_or("https://ethereum-sepolia-rpc.publicnode.com".to_string()),
            timeout: Duration::from_secs(10),
        },
    );

    config
}

/// Get configuration for a network, case-insensitive
pub fn get_network_config(network: &str) -> Option<NetworkEndpoint> {
    load_network_config().remove(&network.to_lowercase())
}
