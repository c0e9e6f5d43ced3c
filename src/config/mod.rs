pub mod environment;
pub mod rpc_config;

pub use environment::Config;
pub use rpc_config::{get_network_config, load_network_config, NetworkEndpoint};
