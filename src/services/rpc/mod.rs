pub mod client;
pub mod types;

pub use client::{ChainDataSource, HttpRpcClient};
pub use types::{Block, ChainTransaction, RpcError};
