use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gas_tracker::services::gas::GasEstimator;
use gas_tracker::services::metrics::MetricsRegistry;
use gas_tracker::services::rpc::{Block, ChainDataSource, ChainTransaction, RpcError};
use gas_tracker::AppState;

/// In-memory chain used in place of a JSON-RPC node.
/// Blocks that were not registered come back empty.
// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub struct MockChainSource {
    network: String,
    height: u64,
    base_fee: u128,
    blocks: HashMap<u64, Vec<ChainTransaction>>,
    missing: HashSet<u64>,
    failing: HashSet<u64>,
    malformed: HashSet<u64>,
    mislabeled: HashSet<u64>,
    fail_height: bool,
    fail_base_fee: bool,
    block_delay: Option<Duration>,
    pub block_requests: AtomicUsize,
    pub base_fee_requests: AtomicUsize,
}

#[allow(dead_code)]
impl MockChainSource {
    pub fn new(network: &str, height: u64) -> Self {
        Self {
            network: network.to_string(),
            height,
            base_fee: 100,
            blocks: HashMap::new(),
            missing: HashSet::new(),
            failing: HashSet::new(),
            malformed: HashSet::new(),
            mislabeled: HashSet::new(),
            fail_height: false,
            fail_base_fee: false,
            block_delay: None,
            block_requests: AtomicUsize::new(0),
            base_fee_requests: AtomicUsize::new(0),
        }
    }

    pub fn with_block(mut self, number: u64, transactions: Vec<ChainTransaction>) -> Self {
        self.blocks.insert(number, transactions);
        self
    }

    pub fn with_base_fee(mut self, base_fee: u128) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub fn missing_block(mut self, number: u64) -> Self {
        self.missing.insert(number);
        self
    }

    pub fn failing_block(mut self, number: u64) -> Self {
        self.failing.insert(number);
        self
    }

    pub fn malformed_block(mut self, number: u64) -> Self {
        self.malformed.insert(number);
        self
    }

    /// Answer requests for `number` with the block one below it
    pub fn mislabeled_block(mut self, number: u64) -> Self {
        self.mislabeled.insert(number);
        self
    }

    pub fn failing_height(mut self) -> Self {
        self.fail_height = true;
        self
    }

    pub fn failing_base_fee(mut self) -> Self {
        self.fail_base_fee = true;
        self
    }

    pub fn slow_blocks(mut self, delay: Duration) -> Self {
        self.block_delay = Some(delay);
        self
    }

    pub fn block_requests(&self) -> usize {
        self.block_requests.load(Ordering::SeqCst)
    }

    pub fn base_fee_requests(&self) -> usize {
        self.base_fee_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainDataSource for MockChainSource {
    fn network(&self) -> &str {
        &self.network
    }

    async fn current_height(&self) -> Result<u64, RpcError> {
        if self.fail_height {
            return Err(RpcError::Network("connection refused".to_string()));
        }
        Ok(self.height)
    }

    async fn block_with_transactions(&self, number: u64) -> Result<Option<Block>, RpcError> {
        self.block_requests.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.block_delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&number) {
            return Err(RpcError::Network(format!("block {} request failed", number)));
        }
        if self.malformed.contains(&number) {
            return Err(RpcError::Parse(format!("block {} has no transaction objects", number)));
        }
        if self.missing.contains(&number) {
            return Ok(None);
        }

        let served = if self.mislabeled.contains(&number) {
            number.wrapping_sub(1)
        } else {
            number
        };

        Ok(Some(Block {
            number: served,
            timestamp: 1_700_000_000_u64.wrapping_add(number.wrapping_mul(12)),
            transactions: self.blocks.get(&number).cloned().unwrap_or_default(),
        }))
    }

    async fn base_fee(&self) -> Result<u128, RpcError> {
        self.base_fee_requests.fetch_add(1, Ordering::SeqCst);
        if self.fail_base_fee {
            return Err(RpcError::Rpc("method not available".to_string()));
        }
        Ok(self.base_fee)
    }
}

#[allow(dead_code)]
pub fn transfers(prices: &[u128]) -> Vec<ChainTransaction> {
    prices.iter().map(|&p| ChainTransaction::transfer(p)).collect()
}

#[allow(dead_code)]
pub fn contract_calls(prices: &[u128]) -> Vec<ChainTransaction> {
    prices
        .iter()
        .map(|&p| ChainTransaction::contract_call(p, "0xa9059cbb"))
        .collect()
}

/// App state serving the given mock sources, keyed by their network name
#[allow(dead_code)]
pub fn test_state(sources: Vec<MockChainSource>, request_timeout: Duration) -> AppState {
    let sources = sources
        .into_iter()
        .map(|source| {
            let network = source.network().to_string();
            (network, Arc::new(source) as Arc<dyn ChainDataSource>)
        })
        .collect();

    AppState {
        sources,
        estimator: GasEstimator::new(20),
        metrics: MetricsRegistry::new().expect("Failed to create metrics registry"),
        request_timeout,
    }
}
