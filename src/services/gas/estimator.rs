use futures::future::try_join_all;

use super::sampling::{classify, extract_samples};
use super::strategy::{fallback_estimate, CongestionAwareStrategy, TierStrategy};
use super::types::{EstimateBasis, EstimateOutcome, GasError, PriceEstimate, Stage};
use crate::services::rpc::{Block, ChainDataSource};

/// Number of recent blocks sampled per pass
pub const DEFAULT_WINDOW_SIZE: u64 = 20;

/// Gas price estimator sampling a window of recent blocks.
/// Holds no per-pass state, so one instance can serve concurrent passes.
pub struct GasEstimator {
    window_size: u64,
    strategy: Box<dyn TierStrategy>,
}

impl Default for GasEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl GasEstimator {
    pub fn new(window_size: u64) -> Self {
        Self::with_strategy(window_size, Box::new(CongestionAwareStrategy::default()))
    }

    pub fn with_strategy(window_size: u64, strategy: Box<dyn TierStrategy>) -> Self {
        Self {
            window_size: window_size.max(1),
            strategy,
        }
    }

    pub fn window_size(&self) -> u64 {
        self.window_size
    }

    pub async fn estimate(&self, source: &dyn ChainDataSource) -> Result<PriceEstimate, GasError> {
        self.estimate_detailed(source).await.map(|outcome| outcome.estimate)
    }

    /// Run one full estimation pass against `source`
    pub async fn estimate_detailed(
        &self,
        source: &dyn ChainDataSource,
    ) -> Result<EstimateOutcome, GasError> {
        let network = source.network();

        let height = source
            .current_height()
            .await
            .map_err(|e| GasError::from_rpc(network, Stage::Height, e))?;

        let window = self.fetch_window(source, height).await?;
        let samples = extract_samples(&window);

        if samples.is_empty() {
            tracing::warn!(
                "No priced transactions in blocks {}..={} on {}, using base fee fallback",
                window.last().map_or(height, |oldest| oldest.number),
                height,
                network
            );
            return self.fallback(source).await;
        }

        let classified = classify(&samples);
        let contract_reference = !classified.contract_calls.is_empty();
        let reference = classified.reference();

        let selection = self.strategy.select(&reference).ok_or_else(|| GasError::MalformedData {
            network: network.to_string(),
            stage: Stage::Block(height),
            detail: "reference price sequence is empty".to_string(),
        })?;

        tracing::debug!(
            "{}: {} samples ({} transfers, {} contract calls), {} (ratio {:.3}), tiers {}/{}/{}",
            network,
            samples.len(),
            classified.simple_transfers.len(),
            classified.contract_calls.len(),
            selection.congestion.label(),
            selection.ratio,
            selection.estimate.safe_low,
            selection.estimate.standard,
            selection.estimate.fast
        );

        Ok(EstimateOutcome {
            estimate: selection.estimate,
            basis: EstimateBasis::Sampled {
                congestion: selection.congestion,
                ratio: selection.ratio,
                sample_count: samples.len(),
                contract_reference,
            },
        })
    }

    /// Fetch blocks `height` down to `height - window + 1` concurrently, newest first.
    /// The first failure aborts the pass and drops the remaining requests.
    async fn fetch_window(
        &self,
        source: &dyn ChainDataSource,
        height: u64,
    ) -> Result<Vec<Block>, GasError> {
        let network = source.network();
        let numbers: Vec<u64> = (0..self.window_size)
            .map_while(|age| height.checked_sub(age))
            .collect();

        let fetches = numbers.iter().map(|&number| async move {
            match source.block_with_transactions(number).await {
                Ok(Some(block)) if block.number == number => Ok(block),
                Ok(Some(block)) => Err(GasError::MalformedData {
                    network: network.to_string(),
                    stage: Stage::Block(number),
                    detail: format!("requested block {} but received {}", number, block.number),
                }),
                Ok(None) => Err(GasError::MalformedData {
                    network: network.to_string(),
                    stage: Stage::Block(number),
                    detail: format!("block {} not found", number),
                }),
                Err(e) => Err(GasError::from_rpc(network, Stage::Block(number), e)),
            }
        });

        try_join_all(fetches).await
    }

    async fn fallback(&self, source: &dyn ChainDataSource) -> Result<EstimateOutcome, GasError> {
        let base_fee = source
            .base_fee()
            .await
            .map_err(|e| GasError::from_rpc(source.network(), Stage::BaseFee, e))?;

        Ok(EstimateOutcome {
            estimate: fallback_estimate(base_fee),
            basis: EstimateBasis::Fallback { base_fee },
        })
    }
}
