use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::rpc::RpcError;

/// One priced transaction pulled from the sampled window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSample {
    /// Fee per gas unit, always > 0
    pub price: u128,
    /// Offset from the newest block of the window (0 = newest)
    pub block_age: u64,
    pub is_contract_call: bool,
    pub block_timestamp: u64,
}

/// Sample prices split by transaction kind, each list ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedSamples {
    pub simple_transfers: Vec<u128>,
    pub contract_calls: Vec<u128>,
}

impl ClassifiedSamples {
    pub fn len(&self) -> usize {
        self.simple_transfers.len() + self.contract_calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Contract calls when there are any, however few; otherwise every sample
    pub fn reference(&self) -> Vec<u128> {
        if !self.contract_calls.is_empty() {
            return self.contract_calls.clone();
        }
        self.simple_transfers.clone()
    }
}

/// Three-tier price estimate, all values in the smallest fee unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimate {
    pub safe_low: u128,
    pub standard: u128,
    pub fast: u128,
}

/// Fee pressure inside the reference sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

impl CongestionLevel {
    pub fn label(&self) -> &'static str {
        match self {
            CongestionLevel::Low => "low congestion",
            CongestionLevel::Medium => "medium congestion",
            CongestionLevel::High => "high congestion",
        }
    }
}

/// How an estimate was produced
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateBasis {
    Sampled {
        congestion: CongestionLevel,
        /// (max - min) / min over the reference sequence
        ratio: f64,
        sample_count: usize,
        /// Whether contract calls formed the reference sequence
        contract_reference: bool,
    },
    Fallback {
        base_fee: u128,
    },
}

impl EstimateBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateBasis::Sampled { .. } => "sampled",
            EstimateBasis::Fallback { .. } => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimateOutcome {
    pub estimate: PriceEstimate,
    pub basis: EstimateBasis,
}

/// Where in the pass an error happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Height,
    Block(u64),
    BaseFee,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Height => write!(f, "chain height lookup"),
            Stage::Block(number) => write!(f, "fetch of block {}", number),
            Stage::BaseFee => write!(f, "base fee lookup"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GasError {
    #[error("Network not supported: {0}")]
    UnknownNetwork(String),
    #[error("Chain data source for {network} unavailable during {stage}: {source}")]
    SourceUnavailable {
        network: String,
        stage: Stage,
        #[source]
        source: RpcError,
    },
    #[error("Malformed chain data from {network} during {stage}: {detail}")]
    MalformedData {
        network: String,
        stage: Stage,
        detail: String,
    },
}

impl GasError {
    /// Wrap a data source error with the network and stage it came from
    pub fn from_rpc(network: &str, stage: Stage, err: RpcError) -> Self {
        match err {
            RpcError::Parse(detail) => GasError::MalformedData {
                network: network.to_string(),
                stage,
                detail,
            },
            other => GasError::SourceUnavailable {
                network: network.to_string(),
                stage,
                source: other,
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GasError::UnknownNetwork(_) => "unknown_network",
            GasError::SourceUnavailable { .. } => "source_unavailable",
            GasError::MalformedData { .. } => "malformed_data",
        }
    }
}
