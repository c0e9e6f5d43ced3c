use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::gas::PriceEstimate;

/// Tiers as decimal strings in the smallest fee unit, stamped with the capture time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceResponse {
    pub safe_low: String,
    pub standard: String,
    pub fast: String,
    pub timestamp: DateTime<Utc>,
}

impl GasPriceResponse {
    pub fn captured(estimate: PriceEstimate, timestamp: DateTime<Utc>) -> Self {
        Self {
            safe_low: estimate.safe_low.to_string(),
            standard: estimate.standard.to_string(),
            fast: estimate.fast.to_string(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

impl GasErrorResponse {
    pub fn for_network(error: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            network: Some(network.into()),
        }
    }
}
