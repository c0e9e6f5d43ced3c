pub mod estimator;
pub mod sampling;
pub mod strategy;
pub mod types;

pub use estimator::{GasEstimator, DEFAULT_WINDOW_SIZE};
pub use strategy::{CongestionAwareStrategy, TierStrategy};
pub use types::{CongestionLevel, EstimateBasis, EstimateOutcome, GasError, PriceEstimate, Stage};
