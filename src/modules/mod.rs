pub mod gas;
pub mod metrics;
