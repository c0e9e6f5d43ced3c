pub mod gas;
pub mod metrics;
pub mod rpc;
