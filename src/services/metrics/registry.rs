use prometheus::{CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::services::gas::{EstimateOutcome, EstimateBasis, GasError};

/// Prometheus metrics for gas estimation passes
pub struct MetricsRegistry {
    registry: Registry,

    // HTTP Metrics
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,

    // Estimation Metrics
    pub estimations_total: CounterVec,
    pub estimation_errors_total: CounterVec,
    pub estimation_duration_seconds: HistogramVec,
    pub congestion_ratio: GaugeVec,
    pub price_tier_wei: GaugeVec,
}

impl MetricsRegistry {
    pub fn new() -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        // HTTP Metrics
        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests").namespace("gas_tracker"),
            &["method", "endpoint", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request duration")
                .namespace("gas_tracker")
                .buckets(vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["method", "endpoint"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        // Estimation Metrics
        let estimations_total = CounterVec::new(
            Opts::new("estimations_total", "Completed gas estimation passes")
                .namespace("gas_tracker"),
            &["network", "basis"],
        )?;
        registry.register(Box::new(estimations_total.clone()))?;

        let estimation_errors_total = CounterVec::new(
            Opts::new("estimation_errors_total", "Failed gas estimation passes")
                .namespace("gas_tracker"),
            &["network", "kind"],
        )?;
        registry.register(Box::new(estimation_errors_total.clone()))?;

        let estimation_duration_seconds = HistogramVec::new(
            HistogramOpts::new("estimation_duration_seconds", "Gas estimation pass duration")
                .namespace("gas_tracker")
                .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
            &["network"],
        )?;
        registry.register(Box::new(estimation_duration_seconds.clone()))?;

        let congestion_ratio = GaugeVec::new(
            Opts::new("congestion_ratio", "(max - min) / min of the last reference sequence")
                .namespace("gas_tracker"),
            &["network"],
        )?;
        registry.register(Box::new(congestion_ratio.clone()))?;

        let price_tier_wei = GaugeVec::new(
            Opts::new("price_tier_wei", "Last estimated gas price per tier")
                .namespace("gas_tracker"),
            &["network", "tier"],
        )?;
        registry.register(Box::new(price_tier_wei.clone()))?;

        Ok(Arc::new(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            estimations_total,
            estimation_errors_total,
            estimation_duration_seconds,
            congestion_ratio,
            price_tier_wei,
        }))
    }

    pub fn record_outcome(&self, network: &str, outcome: &EstimateOutcome, elapsed_secs: f64) {
        self.estimations_total
            .with_label_values(&[network, outcome.basis.as_str()])
            .inc();
        self.estimation_duration_seconds
            .with_label_values(&[network])
            .observe(elapsed_secs);

        if let EstimateBasis::Sampled { ratio, .. } = outcome.basis {
            self.congestion_ratio.with_label_values(&[network]).set(ratio);
        }

        let tiers = [
            ("safe_low", outcome.estimate.safe_low),
            ("standard", outcome.estimate.standard),
            ("fast", outcome.estimate.fast),
        ];
        for (tier, price) in tiers {
            // Gauges are f64
            self.price_tier_wei
                .with_label_values(&[network, tier])
                .set(price as f64);
        }
    }

    pub fn record_error(&self, network: &str, kind: &str) {
        self.estimation_errors_total
            .with_label_values(&[network, kind])
            .inc();
    }

    pub fn record_gas_error(&self, network: &str, err: &GasError) {
        self.record_error(network, err.kind());
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, Box<dyn std::error::Error>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
