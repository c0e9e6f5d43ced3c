use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

use super::schema::{GasErrorResponse, GasPriceResponse};
use crate::services::gas::GasError;
use crate::AppState;

type GasResult<T> = Result<Json<T>, (StatusCode, Json<GasErrorResponse>)>;

// =============================================================================
// GET /gas/{network} - Current three-tier gas price estimate
// =============================================================================

pub async fn get_gas_price(
    State(state): State<Arc<AppState>>,
    Path(network): Path<String>,
) -> GasResult<GasPriceResponse> {
    let network = network.to_lowercase();

    let source = state.source(&network).map_err(|e| {
        // Unknown names share one metrics label
        state.metrics.record_gas_error("unknown", &e);
        error_response(&network, &e)
    })?;

    let started = Instant::now();
    let pass = state.estimator.estimate_detailed(source.as_ref());

    // Dropping the pass on timeout cancels its in-flight block fetches
    let outcome = match tokio::time::timeout(state.request_timeout, pass).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            tracing::warn!("Gas estimation failed for {}: {}", network, e);
            state.metrics.record_gas_error(&network, &e);
            return Err(error_response(&network, &e));
        }
        Err(_) => {
            tracing::warn!(
                "Gas estimation for {} timed out after {:?}",
                network,
                state.request_timeout
            );
            state.metrics.record_error(&network, "timeout");
            return Err((
                StatusCode::GATEWAY_TIMEOUT,
                Json(GasErrorResponse::for_network(
                    format!("Estimation timed out after {}s", state.request_timeout.as_secs_f64()),
                    &network,
                )),
            ));
        }
    };

    state
        .metrics
        .record_outcome(&network, &outcome, started.elapsed().as_secs_f64());

    Ok(Json(GasPriceResponse::captured(outcome.estimate, Utc::now())))
}

fn error_response(network: &str, err: &GasError) -> (StatusCode, Json<GasErrorResponse>) {
    let status = match err {
        GasError::UnknownNetwork(_) => StatusCode::NOT_FOUND,
        GasError::SourceUnavailable { .. } | GasError::MalformedData { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(GasErrorResponse::for_network(err.to_string(), network)))
}
