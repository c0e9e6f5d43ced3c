use axum::{routing::get, Router};
use std::sync::Arc;

use super::controller;
use crate::AppState;

pub fn gas_routes() -> Router<Arc<AppState>> {
    Router::new().route("/{network}", get(controller::get_gas_price))
}
