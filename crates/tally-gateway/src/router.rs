//! Axum router wiring.
//!
//! - `/counters/:name` : counter resource (POST/PUT/GET/DELETE, else 405)
//! - `/healthz`, `/readyz`, `/metrics` : operational endpoints
//! - anything else : 404

use axum::{routing::get, Router};

use crate::{api::counters, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/counters/:name",
            get(counters::read)
                .post(counters::create)
                .put(counters::increment)
                .delete(counters::delete),
        )
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .fallback(ops::not_found)
        .with_state(state)
}
