//! `/counters/{name}` handlers.
//!
//! | method | op        | success              |
//! |--------|-----------|----------------------|
//! | POST   | create    | 201 `{"<name>": 0}`  |
//! | PUT    | increment | 200 `{"<name>": n}`  |
//! | GET    | read      | 200 `{"count": "n"}` |
//! | DELETE | delete    | 204                  |
//!
//! Create/increment/read on the wrong side of existence answer 409.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use tally_core::error::{Result, TallyError};
use tally_core::{CountReading, Counter};

use crate::api::ApiError;
use crate::app_state::AppState;
use crate::obs::Outcome;

fn finish<T>(state: &AppState, op: &'static str, started: Instant, res: Result<T>) -> Result<T> {
    state.record(op, &res, started.elapsed());
    if let Err(TallyError::NameConflict { name, kind }) = &res {
        tracing::debug!(op, counter = %name, reason = %kind, "name conflict");
    }
    res
}

pub async fn create(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> std::result::Result<(StatusCode, Json<Counter>), ApiError> {
    let started = Instant::now();
    let counter = finish(&state, "create", started, state.registry().create(&name))?;
    tracing::info!(counter = %name, "counter created");
    Ok((StatusCode::CREATED, Json(counter)))
}

pub async fn increment(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> std::result::Result<Json<Counter>, ApiError> {
    let started = Instant::now();
    let counter = finish(&state, "increment", started, state.registry().increment(&name))?;
    Ok(Json(counter))
}

pub async fn read(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> std::result::Result<Json<CountReading>, ApiError> {
    let started = Instant::now();
    let count = finish(&state, "read", started, state.registry().read(&name))?;
    Ok(Json(CountReading::from(count)))
}

pub async fn delete(State(state): State<AppState>, Path(name): Path<String>) -> StatusCode {
    let started = Instant::now();
    let removed = state.registry().delete(&name);
    state.metrics().observe("delete", Outcome::Ok, started.elapsed());
    if removed {
        tracing::info!(counter = %name, "counter deleted");
    } else {
        tracing::debug!(counter = %name, "delete of unknown counter ignored");
    }
    StatusCode::NO_CONTENT
}
