//! Toilet Routes

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use metrics::counter;
use serde_json::Value;
use std::sync::Arc;
use toilet_schema::{StoredToilet, ToiletCreate};

use crate::error::ApiError;
use crate::AppState;

/// Create a toilet from a JSON body
pub async fn create_toilet(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredToilet>), ApiError> {
    let result = create(&state, payload).await;

    match &result {
        Ok(_) => counter!("toilets_created_total").increment(1),
        Err(e) => counter!("toilet_create_failures_total", "reason" => e.reason()).increment(1),
    }

    result
}

async fn create(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredToilet>), ApiError> {
    let Json(payload) = payload?;
    let toilet = ToiletCreate::from_value(&payload)?;
    let stored = state.controller.create_toilet(toilet).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Get a single toilet by id
pub async fn get_toilet(
    State(state): State<Arc<AppState>>,
    Path(toilet_id): Path<i64>,
) -> Result<Json<StoredToilet>, ApiError> {
    Ok(Json(state.store.require(toilet_id).await?))
}
