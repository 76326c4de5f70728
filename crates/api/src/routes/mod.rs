//! HTTP Routes

pub mod health;
pub mod toilets;

use axum::Json;
use serde_json::{json, Value};

/// Root welcome handler
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the PeePal API" }))
}
