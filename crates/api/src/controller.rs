//! Toilet Controller
//!
//! Adapts the service to the request/response boundary.

use axum::http::StatusCode;
use std::sync::Arc;
use storage::StorageError;
use thiserror::Error;
use toilet_schema::{StoredToilet, ToiletCreate};

use crate::service::ToiletWriter;

/// Message returned when creation yields no entity
pub const CREATE_REJECTED_MESSAGE: &str = "Toilet cannot be created";

/// Controller failures
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The request was processed but produced nothing
    #[error("{message}")]
    RequestRejected { status: StatusCode, message: String },

    /// Store failure, passed through unchanged
    #[error(transparent)]
    Persistence(#[from] StorageError),
}

#[derive(Clone)]
pub struct ToiletController {
    service: Arc<dyn ToiletWriter>,
}

impl ToiletController {
    pub fn new(service: Arc<dyn ToiletWriter>) -> Self {
        Self { service }
    }

    /// Create a toilet, rejecting the request if the service returns nothing
    pub async fn create_toilet(&self, toilet: ToiletCreate) -> Result<StoredToilet, ControllerError> {
        self.service
            .create(&toilet)
            .await?
            .ok_or_else(|| ControllerError::RequestRejected {
                status: StatusCode::BAD_REQUEST,
                message: CREATE_REJECTED_MESSAGE.to_string(),
            })
    }
}
