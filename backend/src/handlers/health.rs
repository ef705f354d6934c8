//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::external::ModelStatus;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub models: ModelHealth,
}

#[derive(Serialize)]
pub struct ModelHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let models = match &state.models {
        ModelStatus::Ready(store) => ModelHealth {
            status: "ready".to_string(),
            stages: store.stages().to_vec(),
            fingerprint: store.fingerprint().map(str::to_string),
            reason: None,
        },
        ModelStatus::Unavailable { reason } => ModelHealth {
            status: "unavailable".to_string(),
            stages: Vec::new(),
            fingerprint: None,
            reason: Some(reason.clone()),
        },
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        models,
    })
}
