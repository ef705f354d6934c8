//! Crop Cycle Planning API - Backend
//!
//! Serves reference agronomic plans and model-backed crop cycle predictions
//! (growth stage timeline and weekly irrigation schedule).

use std::sync::Arc;

use axum::Router;
use shared::CropInfo;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{EnvironmentSource, ModelStatus, SyntheticEnvironment};
use services::CropInfoService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub models: ModelStatus,
    pub environment: Arc<dyn EnvironmentSource>,
    pub crop_info: Arc<CropInfo>,
}

impl AppState {
    /// State with the synthetic environment generator
    pub fn new(config: Config, models: ModelStatus) -> Self {
        Self {
            config: Arc::new(config),
            models,
            environment: Arc::new(SyntheticEnvironment::new()),
            crop_info: Arc::new(CropInfoService::demo()),
        }
    }

    /// Replace the source of weather and soil inputs
    pub fn with_environment(mut self, environment: Arc<dyn EnvironmentSource>) -> Self {
        self.environment = environment;
        self
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
