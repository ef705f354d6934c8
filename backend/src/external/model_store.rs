//! Model Store
//!
//! Loads the pre-trained per-stage regressors from a model directory:
//!
//! ```text
//! <dir>/feature_columns.json          ordered column names
//! <dir>/stages.json                   ordered stage names
//! <dir>/<stage_slug>_duration.json    {"intercept": .., "coefficients": {..}}
//! <dir>/<stage_slug>_irrigation.json  same shape
//! ```
//!
//! Loading failures never escape past [`ModelStatus`]: the server starts with
//! the models marked unavailable and prediction requests are rejected.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use shared::{FeatureError, FeatureSchema, FeatureVector};
use thiserror::Error;

use crate::error::{AppError, AppResult};

pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";
pub const STAGES_FILE: &str = "stages.json";

/// A trained model mapping one feature row to one value
pub trait Regressor: Send + Sync + fmt::Debug {
    fn predict(&self, features: &FeatureVector) -> f64;
}

#[derive(Error, Debug)]
pub enum ModelStoreError {
    #[error("Model directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Model file not found: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid feature columns: {0}")]
    Schema(#[from] FeatureError),

    #[error("Model {path} references unknown feature column '{column}'")]
    UnknownColumn { path: PathBuf, column: String },

    #[error("No growth stages defined")]
    NoStages,

    #[error("Duplicate growth stage '{0}'")]
    DuplicateStage(String),

    #[error("No {kind} model for stage '{stage}'")]
    MissingModel { stage: String, kind: ModelKind },
}

/// The two predictors trained for every stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Duration,
    Irrigation,
}

impl ModelKind {
    fn file_suffix(&self) -> &'static str {
        match self {
            ModelKind::Duration => "duration",
            ModelKind::Irrigation => "irrigation",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

/// Serialized linear model
#[derive(Debug, Deserialize)]
struct LinearModelFile {
    intercept: f64,
    #[serde(default)]
    coefficients: HashMap<String, f64>,
}

/// Linear regressor bound to a feature schema
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    intercept: f64,
    weights: Vec<f64>,
}

impl LinearRegressor {
    /// Bind named coefficients to the schema's column order.
    ///
    /// Columns without a coefficient get weight 0. Fails on the first
    /// coefficient naming a column the schema does not know.
    pub fn bind(
        schema: &FeatureSchema,
        intercept: f64,
        coefficients: &HashMap<String, f64>,
    ) -> Result<Self, FeatureError> {
        let mut weights = vec![0.0; schema.len()];
        for (column, weight) in coefficients {
            let idx = schema
                .position(column)
                .ok_or_else(|| FeatureError::UnknownColumn(column.clone()))?;
            weights[idx] = *weight;
        }
        Ok(Self { intercept, weights })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        debug_assert_eq!(features.len(), self.weights.len());
        self.intercept
            + self
                .weights
                .iter()
                .zip(features.values())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

/// File-name form of a stage: lowercase, spaces and hyphens as underscores
pub fn stage_slug(stage: &str) -> String {
    stage
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Loaded, read-only prediction models
#[derive(Debug)]
pub struct ModelStore {
    schema: FeatureSchema,
    stages: Vec<String>,
    duration_models: HashMap<String, Arc<dyn Regressor>>,
    irrigation_models: HashMap<String, Arc<dyn Regressor>>,
    fingerprint: Option<String>,
}

impl ModelStore {
    /// Load every model from a model directory
    pub fn load(dir: &Path) -> Result<Self, ModelStoreError> {
        if !dir.is_dir() {
            return Err(ModelStoreError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut hasher = Sha256::new();

        let (column_names, bytes) = read_json::<Vec<String>>(&dir.join(FEATURE_COLUMNS_FILE))?;
        hasher.update(&bytes);
        let schema = FeatureSchema::new(&column_names)?;

        let (stages, bytes) = read_json::<Vec<String>>(&dir.join(STAGES_FILE))?;
        hasher.update(&bytes);

        let mut duration_models: HashMap<String, Arc<dyn Regressor>> = HashMap::new();
        let mut irrigation_models: HashMap<String, Arc<dyn Regressor>> = HashMap::new();

        for stage in &stages {
            for kind in [ModelKind::Duration, ModelKind::Irrigation] {
                let path = dir.join(format!("{}_{}.json", stage_slug(stage), kind.file_suffix()));
                let (model, bytes) = read_json::<LinearModelFile>(&path)?;
                hasher.update(&bytes);

                let regressor = LinearRegressor::bind(&schema, model.intercept, &model.coefficients)
                    .map_err(|err| match err {
                        FeatureError::UnknownColumn(column) => ModelStoreError::UnknownColumn {
                            path: path.clone(),
                            column,
                        },
                        other => ModelStoreError::Schema(other),
                    })?;

                let models = match kind {
                    ModelKind::Duration => &mut duration_models,
                    ModelKind::Irrigation => &mut irrigation_models,
                };
                models.insert(stage.clone(), Arc::new(regressor));
            }
        }

        let mut store = Self::from_parts(schema, stages, duration_models, irrigation_models)?;
        store.fingerprint = Some(format!("{:x}", hasher.finalize()));
        Ok(store)
    }

    /// Assemble a store from already constructed models
    pub fn from_parts(
        schema: FeatureSchema,
        stages: Vec<String>,
        duration_models: HashMap<String, Arc<dyn Regressor>>,
        irrigation_models: HashMap<String, Arc<dyn Regressor>>,
    ) -> Result<Self, ModelStoreError> {
        if stages.is_empty() {
            return Err(ModelStoreError::NoStages);
        }

        let mut seen = HashSet::new();
        for stage in &stages {
            if !seen.insert(stage.as_str()) {
                return Err(ModelStoreError::DuplicateStage(stage.clone()));
            }
            if !duration_models.contains_key(stage) {
                return Err(ModelStoreError::MissingModel {
                    stage: stage.clone(),
                    kind: ModelKind::Duration,
                });
            }
            if !irrigation_models.contains_key(stage) {
                return Err(ModelStoreError::MissingModel {
                    stage: stage.clone(),
                    kind: ModelKind::Irrigation,
                });
            }
        }

        Ok(Self {
            schema,
            stages,
            duration_models,
            irrigation_models,
            fingerprint: None,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Stage names in growth order
    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    pub fn duration_model(&self, stage: &str) -> Option<&dyn Regressor> {
        self.duration_models.get(stage).map(|m| m.as_ref())
    }

    pub fn irrigation_model(&self, stage: &str) -> Option<&dyn Regressor> {
        self.irrigation_models.get(stage).map(|m| m.as_ref())
    }

    /// SHA-256 over the loaded files, `None` for in-memory stores
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Crop identifiers the models were trained on
    pub fn crop_ids(&self) -> Vec<String> {
        self.schema.crop_ids()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<(T, Vec<u8>), ModelStoreError> {
    if !path.is_file() {
        return Err(ModelStoreError::MissingFile(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| ModelStoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_slice(&bytes).map_err(|source| ModelStoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((value, bytes))
}

/// Availability of the prediction models, fixed at startup
#[derive(Debug, Clone)]
pub enum ModelStatus {
    Ready(Arc<ModelStore>),
    Unavailable { reason: String },
}

impl ModelStatus {
    /// Load the store, recording a failure instead of returning it
    pub fn load(dir: &Path) -> Self {
        match ModelStore::load(dir) {
            Ok(store) => {
                tracing::info!(
                    directory = %dir.display(),
                    stages = ?store.stages(),
                    crops = store.crop_ids().len(),
                    fingerprint = store.fingerprint().unwrap_or_default(),
                    "Prediction models loaded"
                );
                ModelStatus::Ready(Arc::new(store))
            }
            Err(e) => {
                tracing::error!(directory = %dir.display(), "Prediction models unavailable: {}", e);
                ModelStatus::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelStatus::Ready(_))
    }

    /// The loaded store, or a models-unavailable error
    pub fn require(&self) -> AppResult<&ModelStore> {
        match self {
            ModelStatus::Ready(store) => Ok(store.as_ref()),
            ModelStatus::Unavailable { reason } => Err(AppError::ModelsUnavailable(reason.clone())),
        }
    }
}

impl From<ModelStore> for ModelStatus {
    fn from(store: ModelStore) -> Self {
        ModelStatus::Ready(Arc::new(store))
    }
}
