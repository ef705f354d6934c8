//! Request payloads accepted by the planning API

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /crop-info`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CropInfoRequest {
    #[validate(required, length(min = 1))]
    pub crop_type: Option<String>,
    #[validate(required, length(min = 1))]
    pub planting_date: Option<String>,
}

/// Body of `POST /predict-crop-cycle`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PredictCropCycleRequest {
    #[validate(required, length(min = 1))]
    pub crop_type: Option<String>,
    /// Sowing date, `YYYY-MM-DD`
    #[validate(required, length(min = 1))]
    pub sowing_date: Option<String>,
}
