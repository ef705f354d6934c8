//! Business logic services for the crop cycle planning API

pub mod crop_info;
pub mod export;
pub mod prediction;

pub use crop_info::CropInfoService;
pub use export::ExportService;
pub use prediction::PredictionService;
