//! Shared types and planning logic for the crop cycle planning API
//!
//! This crate contains the domain models, the feature row builder and the
//! timeline/irrigation scheduler, shared between the backend and the
//! browser client (via WASM).

pub mod features;
pub mod models;
pub mod schedule;
pub mod validation;

pub use features::*;
pub use models::*;
pub use schedule::*;
pub use validation::*;
