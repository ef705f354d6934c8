//! HTTP request handlers

pub mod crop_info;
pub mod health;
pub mod prediction;

pub use crop_info::*;
pub use health::*;
pub use prediction::*;
