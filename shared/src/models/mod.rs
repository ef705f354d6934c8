//! Domain models for the crop cycle planning API

mod agronomy;
mod environment;
mod request;
mod schedule;

pub use agronomy::*;
pub use environment::*;
pub use request::*;
pub use schedule::*;
