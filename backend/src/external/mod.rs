//! External collaborators: trained models and environment inputs

pub mod environment;
pub mod model_store;

pub use environment::{EnvironmentSource, FixedEnvironment, SyntheticEnvironment};
pub use model_store::{LinearRegressor, ModelStatus, ModelStore, ModelStoreError, Regressor};
