pub mod schema;

mod constraints;
mod cost;
mod dims;
mod model;
mod ocp;
mod options;

pub use constraints::Constraints;
pub use cost::Cost;
pub use dims::Dims;
pub use model::ModelSpec;
pub use ocp::{ConsistencyError, Ocp};
pub use options::{CostDiscretization, IntegratorKind, SolverOptions};
