use serde::{Deserialize, Serialize};

/// Problem dimensions for one phase.
///
/// Unset dimensions are inferred during normalization from the model's
/// variable lists and the parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dims {
    /// State dimension.
    pub nx: Option<usize>,
    /// Control dimension.
    pub nu: Option<usize>,
    /// Parameter dimension.
    pub np: Option<usize>,
    /// Number of shooting intervals in the horizon.
    pub n_stages: Option<usize>,
}
