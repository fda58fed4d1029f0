use serde_json::Value;

use super::{Error, MultiphaseOcp};

impl MultiphaseOcp {
    /// Renders the full problem description as a plain nested mapping.
    ///
    /// The output mirrors the problem's fields: name, stage counts,
    /// per-phase model/cost/constraints/dims mappings, the shared solver
    /// options, parameter-value lists, and the derived index arrays once
    /// [`MultiphaseOcp::make_consistent`] has run. The normalized-phase
    /// working list is solver input, not part of the description, and is
    /// never included. Takes `&self` and mutates nothing, so repeated calls
    /// yield identical output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Export`] if serialization fails.
    pub fn to_value(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(Error::Export)
    }
}
