use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::schema::{FieldDef, FieldSchema, Role};

/// Box constraints for one phase, grouped by role.
///
/// Each bound group is a `(lb, ub, idx)` triple where `idx` selects which
/// components of the state or control vector the bounds apply to. The `idx`
/// selectors and the `x0` initial-state override are deliberately absent
/// from the field table: `x0` is translated into the initial bound group
/// during normalization, and selectors are structure, not values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// Initial state override; expands to `lbx_0 == ubx_0 == x0` over all
    /// state components.
    pub x0: Option<Array1<f64>>,
    pub lbx_0: Array1<f64>,
    pub ubx_0: Array1<f64>,
    pub idxbx_0: Vec<usize>,
    pub lbx: Array1<f64>,
    pub ubx: Array1<f64>,
    pub idxbx: Vec<usize>,
    pub lbu: Array1<f64>,
    pub ubu: Array1<f64>,
    pub idxbu: Vec<usize>,
    pub lbx_e: Array1<f64>,
    pub ubx_e: Array1<f64>,
    pub idxbx_e: Vec<usize>,
}

impl FieldSchema for Constraints {
    fn field_table() -> &'static [FieldDef<Self>] {
        const TABLE: &[FieldDef<Constraints>] = &[
            FieldDef {
                name: "lbx_0",
                role: Role::InitialOnly,
                differs: |a, b| a.lbx_0 != b.lbx_0,
            },
            FieldDef {
                name: "ubx_0",
                role: Role::InitialOnly,
                differs: |a, b| a.ubx_0 != b.ubx_0,
            },
            FieldDef {
                name: "lbx",
                role: Role::Path,
                differs: |a, b| a.lbx != b.lbx,
            },
            FieldDef {
                name: "ubx",
                role: Role::Path,
                differs: |a, b| a.ubx != b.ubx,
            },
            FieldDef {
                name: "lbu",
                role: Role::Path,
                differs: |a, b| a.lbu != b.lbu,
            },
            FieldDef {
                name: "ubu",
                role: Role::Path,
                differs: |a, b| a.ubu != b.ubu,
            },
            FieldDef {
                name: "lbx_e",
                role: Role::TerminalOnly,
                differs: |a, b| a.lbx_e != b.lbx_e,
            },
            FieldDef {
                name: "ubx_e",
                role: Role::TerminalOnly,
                differs: |a, b| a.ubx_e != b.ubx_e,
            },
        ];
        TABLE
    }
}
