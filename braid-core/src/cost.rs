use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::schema::{FieldDef, FieldSchema, Role};

/// Linear least-squares cost blocks for one phase.
///
/// The `_0` block applies only at global stage 0, the unsuffixed block at
/// every path stage of the owning phase, and the `_e` block only at the
/// final global stage. A block with no weight matrix contributes nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cost {
    pub w_0: Option<Array2<f64>>,
    pub y_ref_0: Array1<f64>,
    pub w: Option<Array2<f64>>,
    pub y_ref: Array1<f64>,
    pub w_e: Option<Array2<f64>>,
    pub y_ref_e: Array1<f64>,
}

impl FieldSchema for Cost {
    fn field_table() -> &'static [FieldDef<Self>] {
        const TABLE: &[FieldDef<Cost>] = &[
            FieldDef {
                name: "w_0",
                role: Role::InitialOnly,
                differs: |a, b| a.w_0 != b.w_0,
            },
            FieldDef {
                name: "y_ref_0",
                role: Role::InitialOnly,
                differs: |a, b| a.y_ref_0 != b.y_ref_0,
            },
            FieldDef {
                name: "w",
                role: Role::Path,
                differs: |a, b| a.w != b.w,
            },
            FieldDef {
                name: "y_ref",
                role: Role::Path,
                differs: |a, b| a.y_ref != b.y_ref,
            },
            FieldDef {
                name: "w_e",
                role: Role::TerminalOnly,
                differs: |a, b| a.w_e != b.w_e,
            },
            FieldDef {
                name: "y_ref_e",
                role: Role::TerminalOnly,
                differs: |a, b| a.y_ref_e != b.y_ref_e,
            },
        ];
        TABLE
    }
}
