use serde::{Deserialize, Serialize};

use crate::schema::{FieldDef, FieldSchema, Role};

/// Symbolic description of one phase's dynamics and cost expressions.
///
/// Expressions are opaque strings handed through to the solver generator;
/// this crate only cares about their presence and the dimensions implied by
/// the state and control name lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model identifier, made globally unique during multi-phase composition.
    pub name: String,
    pub state_names: Vec<String>,
    pub control_names: Vec<String>,
    pub dynamics_expr: Option<String>,
    /// Cost expression applied only at global stage 0.
    pub initial_cost_expr: Option<String>,
    pub path_cost_expr: Option<String>,
    /// Cost expression applied only at the final global stage.
    pub terminal_cost_expr: Option<String>,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            name: "model".to_string(),
            state_names: Vec::new(),
            control_names: Vec::new(),
            dynamics_expr: None,
            initial_cost_expr: None,
            path_cost_expr: None,
            terminal_cost_expr: None,
        }
    }
}

impl FieldSchema for ModelSpec {
    fn field_table() -> &'static [FieldDef<Self>] {
        const TABLE: &[FieldDef<ModelSpec>] = &[
            FieldDef {
                name: "name",
                role: Role::Path,
                differs: |a, b| a.name != b.name,
            },
            FieldDef {
                name: "state_names",
                role: Role::Path,
                differs: |a, b| a.state_names != b.state_names,
            },
            FieldDef {
                name: "control_names",
                role: Role::Path,
                differs: |a, b| a.control_names != b.control_names,
            },
            FieldDef {
                name: "dynamics_expr",
                role: Role::Path,
                differs: |a, b| a.dynamics_expr != b.dynamics_expr,
            },
            FieldDef {
                name: "initial_cost_expr",
                role: Role::InitialOnly,
                differs: |a, b| a.initial_cost_expr != b.initial_cost_expr,
            },
            FieldDef {
                name: "path_cost_expr",
                role: Role::Path,
                differs: |a, b| a.path_cost_expr != b.path_cost_expr,
            },
            FieldDef {
                name: "terminal_cost_expr",
                role: Role::TerminalOnly,
                differs: |a, b| a.terminal_cost_expr != b.terminal_cost_expr,
            },
        ];
        TABLE
    }
}
