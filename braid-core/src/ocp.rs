use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Constraints, Cost, Dims, ModelSpec, SolverOptions};

/// A single-phase optimal control problem description.
///
/// Populate the fields, then call [`Ocp::make_consistent`] to resolve
/// dimensions and validate shapes before handing the problem to a solver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ocp {
    pub model: ModelSpec,
    pub cost: Cost,
    pub constraints: Constraints,
    pub dims: Dims,
    pub solver_options: SolverOptions,
    pub parameter_values: Array1<f64>,
}

/// Errors raised when a single phase's own data is internally malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyError {
    #[error("dimension `{dim}` is set to {set} but the problem data implies {inferred}")]
    DimensionConflict {
        dim: &'static str,
        set: usize,
        inferred: usize,
    },

    #[error("`n_stages` must be set before the problem can be made consistent")]
    MissingStageCount,

    #[error("state dimension is unknown: the model names no states and `nx` is unset")]
    UnknownStateDimension,

    #[error("`x0` has length {got}, expected nx = {expected}")]
    InitialStateLength { got: usize, expected: usize },

    #[error("`x0` conflicts with an explicit initial bound group")]
    InitialStateOverlap,

    #[error("bound group `{group}` has mismatched lengths: lb = {lb}, ub = {ub}, idx = {idx}")]
    BoundLengths {
        group: &'static str,
        lb: usize,
        ub: usize,
        idx: usize,
    },

    #[error("bound group `{group}` selects component {index}, but the dimension is {dim}")]
    BoundIndexRange {
        group: &'static str,
        index: usize,
        dim: usize,
    },

    #[error("bound group `{group}` has lb > ub at position {position}")]
    BoundOrder { group: &'static str, position: usize },

    #[error("cost block `{block}` has a non-square weight matrix: {rows}x{cols}")]
    NonSquareWeight {
        block: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("cost block `{block}` has a reference of length {got}, expected {expected}")]
    ReferenceLength {
        block: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("invalid solver options: {reason}")]
    InvalidOptions { reason: &'static str },
}

impl Ocp {
    /// Resolves implicit dimensions and validates the problem's shapes.
    ///
    /// Infers `nx`, `nu`, and `np` from the model's variable lists and the
    /// parameter vector, translates an `x0` override into the initial bound
    /// group, and checks every bound group and cost block against the
    /// resolved dimensions. Calling it again on an already-consistent
    /// problem is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsistencyError`] describing the first shape or
    /// dimension problem found.
    pub fn make_consistent(&mut self) -> Result<(), ConsistencyError> {
        self.solver_options
            .validate()
            .map_err(|reason| ConsistencyError::InvalidOptions { reason })?;

        if self.dims.n_stages.is_none() {
            return Err(ConsistencyError::MissingStageCount);
        }

        let nx = match (self.dims.nx, self.model.state_names.len()) {
            (None, 0) => return Err(ConsistencyError::UnknownStateDimension),
            (None, n) => n,
            (Some(set), 0) => set,
            (Some(set), n) if set == n => set,
            (Some(set), n) => {
                return Err(ConsistencyError::DimensionConflict {
                    dim: "nx",
                    set,
                    inferred: n,
                })
            }
        };
        let nu = resolve_dim("nu", self.dims.nu, self.model.control_names.len())?;
        let np = resolve_dim("np", self.dims.np, self.parameter_values.len())?;

        self.translate_initial_state(nx)?;

        let c = &self.constraints;
        check_bounds("bx_0", &c.lbx_0, &c.ubx_0, &c.idxbx_0, nx)?;
        check_bounds("bx", &c.lbx, &c.ubx, &c.idxbx, nx)?;
        check_bounds("bu", &c.lbu, &c.ubu, &c.idxbu, nu)?;
        check_bounds("bx_e", &c.lbx_e, &c.ubx_e, &c.idxbx_e, nx)?;

        check_cost_block("0", self.cost.w_0.as_ref(), &self.cost.y_ref_0)?;
        check_cost_block("path", self.cost.w.as_ref(), &self.cost.y_ref)?;
        check_cost_block("e", self.cost.w_e.as_ref(), &self.cost.y_ref_e)?;

        self.dims.nx = Some(nx);
        self.dims.nu = Some(nu);
        self.dims.np = Some(np);
        Ok(())
    }

    /// Expands `x0` into the initial bound group, fixing every state
    /// component to its initial value.
    fn translate_initial_state(&mut self, nx: usize) -> Result<(), ConsistencyError> {
        let Some(x0) = self.constraints.x0.clone() else {
            return Ok(());
        };
        if x0.len() != nx {
            return Err(ConsistencyError::InitialStateLength {
                got: x0.len(),
                expected: nx,
            });
        }

        let idx: Vec<usize> = (0..nx).collect();
        let c = &mut self.constraints;
        let already_translated = c.lbx_0 == x0 && c.ubx_0 == x0 && c.idxbx_0 == idx;
        let group_empty = c.lbx_0.is_empty() && c.ubx_0.is_empty() && c.idxbx_0.is_empty();

        if already_translated {
            return Ok(());
        }
        if !group_empty {
            return Err(ConsistencyError::InitialStateOverlap);
        }

        c.lbx_0 = x0.clone();
        c.ubx_0 = x0;
        c.idxbx_0 = idx;
        Ok(())
    }
}

fn resolve_dim(
    dim: &'static str,
    set: Option<usize>,
    inferred: usize,
) -> Result<usize, ConsistencyError> {
    match set {
        None => Ok(inferred),
        Some(set) if set == inferred || inferred == 0 => Ok(set),
        Some(set) => Err(ConsistencyError::DimensionConflict { dim, set, inferred }),
    }
}

fn check_bounds(
    group: &'static str,
    lb: &Array1<f64>,
    ub: &Array1<f64>,
    idx: &[usize],
    dim: usize,
) -> Result<(), ConsistencyError> {
    if lb.len() != ub.len() || lb.len() != idx.len() {
        return Err(ConsistencyError::BoundLengths {
            group,
            lb: lb.len(),
            ub: ub.len(),
            idx: idx.len(),
        });
    }
    if let Some(&index) = idx.iter().find(|&&i| i >= dim) {
        return Err(ConsistencyError::BoundIndexRange { group, index, dim });
    }
    if let Some(position) = lb.iter().zip(ub.iter()).position(|(l, u)| l > u) {
        return Err(ConsistencyError::BoundOrder { group, position });
    }
    Ok(())
}

fn check_cost_block(
    block: &'static str,
    w: Option<&Array2<f64>>,
    y_ref: &Array1<f64>,
) -> Result<(), ConsistencyError> {
    match w {
        Some(w) => {
            if w.nrows() != w.ncols() {
                return Err(ConsistencyError::NonSquareWeight {
                    block,
                    rows: w.nrows(),
                    cols: w.ncols(),
                });
            }
            if y_ref.len() != w.nrows() {
                return Err(ConsistencyError::ReferenceLength {
                    block,
                    got: y_ref.len(),
                    expected: w.nrows(),
                });
            }
        }
        None => {
            if !y_ref.is_empty() {
                return Err(ConsistencyError::ReferenceLength {
                    block,
                    got: y_ref.len(),
                    expected: 0,
                });
            }
        }
    }
    Ok(())
}
