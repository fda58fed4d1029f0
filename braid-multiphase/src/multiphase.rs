mod error;
mod event;
mod export;
mod indices;

pub use error::Error;
pub use event::{Event, IgnoredFields, RenamedModels, Report};
pub use indices::PhaseIndices;

use std::collections::HashSet;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use braid_core::{
    schema::{Role, RoleFilter},
    Constraints, Cost, Dims, ModelSpec, Ocp, SolverOptions,
};

use crate::{observe::Observer, scan::scan};

/// A multi-stage optimal control problem assembled from independent phases.
///
/// Each phase brings its own model, cost, constraints, and dimensions, and
/// spans a contiguous range of global stage indices. Initial cost and
/// constraints are defined by the first phase, terminal cost and
/// constraints by the last; every other phase contributes only dynamics and
/// path data. All phases share a single [`SolverOptions`] instance and must
/// resolve to the same state dimension.
///
/// Populate the phases, then call [`MultiphaseOcp::make_consistent`] once
/// before handing the problem off to a solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiphaseOcp {
    pub name: String,
    stage_counts: Vec<usize>,
    pub models: Vec<ModelSpec>,
    pub costs: Vec<Cost>,
    pub constraints: Vec<Constraints>,
    pub dims: Vec<Dims>,
    parameter_values: Vec<Array1<f64>>,
    /// Shared by every phase; solver behavior must be uniform across the
    /// composed horizon.
    pub solver_options: SolverOptions,
    indices: Option<PhaseIndices>,
    #[serde(skip)]
    normalized_phases: Vec<Ocp>,
}

impl MultiphaseOcp {
    /// Creates a problem with one slot per phase and the given number of
    /// shooting intervals for each.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStageCounts`] if `stage_counts` is empty.
    pub fn new(stage_counts: Vec<usize>) -> Result<Self, Error> {
        if stage_counts.is_empty() {
            return Err(Error::EmptyStageCounts);
        }
        let n = stage_counts.len();

        Ok(Self {
            name: "multiphase_ocp".to_string(),
            stage_counts,
            models: vec![ModelSpec::default(); n],
            costs: vec![Cost::default(); n],
            constraints: vec![Constraints::default(); n],
            dims: vec![Dims::default(); n],
            parameter_values: vec![Array1::zeros(0); n],
            solver_options: SolverOptions::default(),
            indices: None,
            normalized_phases: Vec::new(),
        })
    }

    /// Number of phases, fixed at construction.
    #[must_use]
    pub fn n_phases(&self) -> usize {
        self.stage_counts.len()
    }

    /// Shooting intervals per phase.
    #[must_use]
    pub fn stage_counts(&self) -> &[usize] {
        &self.stage_counts
    }

    /// Per-phase parameter vectors.
    #[must_use]
    pub fn parameter_values(&self) -> &[Array1<f64>] {
        &self.parameter_values
    }

    /// Replaces every phase's parameter vector at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterPhaseCountMismatch`] if the number of
    /// vectors differs from the number of phases.
    pub fn set_parameter_values(&mut self, values: Vec<Array1<f64>>) -> Result<(), Error> {
        if values.len() != self.n_phases() {
            return Err(Error::ParameterPhaseCountMismatch {
                expected: self.n_phases(),
                got: values.len(),
            });
        }
        self.parameter_values = values;
        Ok(())
    }

    /// Global stage-index bookkeeping, present after a successful
    /// [`MultiphaseOcp::make_consistent`].
    #[must_use]
    pub fn indices(&self) -> Option<&PhaseIndices> {
        self.indices.as_ref()
    }

    /// Normalized per-phase problems, populated by
    /// [`MultiphaseOcp::make_consistent`]. Consumed by the solver and code
    /// generator, not by callers.
    #[must_use]
    pub fn normalized_phases(&self) -> &[Ocp] {
        &self.normalized_phases
    }

    /// Moves `source`'s model, cost, constraints, and parameter values into
    /// phase slot `phase`, replacing whatever was there.
    ///
    /// Dimensions and solver options are owned at the multiphase level and
    /// are not copied. Nothing is validated here; validation is deferred
    /// entirely to [`MultiphaseOcp::make_consistent`].
    ///
    /// # Panics
    ///
    /// Panics if `phase` is out of range.
    pub fn set_phase(&mut self, source: Ocp, phase: usize) {
        self.models[phase] = source.model;
        self.costs[phase] = source.cost;
        self.constraints[phase] = source.constraints;
        self.parameter_values[phase] = source.parameter_values;
    }

    /// Composes the phases into a single consistent problem, without an
    /// observer.
    ///
    /// # Errors
    ///
    /// See [`MultiphaseOcp::make_consistent`].
    pub fn make_consistent_unobserved(&mut self) -> Result<Report, Error> {
        self.make_consistent(())
    }

    /// Composes the phases into a single consistent problem.
    ///
    /// Derives the global stage indices, deduplicates model names,
    /// normalizes each phase over the full composed horizon, and checks
    /// that every phase resolves to the same state dimension. Diagnostics
    /// (renamed models, out-of-position fields) go to `observer` and into
    /// the returned [`Report`]; they never abort the composition.
    ///
    /// All derivation happens on a staging area and is committed only on
    /// overall success, so a failed call leaves `self` untouched.
    /// Re-running on an unmodified problem re-derives the same result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Phase`] if a phase's own data is inconsistent and
    /// [`Error::StateDimensionMismatch`] if the phases disagree on `nx`.
    pub fn make_consistent<Obs>(&mut self, mut observer: Obs) -> Result<Report, Error>
    where
        Obs: Observer<Event, ()>,
    {
        let n_phases = self.n_phases();
        let indices = PhaseIndices::from_stage_counts(&self.stage_counts);

        let renamed_models = self.dedup_model_names(&mut observer);

        let mut ignored_fields = Vec::new();
        let mut views = Vec::with_capacity(n_phases);
        for phase in 0..n_phases {
            let mut view = Ocp {
                model: self.models[phase].clone(),
                cost: self.costs[phase].clone(),
                constraints: self.constraints[phase].clone(),
                dims: self.dims[phase],
                solver_options: self.solver_options.clone(),
                parameter_values: self.parameter_values[phase].clone(),
            };
            if let Some(renames) = &renamed_models {
                view.model.name = renames.renamed[phase].clone();
            }
            // The view spans the full composed horizon so that option- and
            // horizon-derived quantities stay global during normalization.
            view.dims.n_stages = Some(indices.total_horizon);

            if phase != n_phases - 1 {
                report_out_of_position(
                    &view,
                    phase,
                    Role::TerminalOnly,
                    &mut ignored_fields,
                    &mut observer,
                );
            }
            if phase != 0 {
                report_out_of_position(
                    &view,
                    phase,
                    Role::InitialOnly,
                    &mut ignored_fields,
                    &mut observer,
                );
            }

            view.make_consistent()
                .map_err(|source| Error::Phase { phase, source })?;
            observer.observe(&Event::PhaseNormalized { phase });
            views.push(view);
        }

        let nx_list: Vec<usize> = views.iter().filter_map(|view| view.dims.nx).collect();
        let mismatched = match nx_list.first() {
            Some(&first) => nx_list.iter().any(|&nx| nx != first),
            None => false,
        };
        if mismatched {
            return Err(Error::StateDimensionMismatch { nx_list });
        }

        // Commit: everything validated, now mutate in one step.
        for (phase, view) in views.iter().enumerate() {
            self.models[phase].name = view.model.name.clone();
            self.constraints[phase] = view.constraints.clone();
            self.dims[phase] = view.dims;
        }
        self.indices = Some(indices);
        self.normalized_phases = views;

        Ok(Report {
            renamed_models,
            ignored_fields,
        })
    }

    /// Appends `_<phase>` to every model name if names are not unique.
    ///
    /// Best effort: a suffixed name can still collide with another phase's
    /// pre-existing name (`a_0` next to `a`), and that is not detected.
    fn dedup_model_names<Obs>(&self, observer: &mut Obs) -> Option<RenamedModels>
    where
        Obs: Observer<Event, ()>,
    {
        let original: Vec<String> = self.models.iter().map(|m| m.name.clone()).collect();
        let distinct: HashSet<&String> = original.iter().collect();
        if distinct.len() == self.n_phases() {
            return None;
        }

        let renamed: Vec<String> = original
            .iter()
            .enumerate()
            .map(|(phase, name)| format!("{name}_{phase}"))
            .collect();
        observer.observe(&Event::ModelsRenamed {
            original: original.clone(),
            renamed: renamed.clone(),
        });
        Some(RenamedModels { original, renamed })
    }
}

/// Scans a phase view's cost, constraints, and model for non-default fields
/// of a role the phase's position does not support.
fn report_out_of_position<Obs>(
    view: &Ocp,
    phase: usize,
    role: Role,
    ignored_fields: &mut Vec<IgnoredFields>,
    observer: &mut Obs,
) where
    Obs: Observer<Event, ()>,
{
    let filter = match role {
        Role::InitialOnly => RoleFilter::InitialOnly,
        Role::TerminalOnly => RoleFilter::TerminalOnly,
        Role::Path => RoleFilter::All,
    };

    let mut fields = scan(&view.cost, filter);
    fields.extend(scan(&view.constraints, filter));
    fields.extend(scan(&view.model, filter));
    if fields.is_empty() {
        return;
    }

    observer.observe(&Event::IgnoredFields {
        phase,
        role,
        fields: fields.clone(),
    });
    ignored_fields.push(IgnoredFields {
        phase,
        role,
        fields,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::arr1;

    #[test]
    fn refuses_an_empty_stage_count_list() {
        let err = MultiphaseOcp::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyStageCounts));
    }

    #[test]
    fn construction_sizes_every_phase_list() {
        let ocp = MultiphaseOcp::new(vec![10, 5]).expect("valid stage counts");

        assert_eq!(ocp.n_phases(), 2);
        assert_eq!(ocp.models.len(), 2);
        assert_eq!(ocp.costs.len(), 2);
        assert_eq!(ocp.constraints.len(), 2);
        assert_eq!(ocp.dims.len(), 2);
        assert_eq!(ocp.parameter_values().len(), 2);
        assert!(ocp.indices().is_none());
        assert!(ocp.normalized_phases().is_empty());
    }

    #[test]
    fn parameter_vectors_must_match_the_phase_count() {
        let mut ocp = MultiphaseOcp::new(vec![10, 5]).expect("valid stage counts");

        let err = ocp
            .set_parameter_values(vec![arr1(&[1.0])])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ParameterPhaseCountMismatch {
                expected: 2,
                got: 1,
            }
        ));

        ocp.set_parameter_values(vec![arr1(&[1.0]), arr1(&[])])
            .expect("matching length");
        assert_eq!(ocp.parameter_values()[0], arr1(&[1.0]));
    }

    #[test]
    fn set_phase_moves_phase_data_but_not_options() {
        let mut ocp = MultiphaseOcp::new(vec![4, 4]).expect("valid stage counts");

        let mut phase = Ocp::default();
        phase.model.name = "cart".to_string();
        phase.parameter_values = arr1(&[2.5]);
        phase.dims.nx = Some(9);
        phase.solver_options.max_iter = 7;

        ocp.set_phase(phase, 1);

        assert_eq!(ocp.models[1].name, "cart");
        assert_eq!(ocp.parameter_values()[1], arr1(&[2.5]));
        // Dims and options stay owned at the multiphase level.
        assert_eq!(ocp.dims[1].nx, None);
        assert_eq!(ocp.solver_options.max_iter, 100);
    }
}
