use serde::{Deserialize, Serialize};

/// Integration scheme used for the dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntegratorKind {
    #[default]
    Erk,
    Irk,
}

/// How stage costs are discretized over a shooting interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CostDiscretization {
    #[default]
    Euler,
    IntegratorAligned,
}

/// Solver options shared by every phase of a composed problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    pub integrator: IntegratorKind,
    pub cost_discretization: CostDiscretization,
    pub tol: f64,
    pub max_iter: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            integrator: IntegratorKind::default(),
            cost_discretization: CostDiscretization::default(),
            tol: 1e-6,
            max_iter: 100,
        }
    }
}

impl SolverOptions {
    /// Validates that the options are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is non-positive or non-finite,
    /// or if the iteration limit is zero.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.tol.is_finite() || self.tol <= 0.0 {
            return Err("tol must be finite and positive");
        }
        if self.max_iter == 0 {
            return Err("max_iter must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(SolverOptions::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_tolerance_and_iteration_limit() {
        let mut opts = SolverOptions::default();
        opts.tol = 0.0;
        assert!(opts.validate().is_err());

        opts.tol = f64::NAN;
        assert!(opts.validate().is_err());

        opts.tol = 1e-8;
        opts.max_iter = 0;
        assert!(opts.validate().is_err());
    }
}
