use thiserror::Error;

use braid_core::ConsistencyError;

/// Errors that can occur while assembling a multi-phase problem.
#[derive(Debug, Error)]
pub enum Error {
    #[error("stage counts must not be empty")]
    EmptyStageCounts,

    #[error("expected {expected} parameter vectors, one per phase, got {got}")]
    ParameterPhaseCountMismatch { expected: usize, got: usize },

    #[error("phase {phase} is inconsistent")]
    Phase {
        phase: usize,
        #[source]
        source: ConsistencyError,
    },

    #[error("all phases must share the same state dimension, got nx = {nx_list:?}")]
    StateDimensionMismatch { nx_list: Vec<usize> },

    #[error("failed to export the problem description")]
    Export(#[source] serde_json::Error),
}
