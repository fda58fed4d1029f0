use serde::{Deserialize, Serialize};

/// Global stage-index bookkeeping derived from the per-phase stage counts.
///
/// Phases partition the horizon contiguously: phase `i` covers the
/// half-open global stage range `start[i]..end[i]`. `cost_start` matches
/// `start` except that phase 0's entry is shifted by one, because global
/// stage 0 is reserved for the composed problem's initial cost and
/// constraints and is not part of any phase's path-cost range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseIndices {
    pub total_horizon: usize,
    pub start: Vec<usize>,
    pub end: Vec<usize>,
    pub cost_start: Vec<usize>,
}

impl PhaseIndices {
    pub(crate) fn from_stage_counts(stage_counts: &[usize]) -> Self {
        let mut start = Vec::with_capacity(stage_counts.len());
        let mut end = Vec::with_capacity(stage_counts.len());
        let mut total = 0;
        for &n in stage_counts {
            start.push(total);
            total += n;
            end.push(total);
        }

        let mut cost_start = start.clone();
        if let Some(first) = cost_start.first_mut() {
            *first += 1;
        }

        Self {
            total_horizon: total,
            start,
            end,
            cost_start,
        }
    }
}
