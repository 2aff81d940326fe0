use std::collections::HashMap;

use crate::logbuf::LogBuffer;
use crate::solver::linear::LinearModel;
use crate::solver::{SolveOutcome, SolveStatus, SolverBackend};

/// A backend that returns a prepared solution, keyed by variable name.
/// Unlisted variables read as 0. Lets renderer and pipeline tests run
/// without an actual solve.
#[derive(Debug)]
pub struct CannedBackend {
    pub status: SolveStatus,
    pub values: HashMap<String, i64>,
}

impl CannedBackend {
    pub fn optimal(values: HashMap<String, i64>) -> Self {
        CannedBackend { status: SolveStatus::Optimal, values }
    }

    pub fn infeasible() -> Self {
        CannedBackend { status: SolveStatus::Infeasible, values: HashMap::new() }
    }
}

impl SolverBackend for CannedBackend {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn solve(
        &self,
        model: &LinearModel,
        _time_limit_secs: f64,
        log: &mut LogBuffer,
    ) -> SolveOutcome {
        log.line(format!("[solver] backend=canned status={}", self.status.as_str()));
        if !self.status.has_solution() {
            return SolveOutcome {
                status: self.status,
                values: Vec::new(),
                objective: None,
                detail: Some("canned outcome".to_string()),
            };
        }
        let values: Vec<i64> = model
            .vars()
            .iter()
            .map(|def| self.values.get(&def.name).copied().unwrap_or(0))
            .collect();
        let objective = model.objective_value(&values);
        SolveOutcome {
            status: self.status,
            values,
            objective: Some(objective),
            detail: None,
        }
    }
}
