use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel,
};

use crate::logbuf::LogBuffer;
use crate::solver::linear::{Cmp, LinearModel};
use crate::solver::{SolveOutcome, SolveStatus, SolverBackend};

/// Lowers the linear model onto good_lp's default solver (the pure-Rust
/// microlp engine in this build) and maps the resolution result back onto
/// the driver's status taxonomy.
pub struct MilpBackend;

impl SolverBackend for MilpBackend {
    fn name(&self) -> &'static str {
        "good_lp/microlp"
    }

    fn solve(
        &self,
        model: &LinearModel,
        time_limit_secs: f64,
        log: &mut LogBuffer,
    ) -> SolveOutcome {
        let mut builder = variables!();
        let mut handles = Vec::with_capacity(model.var_count());
        for def in model.vars() {
            let handle = builder.add(
                variable().integer().min(def.lo as f64).max(def.hi as f64),
            );
            handles.push(handle);
        }

        let mut objective = Expression::from(0);
        for (coefficient, var) in model.objective_terms() {
            objective += (*coefficient as f64) * handles[var.0];
        }

        log.line(format!(
            "[solver] backend={} vars={} constraints={} time_limit={}s",
            self.name(),
            model.var_count(),
            model.constraints().len(),
            time_limit_secs
        ));
        // microlp has no interrupt hook; small rosters solve well inside the
        // budget, and the configured limit stays on record here.
        log.line("[solver] note: backend runs to completion; the limit is recorded only");

        let mut problem = builder.minimise(objective).using(default_solver);
        for c in model.constraints() {
            let mut expr = Expression::from(0);
            for (coefficient, var) in &c.terms {
                expr += (*coefficient as f64) * handles[var.0];
            }
            let rhs = c.rhs as f64;
            let lowered = match c.cmp {
                Cmp::Le => constraint!(expr <= rhs),
                Cmp::Ge => constraint!(expr >= rhs),
                Cmp::Eq => constraint!(expr == rhs),
            };
            problem = problem.with(lowered);
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<i64> =
                    handles.iter().map(|h| solution.value(*h).round() as i64).collect();
                let objective = model.objective_value(&values);
                log.line(format!("[solver] status=optimal objective={}", objective));
                SolveOutcome {
                    status: SolveStatus::Optimal,
                    values,
                    objective: Some(objective),
                    detail: None,
                }
            }
            Err(ResolutionError::Infeasible) => {
                log.line("[solver] status=infeasible");
                SolveOutcome {
                    status: SolveStatus::Infeasible,
                    values: Vec::new(),
                    objective: None,
                    detail: Some("the hard constraints admit no roster".to_string()),
                }
            }
            Err(ResolutionError::Unbounded) => {
                log.line("[solver] status=error (unbounded)");
                SolveOutcome {
                    status: SolveStatus::Error,
                    values: Vec::new(),
                    objective: None,
                    detail: Some("objective is unbounded".to_string()),
                }
            }
            Err(other) => {
                let detail = other.to_string();
                log.line(format!("[solver] status=error ({})", detail));
                SolveOutcome {
                    status: SolveStatus::Error,
                    values: Vec::new(),
                    objective: None,
                    detail: Some(detail),
                }
            }
        }
    }
}
