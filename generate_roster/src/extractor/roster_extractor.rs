use std::collections::BTreeMap;

use roster_core::output::{
    Assignment, Diagnostics, ErrorBody, Flags, MatrixRow, OutputDoc, UnmetCandidate,
};
use roster_core::roster::NormalisedInput;

use crate::availability::AvailabilityReport;
use crate::compiler::RosterCompiler;
use crate::demand::DemandPlan;
use crate::error::ErrorKind;
use crate::extractor::summary;
use crate::logbuf::LogBuffer;
use crate::solver::{SolveOutcome, SolveStatus};

/// Turns a solve outcome into the output document: assignments, the
/// per-date matrix keyed by `peopleOrder`, the summary, and diagnostics
/// with the captured log.
pub fn render(
    input: &NormalisedInput,
    plan: &DemandPlan,
    availability: &AvailabilityReport,
    compiler: &RosterCompiler,
    outcome: &SolveOutcome,
    mut warnings: Vec<String>,
    log: &mut LogBuffer,
) -> OutputDoc {
    let people_order = input.people_order();

    let assignments = if outcome.status.has_solution() {
        extract_assignments(input, compiler, outcome)
    } else {
        Vec::new()
    };
    let matrix = build_matrix(input.days, &people_order, &assignments);

    let mut flags = Flags {
        inconsistent_summary: false,
        availability_warning: availability.has_warnings(),
    };

    let (mut doc_summary, mut unmet_candidates) = if outcome.status.has_solution() {
        let built = summary::build(plan, compiler, outcome, assignments.len() as u32);
        if built.inconsistent {
            flags.inconsistent_summary = true;
            warnings.push(
                "shortage is reported as zero although assignments do not meet total demand"
                    .to_string(),
            );
        }
        (built.summary, Vec::new())
    } else {
        let analysis = summary::infeasibility_analysis(input, plan, compiler);
        let unmet: Vec<UnmetCandidate> = availability
            .warnings
            .iter()
            .map(|w| UnmetCandidate {
                date: w.date,
                slot: w.slot.clone(),
                need: w.need,
                max_possible: w.available,
            })
            .collect();
        (analysis, unmet)
    };
    doc_summary.diagnostics.demand = Some(plan.diagnostics(input));

    let (infeasible, reason, error) = match outcome.status {
        SolveStatus::Optimal | SolveStatus::Feasible => (None, None, None),
        status => {
            let kind = match status {
                SolveStatus::Timeout => ErrorKind::SolverTimeout,
                SolveStatus::Infeasible => ErrorKind::SolverInfeasible,
                _ => ErrorKind::InternalError,
            };
            let reason = outcome
                .detail
                .clone()
                .unwrap_or_else(|| format!("solver ended with status {}", status.as_str()));
            let error = ErrorBody {
                code: kind.code().to_string(),
                message: reason.clone(),
                details: serde_json::Value::Null,
            };
            (Some(true), Some(reason), Some(error))
        }
    };

    log.line(format!(
        "[result] status={} assigned={} shortage={} excess={}",
        outcome.status.as_str(),
        doc_summary.totals.assigned,
        doc_summary.totals.shortage,
        doc_summary.totals.excess
    ));

    for w in &unmet_candidates {
        log.line(format!(
            "[result] unmet candidate day {} slot {}: need {} maxPossible {}",
            w.date, w.slot, w.need, w.max_possible
        ));
    }

    let diagnostics = Diagnostics {
        availability: availability.to_output(),
        availability_warnings: availability.warnings.clone(),
        warnings,
        flags,
        var_counts: compiler.var_counts(),
        log_output: log.joined(),
        unmet_candidates: std::mem::take(&mut unmet_candidates),
    };

    OutputDoc {
        people_order,
        assignments,
        matrix,
        summary: doc_summary,
        diagnostics: Some(diagnostics),
        infeasible,
        reason,
        error,
    }
}

/// Assignments in date, input-person, catalogue order.
fn extract_assignments(
    input: &NormalisedInput,
    compiler: &RosterCompiler,
    outcome: &SolveOutcome,
) -> Vec<Assignment> {
    let mut assignments = Vec::new();
    for date in 1..=input.days {
        for (pi, person) in input.people.iter().enumerate() {
            for code in &person.can_work {
                let Some(var) = compiler.x_var(pi, date, *code) else { continue };
                if outcome.value(var) == 1 {
                    assignments.push(Assignment {
                        date,
                        staff_id: person.id.clone(),
                        shift: code.as_str().to_string(),
                    });
                }
            }
        }
    }
    assignments
}

fn build_matrix(days: u32, people_order: &[String], assignments: &[Assignment]) -> Vec<MatrixRow> {
    let mut rows: Vec<MatrixRow> = (1..=days)
        .map(|date| {
            let shifts: BTreeMap<String, String> = people_order
                .iter()
                .map(|id| (id.clone(), String::new()))
                .collect();
            MatrixRow { date, shifts }
        })
        .collect();
    for a in assignments {
        if a.date >= 1 && a.date <= days {
            if let Some(cell) = rows[(a.date - 1) as usize].shifts.get_mut(&a.staff_id) {
                *cell = a.shift.clone();
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand;
    use crate::solver::canned::CannedBackend;
    use crate::solver::SolverBackend;
    use crate::validate::validate;
    use roster_core::input::InputDoc;
    use serde_json::json;
    use std::collections::HashMap;

    fn fixture() -> (NormalisedInput, Vec<String>) {
        let doc: InputDoc = serde_json::from_value(json!({
            "days": 2,
            "weekdayOfDay1": 1,
            "dayTypeByDate": ["A", "A"],
            "needTemplate": { "A": { "9-15": 1 } },
            "people": [
                { "id": "alpha", "canWork": ["DA"], "requestedOffDates": [2] },
                { "id": "beta", "canWork": ["DA"] }
            ]
        }))
        .unwrap();
        let validated = validate(doc).unwrap();
        (validated.input, validated.warnings)
    }

    #[test]
    fn canned_solution_renders_matrix_and_totals() {
        let (input, warnings) = fixture();
        let mut log = LogBuffer::silent();
        let plan = demand::expand(&input, &mut log).unwrap();
        let availability = crate::availability::analyse(&input, &plan, &mut log);
        let mut compiler = RosterCompiler::new(&input, &plan);
        compiler.compile(&mut log);

        // alpha works day 1, beta works day 2; nobody violates a wish-off.
        let backend = CannedBackend::optimal(HashMap::from([
            ("x_d1_i0_DA".to_string(), 1),
            ("work_d1_i0".to_string(), 1),
            ("x_d2_i1_DA".to_string(), 1),
            ("work_d2_i1".to_string(), 1),
        ]));
        let outcome = backend.solve(&compiler.model, 1.0, &mut log);
        let doc = render(&input, &plan, &availability, &compiler, &outcome, warnings, &mut log);

        assert_eq!(doc.people_order, vec!["alpha", "beta"]);
        assert_eq!(doc.assignments.len(), 2);
        assert_eq!(doc.matrix.len(), 2);
        assert_eq!(doc.matrix[0].shifts["alpha"], "DA");
        assert_eq!(doc.matrix[0].shifts["beta"], "");
        assert_eq!(doc.matrix[1].shifts["beta"], "DA");
        assert_eq!(doc.summary.totals.assigned, 2);
        assert_eq!(doc.summary.totals.shortage, 0);
        assert_eq!(doc.summary.totals.wish_off_violations, 0);
        assert!(doc.infeasible.is_none());
        let diagnostics = doc.diagnostics.unwrap();
        assert_eq!(diagnostics.var_counts.x, 4);
        assert!(diagnostics.log_output.contains("[result]"));
    }

    #[test]
    fn infeasible_outcome_still_produces_a_document() {
        let (input, warnings) = fixture();
        let mut log = LogBuffer::silent();
        let plan = demand::expand(&input, &mut log).unwrap();
        let availability = crate::availability::analyse(&input, &plan, &mut log);
        let mut compiler = RosterCompiler::new(&input, &plan);
        compiler.compile(&mut log);

        let outcome = CannedBackend::infeasible().solve(&compiler.model, 1.0, &mut log);
        let doc = render(&input, &plan, &availability, &compiler, &outcome, warnings, &mut log);

        assert_eq!(doc.infeasible, Some(true));
        assert!(doc.assignments.is_empty());
        assert_eq!(doc.matrix.len(), 2);
        assert!(doc.matrix.iter().all(|r| r.shifts.values().all(String::is_empty)));
        let error = doc.error.unwrap();
        assert_eq!(error.code, "SolverInfeasible");
    }
}
