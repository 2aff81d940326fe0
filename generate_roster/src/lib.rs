// The roster pipeline: validate -> expand -> analyse -> build -> solve ->
// render. Each stage either feeds the next or short-circuits into an error
// document; the process only fails hard on I/O.

pub mod availability;
pub mod cli;
pub mod compiler;
pub mod demand;
pub mod error;
pub mod extractor;
pub mod logbuf;
pub mod solver;
pub mod validate;

use serde_json::Value;

use roster_core::output::{
    Diagnostics, ErrorBody, OutputDoc, Summary, SummaryDiagnostics, Totals,
};
use roster_core::roster::NormalisedInput;

use crate::compiler::RosterCompiler;
use crate::error::{ErrorKind, SolveError};
use crate::logbuf::LogBuffer;
use crate::solver::milp::MilpBackend;
use crate::solver::SolverBackend;

/// Runs the whole pipeline against the default backend. Always returns a
/// document; recoverable failures are folded into it.
pub fn solve_document(raw: Value, time_limit_secs: f64) -> OutputDoc {
    let mut log = LogBuffer::new();
    solve_document_with(raw, time_limit_secs, &MilpBackend, &mut log)
}

pub fn solve_document_with(
    raw: Value,
    time_limit_secs: f64,
    backend: &dyn SolverBackend,
    log: &mut LogBuffer,
) -> OutputDoc {
    let doc = match serde_json::from_value(raw.clone()) {
        Ok(doc) => doc,
        Err(e) => {
            let err = SolveError::new(
                ErrorKind::InputParse,
                format!("input document could not be parsed: {}", e),
            );
            return error_document(&raw, err, log);
        }
    };

    let validated = match validate::validate(doc) {
        Ok(v) => v,
        Err(e) => return error_document(&raw, e, log),
    };
    let mut warnings = validated.warnings;
    let input = validated.input;

    if input.days == 0 {
        return empty_horizon_document(&input, warnings, log);
    }

    let plan = match demand::expand(&input, log) {
        Ok(plan) => plan,
        Err(e) => return error_document(&raw, e, log),
    };

    let availability_report = availability::analyse(&input, &plan, log);
    if availability_report.has_warnings() {
        warnings.push("some slots demand more staff than could ever be assigned".to_string());
    }

    let mut roster_compiler = RosterCompiler::new(&input, &plan);
    roster_compiler.compile(log);
    warnings.extend(roster_compiler.warnings.iter().cloned());

    let outcome = backend.solve(&roster_compiler.model, time_limit_secs, log);

    extractor::render(
        &input,
        &plan,
        &availability_report,
        &roster_compiler,
        &outcome,
        warnings,
        log,
    )
}

/// Document for input that was not even JSON: nothing to echo back but the
/// error itself.
pub fn input_parse_document(detail: &str) -> OutputDoc {
    let mut log = LogBuffer::new();
    error_document(
        &Value::Null,
        SolveError::new(
            ErrorKind::InputParse,
            format!("input document could not be parsed: {}", detail),
        ),
        &mut log,
    )
}

fn empty_horizon_document(
    input: &NormalisedInput,
    warnings: Vec<String>,
    log: &mut LogBuffer,
) -> OutputDoc {
    log.line("[demand] days=0; empty horizon, nothing to roster");
    log.line("[result] status=optimal assigned=0 shortage=0 excess=0");
    OutputDoc {
        people_order: input.people_order(),
        assignments: Vec::new(),
        matrix: Vec::new(),
        summary: Summary {
            shortage: Vec::new(),
            overstaff: Vec::new(),
            totals: Totals::default(),
            diagnostics: SummaryDiagnostics::default(),
        },
        diagnostics: Some(Diagnostics {
            warnings,
            log_output: log.joined(),
            ..Diagnostics::default()
        }),
        infeasible: None,
        reason: None,
        error: None,
    }
}

fn error_document(raw: &Value, err: SolveError, log: &mut LogBuffer) -> OutputDoc {
    log.line(format!("[error] {}: {}", err.kind.code(), err.message));
    OutputDoc {
        people_order: people_order_from_raw(raw),
        assignments: Vec::new(),
        matrix: Vec::new(),
        summary: Summary {
            shortage: Vec::new(),
            overstaff: Vec::new(),
            totals: Totals::default(),
            diagnostics: SummaryDiagnostics::default(),
        },
        diagnostics: Some(Diagnostics {
            log_output: log.joined(),
            ..Diagnostics::default()
        }),
        infeasible: Some(true),
        reason: Some(err.message.clone()),
        error: Some(ErrorBody {
            code: err.kind.code().to_string(),
            message: err.message,
            details: err.details,
        }),
    }
}

/// Best-effort staff ids from an unvalidated document, so even error
/// responses carry a usable `peopleOrder`.
fn people_order_from_raw(raw: &Value) -> Vec<String> {
    raw.get("people")
        .and_then(Value::as_array)
        .map(|people| {
            people
                .iter()
                .filter_map(|p| p.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
