use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

fn roster_cmd() -> Command {
    Command::cargo_bin("generate_roster").expect("binary generate_roster is built")
}

fn run_solver(dir: &Path, input: &Value) -> Value {
    let in_path = dir.join("input.json");
    let out_path = dir.join("output.json");
    fs::write(&in_path, serde_json::to_string_pretty(input).unwrap()).unwrap();

    roster_cmd()
        .args([
            "--in",
            in_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
            "--time_limit",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote"));

    serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).expect("valid output json")
}

#[test]
fn empty_horizon_produces_an_empty_roster() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 0,
            "weekdayOfDay1": 0,
            "dayTypeByDate": [],
            "needTemplate": { "normalDay": { "9-15": 1 } },
            "people": [{ "id": "A", "canWork": ["DA"] }]
        }),
    );
    assert_eq!(out["assignments"], json!([]));
    assert_eq!(out["matrix"], json!([]));
    assert_eq!(out["summary"]["totals"]["assigned"], 0);
    assert!(out.get("error").is_none());
    assert!(out.get("infeasible").is_none());
}

#[test]
fn trivial_demand_is_covered_without_shortage() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["normalDay"],
            "needTemplate": { "normalDay": { "9-15": 1 } },
            "people": [{ "id": "A", "canWork": ["DA"] }]
        }),
    );
    assert_eq!(out["assignments"].as_array().unwrap().len(), 1);
    assert_eq!(out["assignments"][0]["staffId"], "A");
    assert_eq!(out["assignments"][0]["shift"], "DA");
    assert_eq!(out["summary"]["totals"]["shortage"], 0);
    assert_eq!(out["summary"]["totals"]["excess"], 0);
    assert_eq!(out["matrix"][0]["shifts"]["A"], "DA");
    assert_eq!(out["peopleOrder"], json!(["A"]));
}

#[test]
fn unmeetable_demand_becomes_shortage_not_infeasibility() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["normalDay"],
            "needTemplate": { "normalDay": { "9-15": 2 } },
            "people": [{ "id": "A", "canWork": ["DA"] }]
        }),
    );
    assert!(out.get("infeasible").is_none());
    assert_eq!(out["assignments"].as_array().unwrap().len(), 1);
    assert_eq!(out["summary"]["totals"]["shortage"], 1);
    assert_eq!(out["diagnostics"]["flags"]["availability_warning"], true);
    let warnings = out["diagnostics"]["availabilityWarnings"].as_array().unwrap();
    assert_eq!(warnings[0]["slot"], "9-15");
    assert_eq!(warnings[0]["available"], 1);
}

#[test]
fn night_rest_blocks_the_following_morning() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 2,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["nightHeavy", "morning"],
            "needTemplate": {
                "nightHeavy": { "21-23": 1 },
                "morning": { "7-9": 1, "0-7": 1 }
            },
            "people": [{ "id": "A", "canWork": ["NA", "EA"] }],
            "rules": { "nightRest": { "NA": 2 } }
        }),
    );
    let assignments = out["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["date"], 1);
    assert_eq!(assignments[0]["shift"], "NA");
    // Day 2 is rest: its morning demand goes short.
    let shortage = out["summary"]["shortage"].as_array().unwrap();
    assert!(shortage.iter().any(|s| s["date"] == 2 && s["slot"] == "7-9" && s["lack"] == 1));
    assert_eq!(out["matrix"][1]["shifts"]["A"], "");
}

#[test]
fn early_shift_is_forbidden_after_a_day_shift() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 2,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["full", "morningAndLate"],
            "needTemplate": {
                "full": { "9-15": 1, "16-18": 1 },
                "morningAndLate": { "7-9": 1, "16-18": 1 }
            },
            "people": [{ "id": "A", "canWork": ["DA", "EA"] }],
            "rules": { "noEarlyAfterDayAB": true }
        }),
    );
    let assignments = out["assignments"].as_array().unwrap();
    let day1: Vec<&Value> = assignments.iter().filter(|a| a["date"] == 1).collect();
    let day2: Vec<&Value> = assignments.iter().filter(|a| a["date"] == 2).collect();
    assert_eq!(day1.len(), 1);
    assert_eq!(day1[0]["shift"], "DA");
    assert!(day2.iter().all(|a| a["shift"] != "EA"));
    let shortage = out["summary"]["shortage"].as_array().unwrap();
    assert!(shortage.iter().any(|s| s["date"] == 2 && s["slot"] == "7-9" && s["lack"] == 1));
}

#[test]
fn forced_work_on_a_wish_off_day_is_counted_and_priced() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 3,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["normalDay", "normalDay", "normalDay"],
            "needTemplate": { "normalDay": { "9-15": 1 } },
            "people": [{ "id": "A", "canWork": ["DA"], "requestedOffDates": [3] }],
            "weights": { "W_requested_off_violation": 100 }
        }),
    );
    assert_eq!(out["assignments"].as_array().unwrap().len(), 3);
    assert_eq!(out["summary"]["totals"]["wishOffViolations"], 1);
    assert_eq!(out["summary"]["totals"]["violatedPreferences"], 1);
    assert_eq!(out["summary"]["totals"]["shortage"], 0);
}

#[test]
fn night_carry_keeps_staff_resting_at_month_start() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 3,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["normalDay", "normalDay", "normalDay"],
            "needTemplate": { "normalDay": { "9-15": 1 } },
            "people": [{ "id": "A", "canWork": ["DA", "NA"] }],
            "previousMonthNightCarry": { "NA": ["A"] },
            "rules": { "nightRest": { "NA": 2 } }
        }),
    );
    let assignments = out["assignments"].as_array().unwrap();
    assert!(assignments.iter().all(|a| a["date"] == 3));
    let shortage = out["summary"]["shortage"].as_array().unwrap();
    assert!(shortage.iter().any(|s| s["date"] == 1));
    assert!(shortage.iter().any(|s| s["date"] == 2));
}

#[test]
fn strict_night_without_enough_staff_is_infeasible() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["normalDay"],
            "needTemplate": { "normalDay": { "21-23": 0 } },
            "strictNight": { "21-23": 2 },
            "people": [{ "id": "A", "canWork": ["NB"] }]
        }),
    );
    assert_eq!(out["infeasible"], true);
    assert_eq!(out["error"]["code"], "SolverInfeasible");
    assert!(out["reason"].as_str().is_some());
    assert_eq!(out["assignments"], json!([]));
    let unmet = out["diagnostics"]["unmetCandidates"].as_array().unwrap();
    assert!(unmet.iter().any(|u| u["slot"] == "21-23" && u["maxPossible"] == 1));
}

#[test]
fn minimum_workdays_can_force_priced_overstaff() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["quietDay"],
            "needTemplate": { "quietDay": { "9-15": 0 } },
            "people": [
                { "id": "A", "canWork": ["DA"], "monthlyMin": 1 },
                { "id": "B", "canWork": ["DA"], "monthlyMin": 1 }
            ]
        }),
    );
    assert_eq!(out["assignments"].as_array().unwrap().len(), 2);
    // Two DA workers against zero demand: one beyond need+1 on both of
    // DA's slots.
    assert_eq!(out["summary"]["totals"]["excess"], 2);
    let overstaff = out["summary"]["overstaff"].as_array().unwrap();
    assert!(overstaff.iter().any(|o| o["slot"] == "9-15" && o["excess"] == 1));
    assert!(overstaff.iter().any(|o| o["slot"] == "16-18" && o["excess"] == 1));
}

#[test]
fn weekly_cap_limits_workdays_within_a_week() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 3,
            "weekdayOfDay1": 1,
            "dayTypeByDate": ["normalDay", "normalDay", "normalDay"],
            "needTemplate": { "normalDay": { "9-15": 1 } },
            "people": [{ "id": "A", "canWork": ["DA"], "weeklyMax": 1 }]
        }),
    );
    assert_eq!(out["assignments"].as_array().unwrap().len(), 1);
    assert_eq!(out["summary"]["totals"]["shortage"], 2);
}

#[test]
fn consecutive_day_cap_forces_a_break() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 3,
            "weekdayOfDay1": 1,
            "dayTypeByDate": ["normalDay", "normalDay", "normalDay"],
            "needTemplate": { "normalDay": { "9-15": 1 } },
            "people": [{ "id": "A", "canWork": ["DA"], "consecMax": 2 }]
        }),
    );
    assert_eq!(out["assignments"].as_array().unwrap().len(), 2);
    assert_eq!(out["summary"]["totals"]["shortage"], 1);
}

#[test]
fn duplicate_ids_yield_an_error_document_and_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["normalDay"],
            "needTemplate": { "normalDay": { "9-15": 1 } },
            "people": [
                { "id": "A", "canWork": ["DA"] },
                { "id": "A", "canWork": ["EA"] }
            ]
        }),
    );
    assert_eq!(out["error"]["code"], "DuplicateId");
    assert_eq!(out["infeasible"], true);
    assert_eq!(out["assignments"], json!([]));
    assert_eq!(out["peopleOrder"], json!(["A", "A"]));
}

#[test]
fn unparseable_input_yields_an_input_parse_document() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("input.json");
    let out_path = dir.path().join("output.json");
    fs::write(&in_path, "{ not json").unwrap();

    roster_cmd()
        .args([
            "--in",
            in_path.to_str().unwrap(),
            "--out",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let out: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(out["error"]["code"], "InputParse");
    assert_eq!(out["infeasible"], true);
}

#[test]
fn input_output_aliases_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let in_path = dir.path().join("input.json");
    let out_path = dir.path().join("output.json");
    fs::write(
        &in_path,
        serde_json::to_string(&json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["normalDay"],
            "needTemplate": { "normalDay": { "9-15": 1 } },
            "people": [{ "id": "A", "canWork": ["DA"] }]
        }))
        .unwrap(),
    )
    .unwrap();

    roster_cmd()
        .args([
            "--input",
            in_path.to_str().unwrap(),
            "--output",
            out_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let out: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(out["assignments"].as_array().unwrap().len(), 1);
}

#[test]
fn missing_input_file_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    roster_cmd()
        .args([
            "--in",
            dir.path().join("absent.json").to_str().unwrap(),
            "--out",
            dir.path().join("output.json").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn solver_log_is_captured_into_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_solver(
        dir.path(),
        &json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["normalDay"],
            "needTemplate": { "normalDay": { "9-15": 1 } },
            "people": [{ "id": "A", "canWork": ["DA"] }]
        }),
    );
    let log = out["diagnostics"]["logOutput"].as_str().unwrap();
    assert!(log.contains("[demand] days=1"));
    assert!(log.contains("[solver]"));
    assert!(log.contains("[result]"));
    assert_eq!(out["diagnostics"]["var_counts"]["x"], 1);
}
