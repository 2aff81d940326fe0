// Replays a generated roster against its request and re-checks the duty
// rules one by one: assignment sanity, eligibility, rest rules, and the
// summary arithmetic. Meant for eyeballing a roster before it goes up on
// the staff room wall.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use serde_json::Value;

use generate_roster::demand;
use generate_roster::logbuf::LogBuffer;
use generate_roster::validate;
use roster_core::input::InputDoc;
use roster_core::roster::{NormalisedInput, Person};
use roster_core::shifts::{shift_def, ShiftCode, Slot};
use roster_core::weekday;

#[derive(Parser, Debug)]
#[command(
    name = "check_roster",
    version,
    about = "Verifies a roster document against the request it was generated from"
)]
struct Cli {
    /// The request document (JSON).
    #[arg(long = "in", visible_alias = "input", value_name = "PATH")]
    input: PathBuf,

    /// The roster document to verify (JSON).
    #[arg(long = "roster", visible_alias = "out", value_name = "PATH")]
    roster: PathBuf,
}

struct Report {
    checks: usize,
    failures: usize,
}

impl Report {
    fn new() -> Self {
        Report { checks: 0, failures: 0 }
    }

    fn pass(&mut self, what: &str) {
        self.checks += 1;
        println!("{} {}", "✅".green(), what);
    }

    fn fail(&mut self, what: &str) {
        self.checks += 1;
        self.failures += 1;
        println!("{} {}", "❌".red(), what.red());
    }

    fn check(&mut self, ok: bool, what: &str) {
        if ok {
            self.pass(what);
        } else {
            self.fail(what);
        }
    }
}

#[derive(Debug, Clone)]
struct Assigned {
    date: u32,
    staff_id: String,
    shift: ShiftCode,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(failures) if failures == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<usize, String> {
    let input_text = fs::read_to_string(&cli.input)
        .map_err(|e| format!("cannot read {}: {}", cli.input.display(), e))?;
    let roster_text = fs::read_to_string(&cli.roster)
        .map_err(|e| format!("cannot read {}: {}", cli.roster.display(), e))?;

    let input_doc: InputDoc =
        serde_json::from_str(&input_text).map_err(|e| format!("request is not valid JSON: {}", e))?;
    let roster: Value =
        serde_json::from_str(&roster_text).map_err(|e| format!("roster is not valid JSON: {}", e))?;

    let validated = validate::validate(input_doc)
        .map_err(|e| format!("request does not validate, nothing to check: {}", e))?;
    let input = validated.input;

    let mut report = Report::new();

    if roster.get("infeasible").and_then(Value::as_bool) == Some(true)
        || roster.get("error").is_some()
    {
        println!("{}", "roster carries an error or infeasibility marker".yellow());
        report.check(
            roster["assignments"].as_array().map(Vec::len).unwrap_or(0) == 0,
            "no assignments are present on a failed solve",
        );
        finish(&report);
        return Ok(report.failures);
    }

    let assignments = parse_assignments(&roster, &mut report);
    check_people_order(&input, &roster, &mut report);
    check_matrix(&input, &roster, &assignments, &mut report);
    check_at_most_one(&assignments, &mut report);
    check_eligibility(&input, &assignments, &mut report);
    check_night_rest(&input, &assignments, &mut report);
    check_no_early_after_day(&input, &assignments, &mut report);
    check_totals(&input, &roster, &assignments, &mut report);

    finish(&report);
    Ok(report.failures)
}

fn finish(report: &Report) {
    let summary = format!("{} checks, {} failures", report.checks, report.failures);
    if report.failures == 0 {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.red().bold());
    }
}

fn parse_assignments(roster: &Value, report: &mut Report) -> Vec<Assigned> {
    let mut out = Vec::new();
    let Some(entries) = roster["assignments"].as_array() else {
        report.fail("assignments is an array");
        return out;
    };
    let mut well_formed = true;
    for entry in entries {
        let date = entry["date"].as_u64().map(|d| d as u32);
        let staff_id = entry["staffId"].as_str();
        let shift = entry["shift"].as_str().and_then(ShiftCode::parse);
        match (date, staff_id, shift) {
            (Some(date), Some(staff_id), Some(shift)) => out.push(Assigned {
                date,
                staff_id: staff_id.to_string(),
                shift,
            }),
            _ => well_formed = false,
        }
    }
    report.check(well_formed, "every assignment has a date, staffId and catalogue shift");
    out
}

fn check_people_order(input: &NormalisedInput, roster: &Value, report: &mut Report) {
    let expected: Vec<Value> = input.people_order().into_iter().map(Value::String).collect();
    report.check(
        roster["peopleOrder"].as_array() == Some(&expected),
        "peopleOrder matches the request's people, in order",
    );
}

fn check_matrix(
    input: &NormalisedInput,
    roster: &Value,
    assignments: &[Assigned],
    report: &mut Report,
) {
    let Some(rows) = roster["matrix"].as_array() else {
        report.fail("matrix is an array");
        return;
    };
    report.check(rows.len() == input.days as usize, "matrix has one row per date");

    let mut cell: BTreeMap<(u32, &str), &ShiftCode> = BTreeMap::new();
    for a in assignments {
        cell.insert((a.date, a.staff_id.as_str()), &a.shift);
    }

    let ids = input.people_order();
    let mut agree = true;
    for (index, row) in rows.iter().enumerate() {
        let date = index as u32 + 1;
        let Some(shifts) = row["shifts"].as_object() else {
            agree = false;
            continue;
        };
        if shifts.len() != ids.len() {
            agree = false;
        }
        for id in &ids {
            let expected = cell
                .get(&(date, id.as_str()))
                .map(|code| code.as_str())
                .unwrap_or("");
            if shifts.get(id).and_then(Value::as_str) != Some(expected) {
                agree = false;
            }
        }
    }
    report.check(agree, "matrix cells agree with assignments ('' means off)");
}

fn check_at_most_one(assignments: &[Assigned], report: &mut Report) {
    let mut seen = BTreeSet::new();
    let unique = assignments
        .iter()
        .all(|a| seen.insert((a.date, a.staff_id.clone())));
    report.check(unique, "nobody works two shifts on one date");
}

fn check_eligibility(input: &NormalisedInput, assignments: &[Assigned], report: &mut Report) {
    let by_id: BTreeMap<&str, &Person> =
        input.people.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut ok = true;
    for a in assignments {
        let Some(person) = by_id.get(a.staff_id.as_str()) else {
            ok = false;
            continue;
        };
        if !person.can_work.contains(&a.shift)
            || person.unavailable_dates.contains(&a.date)
            || person
                .fixed_off_weekdays
                .contains(&weekday::weekday_of(input.weekday0, a.date))
        {
            ok = false;
        }
    }
    report.check(ok, "every assignment respects canWork, fixed-off weekdays and unavailable dates");
}

fn check_night_rest(input: &NormalisedInput, assignments: &[Assigned], report: &mut Report) {
    let mut works: BTreeSet<(&str, u32)> = BTreeSet::new();
    for a in assignments {
        works.insert((a.staff_id.as_str(), a.date));
    }

    let mut ok = true;
    for a in assignments {
        let Some(rest) = input.rules.night_rest.for_code(a.shift).filter(|r| *r > 0) else {
            continue;
        };
        for offset in 1..=rest {
            if works.contains(&(a.staff_id.as_str(), a.date + offset)) {
                ok = false;
            }
        }
    }
    for (code, ids) in &input.night_carry {
        let Some(rest) = input.rules.night_rest.for_code(*code).filter(|r| *r > 0) else {
            continue;
        };
        for id in ids {
            for date in 1..=rest.min(input.days) {
                if works.contains(&(id.as_str(), date)) {
                    ok = false;
                }
            }
        }
    }
    report.check(ok, "night shifts are followed by their rest days (carry included)");
}

fn check_no_early_after_day(
    input: &NormalisedInput,
    assignments: &[Assigned],
    report: &mut Report,
) {
    if !input.rules.no_early_after_day_ab {
        return;
    }
    let mut shift_on: BTreeMap<(&str, u32), ShiftCode> = BTreeMap::new();
    for a in assignments {
        shift_on.insert((a.staff_id.as_str(), a.date), a.shift);
    }
    let mut ok = true;
    for a in assignments {
        if a.shift == ShiftCode::EA && a.date > 1 {
            if let Some(prev) = shift_on.get(&(a.staff_id.as_str(), a.date - 1)) {
                if matches!(prev, ShiftCode::DA | ShiftCode::DB) {
                    ok = false;
                }
            }
        }
    }
    report.check(ok, "no early shift follows a DA/DB day");
}

fn check_totals(
    input: &NormalisedInput,
    roster: &Value,
    assignments: &[Assigned],
    report: &mut Report,
) {
    let totals = &roster["summary"]["totals"];
    report.check(
        totals["assigned"].as_u64() == Some(assignments.len() as u64),
        "totals.assigned equals the number of assignments",
    );

    let wish_offs: u64 = assignments
        .iter()
        .filter(|a| {
            input
                .people
                .iter()
                .find(|p| p.id == a.staff_id)
                .map(|p| p.requested_off_dates.contains(&a.date))
                .unwrap_or(false)
        })
        .count() as u64;
    report.check(
        totals["wishOffViolations"].as_u64() == Some(wish_offs),
        "totals.wishOffViolations recounts from assignments",
    );
    report.check(
        totals["violatedPreferences"] == totals["wishOffViolations"],
        "violatedPreferences mirrors wishOffViolations",
    );

    let plan = match demand::expand(input, &mut LogBuffer::silent()) {
        Ok(plan) => plan,
        Err(e) => {
            report.fail(&format!("demand re-expansion failed: {}", e));
            return;
        }
    };
    let mut lack_total = 0u64;
    let mut excess_total = 0u64;
    for date in 1..=input.days {
        for slot in Slot::ALL {
            let covered = coverage(assignments, date, slot);
            let need = u64::from(plan.need_of(date, slot));
            lack_total += need.saturating_sub(covered);
            excess_total += covered.saturating_sub(need + 1);
        }
    }
    report.check(
        totals["shortage"].as_u64() == Some(lack_total),
        "totals.shortage equals recomputed unmet demand",
    );
    report.check(
        totals["excess"].as_u64() == Some(excess_total),
        "totals.excess equals recomputed headcount beyond need+1",
    );
}

/// Headcount on a (date, slot). Dawn draws on the previous date's
/// midnight-wrapping nights.
fn coverage(assignments: &[Assigned], date: u32, slot: Slot) -> u64 {
    assignments
        .iter()
        .filter(|a| {
            let def = shift_def(a.shift);
            match slot {
                Slot::Dawn => date >= 2 && a.date == date - 1 && def.wraps_midnight(),
                _ => a.date == date && def.covers(slot),
            }
        })
        .count() as u64
}
