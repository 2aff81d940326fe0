use serde_json::{json, Value};

use roster_core::output::{SlotOverstaff, SlotShortage, Summary, SummaryDiagnostics, Totals};
use roster_core::roster::NormalisedInput;
use roster_core::weekday;

use crate::compiler::RosterCompiler;
use crate::demand::DemandPlan;
use crate::solver::SolveOutcome;

pub struct BuiltSummary {
    pub summary: Summary,
    pub inconsistent: bool,
}

/// Summary for a solved roster, read straight off the slack variables.
pub fn build(
    plan: &DemandPlan,
    compiler: &RosterCompiler,
    outcome: &SolveOutcome,
    assigned: u32,
) -> BuiltSummary {
    let mut shortage_rows = Vec::new();
    let mut shortage_total = 0u32;
    for ((date, slot), var) in compiler.shortage.iter() {
        let lack = outcome.value(*var).max(0) as u32;
        if lack > 0 {
            shortage_rows.push(SlotShortage { date: *date, slot: slot.label().to_string(), lack });
            shortage_total += lack;
        }
    }

    let mut overstaff_rows = Vec::new();
    let mut excess_total = 0u32;
    for ((date, slot), var) in compiler.over.iter() {
        let excess = outcome.value(*var).max(0) as u32;
        if excess > 0 {
            overstaff_rows.push(SlotOverstaff {
                date: *date,
                slot: slot.label().to_string(),
                excess,
            });
            excess_total += excess;
        }
    }

    let mut wish_off_violations = 0u32;
    for (_, var) in compiler.violate_off.iter() {
        wish_off_violations += outcome.value(*var).max(0) as u32;
    }

    let inconsistent = should_flag_inconsistency(
        plan.total_need as i64,
        assigned as i64,
        shortage_total as i64,
    );

    BuiltSummary {
        summary: Summary {
            shortage: shortage_rows,
            overstaff: overstaff_rows,
            totals: Totals {
                assigned,
                shortage: shortage_total,
                excess: excess_total,
                wish_off_violations,
                violated_preferences: wish_off_violations,
                total_need: plan.total_need,
            },
            diagnostics: SummaryDiagnostics::default(),
        },
        inconsistent,
    }
}

/// A shortage of zero while assignments fall short of a positive total
/// demand means something upstream (codes, availability) is off.
pub fn should_flag_inconsistency(total_need: i64, assigned: i64, shortage_total: i64) -> bool {
    if total_need <= 0 {
        return false;
    }
    assigned < total_need && shortage_total == 0
}

/// When the hard constraints admit no roster, explain which personal
/// minimums cannot be met and where wish-offs make them unreachable.
pub fn infeasibility_analysis(
    input: &NormalisedInput,
    plan: &DemandPlan,
    compiler: &RosterCompiler,
) -> Summary {
    let weeks = compiler.weeks();
    let mut weekly = Vec::new();
    let mut monthly = Vec::new();
    let mut conflicts: Vec<Value> = Vec::new();

    for person in &input.people {
        if person.weekly_max > 0 && person.weekly_min > 0 && person.weekly_min > person.weekly_max
        {
            weekly.push(json!({
                "type": "weekly_min_exceeds_max",
                "staffId": person.id,
                "min": person.weekly_min,
                "max": person.weekly_max,
            }));
        }
        if person.monthly_max > 0
            && person.monthly_min > 0
            && person.monthly_min > person.monthly_max
        {
            monthly.push(json!({
                "type": "monthly_min_exceeds_max",
                "staffId": person.id,
                "min": person.monthly_min,
                "max": person.monthly_max,
            }));
        }

        let mut monthly_available = 0u32;
        let mut monthly_available_no_wish = 0u32;
        for (a, b) in &weeks {
            let mut available = 0u32;
            let mut available_no_wish = 0u32;
            for date in *a..=*b {
                if person.can_work.is_empty()
                    || person.unavailable_dates.contains(&date)
                    || person
                        .fixed_off_weekdays
                        .contains(&weekday::weekday_of(input.weekday0, date))
                {
                    continue;
                }
                available += 1;
                if !person.requested_off_dates.contains(&date) {
                    available_no_wish += 1;
                }
            }
            monthly_available += available;
            monthly_available_no_wish += available_no_wish;

            if person.weekly_min > 0 && available < person.weekly_min {
                weekly.push(json!({
                    "type": "weekly_min_shortage",
                    "staffId": person.id,
                    "weekStart": a,
                    "weekEnd": b,
                    "min": person.weekly_min,
                    "available": available,
                }));
            }
            if person.weekly_min > 0 && available_no_wish < person.weekly_min {
                conflicts.push(json!({
                    "scope": "weekly",
                    "staffId": person.id,
                    "weekStart": a,
                    "weekEnd": b,
                    "min": person.weekly_min,
                    "availableExcludingWishOff": available_no_wish,
                    "missing": person.weekly_min - available_no_wish,
                }));
            }
        }

        if person.monthly_min > 0 && monthly_available < person.monthly_min {
            monthly.push(json!({
                "type": "monthly_min_shortage",
                "staffId": person.id,
                "min": person.monthly_min,
                "available": monthly_available,
            }));
        }
        if person.monthly_min > 0 && monthly_available_no_wish < person.monthly_min {
            conflicts.push(json!({
                "scope": "monthly",
                "staffId": person.id,
                "min": person.monthly_min,
                "availableExcludingWishOff": monthly_available_no_wish,
                "missing": person.monthly_min - monthly_available_no_wish,
            }));
        }
    }

    let conflict_count: u32 = conflicts
        .iter()
        .filter_map(|c| c.get("missing").and_then(Value::as_u64))
        .map(|m| m as u32)
        .sum();

    Summary {
        shortage: Vec::new(),
        overstaff: Vec::new(),
        totals: Totals {
            assigned: 0,
            shortage: 0,
            excess: 0,
            wish_off_violations: 0,
            violated_preferences: 0,
            total_need: plan.total_need,
        },
        diagnostics: SummaryDiagnostics {
            demand: None,
            weekly,
            monthly,
            wish_off_conflicts: conflicts,
            wish_off_conflict_count: Some(conflict_count),
        },
    }
}
