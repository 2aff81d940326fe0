use std::collections::BTreeMap;

use serde_json::json;

use roster_core::output::{DemandDiagnostics, PerDayTotal};
use roster_core::roster::{NormalisedInput, SlotNeeds};
use roster_core::shifts::Slot;

use crate::error::{ErrorKind, SolveError};
use crate::logbuf::LogBuffer;

/// Per-date effective demand after template lookup, strict-night overrides
/// and the day-1 carry reduction.
#[derive(Debug, Clone)]
pub struct DemandPlan {
    pub need: Vec<SlotNeeds>,
    pub carry_applied: Vec<bool>,
    pub carry_count: u32,
    pub total_need: u32,
    pub warnings: Vec<String>,
}

impl DemandPlan {
    pub fn need_of(&self, date: u32, slot: Slot) -> u32 {
        self.need[(date - 1) as usize].get(slot)
    }

    pub fn diagnostics(&self, input: &NormalisedInput) -> DemandDiagnostics {
        let per_day_totals = self
            .need
            .iter()
            .enumerate()
            .map(|(i, needs)| {
                let mut slots = BTreeMap::new();
                for (slot, value) in needs.iter() {
                    slots.insert(slot.label().to_string(), value);
                }
                PerDayTotal {
                    date: i as u32 + 1,
                    total: needs.total(),
                    slots,
                    carry_applied: self.carry_applied[i],
                }
            })
            .collect();

        let sample_len = input.day_types.len().min(7);
        DemandDiagnostics {
            days: input.days,
            weekday_of_day1: input.weekday0,
            day_type_sample: input.day_types[..sample_len].to_vec(),
            per_day_totals,
            total_need: self.total_need,
            warnings: self.warnings.clone(),
        }
    }
}

pub fn expand(input: &NormalisedInput, log: &mut LogBuffer) -> Result<DemandPlan, SolveError> {
    let carry_count = input.carry_count();
    let mut need = Vec::with_capacity(input.days as usize);
    let mut carry_applied = Vec::with_capacity(input.days as usize);
    let mut warnings = Vec::new();

    for (index, day_type) in input.day_types.iter().enumerate() {
        let date = index as u32 + 1;
        let row = input.need_template.get(day_type).ok_or_else(|| {
            SolveError::with_details(
                ErrorKind::InvalidField,
                "dayTypeByDate references an unknown day type",
                json!({ "day": date, "dayType": day_type }),
            )
        })?;
        let mut slots = *row;

        if let Some(strict) = input.strict_night {
            if let Some(v) = strict.late_evening {
                slots.set(Slot::LateEvening, v);
            }
            // Date 1's dawn is the prior-night carryover band; the override
            // starts on date 2.
            if date >= 2 {
                if let Some(v) = strict.dawn {
                    slots.set(Slot::Dawn, v);
                }
            }
            let mut evening = slots.get(Slot::Evening);
            if let Some(lo) = strict.evening_min {
                evening = evening.max(lo);
            }
            if let Some(hi) = strict.evening_max {
                evening = evening.min(hi);
            }
            slots.set(Slot::Evening, evening);
        }

        let mut applied = false;
        if date == 1 {
            let dawn = slots.get(Slot::Dawn);
            applied = carry_count > 0 && dawn > 0;
            slots.set(Slot::Dawn, dawn.saturating_sub(carry_count));
        }

        need.push(slots);
        carry_applied.push(applied);
    }

    let total_need: u32 = need.iter().map(SlotNeeds::total).sum();
    if input.days > 0 && total_need == 0 {
        warnings.push("total demand is zero; all staff will remain off duty".to_string());
    }

    let plan = DemandPlan { need, carry_applied, carry_count, total_need, warnings };
    log_demand(&plan, input, log);
    Ok(plan)
}

fn log_demand(plan: &DemandPlan, input: &NormalisedInput, log: &mut LogBuffer) {
    log.line(format!("[demand] days={} weekdayOfDay1={}", input.days, input.weekday0));
    let sample_len = input.day_types.len().min(7);
    if sample_len > 0 {
        log.line(format!("[demand] dayType sample={:?}", &input.day_types[..sample_len]));
    }
    for (index, needs) in plan.need.iter().take(5).enumerate() {
        let slots: Vec<String> = needs.iter().map(|(s, v)| format!("{}:{}", s.label(), v)).collect();
        log.line(format!(
            "[demand] day {} total={} slots={{{}}}",
            index + 1,
            needs.total(),
            slots.join(", ")
        ));
    }
    log.line(format!("[demand] totalNeed={}", plan.total_need));
    for warning in &plan.warnings {
        log.line(format!("[demand] warning: {}", warning));
    }
}
