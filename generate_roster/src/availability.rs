use std::collections::BTreeMap;

use roster_core::output::AvailabilityWarning;
use roster_core::roster::{NormalisedInput, Person};
use roster_core::shifts::{shift_def, Slot};
use roster_core::weekday;

use crate::demand::DemandPlan;
use crate::logbuf::LogBuffer;

/// How many people could possibly cover each (date, slot). Purely
/// diagnostic: demand above this ceiling is reported, never enforced.
#[derive(Debug, Clone)]
pub struct AvailabilityReport {
    pub per_day: Vec<[u32; 6]>,
    pub warnings: Vec<AvailabilityWarning>,
}

impl AvailabilityReport {
    pub fn available(&self, date: u32, slot: Slot) -> u32 {
        self.per_day[(date - 1) as usize][slot.index()]
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Availability keyed by stringified date, as the output document wants.
    pub fn to_output(&self) -> BTreeMap<String, BTreeMap<String, u32>> {
        self.per_day
            .iter()
            .enumerate()
            .map(|(i, counts)| {
                let slots = Slot::ALL
                    .iter()
                    .map(|s| (s.label().to_string(), counts[s.index()]))
                    .collect();
                ((i as u32 + 1).to_string(), slots)
            })
            .collect()
    }
}

pub fn analyse(
    input: &NormalisedInput,
    plan: &DemandPlan,
    log: &mut LogBuffer,
) -> AvailabilityReport {
    let mut per_day = Vec::with_capacity(input.days as usize);
    for date in 1..=input.days {
        let mut counts = [0u32; 6];
        for slot in Slot::ALL {
            // Dawn of date d is staffed by night shifts that started on
            // date d-1; date 1's dawn has no in-horizon supplier.
            let supply_date = match slot {
                Slot::Dawn if date == 1 => None,
                Slot::Dawn => Some(date - 1),
                _ => Some(date),
            };
            let Some(supply_date) = supply_date else { continue };
            let wd = weekday::weekday_of(input.weekday0, supply_date);
            counts[slot.index()] = input
                .people
                .iter()
                .filter(|p| could_cover(p, slot, wd, supply_date))
                .count() as u32;
        }
        per_day.push(counts);
    }

    let mut warnings = Vec::new();
    for date in 1..=input.days {
        for slot in Slot::ALL {
            let need = plan.need_of(date, slot);
            let available = per_day[(date - 1) as usize][slot.index()];
            if need > 0 && available < need {
                warnings.push(AvailabilityWarning {
                    date,
                    slot: slot.label().to_string(),
                    need,
                    available,
                });
            }
        }
    }

    if warnings.is_empty() {
        log.line("[availability] every slot's demand is within the availability ceiling");
    } else {
        log.line(format!(
            "[availability] {} slot(s) demand more staff than could ever be assigned",
            warnings.len()
        ));
        for w in &warnings {
            log.line(format!(
                "[availability] day {} slot {}: need {} available {}",
                w.date, w.slot, w.need, w.available
            ));
        }
    }

    AvailabilityReport { per_day, warnings }
}

fn could_cover(person: &Person, slot: Slot, wd: u8, date: u32) -> bool {
    if person.fixed_off_weekdays.contains(&wd) || person.unavailable_dates.contains(&date) {
        return false;
    }
    person.can_work.iter().any(|code| shift_def(*code).covers(slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand;
    use crate::validate::validate;
    use roster_core::input::InputDoc;
    use serde_json::{json, Value};

    fn analyse_of(raw: Value) -> AvailabilityReport {
        let doc: InputDoc = serde_json::from_value(raw).unwrap();
        let validated = validate(doc).unwrap();
        let plan = demand::expand(&validated.input, &mut LogBuffer::silent()).unwrap();
        analyse(&validated.input, &plan, &mut LogBuffer::silent())
    }

    #[test]
    fn counts_only_people_whose_shifts_cover_the_slot() {
        let report = analyse_of(json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["A"],
            "needTemplate": { "A": { "7-9": 1, "9-15": 1 } },
            "people": [
                { "id": "early", "canWork": ["EA"] },
                { "id": "late", "canWork": ["LA"] }
            ]
        }));
        assert_eq!(report.available(1, Slot::Morning), 1);
        assert_eq!(report.available(1, Slot::Daytime), 1);
        assert_eq!(report.available(1, Slot::Afternoon), 1);
        assert_eq!(report.available(1, Slot::Evening), 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn fixed_off_and_unavailable_dates_reduce_availability() {
        let report = analyse_of(json!({
            "days": 2,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["A", "A"],
            "needTemplate": { "A": { "9-15": 1 } },
            "people": [
                { "id": "sundays-off", "canWork": ["DA"], "fixedOffWeekdays": [0] },
                { "id": "away-day-2", "canWork": ["DA"], "unavailableDates": [2] }
            ]
        }));
        // Day 1 is a Sunday: only the second person is available.
        assert_eq!(report.available(1, Slot::Daytime), 1);
        assert_eq!(report.available(2, Slot::Daytime), 1);
    }

    #[test]
    fn shortfall_against_need_is_warned() {
        let report = analyse_of(json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["A"],
            "needTemplate": { "A": { "9-15": 2 } },
            "people": [{ "id": "only-one", "canWork": ["DA"] }]
        }));
        assert_eq!(
            report.warnings,
            vec![AvailabilityWarning {
                date: 1,
                slot: "9-15".to_string(),
                need: 2,
                available: 1
            }]
        );
    }

    #[test]
    fn first_dawn_has_no_in_horizon_supplier() {
        let report = analyse_of(json!({
            "days": 2,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["A", "A"],
            "needTemplate": { "A": { "0-7": 1 } },
            "people": [{ "id": "night-owl", "canWork": ["NB"] }]
        }));
        assert_eq!(report.available(1, Slot::Dawn), 0);
        assert_eq!(report.available(2, Slot::Dawn), 1);
        // Day 1's dawn need survives (no carry), so it is warned about.
        assert!(report
            .warnings
            .iter()
            .any(|w| w.date == 1 && w.slot == "0-7" && w.available == 0));
    }
}
