use std::collections::BTreeMap;

use roster_core::output::VarCounts;
use roster_core::roster::NormalisedInput;
use roster_core::shifts::{shift_def, ShiftCode, Slot};
use roster_core::weekday;

use crate::compiler::{constraints, objective};
use crate::demand::DemandPlan;
use crate::logbuf::LogBuffer;
use crate::solver::linear::{LinearModel, VarId};

/// Builds the decision-variable model for one roster. Variables are
/// allocated in person / date / catalogue order so the model, and therefore
/// the solve, is deterministic for a given input.
pub struct RosterCompiler<'a> {
    pub input: &'a NormalisedInput,
    pub plan: &'a DemandPlan,
    pub model: LinearModel,
    /// x[person index, date, shift] = 1 when that shift is worked.
    pub x: BTreeMap<(usize, u32, ShiftCode), VarId>,
    /// work[person index, date] = Σ_s x, so sequence rules stay small.
    pub work: BTreeMap<(usize, u32), VarId>,
    pub shortage: BTreeMap<(u32, Slot), VarId>,
    pub over: BTreeMap<(u32, Slot), VarId>,
    pub violate_off: BTreeMap<(usize, u32), VarId>,
    pub warnings: Vec<String>,
}

impl<'a> RosterCompiler<'a> {
    pub fn new(input: &'a NormalisedInput, plan: &'a DemandPlan) -> Self {
        RosterCompiler {
            input,
            plan,
            model: LinearModel::new(),
            x: BTreeMap::new(),
            work: BTreeMap::new(),
            shortage: BTreeMap::new(),
            over: BTreeMap::new(),
            violate_off: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    pub fn compile(&mut self, log: &mut LogBuffer) {
        self.allocate_assignment_vars();
        constraints::assignment::apply(self);
        constraints::coverage::apply(self);
        constraints::limits::apply(self);
        constraints::rest::apply(self);
        constraints::wishes::apply(self);
        objective::apply(self);

        let counts = self.var_counts();
        log.line(format!(
            "[model] x={} shortage={} over={} violateOff={} constraints={}",
            counts.x,
            counts.shortage,
            counts.over,
            counts.violate_off,
            self.model.constraints().len()
        ));
        if counts.x == 0 {
            log.line("[model] no assignment variables were created; only shortage remains");
        }
    }

    fn allocate_assignment_vars(&mut self) {
        for (pi, person) in self.input.people.iter().enumerate() {
            if person.can_work.is_empty() {
                continue;
            }
            for date in 1..=self.input.days {
                for code in &person.can_work {
                    let var = self
                        .model
                        .add_bool(format!("x_d{}_i{}_{}", date, pi, code));
                    self.x.insert((pi, date, *code), var);
                }
                let work = self.model.add_bool(format!("work_d{}_i{}", date, pi));
                self.work.insert((pi, date), work);
            }
        }
    }

    pub fn days(&self) -> u32 {
        self.input.days
    }

    pub fn weekday_of(&self, date: u32) -> u8 {
        weekday::weekday_of(self.input.weekday0, date)
    }

    pub fn work_var(&self, pi: usize, date: u32) -> Option<VarId> {
        self.work.get(&(pi, date)).copied()
    }

    pub fn x_var(&self, pi: usize, date: u32, code: ShiftCode) -> Option<VarId> {
        self.x.get(&(pi, date, code)).copied()
    }

    /// All of one person's assignment variables for a date, catalogue order.
    pub fn person_x_vars(&self, pi: usize, date: u32) -> Vec<VarId> {
        self.input.people[pi]
            .can_work
            .iter()
            .filter_map(|code| self.x_var(pi, date, *code))
            .collect()
    }

    /// The assignment variables feeding a (date, slot) headcount. Dawn of
    /// date d draws on midnight-wrapping nights assigned on date d-1; date
    /// 1's dawn has no in-horizon terms because the carry already reduced
    /// its need.
    pub fn coverage_terms(&self, date: u32, slot: Slot) -> Vec<(i64, VarId)> {
        let supply_date = match slot {
            Slot::Dawn if date == 1 => return Vec::new(),
            Slot::Dawn => date - 1,
            _ => date,
        };
        let mut terms = Vec::new();
        for (pi, person) in self.input.people.iter().enumerate() {
            for code in &person.can_work {
                let def = shift_def(*code);
                let contributes = match slot {
                    Slot::Dawn => def.wraps_midnight() && def.covers(Slot::Dawn),
                    _ => def.covers(slot),
                };
                if contributes {
                    if let Some(var) = self.x_var(pi, supply_date, *code) {
                        terms.push((1, var));
                    }
                }
            }
        }
        terms
    }

    /// Horizon dates grouped into weeks that break where the weekday wraps
    /// to 0. The first and last group may be partial.
    pub fn weeks(&self) -> Vec<(u32, u32)> {
        let mut weeks = Vec::new();
        let mut start = 1;
        for date in 1..=self.input.days {
            if self.weekday_of(date) == 0 && date != 1 {
                weeks.push((start, date - 1));
                start = date;
            }
        }
        weeks.push((start, self.input.days));
        weeks
    }

    pub fn var_counts(&self) -> VarCounts {
        VarCounts {
            x: self.x.len(),
            shortage: self.shortage.len(),
            over: self.over.len(),
            violate_off: self.violate_off.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand;
    use crate::solver::milp::MilpBackend;
    use crate::solver::{SolveStatus, SolverBackend};
    use crate::validate::validate;
    use roster_core::input::InputDoc;
    use serde_json::{json, Value};

    fn compiled(raw: Value) -> (NormalisedInput, DemandPlan) {
        let doc: InputDoc = serde_json::from_value(raw).unwrap();
        let validated = validate(doc).unwrap();
        let input = validated.input;
        let plan = demand::expand(&input, &mut LogBuffer::silent()).unwrap();
        (input, plan)
    }

    #[test]
    fn variable_counts_follow_can_work_and_requests() {
        let (input, plan) = compiled(json!({
            "days": 3,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["A", "A", "A"],
            "needTemplate": { "A": { "9-15": 1 } },
            "people": [
                { "id": "p1", "canWork": ["DA", "EA"], "requestedOffDates": [2, 3] },
                { "id": "p2", "canWork": ["NB"] },
                { "id": "p3", "canWork": [] }
            ]
        }));
        let mut c = RosterCompiler::new(&input, &plan);
        c.compile(&mut LogBuffer::silent());
        let counts = c.var_counts();
        // p1: 2 shifts x 3 days, p2: 1 x 3, p3: none.
        assert_eq!(counts.x, 9);
        assert_eq!(counts.shortage, 18);
        assert_eq!(counts.over, 18);
        assert_eq!(counts.violate_off, 2);
    }

    #[test]
    fn weeks_split_where_the_weekday_wraps() {
        let (input, plan) = compiled(json!({
            "days": 10,
            "weekdayOfDay1": 5,
            "dayTypeByDate": ["A","A","A","A","A","A","A","A","A","A"],
            "needTemplate": { "A": { "9-15": 1 } },
            "people": [{ "id": "p1", "canWork": ["DA"] }]
        }));
        let c = RosterCompiler::new(&input, &plan);
        // Day 1 is a Friday; Sunday falls on day 3 and day 10.
        assert_eq!(c.weeks(), vec![(1, 2), (3, 9), (10, 10)]);
    }

    #[test]
    fn dawn_coverage_draws_on_the_previous_date() {
        let (input, plan) = compiled(json!({
            "days": 2,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["A", "A"],
            "needTemplate": { "A": { "0-7": 1 } },
            "people": [{ "id": "night", "canWork": ["NB", "LA"] }]
        }));
        let mut c = RosterCompiler::new(&input, &plan);
        c.compile(&mut LogBuffer::silent());

        assert!(c.coverage_terms(1, Slot::Dawn).is_empty());
        let day2 = c.coverage_terms(2, Slot::Dawn);
        assert_eq!(day2.len(), 1);
        assert_eq!(day2[0].1, c.x_var(0, 1, ShiftCode::NB).unwrap());
    }

    #[test]
    fn strict_night_headcount_is_a_hard_equality() {
        let (input, plan) = compiled(json!({
            "days": 1,
            "weekdayOfDay1": 0,
            "dayTypeByDate": ["A"],
            "needTemplate": { "A": { "21-23": 0 } },
            "strictNight": { "21-23": 2 },
            "people": [
                { "id": "n1", "canWork": ["NB"] },
                { "id": "n2", "canWork": ["NC"] }
            ]
        }));
        let mut c = RosterCompiler::new(&input, &plan);
        c.compile(&mut LogBuffer::silent());

        // Despite the zero objective pull, both nights must be assigned.
        let outcome = MilpBackend.solve(&c.model, 5.0, &mut LogBuffer::silent());
        assert_eq!(outcome.status, SolveStatus::Optimal);
        let nb = c.x_var(0, 1, ShiftCode::NB).unwrap();
        let nc = c.x_var(1, 1, ShiftCode::NC).unwrap();
        assert_eq!(outcome.value(nb) + outcome.value(nc), 2);
    }

    #[test]
    fn partial_weeks_with_weekly_caps_leave_a_warning() {
        let (input, plan) = compiled(json!({
            "days": 10,
            "weekdayOfDay1": 5,
            "dayTypeByDate": ["A","A","A","A","A","A","A","A","A","A"],
            "needTemplate": { "A": { "9-15": 1 } },
            "people": [{ "id": "p1", "canWork": ["DA"], "weeklyMax": 4 }]
        }));
        let mut c = RosterCompiler::new(&input, &plan);
        c.compile(&mut LogBuffer::silent());
        assert!(c.warnings.iter().any(|w| w.contains("partial weeks")));
    }
}
