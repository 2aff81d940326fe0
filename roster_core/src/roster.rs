use std::collections::{BTreeMap, BTreeSet};

use crate::shifts::{ShiftCode, Slot};

/// Per-slot headcount demand for one day type (or one expanded date).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotNeeds([u32; 6]);

impl SlotNeeds {
    pub fn get(&self, slot: Slot) -> u32 {
        self.0[slot.index()]
    }

    pub fn set(&mut self, slot: Slot, value: u32) {
        self.0[slot.index()] = value;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, u32)> + '_ {
        Slot::ALL.iter().map(move |s| (*s, self.get(*s)))
    }
}

/// A staff member after validation: ids verified unique, weekday and date
/// sets sanitised, limits normalised (0 = unbounded), wish-offs merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    /// Workable shift codes in catalogue order. May be empty; such a person
    /// gets no decision variables.
    pub can_work: Vec<ShiftCode>,
    pub fixed_off_weekdays: BTreeSet<u8>,
    pub weekly_min: u32,
    pub weekly_max: u32,
    pub monthly_min: u32,
    pub monthly_max: u32,
    pub consec_max: u32,
    pub unavailable_dates: BTreeSet<u32>,
    pub requested_off_dates: BTreeSet<u32>,
    /// Per-person wish-off penalty, kept only when strictly positive.
    pub requested_off_weight: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightRest {
    pub na: u32,
    pub nb: u32,
    pub nc: u32,
}

impl Default for NightRest {
    fn default() -> Self {
        NightRest { na: 2, nb: 1, nc: 1 }
    }
}

impl NightRest {
    pub fn for_code(&self, code: ShiftCode) -> Option<u32> {
        match code {
            ShiftCode::NA => Some(self.na),
            ShiftCode::NB => Some(self.nb),
            ShiftCode::NC => Some(self.nc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    pub no_early_after_day_ab: bool,
    pub night_rest: NightRest,
}

/// Objective weights. Non-negative; the reserved balance and fill weights
/// default to zero and only contribute terms when set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub shortage: i64,
    pub overstaff: i64,
    pub requested_off: i64,
    pub balance_workdays: i64,
    pub fill_day_bonus: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            shortage: 1000,
            overstaff: 5,
            requested_off: 20,
            balance_workdays: 0,
            fill_day_bonus: 0,
        }
    }
}

/// Mandatory night-band headcounts. Present keys override the template;
/// absent keys leave it untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictNight {
    pub late_evening: Option<u32>,
    pub dawn: Option<u32>,
    pub evening_min: Option<u32>,
    pub evening_max: Option<u32>,
}

/// Staff who worked each night code on the final date of the previous month.
/// Ids are validated against the people list.
pub type NightCarry = BTreeMap<ShiftCode, Vec<String>>;

/// The fully normalised solve request. Downstream stages are total over this
/// representation; nothing loosely typed survives past validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalisedInput {
    pub days: u32,
    pub weekday0: u8,
    pub day_types: Vec<String>,
    pub need_template: BTreeMap<String, SlotNeeds>,
    pub strict_night: Option<StrictNight>,
    pub night_carry: NightCarry,
    pub people: Vec<Person>,
    pub rules: Rules,
    pub weights: Weights,
}

impl NormalisedInput {
    pub fn people_order(&self) -> Vec<String> {
        self.people.iter().map(|p| p.id.clone()).collect()
    }

    pub fn carry_count(&self) -> u32 {
        self.night_carry.values().map(|ids| ids.len() as u32).sum()
    }
}
