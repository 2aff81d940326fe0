use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde_json::{json, Value};

use roster_core::input::{InputDoc, PersonDoc};
use roster_core::roster::{
    NightCarry, NormalisedInput, Person, Rules, SlotNeeds, StrictNight, Weights,
};
use roster_core::shifts::{shift_def, ShiftCode, Slot};
use roster_core::weekday;

use crate::error::{ErrorKind, SolveError};

/// Validation output: the strict input plus the warnings accumulated while
/// normalising. Warnings never abort a solve.
#[derive(Debug, Clone)]
pub struct Validated {
    pub input: NormalisedInput,
    pub warnings: Vec<String>,
}

pub fn validate(doc: InputDoc) -> Result<Validated, SolveError> {
    let mut warnings = Vec::new();

    let days = match doc.days {
        Some(d) if d >= 0 => d as u32,
        Some(d) => {
            return Err(SolveError::with_details(
                ErrorKind::InvalidField,
                "days must be a non-negative integer",
                json!({ "days": d }),
            ))
        }
        None => {
            return Err(SolveError::new(
                ErrorKind::InvalidSchema,
                "missing required field: days",
            ))
        }
    };
    if days > 366 {
        return Err(SolveError::with_details(
            ErrorKind::InvalidField,
            "days is beyond any single-month horizon",
            json!({ "days": days }),
        ));
    }
    if days > 0 && !(28..=31).contains(&days) {
        warnings.push(format!("days={} is outside the usual 28-31 month length", days));
    }

    let weekday0 = match doc.weekday_of_day1 {
        Some(w) if (0..=6).contains(&w) => w as u8,
        Some(w) => {
            return Err(SolveError::with_details(
                ErrorKind::InvalidField,
                "weekdayOfDay1 must be an integer between 0 and 6",
                json!({ "weekdayOfDay1": w }),
            ))
        }
        None => {
            return Err(SolveError::new(
                ErrorKind::InvalidSchema,
                "missing required field: weekdayOfDay1",
            ))
        }
    };

    cross_check_calendar(doc.year, doc.month, weekday0, days, &mut warnings)?;

    let person_docs = doc.people.as_deref().ok_or_else(|| {
        SolveError::new(ErrorKind::InvalidSchema, "missing required field: people")
    })?;
    let mut people = parse_people(person_docs, days, &mut warnings)?;
    merge_wish_offs(doc.wish_offs.as_ref(), &mut people, days, &mut warnings);

    let rules = parse_rules(doc.rules.as_ref(), &mut warnings);
    let weights = parse_weights(doc.weights.as_ref(), &mut warnings);

    // Empty horizon: nothing to roster, so the calendar sections are not
    // required and no model will be built.
    if days == 0 {
        return Ok(Validated {
            input: NormalisedInput {
                days: 0,
                weekday0,
                day_types: Vec::new(),
                need_template: BTreeMap::new(),
                strict_night: None,
                night_carry: NightCarry::new(),
                people,
                rules,
                weights,
            },
            warnings,
        });
    }

    check_shift_definitions(doc.shifts.as_ref())?;

    let day_types = parse_day_types(
        doc.day_type_by_date.as_ref().ok_or_else(|| {
            SolveError::new(ErrorKind::InvalidSchema, "missing required field: dayTypeByDate")
        })?,
        days,
    )?;

    let need_template = parse_need_template(
        doc.need_template.as_ref().ok_or_else(|| {
            SolveError::new(ErrorKind::InvalidSchema, "missing required field: needTemplate")
        })?,
        &mut warnings,
    )?;

    let strict_night = match doc.strict_night.as_ref() {
        Some(Value::Null) | None => None,
        Some(v) => Some(parse_strict_night(v, &mut warnings)?),
    };

    let night_carry =
        parse_night_carry(doc.previous_month_night_carry.as_ref(), &people, &mut warnings);

    Ok(Validated {
        input: NormalisedInput {
            days,
            weekday0,
            day_types,
            need_template,
            strict_night,
            night_carry,
            people,
            rules,
            weights,
        },
        warnings,
    })
}

fn cross_check_calendar(
    year: Option<i64>,
    month: Option<i64>,
    weekday0: u8,
    days: u32,
    warnings: &mut Vec<String>,
) -> Result<(), SolveError> {
    if let Some(y) = year {
        if !(1970..=2100).contains(&y) {
            return Err(SolveError::with_details(
                ErrorKind::InvalidField,
                "year must lie between 1970 and 2100",
                json!({ "year": y }),
            ));
        }
    }
    if let Some(m) = month {
        if !(1..=12).contains(&m) {
            return Err(SolveError::with_details(
                ErrorKind::InvalidField,
                "month must lie between 1 and 12",
                json!({ "month": m }),
            ));
        }
    }
    let (Some(y), Some(m)) = (year, month) else { return Ok(()) };

    let first = NaiveDate::from_ymd_opt(y as i32, m as u32, 1).ok_or_else(|| {
        SolveError::with_details(
            ErrorKind::InvalidField,
            "year/month do not form a valid calendar month",
            json!({ "year": y, "month": m }),
        )
    })?;
    let actual = first.weekday().num_days_from_sunday() as u8;
    if actual != weekday0 {
        return Err(SolveError::with_details(
            ErrorKind::InvalidField,
            "weekdayOfDay1 does not match the asserted year/month",
            json!({ "year": y, "month": m, "weekdayOfDay1": weekday0, "expected": actual }),
        ));
    }

    let (ny, nm) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    if let Some(next_first) = NaiveDate::from_ymd_opt(ny as i32, nm as u32, 1) {
        let month_len = next_first.signed_duration_since(first).num_days();
        if days > 0 && i64::from(days) != month_len {
            warnings.push(format!(
                "days={} does not match the length of {}-{:02} ({} days)",
                days, y, m, month_len
            ));
        }
    }
    Ok(())
}

/// A supplied `shifts` array must agree with the built-in catalogue; a
/// missing or empty array simply means the catalogue applies.
fn check_shift_definitions(value: Option<&Value>) -> Result<(), SolveError> {
    let entries = match value {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(entries)) if entries.is_empty() => return Ok(()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(SolveError::with_details(
                ErrorKind::InvalidField,
                "shifts must be an array of catalogue entries",
                json!({ "shifts": other }),
            ))
        }
    };

    let mut provided = BTreeSet::new();
    let mut unknown = Vec::new();
    let mut mismatched = Vec::new();
    for entry in entries {
        let Some(obj) = entry.as_object() else { continue };
        let Some(code_str) = obj.get("code").and_then(Value::as_str) else { continue };
        let Some(code) = ShiftCode::parse(code_str) else {
            unknown.push(code_str.to_string());
            continue;
        };
        provided.insert(code);
        let def = shift_def(code);
        let start = obj.get("start").and_then(Value::as_i64);
        let end = obj.get("end").and_then(Value::as_i64);
        if start != Some(def.start as i64) || end != Some(def.end as i64) {
            mismatched.push(json!({
                "code": code.as_str(),
                "expected": { "start": def.start, "end": def.end },
                "actual": { "start": start, "end": end },
            }));
        }
    }
    let missing: Vec<&str> = ShiftCode::ALL
        .iter()
        .filter(|c| !provided.contains(c))
        .map(|c| c.as_str())
        .collect();

    if !unknown.is_empty() || !mismatched.is_empty() || !missing.is_empty() {
        return Err(SolveError::with_details(
            ErrorKind::CatalogueMismatch,
            "shift definitions do not match the solver catalogue",
            json!({ "unknown": unknown, "mismatched": mismatched, "missing": missing }),
        ));
    }
    Ok(())
}

fn parse_day_types(value: &Value, days: u32) -> Result<Vec<String>, SolveError> {
    match value {
        Value::Array(entries) => {
            if entries.len() != days as usize {
                return Err(SolveError::with_details(
                    ErrorKind::InconsistentDays,
                    "dayTypeByDate length does not match days",
                    json!({ "expected": days, "actual": entries.len() }),
                ));
            }
            let mut result = Vec::with_capacity(entries.len());
            for (index, entry) in entries.iter().enumerate() {
                match entry.as_str() {
                    Some(s) if !s.is_empty() => result.push(s.to_string()),
                    _ => {
                        return Err(SolveError::with_details(
                            ErrorKind::InvalidField,
                            "dayTypeByDate must contain non-empty strings",
                            json!({ "day": index + 1, "value": entry }),
                        ))
                    }
                }
            }
            Ok(result)
        }
        Value::Object(map) => {
            let mut result = Vec::with_capacity(days as usize);
            let mut missing = Vec::new();
            for day in 1..=days {
                match map.get(&day.to_string()).and_then(Value::as_str) {
                    Some(s) if !s.is_empty() => result.push(s.to_string()),
                    _ => missing.push(day),
                }
            }
            if !missing.is_empty() {
                return Err(SolveError::with_details(
                    ErrorKind::InvalidField,
                    "dayTypeByDate is missing entries",
                    json!({ "missingDays": missing }),
                ));
            }
            Ok(result)
        }
        other => Err(SolveError::with_details(
            ErrorKind::InvalidField,
            "dayTypeByDate must be an array or an object keyed by day",
            json!({ "dayTypeByDate": other }),
        )),
    }
}

const TEMPLATE_KEYS: [&str; 7] = ["7-9", "9-15", "16-18", "18-24", "18-21", "21-23", "0-7"];

fn parse_need_template(
    value: &Value,
    warnings: &mut Vec<String>,
) -> Result<BTreeMap<String, SlotNeeds>, SolveError> {
    let rows = value.as_object().filter(|m| !m.is_empty()).ok_or_else(|| {
        SolveError::new(ErrorKind::InvalidField, "needTemplate must be a non-empty object")
    })?;

    let mut template = BTreeMap::new();
    for (day_type, raw_slots) in rows {
        let slots = raw_slots.as_object().ok_or_else(|| {
            SolveError::with_details(
                ErrorKind::InvalidField,
                "each needTemplate entry must be an object of slot requirements",
                json!({ "dayType": day_type }),
            )
        })?;
        for key in slots.keys() {
            if !TEMPLATE_KEYS.contains(&key.as_str()) {
                warnings.push(format!(
                    "needTemplate '{}': ignoring unknown slot key '{}'",
                    day_type, key
                ));
            }
        }

        let need_of = |key: &str| as_non_negative(slots.get(key));
        let mut needs = SlotNeeds::default();
        needs.set(Slot::Morning, need_of("7-9"));
        needs.set(Slot::Daytime, need_of("9-15"));
        needs.set(Slot::Afternoon, need_of("16-18"));
        needs.set(Slot::Dawn, need_of("0-7"));

        let has_split = slots.contains_key("18-21") || slots.contains_key("21-23");
        if has_split {
            if slots.contains_key("18-24") {
                warnings.push(format!(
                    "needTemplate '{}': both 18-24 and split evening keys present; using the split keys",
                    day_type
                ));
            }
            needs.set(Slot::Evening, need_of("18-21"));
            needs.set(Slot::LateEvening, need_of("21-23"));
        } else {
            // Legacy combined band: the same headcount holds across both
            // evening slots.
            let combined = need_of("18-24");
            needs.set(Slot::Evening, combined);
            needs.set(Slot::LateEvening, combined);
        }
        template.insert(day_type.clone(), needs);
    }
    Ok(template)
}

fn parse_strict_night(value: &Value, warnings: &mut Vec<String>) -> Result<StrictNight, SolveError> {
    let map = value.as_object().ok_or_else(|| {
        SolveError::new(ErrorKind::InvalidField, "strictNight must be an object")
    })?;
    let mut strict = StrictNight::default();
    for (key, raw) in map {
        let parsed = match raw.as_i64() {
            Some(v) if v >= 0 => Some(v as u32),
            Some(v) => {
                warnings.push(format!("strictNight '{}': clamping negative value {} to 0", key, v));
                Some(0)
            }
            None => {
                warnings.push(format!("strictNight '{}': ignoring non-integer value", key));
                None
            }
        };
        match key.as_str() {
            "21-23" => strict.late_evening = parsed,
            "0-7" => strict.dawn = parsed,
            "18-21_min" => strict.evening_min = parsed,
            "18-21_max" => strict.evening_max = parsed,
            other => warnings.push(format!("strictNight: ignoring unknown key '{}'", other)),
        }
    }
    if let (Some(lo), Some(hi)) = (strict.evening_min, strict.evening_max) {
        if lo > hi {
            return Err(SolveError::with_details(
                ErrorKind::InvalidField,
                "strictNight 18-21_min exceeds 18-21_max",
                json!({ "18-21_min": lo, "18-21_max": hi }),
            ));
        }
    }
    Ok(strict)
}

fn parse_people(
    docs: &[PersonDoc],
    days: u32,
    warnings: &mut Vec<String>,
) -> Result<Vec<Person>, SolveError> {
    let mut people = Vec::with_capacity(docs.len());
    let mut seen = BTreeSet::new();
    let mut invalid_codes = Vec::new();

    for (index, doc) in docs.iter().enumerate() {
        let id = doc
            .id
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                SolveError::with_details(
                    ErrorKind::InvalidField,
                    "every person needs a non-empty string id",
                    json!({ "index": index }),
                )
            })?
            .to_string();
        if !seen.insert(id.clone()) {
            return Err(SolveError::with_details(
                ErrorKind::DuplicateId,
                "people contains a duplicate id",
                json!({ "staffId": id }),
            ));
        }

        let mut can_set = BTreeSet::new();
        match doc.can_work.as_ref() {
            Some(Value::Array(entries)) => {
                let mut bad = Vec::new();
                for entry in entries {
                    match entry.as_str().and_then(ShiftCode::parse) {
                        Some(code) => {
                            can_set.insert(code);
                        }
                        None => bad.push(entry.clone()),
                    }
                }
                if !bad.is_empty() {
                    invalid_codes.push(json!({
                        "index": index,
                        "staffId": id.clone(),
                        "invalidCodes": bad,
                    }));
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                warnings.push(format!("staff '{}': canWork is not an array ({})", id, other));
            }
        }
        let can_work: Vec<ShiftCode> =
            ShiftCode::ALL.iter().copied().filter(|c| can_set.contains(c)).collect();
        if can_work.is_empty() {
            warnings.push(format!(
                "staff '{}' has no workable shifts and will stay off duty",
                id
            ));
        }

        let mut fixed_off = BTreeSet::new();
        match doc.fixed_off_weekdays.as_ref() {
            Some(Value::Array(entries)) => {
                for entry in entries {
                    match weekday::normalize(entry) {
                        Some(wd) => {
                            fixed_off.insert(wd);
                        }
                        None => warnings.push(format!(
                            "staff '{}': dropping unrecognised fixedOffWeekdays entry {}",
                            id, entry
                        )),
                    }
                }
            }
            Some(Value::Null) | None => {}
            Some(_) => {
                warnings.push(format!("staff '{}': fixedOffWeekdays is not an array", id));
            }
        }

        let requested_off_weight = match doc.requested_off_weight.as_ref().and_then(as_i64) {
            Some(w) if w > 0 => Some(w),
            Some(w) => {
                warnings.push(format!(
                    "staff '{}': ignoring non-positive requestedOffWeight {}",
                    id, w
                ));
                None
            }
            None => None,
        };

        people.push(Person {
            can_work,
            fixed_off_weekdays: fixed_off,
            weekly_min: normalize_limit(doc.weekly_min.as_ref(), 0),
            weekly_max: normalize_limit(doc.weekly_max.as_ref(), 0),
            monthly_min: normalize_limit(doc.monthly_min.as_ref(), 0),
            monthly_max: normalize_limit(doc.monthly_max.as_ref(), 0),
            consec_max: normalize_limit(doc.consec_max.as_ref(), 5),
            unavailable_dates: sanitize_day_set(
                doc.unavailable_dates.as_ref(),
                days,
                &format!("staff '{}' unavailableDates", id),
                warnings,
            ),
            requested_off_dates: sanitize_day_set(
                doc.requested_off_dates.as_ref(),
                days,
                &format!("staff '{}' requestedOffDates", id),
                warnings,
            ),
            requested_off_weight,
            id,
        });
    }

    if !invalid_codes.is_empty() {
        return Err(SolveError::with_details(
            ErrorKind::CatalogueMismatch,
            "some people reference unknown shift codes",
            json!({ "invalidPeople": invalid_codes }),
        ));
    }
    Ok(people)
}

fn merge_wish_offs(
    value: Option<&Value>,
    people: &mut [Person],
    days: u32,
    warnings: &mut Vec<String>,
) {
    let Some(map) = value.and_then(Value::as_object) else { return };
    for (staff_id, raw_days) in map {
        let Some(person) = people.iter_mut().find(|p| &p.id == staff_id) else {
            warnings.push(format!("wishOffs: ignoring unknown staff id '{}'", staff_id));
            continue;
        };
        let wished = sanitize_day_set(
            Some(raw_days),
            days,
            &format!("wishOffs['{}']", staff_id),
            warnings,
        );
        person.requested_off_dates.extend(wished);
    }
}

fn parse_night_carry(
    value: Option<&Value>,
    people: &[Person],
    warnings: &mut Vec<String>,
) -> NightCarry {
    let mut carry = NightCarry::new();
    let Some(map) = value.and_then(Value::as_object) else { return carry };
    let known: BTreeSet<&str> = people.iter().map(|p| p.id.as_str()).collect();

    for (key, raw_ids) in map {
        let Some(code) = ShiftCode::parse(key).filter(|c| c.is_night()) else {
            warnings.push(format!(
                "previousMonthNightCarry: ignoring non-night key '{}'",
                key
            ));
            continue;
        };
        let mut ids = Vec::new();
        match raw_ids {
            Value::Array(entries) => {
                for entry in entries {
                    match entry.as_str() {
                        Some(id) if known.contains(id) => ids.push(id.to_string()),
                        Some(id) => warnings.push(format!(
                            "previousMonthNightCarry[{}]: unknown staff id '{}'",
                            key, id
                        )),
                        None => warnings.push(format!(
                            "previousMonthNightCarry[{}]: ignoring non-string entry",
                            key
                        )),
                    }
                }
            }
            _ => warnings.push(format!(
                "previousMonthNightCarry[{}]: expected an array of staff ids",
                key
            )),
        }
        if !ids.is_empty() {
            carry.insert(code, ids);
        }
    }
    carry
}

fn parse_rules(value: Option<&Value>, warnings: &mut Vec<String>) -> Rules {
    let mut rules = Rules::default();
    let Some(map) = value.and_then(Value::as_object) else { return rules };

    for (key, raw) in map {
        match key.as_str() {
            "noEarlyAfterDayAB" => match raw.as_bool() {
                Some(flag) => rules.no_early_after_day_ab = flag,
                None => warnings.push("rules.noEarlyAfterDayAB must be a boolean".to_string()),
            },
            "nightRest" => {
                let Some(rest_map) = raw.as_object() else {
                    warnings.push("rules.nightRest must be an object".to_string());
                    continue;
                };
                for (code_key, rest_raw) in rest_map {
                    let Some(code) = ShiftCode::parse(code_key).filter(|c| c.is_night()) else {
                        warnings
                            .push(format!("rules.nightRest: ignoring key '{}'", code_key));
                        continue;
                    };
                    let Some(rest) = as_i64(rest_raw) else {
                        warnings.push(format!(
                            "rules.nightRest.{}: ignoring non-integer value",
                            code_key
                        ));
                        continue;
                    };
                    let rest = rest.max(0) as u32;
                    match code {
                        ShiftCode::NA => rules.night_rest.na = rest,
                        ShiftCode::NB => rules.night_rest.nb = rest,
                        ShiftCode::NC => rules.night_rest.nc = rest,
                        _ => {}
                    }
                }
            }
            other => warnings.push(format!("rules: ignoring unknown key '{}'", other)),
        }
    }
    rules
}

fn parse_weights(value: Option<&Value>, warnings: &mut Vec<String>) -> Weights {
    let mut weights = Weights::default();
    let Some(map) = value.and_then(Value::as_object) else { return weights };

    for (key, raw) in map {
        let Some(parsed) = as_i64(raw) else {
            warnings.push(format!("weights['{}']: ignoring non-numeric value", key));
            continue;
        };
        let parsed = if parsed < 0 {
            warnings.push(format!("weights['{}']: clamping negative value {} to 0", key, parsed));
            0
        } else {
            parsed
        };
        match key.to_ascii_lowercase().as_str() {
            "w_shortage" => weights.shortage = parsed,
            "w_overstaff_gt_need_plus1" => weights.overstaff = parsed,
            "w_requested_off_violation" | "w_wish_off_violation" => {
                weights.requested_off = parsed
            }
            "w_balance_workdays" => weights.balance_workdays = parsed,
            "w_fill_day_bonus" => weights.fill_day_bonus = parsed,
            other => warnings.push(format!("weights: ignoring unrecognised key '{}'", other)),
        }
    }
    weights
}

fn as_i64(value: &Value) -> Option<i64> {
    if value.is_boolean() {
        return None;
    }
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

fn as_non_negative(value: Option<&Value>) -> u32 {
    value.and_then(as_i64).filter(|v| *v >= 0).map(|v| v as u32).unwrap_or(0)
}

fn normalize_limit(value: Option<&Value>, default: u32) -> u32 {
    match value {
        None | Some(Value::Null) => default,
        Some(v) => match as_i64(v) {
            Some(limit) if limit >= 0 => limit as u32,
            _ => 0,
        },
    }
}

/// Days drawn from loose JSON: numbers or numeric strings, deduplicated,
/// restricted to the horizon. Everything dropped leaves a warning behind.
fn sanitize_day_set(
    value: Option<&Value>,
    day_limit: u32,
    what: &str,
    warnings: &mut Vec<String>,
) -> BTreeSet<u32> {
    let mut result = BTreeSet::new();
    let Some(entries) = value.and_then(Value::as_array) else { return result };
    for entry in entries {
        let day = match entry {
            Value::Bool(_) => continue,
            Value::Number(_) => as_i64(entry),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        match day {
            Some(d) if d >= 1 && d <= i64::from(day_limit) => {
                result.insert(d as u32);
            }
            Some(d) => warnings.push(format!("{}: dropping out-of-range day {}", what, d)),
            None => warnings.push(format!("{}: ignoring non-numeric entry {}", what, entry)),
        }
    }
    result
}

/// Rebuilds an input document from a normalised input. Re-validating the
/// result reproduces the same normalised input, which keeps validation a
/// fixed point over its own output.
pub fn normalised_to_doc(input: &NormalisedInput) -> InputDoc {
    let people = input
        .people
        .iter()
        .map(|p| PersonDoc {
            id: Some(json!(p.id)),
            can_work: Some(json!(p
                .can_work
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>())),
            fixed_off_weekdays: Some(json!(p.fixed_off_weekdays)),
            weekly_min: Some(json!(p.weekly_min)),
            weekly_max: Some(json!(p.weekly_max)),
            monthly_min: Some(json!(p.monthly_min)),
            monthly_max: Some(json!(p.monthly_max)),
            consec_max: Some(json!(p.consec_max)),
            unavailable_dates: Some(json!(p.unavailable_dates)),
            requested_off_dates: Some(json!(p.requested_off_dates)),
            requested_off_weight: p.requested_off_weight.map(|w| json!(w)),
        })
        .collect();

    let mut template = serde_json::Map::new();
    for (day_type, needs) in &input.need_template {
        let mut row = serde_json::Map::new();
        for (slot, value) in needs.iter() {
            row.insert(slot.label().to_string(), json!(value));
        }
        template.insert(day_type.clone(), Value::Object(row));
    }

    let strict_night = input.strict_night.map(|s| {
        let mut map = serde_json::Map::new();
        if let Some(v) = s.late_evening {
            map.insert("21-23".to_string(), json!(v));
        }
        if let Some(v) = s.dawn {
            map.insert("0-7".to_string(), json!(v));
        }
        if let Some(v) = s.evening_min {
            map.insert("18-21_min".to_string(), json!(v));
        }
        if let Some(v) = s.evening_max {
            map.insert("18-21_max".to_string(), json!(v));
        }
        Value::Object(map)
    });

    let mut carry = serde_json::Map::new();
    for (code, ids) in &input.night_carry {
        carry.insert(code.as_str().to_string(), json!(ids));
    }

    InputDoc {
        year: None,
        month: None,
        days: Some(i64::from(input.days)),
        weekday_of_day1: Some(i64::from(input.weekday0)),
        previous_month_night_carry: Some(Value::Object(carry)),
        shifts: None,
        need_template: Some(Value::Object(template)),
        day_type_by_date: Some(json!(input.day_types)),
        strict_night,
        people: Some(people),
        rules: Some(json!({
            "noEarlyAfterDayAB": input.rules.no_early_after_day_ab,
            "nightRest": {
                "NA": input.rules.night_rest.na,
                "NB": input.rules.night_rest.nb,
                "NC": input.rules.night_rest.nc,
            },
        })),
        weights: Some(json!({
            "w_shortage": input.weights.shortage,
            "w_overstaff_gt_need_plus1": input.weights.overstaff,
            "w_requested_off_violation": input.weights.requested_off,
            "w_balance_workdays": input.weights.balance_workdays,
            "w_fill_day_bonus": input.weights.fill_day_bonus,
        })),
        wish_offs: None,
    }
}
