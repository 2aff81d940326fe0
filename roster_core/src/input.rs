use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The solve request as it arrives on disk. Fields the front-end is allowed
/// to write loosely (weekday labels, day lists, weight maps) stay as raw
/// JSON values here; the validator turns them into the strict
/// [`crate::roster::NormalisedInput`] form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InputDoc {
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub days: Option<i64>,
    #[serde(rename = "weekdayOfDay1")]
    pub weekday_of_day1: Option<i64>,
    #[serde(rename = "previousMonthNightCarry")]
    pub previous_month_night_carry: Option<Value>,
    pub shifts: Option<Value>,
    #[serde(rename = "needTemplate")]
    pub need_template: Option<Value>,
    #[serde(rename = "dayTypeByDate")]
    pub day_type_by_date: Option<Value>,
    #[serde(rename = "strictNight")]
    pub strict_night: Option<Value>,
    pub people: Option<Vec<PersonDoc>>,
    pub rules: Option<Value>,
    pub weights: Option<Value>,
    #[serde(rename = "wishOffs")]
    pub wish_offs: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PersonDoc {
    pub id: Option<Value>,
    #[serde(rename = "canWork")]
    pub can_work: Option<Value>,
    #[serde(rename = "fixedOffWeekdays")]
    pub fixed_off_weekdays: Option<Value>,
    #[serde(rename = "weeklyMin")]
    pub weekly_min: Option<Value>,
    #[serde(rename = "weeklyMax")]
    pub weekly_max: Option<Value>,
    #[serde(rename = "monthlyMin")]
    pub monthly_min: Option<Value>,
    #[serde(rename = "monthlyMax")]
    pub monthly_max: Option<Value>,
    #[serde(rename = "consecMax")]
    pub consec_max: Option<Value>,
    #[serde(rename = "unavailableDates")]
    pub unavailable_dates: Option<Value>,
    #[serde(rename = "requestedOffDates")]
    pub requested_off_dates: Option<Value>,
    #[serde(rename = "requestedOffWeight")]
    pub requested_off_weight: Option<Value>,
}
