use serde_json::Value;

/// Weekday indices run 0 = Sunday .. 6 = Saturday, matching the input's
/// `weekdayOfDay1` convention.
pub const JP_LABELS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];
pub const EN_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Accepts an integer 0..=6, a digit string, a Japanese single-character
/// label, or an English three-letter label. Anything else is rejected.
pub fn normalize(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => {
            let idx = n.as_i64()?;
            (0..=6).contains(&idx).then_some(idx as u8)
        }
        Value::String(s) => {
            let s = s.trim();
            if let Some(pos) = JP_LABELS.iter().position(|l| *l == s) {
                return Some(pos as u8);
            }
            if let Some(pos) = EN_LABELS.iter().position(|l| l.eq_ignore_ascii_case(s)) {
                return Some(pos as u8);
            }
            let idx: i64 = s.parse().ok()?;
            (0..=6).contains(&idx).then_some(idx as u8)
        }
        _ => None,
    }
}

/// Weekday of a 1-based date in the horizon.
pub fn weekday_of(weekday0: u8, date: u32) -> u8 {
    ((weekday0 as u32 + (date - 1)) % 7) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_all_three_label_forms() {
        assert_eq!(normalize(&json!(0)), Some(0));
        assert_eq!(normalize(&json!(6)), Some(6));
        assert_eq!(normalize(&json!("3")), Some(3));
        assert_eq!(normalize(&json!("月")), Some(1));
        assert_eq!(normalize(&json!("土")), Some(6));
        assert_eq!(normalize(&json!("Wed")), Some(3));
        assert_eq!(normalize(&json!("sun")), Some(0));
    }

    #[test]
    fn rejects_out_of_domain_values() {
        assert_eq!(normalize(&json!(7)), None);
        assert_eq!(normalize(&json!(-1)), None);
        assert_eq!(normalize(&json!("holiday")), None);
        assert_eq!(normalize(&json!(true)), None);
        assert_eq!(normalize(&json!(null)), None);
    }

    #[test]
    fn weekday_advances_and_wraps() {
        // Day 1 on a Friday: day 3 is Sunday, day 4 is Monday.
        assert_eq!(weekday_of(5, 1), 5);
        assert_eq!(weekday_of(5, 3), 0);
        assert_eq!(weekday_of(5, 4), 1);
        assert_eq!(weekday_of(0, 29), 0);
    }
}
