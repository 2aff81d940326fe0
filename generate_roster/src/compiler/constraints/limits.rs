use crate::compiler::RosterCompiler;

/// Weekly, monthly and consecutive-day workload caps. Weeks break at
/// weekday 0; caps apply in full to the partial weeks at the horizon edges,
/// which is worth a warning when anyone is actually capped weekly.
pub fn apply(c: &mut RosterCompiler) {
    let weeks = c.weeks();
    let has_partial_week = weeks.iter().any(|(a, b)| b - a + 1 < 7);
    let mut partial_week_warned = false;

    for (pi, person) in c.input.people.iter().enumerate() {
        if person.can_work.is_empty() {
            continue;
        }

        if person.weekly_min > 0 || person.weekly_max > 0 {
            if has_partial_week && !partial_week_warned {
                c.warnings.push(
                    "horizon starts or ends mid-week; weekly limits apply in full to the partial weeks"
                        .to_string(),
                );
                partial_week_warned = true;
            }
            for (a, b) in &weeks {
                let terms: Vec<_> = (*a..=*b)
                    .filter_map(|d| c.work_var(pi, d))
                    .map(|w| (1, w))
                    .collect();
                if terms.is_empty() {
                    continue;
                }
                if person.weekly_max > 0 {
                    c.model.add_le(terms.clone(), person.weekly_max as i64);
                }
                if person.weekly_min > 0 {
                    c.model.add_ge(terms, person.weekly_min as i64);
                }
            }
        }

        if person.monthly_min > 0 || person.monthly_max > 0 {
            let terms: Vec<_> = (1..=c.days())
                .filter_map(|d| c.work_var(pi, d))
                .map(|w| (1, w))
                .collect();
            if !terms.is_empty() {
                if person.monthly_max > 0 {
                    c.model.add_le(terms.clone(), person.monthly_max as i64);
                }
                if person.monthly_min > 0 {
                    c.model.add_ge(terms, person.monthly_min as i64);
                }
            }
        }

        let cap = person.consec_max;
        if cap > 0 {
            for start in 1..=c.days() {
                let end = start + cap;
                if end > c.days() {
                    break;
                }
                let terms: Vec<_> = (start..=end)
                    .filter_map(|d| c.work_var(pi, d))
                    .map(|w| (1, w))
                    .collect();
                if terms.len() == (cap + 1) as usize {
                    c.model.add_le(terms, cap as i64);
                }
            }
        }
    }
}
