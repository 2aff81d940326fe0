use roster_core::shifts::ShiftCode;

use crate::compiler::RosterCompiler;

/// Sequence rules between days: rest after night shifts (including phantom
/// nights carried in from the previous month) and the no-early-after-a-day
/// rule.
pub fn apply(c: &mut RosterCompiler) {
    night_rest(c);
    carried_night_rest(c);
    no_early_after_day_ab(c);
}

fn night_rest(c: &mut RosterCompiler) {
    for (pi, person) in c.input.people.iter().enumerate() {
        for code in &person.can_work {
            let Some(rest) = c.input.rules.night_rest.for_code(*code).filter(|r| *r > 0) else {
                continue;
            };
            for date in 1..=c.days() {
                let Some(night) = c.x_var(pi, date, *code) else { continue };
                for offset in 1..=rest {
                    let next = date + offset;
                    if next > c.days() {
                        break;
                    }
                    if let Some(work) = c.work_var(pi, next) {
                        c.model.add_le(vec![(1, night), (1, work)], 1);
                    }
                }
            }
        }
    }
}

/// Staff who finished the previous month on a night shift start this month
/// resting, as if that night had been assigned on date 0.
fn carried_night_rest(c: &mut RosterCompiler) {
    for (code, ids) in &c.input.night_carry {
        let Some(rest) = c.input.rules.night_rest.for_code(*code).filter(|r| *r > 0) else {
            continue;
        };
        for id in ids {
            let Some(pi) = c.input.people.iter().position(|p| &p.id == id) else { continue };
            for date in 1..=rest.min(c.days()) {
                if let Some(work) = c.work_var(pi, date) {
                    c.model.add_eq(vec![(1, work)], 0);
                }
            }
        }
    }
}

fn no_early_after_day_ab(c: &mut RosterCompiler) {
    if !c.input.rules.no_early_after_day_ab {
        return;
    }
    for (pi, _person) in c.input.people.iter().enumerate() {
        for date in 1..c.days() {
            let Some(early_next) = c.x_var(pi, date + 1, ShiftCode::EA) else { continue };
            let mut terms = Vec::new();
            if let Some(da) = c.x_var(pi, date, ShiftCode::DA) {
                terms.push((1, da));
            }
            if let Some(db) = c.x_var(pi, date, ShiftCode::DB) {
                terms.push((1, db));
            }
            if terms.is_empty() {
                continue;
            }
            terms.push((1, early_next));
            c.model.add_le(terms, 1);
        }
    }
}
