use roster_core::shifts::Slot;

use crate::compiler::RosterCompiler;

/// Demand coverage with slack: shortage absorbs unmet need, `over` absorbs
/// headcount beyond need + 1, and strict-night bands become hard equalities
/// and window bounds.
pub fn apply(c: &mut RosterCompiler) {
    let head_cap = c.input.people.len() as i64;

    for date in 1..=c.days() {
        for slot in Slot::ALL {
            let need = c.plan.need_of(date, slot) as i64;
            let terms = c.coverage_terms(date, slot);

            let shortage = c.model.add_int(
                format!("short_d{}_{}", date, slot.label()),
                0,
                need,
            );
            c.shortage.insert((date, slot), shortage);
            let mut covered = terms.clone();
            covered.push((1, shortage));
            c.model.add_ge(covered, need);

            let over = c.model.add_int(
                format!("over_d{}_{}", date, slot.label()),
                0,
                head_cap,
            );
            c.over.insert((date, slot), over);
            let mut capped = terms.clone();
            capped.push((-1, over));
            c.model.add_le(capped, need + 1);

            if let Some(strict) = c.input.strict_night {
                match slot {
                    Slot::LateEvening => {
                        if let Some(v) = strict.late_evening {
                            c.model.add_eq(terms.clone(), v as i64);
                        }
                    }
                    Slot::Dawn if date >= 2 => {
                        if let Some(v) = strict.dawn {
                            c.model.add_eq(terms.clone(), v as i64);
                        }
                    }
                    Slot::Evening => {
                        if let Some(lo) = strict.evening_min {
                            c.model.add_ge(terms.clone(), lo as i64);
                        }
                        if let Some(hi) = strict.evening_max {
                            c.model.add_le(terms.clone(), hi as i64);
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
