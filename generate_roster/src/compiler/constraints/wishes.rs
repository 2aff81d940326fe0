use crate::compiler::RosterCompiler;

/// Links each requested-off date to a violation indicator:
/// violateOff[p,d] = Σ_s x[p,d,s]. The objective prices the indicator; the
/// link itself is hard.
pub fn apply(c: &mut RosterCompiler) {
    for (pi, person) in c.input.people.iter().enumerate() {
        if person.can_work.is_empty() {
            continue;
        }
        for &date in &person.requested_off_dates {
            let Some(work) = c.work_var(pi, date) else { continue };
            let violated = c.model.add_bool(format!("off_d{}_i{}", date, pi));
            c.violate_off.insert((pi, date), violated);
            c.model.add_eq(vec![(1, violated), (-1, work)], 0);
        }
    }
}
