use crate::compiler::RosterCompiler;

/// Ties each person-day together: one shift at most, `work` equal to the
/// assignment sum, and hard zeroes on fixed-off weekdays and unavailable
/// dates.
pub fn apply(c: &mut RosterCompiler) {
    for (pi, person) in c.input.people.iter().enumerate() {
        if person.can_work.is_empty() {
            continue;
        }
        for date in 1..=c.days() {
            let xs = c.person_x_vars(pi, date);
            let work = c.work_var(pi, date).expect("work var exists for rostered person");

            let sum_terms: Vec<_> = xs.iter().map(|x| (1, *x)).collect();
            c.model.add_le(sum_terms.clone(), 1);

            // work == Σ_s x
            let mut definition = sum_terms;
            definition.push((-1, work));
            c.model.add_eq(definition, 0);

            let blocked = person.fixed_off_weekdays.contains(&c.weekday_of(date))
                || person.unavailable_dates.contains(&date);
            if blocked {
                c.model.add_eq(vec![(1, work)], 0);
            }
        }
    }
}
