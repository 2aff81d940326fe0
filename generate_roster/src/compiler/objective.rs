use roster_core::shifts::Slot;

use crate::compiler::RosterCompiler;

/// Collects the weighted penalty terms. Shortage dominates by default;
/// overstaffing and wish-off violations follow; the balance and fill terms
/// only exist when their reserved weights are set.
pub fn apply(c: &mut RosterCompiler) {
    let weights = c.input.weights;

    for (_, var) in c.shortage.iter() {
        c.model.add_objective_term(weights.shortage, *var);
    }
    for (_, var) in c.over.iter() {
        c.model.add_objective_term(weights.overstaff, *var);
    }
    for ((pi, _date), var) in c.violate_off.iter() {
        let weight = c.input.people[*pi]
            .requested_off_weight
            .unwrap_or(weights.requested_off);
        c.model.add_objective_term(weight, *var);
    }

    if weights.balance_workdays > 0 {
        balance_workdays(c, weights.balance_workdays);
    }
    if weights.fill_day_bonus > 0 {
        fill_day_bonus(c, weights.fill_day_bonus);
    }
}

/// Penalises the spread between the busiest and the idlest rostered person:
/// w * (max workdays - min workdays), bracketed by two integer variables.
fn balance_workdays(c: &mut RosterCompiler, weight: i64) {
    let rostered: Vec<usize> = c
        .input
        .people
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.can_work.is_empty())
        .map(|(pi, _)| pi)
        .collect();
    if rostered.len() < 2 {
        return;
    }

    let days = c.days() as i64;
    let work_max = c.model.add_int("work_max", 0, days);
    let work_min = c.model.add_int("work_min", 0, days);
    for pi in rostered {
        let mut le_terms = Vec::new();
        for date in 1..=c.days() {
            if let Some(work) = c.work_var(pi, date) {
                le_terms.push((1, work));
            }
        }
        let mut ge_terms = le_terms.clone();
        le_terms.push((-1, work_max));
        c.model.add_le(le_terms, 0);
        ge_terms.push((-1, work_min));
        c.model.add_ge(ge_terms, 0);
    }
    c.model.add_objective_term(weight, work_max);
    c.model.add_objective_term(-weight, work_min);
}

/// Rewards morning and daytime coverage so ties break toward filling the
/// busiest bands.
fn fill_day_bonus(c: &mut RosterCompiler, weight: i64) {
    for date in 1..=c.days() {
        for slot in [Slot::Morning, Slot::Daytime] {
            for (coefficient, var) in c.coverage_terms(date, slot) {
                c.model.add_objective_term(-weight * coefficient, var);
            }
        }
    }
}
