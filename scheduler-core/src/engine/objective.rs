//! Soft-term composition.
//!
//! Every term is an integer-weighted linear expression; the solver maximizes
//! their sum. All weights are pre-multiplied by `OBJECTIVE_SCALE` (2) so the
//! half-weight morning-preference term can be emitted with coefficient 1, and
//! fractional favor multipliers are quantized to tenths before they touch a
//! coefficient.

use good_lp::{constraint, Expression};
use shared::SLOT_COUNT;

use crate::config::{
    scaled_weight, year_multiplier, EMPLOYEE_LARGE_DEVIATION_PENALTY, EQUALITY_PENALTY_WEIGHT,
    DEPARTMENT_LARGE_DEVIATION_PENALTY, DEPARTMENT_SCARCITY_BASE_WEIGHT,
    FAVORED_DEPARTMENT_DUAL_PENALTY, FAVORED_DEPARTMENT_FOCUSED_BONUS,
    FAVORED_FRONT_DESK_DEPT_BONUS, FAVORED_HOURS_BONUS_WEIGHT, LARGE_DEVIATION_SLOT_THRESHOLD,
    OBJECTIVE_SCALE, SHIFT_PREF_BONUS_WEIGHT, TIMESET_BONUS_WEIGHT, TRAINING_OVERLAP_BONUS,
    TRAINING_OVERLAP_WEIGHT,
};
use crate::engine::model::{ModelBuilder, DAY_COUNT};
use crate::engine::normalize::Normalized;

/// Target-adherence multiplier for favored employees: the base x10 favor
/// weight times the quantized multiplier.
fn favored_target_multiplier(favored: Option<f64>) -> f64 {
    favored.map(|m| (m * 10.0).floor()).unwrap_or(1.0)
}

pub(crate) fn compose_objective(builder: &mut ModelBuilder) -> Expression {
    let weights = builder.settings.weights.clone();
    let scale = OBJECTIVE_SCALE;
    let employees = builder.normalized.employee_count();
    let week_capacity = (DAY_COUNT * SLOT_COUNT) as i64;
    let mut objective = Expression::default();

    // Front-desk coverage. The per-slot sum is capped at 1, so it doubles as
    // the coverage indicator.
    let coverage_weight = (scale * builder.settings.front_desk_weight) as f64;
    for d in 0..DAY_COUNT {
        for t in 0..SLOT_COUNT {
            objective += coverage_weight * builder.front_desk_slot_sum(d, t);
        }
    }

    // Per-employee target adherence, with the steep extra penalty for being
    // two or more hours off target.
    for e in 0..employees {
        let employee = builder.normalized.employees[e].clone();
        let total = builder.week_work_sum(e);
        let over = builder.int_var(week_capacity);
        let under = builder.int_var(week_capacity);
        builder.constraints.push(constraint!(
            total - over + under == employee.target_slots as f64
        ));

        let favor = favored_target_multiplier(employee.favored);
        let adherence = (scale as f64
            * weights.target_adherence as f64
            * year_multiplier(employee.year)
            * favor)
            .round();
        objective -= adherence * (over + under);

        let large_over = builder.ge_indicator(
            Expression::from(over),
            LARGE_DEVIATION_SLOT_THRESHOLD,
            week_capacity,
        );
        let large_under = builder.ge_indicator(
            Expression::from(under),
            LARGE_DEVIATION_SLOT_THRESHOLD,
            week_capacity,
        );
        let large = (scale as f64 * EMPLOYEE_LARGE_DEVIATION_PENALTY as f64 * favor).round();
        objective -= large * (large_over + large_under);
    }

    // Department weekly targets in effective units, adjusted down to what the
    // qualified staff can actually cover.
    let department_roles = builder.normalized.department_roles.clone();
    let threshold_units = builder.settings.dept_hour_threshold * 4;
    for &role in &department_roles {
        let Some(target_hours) = builder.normalized.department_targets[role] else {
            continue;
        };
        let capacity_hours: f64 = builder
            .normalized
            .employees
            .iter()
            .filter(|employee| employee.is_qualified(role))
            .map(|employee| employee.max_hours)
            .sum();
        let max_requirement = builder.normalized.department_max_hours[role].unwrap_or(capacity_hours);
        let target_units = (target_hours.min(capacity_hours).min(max_requirement) * 4.0).round();

        let units = builder.department_units(role);
        let over = builder.int_var(4 * week_capacity);
        let under = builder.int_var(4 * week_capacity);
        builder
            .constraints
            .push(constraint!(units - over + under == target_units));

        let favor = builder
            .normalized
            .favored_departments
            .get(&role)
            .copied()
            .unwrap_or(1.0);
        let target_weight = scaled_weight(scale * weights.department_target, favor) as f64;
        objective -= target_weight * (over + under);

        if threshold_units > 0 {
            let large_over =
                builder.ge_indicator(Expression::from(over), threshold_units, 4 * week_capacity);
            let large_under =
                builder.ge_indicator(Expression::from(under), threshold_units, 4 * week_capacity);
            let large_weight =
                scaled_weight(scale * DEPARTMENT_LARGE_DEVIATION_PENALTY, favor) as f64;
            objective -= large_weight * (large_over + large_under);
        }
    }

    // Collaborative hours: reward departments that hit their configured
    // minimum of two-person overlap.
    for &role in &department_roles {
        let role_name = builder.normalized.roles[role].clone();
        let min_slots = builder
            .settings
            .collaboration_minimum_hours
            .get(&role_name)
            .map(|&hours| hours * 2)
            .unwrap_or(0);
        if min_slots == 0 {
            continue;
        }
        let mut collab_slots = Expression::default();
        for d in 0..DAY_COUNT {
            for t in 0..SLOT_COUNT {
                let in_role: Expression = (0..employees)
                    .filter_map(|e| builder.tables.assign(e, d, t, role))
                    .sum();
                let together = builder.ge_indicator(in_role, 2, employees as i64);
                collab_slots += together;
            }
        }
        let under = builder.int_var(week_capacity);
        builder
            .constraints
            .push(constraint!(collab_slots + under >= min_slots as f64));
        objective -= ((scale * weights.collaborative_hours) as f64) * under;
    }

    // Training overlap: paired trainees working the same department at the
    // same time, where both can hold a legal shift.
    let training = builder.normalized.training.clone();
    for plan in &training {
        let mut overlap_total = Expression::default();
        let mut available_slots = 0i64;
        for d in 0..DAY_COUNT {
            for t in 0..SLOT_COUNT {
                if !builder.context.is_workable(plan.trainee_one, d, t)
                    || !builder.context.is_workable(plan.trainee_two, d, t)
                {
                    continue;
                }
                let Some(one) = builder.tables.assign(plan.trainee_one, d, t, plan.department)
                else {
                    continue;
                };
                let Some(two) = builder.tables.assign(plan.trainee_two, d, t, plan.department)
                else {
                    continue;
                };
                available_slots += 1;
                let overlap = builder.bool_var();
                builder.constraints.push(constraint!(overlap - one <= 0.0));
                builder.constraints.push(constraint!(overlap - two <= 0.0));
                builder
                    .constraints
                    .push(constraint!(overlap - one - two >= -1.0));
                overlap_total += overlap;
            }
        }
        let goal_slots = if available_slots > 0 {
            plan.goal_slots.min(available_slots)
        } else {
            plan.goal_slots
        };
        let under = builder.int_var(week_capacity);
        builder.constraints.push(constraint!(
            overlap_total.clone() + under >= goal_slots as f64
        ));
        objective -= ((scale * TRAINING_OVERLAP_WEIGHT) as f64) * under;
        objective += ((scale * TRAINING_OVERLAP_BONUS) as f64) * overlap_total;
    }

    // Office coverage: reward every person beyond the first in the building,
    // heavily penalize a lone worker.
    let office_weight = (scale * weights.office_coverage) as f64;
    let single_weight = (scale * weights.single_coverage) as f64;
    for d in 0..DAY_COUNT {
        for t in 0..SLOT_COUNT {
            let people: Expression = (0..employees)
                .map(|e| builder.tables.work(e, d, t))
                .sum();
            objective += office_weight * people.clone();
            objective -= office_weight; // the "minus one" of (people - 1)

            let any = builder.ge_indicator(people.clone(), 1, employees as i64);
            let two_plus = builder.ge_indicator(people, 2, employees as i64);
            objective -= single_weight * (any - two_plus);
        }
    }

    // Department presence: spread across slots, and across days.
    let spread_weight = (scale * weights.department_spread) as f64;
    let day_coverage_weight = (scale * weights.department_day_coverage) as f64;
    for &role in &department_roles {
        for d in 0..DAY_COUNT {
            for t in 0..SLOT_COUNT {
                let in_role: Expression = (0..employees)
                    .filter_map(|e| builder.tables.assign(e, d, t, role))
                    .sum();
                let present = builder.ge_indicator(in_role, 1, employees as i64);
                objective += spread_weight * present;
            }
            let day_total = (0..employees)
                .map(|e| builder.role_day_sum(e, d, role))
                .sum::<Expression>();
            let present_today =
                builder.ge_indicator(day_total, 1, (employees * SLOT_COUNT) as i64);
            objective += day_coverage_weight * present_today;
        }
    }

    // Shift length: reward hours worked, charge a fixed cost per worked day,
    // so fewer longer shifts beat many short ones.
    let shift_weight = (scale * weights.shift_length) as f64;
    let daily_cost = (scale * weights.shift_length * crate::config::SHIFT_LENGTH_DAILY_COST) as f64;
    for e in 0..employees {
        for d in 0..DAY_COUNT {
            objective += shift_weight * builder.day_work_sum(e, d);
            objective -= daily_cost * builder.tables.works_day(e, d);
        }
    }

    // Front-desk sourcing: protect scarce departments and lean on
    // underclassmen.
    for e in 0..employees {
        let employee = &builder.normalized.employees[e];
        let min_dept_size = employee
            .qualifications
            .iter()
            .filter(|&&r| r != Normalized::FRONT_DESK)
            .map(|&r| builder.normalized.department_sizes[r])
            .min();
        let fd_slots = builder.front_desk_week_sum(e);

        let mut fd_coeff =
            (scale * weights.underclassmen_front_desk * employee.year as i64) as f64;
        if let Some(size) = min_dept_size {
            let scarcity = (scale as f64
                * weights.department_scarcity as f64
                * DEPARTMENT_SCARCITY_BASE_WEIGHT as f64
                / size as f64)
                .round();
            fd_coeff += scarcity;
        }
        objective -= fd_coeff * fd_slots;
    }

    // Morning staffing nudge: the half-weight term the scale factor exists
    // for.
    for e in 0..employees {
        for d in 0..DAY_COUNT {
            for t in 0..8 {
                objective += Expression::from(builder.tables.work(e, d, t));
            }
        }
    }

    // Per-employee half-day preferences.
    let shift_preferences = builder.normalized.shift_preferences.clone();
    for (&(e, d), half) in &shift_preferences {
        let preferred: Expression = (0..SLOT_COUNT)
            .filter(|&t| half.contains_slot(t))
            .map(|t| builder.tables.work(e, d, t))
            .sum();
        objective += ((scale * SHIFT_PREF_BONUS_WEIGHT) as f64) * preferred;
    }

    // Favored employees earn a bonus for every slot they work.
    for e in 0..employees {
        if let Some(multiplier) = builder.normalized.employees[e].favored {
            let bonus = scaled_weight(scale * FAVORED_HOURS_BONUS_WEIGHT, multiplier) as f64;
            objective += bonus * builder.week_work_sum(e);
        }
    }

    // Fill available department capacity.
    let total_weight = (scale * weights.department_total) as f64;
    for &role in &department_roles {
        objective += total_weight * builder.department_units(role);
    }

    // Timeset satisfaction carries a massive bonus on top of the hard lock.
    let forced = builder.normalized.forced.clone();
    for &(e, d, t, r) in &forced {
        if let Some(assign) = builder.tables.assign(e, d, t, r) {
            objective += ((scale * TIMESET_BONUS_WEIGHT) as f64) * assign;
        }
    }

    // Favored departments: reward focused slots, discount dual-counted
    // front-desk credit.
    let favored_departments = builder.normalized.favored_departments.clone();
    for (&role, &multiplier) in &favored_departments {
        let focused = builder.role_total_sum(role);
        let dual: Expression = (0..employees)
            .filter(|&e| builder.normalized.primary_department[e] == Some(role))
            .map(|e| builder.front_desk_week_sum(e))
            .sum();
        objective +=
            (scaled_weight(scale * FAVORED_DEPARTMENT_FOCUSED_BONUS, multiplier) as f64) * focused;
        objective -=
            (scaled_weight(scale * FAVORED_DEPARTMENT_DUAL_PENALTY, multiplier) as f64) * dual;
    }

    // Favored front-desk departments: reward desk slots filled by their
    // members.
    let favored_fd_departments = builder.normalized.favored_frontdesk_departments.clone();
    for (&role, &multiplier) in &favored_fd_departments {
        let member_fd_slots: Expression = (0..employees)
            .filter(|&e| builder.normalized.employees[e].is_qualified(role))
            .map(|e| builder.front_desk_week_sum(e))
            .sum();
        objective += (scaled_weight(scale * FAVORED_FRONT_DESK_DEPT_BONUS, multiplier) as f64)
            * member_fd_slots;
    }

    // Favored employee-department placements.
    let favored_employee_departments = builder.normalized.favored_employee_departments.clone();
    for &(e, role, multiplier) in &favored_employee_departments {
        let slots: Expression = (0..DAY_COUNT)
            .map(|d| builder.role_day_sum(e, d, role))
            .sum();
        let bonus = scale
            * (multiplier * builder.settings.favored_employee_dept_bonus as f64).floor() as i64;
        objective += (bonus as f64) * slots;
    }

    // Equality requests: minimize the absolute hour difference inside the
    // department.
    let equality = builder.normalized.equality.clone();
    for &(role, one, two) in &equality {
        let slots_one: Expression = (0..DAY_COUNT)
            .map(|d| builder.role_day_sum(one, d, role))
            .sum();
        let slots_two: Expression = (0..DAY_COUNT)
            .map(|d| builder.role_day_sum(two, d, role))
            .sum();
        let surplus = builder.int_var(week_capacity);
        let deficit = builder.int_var(week_capacity);
        builder.constraints.push(constraint!(
            slots_one - slots_two - surplus + deficit == 0.0
        ));
        objective -= ((scale * EQUALITY_PENALTY_WEIGHT) as f64) * (surplus + deficit);
    }

    objective
}
