//! Decision variables and hard constraints.
//!
//! Variables live in dense tables keyed by packed `(employee, day, slot,
//! role)` indices; `assign` entries are materialized only where the employee
//! is qualified or a timeset forces the tuple. Iteration is always in index
//! order, so constraint identity is deterministic for given inputs.
//!
//! The CP-style idioms of the formulation are expressed as integer-linear
//! rows: "either zero or at least N slots" becomes a day indicator with upper
//! and lower links, and reified conditions use big-M rows bounded by the grid
//! size.

use std::collections::BTreeSet;

use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};
use shared::SLOT_COUNT;

use crate::config::{
    SolveSettings, FAVORED_MAX_SLOTS, FAVORED_MIN_SLOTS, MIN_FRONT_DESK_SLOTS,
    UNIVERSAL_MAXIMUM_HOURS,
};
use crate::engine::normalize::Normalized;
use crate::engine::precompute::DomainContext;

pub(crate) const DAY_COUNT: usize = 5;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Grid {
    roles: usize,
}

impl Grid {
    #[inline]
    pub(crate) fn edt(&self, employee: usize, day: usize, slot: usize) -> usize {
        (employee * DAY_COUNT + day) * SLOT_COUNT + slot
    }

    #[inline]
    pub(crate) fn edtr(&self, employee: usize, day: usize, slot: usize, role: usize) -> usize {
        self.edt(employee, day, slot) * self.roles + role
    }

    #[inline]
    pub(crate) fn ed(&self, employee: usize, day: usize) -> usize {
        employee * DAY_COUNT + day
    }
}

/// The decision-variable tables the objective and the post-validator share.
pub(crate) struct VarTables {
    pub(crate) grid: Grid,
    /// `work[e,d,t]`, dense.
    work: Vec<Variable>,
    /// `assign[e,d,t,r]`, materialized subset.
    assign: Vec<Option<Variable>>,
    /// One per `(e,d)`: does the employee work at all that day?
    works_day: Vec<Variable>,
}

impl VarTables {
    #[inline]
    pub(crate) fn work(&self, employee: usize, day: usize, slot: usize) -> Variable {
        self.work[self.grid.edt(employee, day, slot)]
    }

    #[inline]
    pub(crate) fn assign(
        &self,
        employee: usize,
        day: usize,
        slot: usize,
        role: usize,
    ) -> Option<Variable> {
        self.assign[self.grid.edtr(employee, day, slot, role)]
    }

    #[inline]
    pub(crate) fn works_day(&self, employee: usize, day: usize) -> Variable {
        self.works_day[self.grid.ed(employee, day)]
    }
}

pub(crate) struct ModelBuilder<'a> {
    pub(crate) normalized: &'a Normalized,
    pub(crate) context: &'a DomainContext,
    pub(crate) settings: &'a SolveSettings,
    pub(crate) vars: ProblemVariables,
    pub(crate) tables: VarTables,
    pub(crate) constraints: Vec<Constraint>,
    /// Employee-days allowed a split shift (non-contiguous forced slots).
    split_days: BTreeSet<(usize, usize)>,
    /// Forced slot count per `(e,d)`.
    forced_per_day: Vec<i64>,
    /// `(e,d,r)` triples with at least one forced slot.
    forced_roles: BTreeSet<(usize, usize, usize)>,
    /// Days with any forced front-desk slot (for anyone).
    day_has_forced_fd: [bool; DAY_COUNT],
    pub(crate) feasible_lower: Vec<i64>,
    pub(crate) feasible_upper: Vec<i64>,
}

impl<'a> ModelBuilder<'a> {
    pub(crate) fn new(
        normalized: &'a Normalized,
        context: &'a DomainContext,
        settings: &'a SolveSettings,
    ) -> Self {
        let employees = normalized.employee_count();
        let roles = normalized.role_count();
        let grid = Grid { roles };

        let mut vars = ProblemVariables::new();
        let work: Vec<Variable> = (0..employees * DAY_COUNT * SLOT_COUNT)
            .map(|_| vars.add(variable().binary()))
            .collect();
        let mut assign: Vec<Option<Variable>> =
            Vec::with_capacity(employees * DAY_COUNT * SLOT_COUNT * roles);
        for e in 0..employees {
            for d in 0..DAY_COUNT {
                for t in 0..SLOT_COUNT {
                    for r in 0..roles {
                        assign.push(if normalized.assign_exists(e, d, t, r) {
                            Some(vars.add(variable().binary()))
                        } else {
                            None
                        });
                    }
                }
            }
        }
        let works_day: Vec<Variable> = (0..employees * DAY_COUNT)
            .map(|_| vars.add(variable().binary()))
            .collect();

        let mut forced_per_day = vec![0i64; employees * DAY_COUNT];
        let mut forced_roles = BTreeSet::new();
        let mut day_has_forced_fd = [false; DAY_COUNT];
        for &(e, d, _, r) in &normalized.forced {
            forced_per_day[grid.ed(e, d)] += 1;
            forced_roles.insert((e, d, r));
            if r == Normalized::FRONT_DESK {
                day_has_forced_fd[d] = true;
            }
        }

        let (feasible_lower, feasible_upper) =
            feasible_weekly_bounds(normalized, context, settings);

        Self {
            normalized,
            context,
            settings,
            vars,
            tables: VarTables {
                grid,
                work,
                assign,
                works_day,
            },
            constraints: Vec::new(),
            split_days: normalized.split_shift_days(),
            forced_per_day,
            forced_roles,
            day_has_forced_fd,
            feasible_lower,
            feasible_upper,
        }
    }

    pub(crate) fn bool_var(&mut self) -> Variable {
        self.vars.add(variable().binary())
    }

    pub(crate) fn int_var(&mut self, upper: i64) -> Variable {
        self.vars.add(variable().integer().min(0.0).max(upper as f64))
    }

    fn employee_count(&self) -> usize {
        self.normalized.employee_count()
    }

    fn role_count(&self) -> usize {
        self.normalized.role_count()
    }

    pub(crate) fn day_work_sum(&self, employee: usize, day: usize) -> Expression {
        (0..SLOT_COUNT)
            .map(|t| self.tables.work(employee, day, t))
            .sum()
    }

    pub(crate) fn week_work_sum(&self, employee: usize) -> Expression {
        (0..DAY_COUNT)
            .flat_map(|d| (0..SLOT_COUNT).map(move |t| (d, t)))
            .map(|(d, t)| self.tables.work(employee, d, t))
            .sum()
    }

    /// Sum of the materialized role assignments for one slot.
    pub(crate) fn slot_role_sum(&self, employee: usize, day: usize, slot: usize) -> Expression {
        (0..self.role_count())
            .filter_map(|r| self.tables.assign(employee, day, slot, r))
            .sum()
    }

    /// Front-desk assignments across all employees for one slot.
    pub(crate) fn front_desk_slot_sum(&self, day: usize, slot: usize) -> Expression {
        (0..self.employee_count())
            .filter_map(|e| self.tables.assign(e, day, slot, Normalized::FRONT_DESK))
            .sum()
    }

    /// One employee's assignments to `role` over one day.
    pub(crate) fn role_day_sum(&self, employee: usize, day: usize, role: usize) -> Expression {
        (0..SLOT_COUNT)
            .filter_map(|t| self.tables.assign(employee, day, t, role))
            .sum()
    }

    /// One employee's front-desk assignments over the week.
    pub(crate) fn front_desk_week_sum(&self, employee: usize) -> Expression {
        (0..DAY_COUNT)
            .map(|d| self.role_day_sum(employee, d, Normalized::FRONT_DESK))
            .sum()
    }

    /// Everyone's assignments to `role` over the whole week.
    pub(crate) fn role_total_sum(&self, role: usize) -> Expression {
        (0..self.employee_count())
            .map(|e| {
                (0..DAY_COUNT)
                    .map(|d| self.role_day_sum(e, d, role))
                    .sum::<Expression>()
            })
            .sum()
    }

    /// Effective department units (quarter hours): focused slots count double,
    /// front-desk slots by primary members count single.
    pub(crate) fn department_units(&self, role: usize) -> Expression {
        let dual: Expression = (0..self.employee_count())
            .filter(|&e| self.normalized.primary_department[e] == Some(role))
            .map(|e| self.front_desk_week_sum(e))
            .sum();
        2 * self.role_total_sum(role) + dual
    }

    /// Boolean equivalent to `expr >= threshold`, given `0 <= expr <= upper`.
    pub(crate) fn ge_indicator(
        &mut self,
        expr: Expression,
        threshold: i64,
        upper: i64,
    ) -> Variable {
        let flag = self.bool_var();
        let slack = (upper - threshold + 1) as f64;
        self.constraints
            .push(constraint!(expr.clone() - slack * flag <= (threshold - 1) as f64));
        self.constraints
            .push(constraint!(expr - (threshold as f64) * flag >= 0.0));
        flag
    }

    /// Contiguity markers for a series of slot variables: at most
    /// `max_blocks` maximal runs of ones. Marker variables are created only at
    /// materialized slots; transitions are linked only between consecutive
    /// materialized slots, and the boundary rows anchor at the first and last
    /// materialized slot.
    fn add_block_contiguity(&mut self, series: &[Option<Variable>], max_blocks: i64) {
        let present: Vec<usize> = series
            .iter()
            .enumerate()
            .filter_map(|(t, v)| v.map(|_| t))
            .collect();
        let Some((&first, &last)) = present.first().zip(present.last()) else {
            return;
        };

        let mut starts: Vec<Option<Variable>> = vec![None; series.len()];
        let mut ends: Vec<Option<Variable>> = vec![None; series.len()];
        for &t in &present {
            starts[t] = Some(self.bool_var());
            ends[t] = Some(self.bool_var());
        }

        let start_sum: Expression = present.iter().map(|&t| starts[t].unwrap()).sum();
        let end_sum: Expression = present.iter().map(|&t| ends[t].unwrap()).sum();
        self.constraints
            .push(constraint!(start_sum.clone() <= max_blocks as f64));
        self.constraints
            .push(constraint!(end_sum.clone() <= max_blocks as f64));
        self.constraints.push(constraint!(start_sum == end_sum));

        self.constraints.push(constraint!(
            Expression::from(series[first].unwrap()) == starts[first].unwrap()
        ));
        for t in 1..series.len() {
            if let (Some(current), Some(previous)) = (series[t], series[t - 1]) {
                self.constraints.push(constraint!(
                    current - previous == starts[t].unwrap() - ends[t - 1].unwrap()
                ));
            }
        }
        self.constraints.push(constraint!(
            Expression::from(ends[last].unwrap()) == series[last].unwrap()
        ));
    }

    pub(crate) fn add_hard_constraints(&mut self) {
        self.add_timeset_forcing();
        self.add_availability();
        self.add_role_linkage();
        self.add_shift_contiguity();
        self.add_shift_length_bounds();
        self.add_weekly_limits();
        self.add_front_desk_exclusivity();
        self.add_front_desk_blocks();
        self.add_role_blocks();
        self.add_cross_department_split();
        self.add_department_maximums();
    }

    /// Timesets lock both the work slot and the role assignment.
    fn add_timeset_forcing(&mut self) {
        for &(e, d, t, r) in &self.normalized.forced {
            let work = self.tables.work(e, d, t);
            let assign = self
                .tables
                .assign(e, d, t, r)
                .expect("forced tuples always have an assignment variable");
            self.constraints.push(constraint!(Expression::from(work) == 1.0));
            self.constraints
                .push(constraint!(Expression::from(assign) == 1.0));
        }
    }

    fn add_availability(&mut self) {
        for (e, employee) in self.normalized.employees.iter().enumerate() {
            for d in 0..DAY_COUNT {
                for t in 0..SLOT_COUNT {
                    if employee.unavailable[d][t] {
                        let work = self.tables.work(e, d, t);
                        self.constraints
                            .push(constraint!(Expression::from(work) == 0.0));
                    }
                }
            }
        }
    }

    /// Role exclusivity and the work linkage: at most one role per slot, the
    /// role sum equals `work`, every assignment implies work, and any
    /// department assignment requires a staffed front desk that slot.
    fn add_role_linkage(&mut self) {
        for e in 0..self.employee_count() {
            for d in 0..DAY_COUNT {
                for t in 0..SLOT_COUNT {
                    let role_sum = self.slot_role_sum(e, d, t);
                    let work = self.tables.work(e, d, t);
                    self.constraints
                        .push(constraint!(role_sum.clone() <= 1.0));
                    self.constraints.push(constraint!(role_sum == work));

                    for r in 0..self.role_count() {
                        if let Some(assign) = self.tables.assign(e, d, t, r) {
                            self.constraints.push(constraint!(assign - work <= 0.0));
                        }
                    }

                    for &r in &self.normalized.department_roles {
                        if let Some(assign) = self.tables.assign(e, d, t, r) {
                            let coverage = self.front_desk_slot_sum(d, t);
                            self.constraints
                                .push(constraint!(coverage - assign >= 0.0));
                        }
                    }
                }
            }
        }
    }

    /// One contiguous shift block per day; two only where forced slots leave
    /// a gap.
    fn add_shift_contiguity(&mut self) {
        for e in 0..self.employee_count() {
            for d in 0..DAY_COUNT {
                let max_blocks = if self.split_days.contains(&(e, d)) { 2 } else { 1 };
                let series: Vec<Option<Variable>> = (0..SLOT_COUNT)
                    .map(|t| Some(self.tables.work(e, d, t)))
                    .collect();
                self.add_block_contiguity(&series, max_blocks);
            }
        }
    }

    /// Daily length: zero or a full minimum-length shift, capped by the daily
    /// maximum. Days with forced slots skip the minimum but keep the cap,
    /// raised to the forced count if needed.
    fn add_shift_length_bounds(&mut self) {
        for (e, employee) in self.normalized.employees.iter().enumerate() {
            let favored = employee.is_favored();
            for d in 0..DAY_COUNT {
                let total = self.day_work_sum(e, d);
                let worked = self.tables.works_day(e, d);
                let forced_count = self.forced_per_day[self.tables.grid.ed(e, d)];

                let day_max = if favored {
                    FAVORED_MAX_SLOTS
                } else {
                    self.settings.max_slots
                };
                let day_max = day_max.max(forced_count);

                // 30-minute shifts are never allowed, and 1- or 1.5-hour
                // shifts only for favored staff, so the effective floor is
                // min_slots rounded up to 4 for everyone else.
                let day_min = if forced_count > 0 {
                    1
                } else if favored {
                    FAVORED_MIN_SLOTS
                } else {
                    self.settings.min_slots.max(4)
                };

                self.constraints
                    .push(constraint!(total.clone() - (day_max as f64) * worked <= 0.0));
                self.constraints
                    .push(constraint!(total - (day_min as f64) * worked >= 0.0));
            }
        }
    }

    /// Personal weekly maximum, the universal ceiling, and the hard target
    /// window with its relaxed lower bound.
    fn add_weekly_limits(&mut self) {
        for (e, employee) in self.normalized.employees.iter().enumerate() {
            let total = self.week_work_sum(e);
            self.constraints.push(constraint!(
                total.clone() <= (employee.max_slots) as f64
            ));
            self.constraints.push(constraint!(
                total.clone() <= (UNIVERSAL_MAXIMUM_HOURS * 2) as f64
            ));
            self.constraints.push(constraint!(
                total.clone() <= self.feasible_upper[e] as f64
            ));
            self.constraints
                .push(constraint!(total >= self.feasible_lower[e] as f64));
        }
    }

    /// No double-staffed front desk.
    fn add_front_desk_exclusivity(&mut self) {
        for d in 0..DAY_COUNT {
            for t in 0..SLOT_COUNT {
                let coverage = self.front_desk_slot_sum(d, t);
                self.constraints.push(constraint!(coverage <= 1.0));
            }
        }
    }

    /// Front-desk duty is one contiguous block of at least two hours per day.
    /// Days with any forced front-desk slot skip the minimum (forced blocks
    /// fix adjacency).
    fn add_front_desk_blocks(&mut self) {
        for e in 0..self.employee_count() {
            let any_fd = (0..DAY_COUNT).any(|d| {
                (0..SLOT_COUNT)
                    .any(|t| self.tables.assign(e, d, t, Normalized::FRONT_DESK).is_some())
            });
            if !any_fd {
                continue;
            }
            for d in 0..DAY_COUNT {
                let series: Vec<Option<Variable>> = (0..SLOT_COUNT)
                    .map(|t| self.tables.assign(e, d, t, Normalized::FRONT_DESK))
                    .collect();
                if series.iter().all(Option::is_none) {
                    continue;
                }
                self.add_block_contiguity(&series, 1);

                let exempt = self.day_has_forced_fd[d]
                    || self.forced_roles.contains(&(e, d, Normalized::FRONT_DESK));
                if !exempt {
                    let total = self.role_day_sum(e, d, Normalized::FRONT_DESK);
                    let on_desk = self.bool_var();
                    self.constraints.push(constraint!(
                        total.clone() - (SLOT_COUNT as f64) * on_desk <= 0.0
                    ));
                    self.constraints.push(constraint!(
                        total - (MIN_FRONT_DESK_SLOTS as f64) * on_desk >= 0.0
                    ));
                }
            }
        }
    }

    /// Per-role contiguity and minimum block length: no 30-minute role
    /// fragments, and (when enabled) no sub-2-hour department blocks for
    /// non-favored staff.
    fn add_role_blocks(&mut self) {
        for (e, employee) in self.normalized.employees.iter().enumerate() {
            let favored = employee.is_favored();
            for d in 0..DAY_COUNT {
                for r in 0..self.role_count() {
                    let series: Vec<Option<Variable>> = (0..SLOT_COUNT)
                        .map(|t| self.tables.assign(e, d, t, r))
                        .collect();
                    if series.iter().all(Option::is_none) {
                        continue;
                    }
                    self.add_block_contiguity(&series, 1);

                    let forced = self.forced_roles.contains(&(e, d, r));
                    let fd_exempt =
                        r == Normalized::FRONT_DESK && self.day_has_forced_fd[d];
                    if forced || fd_exempt {
                        continue;
                    }

                    let block_min = if self.settings.enforce_min_dept_block
                        && !favored
                        && r != Normalized::FRONT_DESK
                    {
                        4
                    } else {
                        2
                    };
                    let total = self.role_day_sum(e, d, r);
                    let in_role = self.bool_var();
                    self.constraints.push(constraint!(
                        total.clone() - (SLOT_COUNT as f64) * in_role <= 0.0
                    ));
                    self.constraints
                        .push(constraint!(total - (block_min as f64) * in_role >= 0.0));
                }
            }
        }
    }

    /// A 2-hour shift cannot be split 1h+1h across two departments: when the
    /// daily total is exactly 4 slots, at most one department may hold
    /// exactly 2 of them.
    fn add_cross_department_split(&mut self) {
        if !self.settings.enforce_min_dept_block {
            return;
        }
        let department_roles = self.normalized.department_roles.clone();
        for e in 0..self.employee_count() {
            for d in 0..DAY_COUNT {
                let active: Vec<usize> = department_roles
                    .iter()
                    .copied()
                    .filter(|&r| {
                        (0..SLOT_COUNT).any(|t| self.tables.assign(e, d, t, r).is_some())
                    })
                    .collect();
                if active.len() < 2 {
                    continue;
                }

                let mut exactly_two = Vec::new();
                for &r in &active {
                    let total = self.role_day_sum(e, d, r);
                    let ge2 = self.ge_indicator(total.clone(), 2, SLOT_COUNT as i64);
                    let ge3 = self.ge_indicator(total, 3, SLOT_COUNT as i64);
                    exactly_two.push((ge2, ge3));
                }

                let shift_total = self.day_work_sum(e, d);
                let ge4 = self.ge_indicator(shift_total.clone(), 4, SLOT_COUNT as i64);
                let ge5 = self.ge_indicator(shift_total, 5, SLOT_COUNT as i64);

                // sum(exactly two) <= 1 + M * (1 - is_four_slot_shift)
                let m = active.len() as f64;
                let two_count: Expression = exactly_two
                    .iter()
                    .map(|&(ge2, ge3)| ge2 - ge3)
                    .sum();
                self.constraints.push(constraint!(
                    two_count + m * ge4 - m * ge5 <= 1.0 + m
                ));
            }
        }
    }

    /// Department effective units stay within four units per max hour.
    fn add_department_maximums(&mut self) {
        for &role in &self.normalized.department_roles {
            let Some(max_hours) = self.normalized.department_max_hours[role] else {
                continue;
            };
            let max_units = (max_hours * 4.0).round();
            let units = self.department_units(role);
            self.constraints.push(constraint!(units <= max_units));
        }
    }
}

/// Hard weekly window per employee: `target ± delta` clamped by availability,
/// the personal maximum and the universal ceiling, with the lower bound
/// progressively relaxed while timesets tie up department capacity.
pub(crate) fn feasible_weekly_bounds(
    normalized: &Normalized,
    context: &DomainContext,
    settings: &SolveSettings,
) -> (Vec<i64>, Vec<i64>) {
    let forced_dept_slots = normalized
        .forced
        .iter()
        .filter(|&&(_, _, _, r)| r != Normalized::FRONT_DESK)
        .count() as i64;
    let fd_qualified = normalized.front_desk_qualified().len().max(1) as i64;
    let delta_slots = settings.target_hard_delta * 2;
    let universal_slots = UNIVERSAL_MAXIMUM_HOURS * 2;

    let mut lowers = Vec::with_capacity(normalized.employee_count());
    let mut uppers = Vec::with_capacity(normalized.employee_count());
    for (e, employee) in normalized.employees.iter().enumerate() {
        let target_slots = employee.target_slots;
        let upper = (target_slots + delta_slots)
            .min(employee.max_slots)
            .min(universal_slots);
        let mut lower = (target_slots - delta_slots)
            .max(0)
            .min(context.availability_slots[e])
            .min(upper);

        if forced_dept_slots >= 30 {
            lower = 0;
        } else if forced_dept_slots >= 4 {
            if employee.is_qualified(Normalized::FRONT_DESK) {
                if forced_dept_slots >= 20 {
                    lower = lower.min(2); // keep at most one hour of obligation
                } else {
                    lower -= lower.min(forced_dept_slots / fd_qualified);
                }
            } else if forced_dept_slots >= 20 {
                lower /= 2;
            } else {
                lower -= lower.min(forced_dept_slots / 10);
            }
        }

        lowers.push(lower.clamp(0, upper));
        uppers.push(upper);
    }
    (lowers, uppers)
}
