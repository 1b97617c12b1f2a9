use serde::Serialize;
use shared::{Day, SolverStatus, SLOT_COUNT};

/// A solved weekly schedule. Self-contained: carries the employee and role
/// names so reporting needs nothing else.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    pub status: SolverStatus,
    pub objective: f64,
    pub solve_seconds: f64,
    pub employees: Vec<String>,
    /// Role names; index 0 is always the front desk.
    pub roles: Vec<String>,
    pub role_display_names: Vec<String>,
    /// Department role indices in display order.
    pub department_roles: Vec<usize>,
    /// Packed `(employee, day, slot)` grid of assigned role indices.
    cells: Vec<Option<usize>>,
    pub employee_target_hours: Vec<f64>,
    pub employee_max_hours: Vec<f64>,
    pub employee_qualifications: Vec<Vec<usize>>,
    pub department_targets: Vec<f64>,
    pub department_max_hours: Vec<f64>,
    /// Primary ("dual-credit") department per employee.
    pub primary_department: Vec<Option<usize>>,
    /// Post-validation findings; empty for a clean solve.
    pub invariant_violations: Vec<String>,
}

impl Schedule {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        status: SolverStatus,
        objective: f64,
        solve_seconds: f64,
        employees: Vec<String>,
        roles: Vec<String>,
        role_display_names: Vec<String>,
        department_roles: Vec<usize>,
        cells: Vec<Option<usize>>,
        employee_target_hours: Vec<f64>,
        employee_max_hours: Vec<f64>,
        employee_qualifications: Vec<Vec<usize>>,
        department_targets: Vec<f64>,
        department_max_hours: Vec<f64>,
        primary_department: Vec<Option<usize>>,
    ) -> Self {
        debug_assert_eq!(cells.len(), employees.len() * Day::ALL.len() * SLOT_COUNT);
        Self {
            status,
            objective,
            solve_seconds,
            employees,
            roles,
            role_display_names,
            department_roles,
            cells,
            employee_target_hours,
            employee_max_hours,
            employee_qualifications,
            department_targets,
            department_max_hours,
            primary_department,
            invariant_violations: Vec::new(),
        }
    }

    fn cell_index(&self, employee: usize, day: Day, slot: usize) -> usize {
        (employee * Day::ALL.len() + day.index()) * SLOT_COUNT + slot
    }

    /// Role assigned to the employee in a slot, if any.
    pub fn role_at(&self, employee: usize, day: Day, slot: usize) -> Option<usize> {
        self.cells[self.cell_index(employee, day, slot)]
    }

    pub fn is_working(&self, employee: usize, day: Day, slot: usize) -> bool {
        self.role_at(employee, day, slot).is_some()
    }

    /// Slots the employee works across the whole week.
    pub fn weekly_slots(&self, employee: usize) -> usize {
        Day::ALL
            .iter()
            .map(|&d| self.day_slots(employee, d))
            .sum()
    }

    /// Slots the employee works on one day.
    pub fn day_slots(&self, employee: usize, day: Day) -> usize {
        (0..SLOT_COUNT)
            .filter(|&t| self.is_working(employee, day, t))
            .count()
    }

    /// Employees assigned to `role` in a slot.
    pub fn workers_in_role(&self, role: usize, day: Day, slot: usize) -> Vec<usize> {
        (0..self.employees.len())
            .filter(|&e| self.role_at(e, day, slot) == Some(role))
            .collect()
    }

    /// Total slots assigned to `role` over the week.
    pub fn role_total_slots(&self, role: usize) -> usize {
        let mut total = 0;
        for day in Day::ALL {
            for slot in 0..SLOT_COUNT {
                total += self.workers_in_role(role, day, slot).len();
            }
        }
        total
    }
}

/// Per-department hour accounting. Dual slots are front-desk slots worked by
/// employees whose primary department is this one; they count at half weight.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentBreakdown {
    pub role: usize,
    pub focused_slots: usize,
    pub dual_slots: usize,
    pub focused_hours: f64,
    pub dual_hours_total: f64,
    pub dual_hours_counted: f64,
    pub actual_hours: f64,
}

/// Structured diagnostics for a model the solver could not satisfy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InfeasibilityReport {
    /// `(day, slot)` pairs where no front-desk-qualified employee is
    /// available.
    pub front_desk_gaps: Vec<(Day, usize)>,
    /// Forced department slots that no available front-desk employee can
    /// supervise.
    pub timeset_coverage_gaps: Vec<String>,
    /// Training pairs with no overlapping workable slots.
    pub training_without_overlap: Vec<String>,
    /// Aggregate hour-balance summary (targets vs availability).
    pub hour_balance: String,
    pub hints: Vec<String>,
}

/// Outcome of a solve: infeasibility is a value, not an error.
#[derive(Debug)]
pub enum ScheduleOutcome {
    Solved(Schedule),
    Infeasible(InfeasibilityReport),
}

impl ScheduleOutcome {
    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            ScheduleOutcome::Solved(schedule) => Some(schedule),
            ScheduleOutcome::Infeasible(_) => None,
        }
    }
}
