//! Solver driver: hands the assembled model to HiGHS, post-validates the
//! returned assignment, and turns an unsatisfiable model into structured
//! diagnostics.

use std::time::Instant;

use good_lp::{default_solver, ResolutionError, Solution, SolverModel};
use shared::{Day, DomainError, DomainResult, SolverStatus, SLOT_COUNT};

use crate::config::{slot_range_label, SolveSettings, OBJECTIVE_SCALE};
use crate::domain::{
    DepartmentRequirements, InfeasibilityReport, Schedule, ScheduleOutcome, ScheduleRequests,
    StaffData,
};
use crate::engine::model::{ModelBuilder, VarTables, DAY_COUNT};
use crate::engine::normalize::{validate_inputs, Normalized};
use crate::engine::objective::compose_objective;
use crate::engine::precompute::DomainContext;
use crate::engine::progress::ProgressReporter;

/// Build and solve the weekly schedule. Input problems fail fast with
/// `InvalidInput`; an unsatisfiable model comes back as
/// `ScheduleOutcome::Infeasible` with diagnostics.
pub fn solve(
    staff: &StaffData,
    departments: &DepartmentRequirements,
    requests: &ScheduleRequests,
    settings: &SolveSettings,
) -> DomainResult<ScheduleOutcome> {
    let normalized = validate_inputs(staff, departments, requests)?;
    let context = DomainContext::build(&normalized, settings);

    let mut builder = ModelBuilder::new(&normalized, &context, settings);
    builder.add_hard_constraints();
    let objective = compose_objective(&mut builder);

    tracing::info!(
        employees = normalized.employee_count(),
        roles = normalized.role_count(),
        constraints = builder.constraints.len(),
        "Solving the scheduling problem"
    );

    let ModelBuilder {
        vars,
        tables,
        constraints,
        ..
    } = builder;

    let mut model = vars
        .maximise(objective.clone())
        .using(default_solver)
        .set_option("threads", 1) // single-threaded for reproducibility
        .set_option("random_seed", 1234)
        .set_option("log_to_console", "false")
        .set_option("time_limit", settings.solver_max_time as f64);
    for constraint in constraints {
        model.add_constraint(constraint);
    }

    let reporter = settings
        .show_progress
        .then(|| ProgressReporter::start(settings.solver_max_time));
    let started = Instant::now();
    let result = model.solve();
    let solve_seconds = started.elapsed().as_secs_f64();
    if let Some(reporter) = reporter {
        reporter.finish();
    }

    match result {
        Ok(solution) => {
            let status = if solve_seconds < settings.solver_max_time as f64 {
                SolverStatus::Optimal
            } else {
                SolverStatus::Feasible
            };
            let objective_value = solution.eval(&objective) / OBJECTIVE_SCALE as f64;
            tracing::info!(
                status = ?status,
                objective = objective_value,
                seconds = solve_seconds,
                "Solution found"
            );
            let schedule = extract_schedule(
                &normalized,
                &tables,
                &solution,
                status,
                objective_value,
                solve_seconds,
            );
            Ok(ScheduleOutcome::Solved(schedule))
        }
        Err(ResolutionError::Infeasible) => {
            tracing::warn!("Model is infeasible; assembling diagnostics");
            Ok(ScheduleOutcome::Infeasible(diagnose(
                &normalized,
                &context,
                None,
            )))
        }
        Err(ResolutionError::Unbounded) => Err(DomainError::SolverError(
            "Objective is unbounded; this indicates a model bug.".to_string(),
        )),
        Err(other) => {
            tracing::warn!(error = %other, "Solver stopped without a feasible solution");
            Ok(ScheduleOutcome::Infeasible(diagnose(
                &normalized,
                &context,
                Some(other.to_string()),
            )))
        }
    }
}

/// Read the assignment grid out of the solution and re-check the invariants
/// the model is supposed to guarantee. Violations are reported, not fatal:
/// finding one means the model itself has a bug.
fn extract_schedule(
    normalized: &Normalized,
    tables: &VarTables,
    solution: &impl Solution,
    status: SolverStatus,
    objective_value: f64,
    solve_seconds: f64,
) -> Schedule {
    let employees = normalized.employee_count();
    let roles = normalized.role_count();

    let mut cells: Vec<Option<usize>> = vec![None; employees * DAY_COUNT * SLOT_COUNT];
    let mut violations: Vec<String> = Vec::new();

    for e in 0..employees {
        for d in 0..DAY_COUNT {
            for t in 0..SLOT_COUNT {
                let mut active: Vec<usize> = (0..roles)
                    .filter(|&r| {
                        tables
                            .assign(e, d, t, r)
                            .is_some_and(|var| solution.value(var) > 0.5)
                    })
                    .collect();
                if active.len() > 1 {
                    violations.push(format!(
                        "{} holds {} roles at once on {} {}",
                        normalized.employees[e].name,
                        active.len(),
                        Day::ALL[d],
                        slot_range_label(t)
                    ));
                }
                cells[(e * DAY_COUNT + d) * SLOT_COUNT + t] = active.pop();
            }
        }
    }

    // Gap check: worked slots must form one contiguous block per day, two
    // where non-contiguous forced slots licensed a split.
    let split_days = normalized.split_shift_days();
    for e in 0..employees {
        for d in 0..DAY_COUNT {
            let worked: Vec<usize> = (0..SLOT_COUNT)
                .filter(|&t| cells[(e * DAY_COUNT + d) * SLOT_COUNT + t].is_some())
                .collect();
            let blocks = worked
                .windows(2)
                .filter(|pair| pair[1] - pair[0] > 1)
                .count()
                + usize::from(!worked.is_empty());
            let allowed = if split_days.contains(&(e, d)) { 2 } else { 1 };
            if blocks > allowed {
                violations.push(format!(
                    "{} has {} shift blocks on {} (allowed {})",
                    normalized.employees[e].name,
                    blocks,
                    Day::ALL[d],
                    allowed
                ));
            }
        }
    }

    for violation in &violations {
        tracing::warn!(violation = %violation, "Post-solve invariant violation");
    }

    let mut schedule = Schedule::new(
        status,
        objective_value,
        solve_seconds,
        normalized
            .employees
            .iter()
            .map(|employee| employee.name.clone())
            .collect(),
        normalized.roles.clone(),
        normalized.role_display_names.clone(),
        normalized.department_roles.clone(),
        cells,
        normalized
            .employees
            .iter()
            .map(|employee| employee.target_hours)
            .collect(),
        normalized
            .employees
            .iter()
            .map(|employee| employee.max_hours)
            .collect(),
        normalized
            .employees
            .iter()
            .map(|employee| employee.qualifications.iter().copied().collect())
            .collect(),
        normalized
            .department_targets
            .iter()
            .map(|target| target.unwrap_or(0.0))
            .collect(),
        normalized
            .department_max_hours
            .iter()
            .map(|max| max.unwrap_or(0.0))
            .collect(),
        normalized.primary_department.clone(),
    );
    schedule.invariant_violations = violations;
    schedule
}

/// Assemble the infeasibility report: front-desk coverage gaps, forced slots
/// nobody can supervise, training pairs with no shared availability, and the
/// aggregate hour balance.
fn diagnose(
    normalized: &Normalized,
    context: &DomainContext,
    budget_note: Option<String>,
) -> InfeasibilityReport {
    let mut report = InfeasibilityReport {
        front_desk_gaps: context.front_desk_gaps.clone(),
        ..Default::default()
    };

    let fd_qualified = normalized.front_desk_qualified();
    for &(e, d, t, r) in &normalized.forced {
        if r == Normalized::FRONT_DESK {
            continue;
        }
        let day = Day::ALL[d];
        let coverable = fd_qualified.iter().any(|&other| {
            other != e && !normalized.employees[other].is_unavailable(day, t)
        });
        if !coverable {
            report.timeset_coverage_gaps.push(format!(
                "Forced {} slot for {} on {} {} has no available front-desk cover.",
                normalized.roles[r],
                normalized.employees[e].name,
                day,
                slot_range_label(t)
            ));
        }
    }

    for plan in &normalized.training {
        let overlap = (0..DAY_COUNT)
            .flat_map(|d| (0..SLOT_COUNT).map(move |t| (d, t)))
            .filter(|&(d, t)| {
                context.is_workable(plan.trainee_one, d, t)
                    && context.is_workable(plan.trainee_two, d, t)
            })
            .count();
        if overlap == 0 {
            report.training_without_overlap.push(format!(
                "Training pair {} & {} in {} has no overlapping available slots.",
                normalized.employees[plan.trainee_one].name,
                normalized.employees[plan.trainee_two].name,
                normalized.roles[plan.department]
            ));
        }
    }

    let target_total: f64 = normalized
        .employees
        .iter()
        .map(|employee| employee.target_hours)
        .sum();
    let max_total: f64 = normalized
        .employees
        .iter()
        .map(|employee| employee.max_hours)
        .sum();
    let availability_total: f64 = context
        .availability_slots
        .iter()
        .map(|&slots| slots as f64 / 2.0)
        .sum();
    report.hour_balance = format!(
        "Targets total {:.1}h; personal maxima total {:.1}h; availability totals {:.1}h.",
        target_total, max_total, availability_total
    );

    if let Some(note) = budget_note {
        report.hints.push(format!(
            "Solver time budget exhausted before a feasible solution was found ({}). Try increasing solver_max_time.",
            note
        ));
    }
    report.hints.push(
        "Consider relaxing constraints (availability, training, or shift rules) or increasing solver time."
            .to_string(),
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::domain::staff::{DepartmentRequirement, StaffMember};

    fn staff_one_fd(unavailable_mon_8: bool) -> StaffData {
        let mut grid = [[false; SLOT_COUNT]; 5];
        if unavailable_mon_8 {
            grid[0][0] = true;
        }
        StaffData {
            employees: vec![StaffMember {
                name: "Alice".to_string(),
                roles: vec!["front_desk".to_string(), "events".to_string()],
                target_hours: 10.0,
                max_hours: 12.0,
                year: 1,
                unavailable: grid,
            }],
            roles: BTreeSet::from(["front_desk".to_string(), "events".to_string()])
                .into_iter()
                .collect(),
        }
    }

    fn requirements() -> DepartmentRequirements {
        DepartmentRequirements {
            departments: vec![DepartmentRequirement {
                name: "events".to_string(),
                display_name: "Events".to_string(),
                target_hours: 0.0,
                max_hours: 10.0,
            }],
        }
    }

    #[test]
    fn test_diagnose_reports_front_desk_gap() {
        let staff = staff_one_fd(true);
        let normalized =
            validate_inputs(&staff, &requirements(), &ScheduleRequests::default()).unwrap();
        let settings = SolveSettings::default();
        let context = DomainContext::build(&normalized, &settings);
        let report = diagnose(&normalized, &context, None);
        assert_eq!(report.front_desk_gaps, vec![(Day::Mon, 0)]);
        assert!(report.hour_balance.contains("Targets total 10.0h"));
        assert!(!report.hints.is_empty());
    }

    #[test]
    fn test_diagnose_flags_budget_exhaustion() {
        let staff = staff_one_fd(false);
        let normalized =
            validate_inputs(&staff, &requirements(), &ScheduleRequests::default()).unwrap();
        let settings = SolveSettings::default();
        let context = DomainContext::build(&normalized, &settings);
        let report = diagnose(&normalized, &context, Some("time limit".to_string()));
        assert!(report.hints[0].contains("budget exhausted"));
    }
}
