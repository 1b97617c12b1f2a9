//! File export for solved schedules: a grid CSV mirroring the console view
//! and a JSON summary for downstream tooling.

use std::path::Path;

use serde_json::json;
use shared::{Day, DomainError, DomainResult, SLOT_COUNT};

use crate::config::slot_range_label;
use crate::domain::Schedule;
use crate::reporting::stats::aggregate_department_hours;

/// Write the weekly grid as CSV: one row per `(day, slot)`, one column per
/// role, cells listing the assigned employees.
pub fn export_schedule_csv(schedule: &Schedule, path: &Path) -> DomainResult<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|err| DomainError::DataError(format!("Export CSV: {}", err)))?;

    let role_columns: Vec<usize> =
        std::iter::once(0).chain(schedule.department_roles.iter().copied()).collect();

    let mut header = vec!["Day".to_string(), "Time".to_string()];
    header.extend(
        role_columns
            .iter()
            .map(|&role| schedule.role_display_names[role].clone()),
    );
    writer
        .write_record(&header)
        .map_err(|err| DomainError::DataError(format!("Export CSV: {}", err)))?;

    for day in Day::ALL {
        for t in 0..SLOT_COUNT {
            let mut row = vec![day.label().to_string(), slot_range_label(t)];
            for &role in &role_columns {
                let workers: Vec<&str> = schedule
                    .workers_in_role(role, day, t)
                    .into_iter()
                    .map(|e| schedule.employees[e].as_str())
                    .collect();
                row.push(workers.join(", "));
            }
            writer
                .write_record(&row)
                .map_err(|err| DomainError::DataError(format!("Export CSV: {}", err)))?;
        }
    }

    writer
        .flush()
        .map_err(|err| DomainError::DataError(format!("Export CSV: {}", err)))?;
    tracing::info!(path = %path.display(), "Schedule grid exported");
    Ok(())
}

/// Write per-employee and per-department totals as JSON.
pub fn export_summary_json(schedule: &Schedule, path: &Path) -> DomainResult<()> {
    let (role_direct_slots, fd_slots_by_employee, breakdown) =
        aggregate_department_hours(schedule);

    let employees: Vec<_> = schedule
        .employees
        .iter()
        .enumerate()
        .map(|(e, name)| {
            json!({
                "name": name,
                "hours": schedule.weekly_slots(e) as f64 * 0.5,
                "target_hours": schedule.employee_target_hours[e],
                "max_hours": schedule.employee_max_hours[e],
                "front_desk_hours": fd_slots_by_employee[e] as f64 * 0.5,
                "primary_department": schedule.primary_department[e]
                    .map(|role| schedule.roles[role].clone()),
            })
        })
        .collect();

    let departments: Vec<_> = breakdown
        .iter()
        .map(|stats| {
            json!({
                "department": schedule.roles[stats.role],
                "focused_slots": stats.focused_slots,
                "dual_slots": stats.dual_slots,
                "focused_hours": stats.focused_hours,
                "dual_hours_total": stats.dual_hours_total,
                "dual_hours_counted": stats.dual_hours_counted,
                "actual_hours": stats.actual_hours,
                "target_hours": schedule.department_targets[stats.role],
                "max_hours": schedule.department_max_hours[stats.role],
            })
        })
        .collect();

    let summary = json!({
        "status": schedule.status,
        "objective": schedule.objective,
        "solve_seconds": schedule.solve_seconds,
        "front_desk_hours": role_direct_slots[0] as f64 * 0.5,
        "employees": employees,
        "departments": departments,
        "invariant_violations": schedule.invariant_violations,
    });

    let contents = serde_json::to_string_pretty(&summary)
        .map_err(|err| DomainError::DataError(format!("Export JSON: {}", err)))?;
    std::fs::write(path, contents)
        .map_err(|err| DomainError::DataError(format!("Export JSON: {}", err)))?;
    tracing::info!(path = %path.display(), "Schedule summary exported");
    Ok(())
}
