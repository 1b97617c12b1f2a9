//! Shared helpers for summarizing solved schedules.

use shared::{Day, SLOT_COUNT};

use crate::domain::{DepartmentBreakdown, Schedule};

/// Aggregate focused/dual hours for each department from a solved schedule.
///
/// Returns per-role direct slot counts (front desk included), front-desk
/// slots per employee, and the per-department breakdown. Dual credit goes to
/// each employee's primary department.
pub fn aggregate_department_hours(
    schedule: &Schedule,
) -> (Vec<usize>, Vec<usize>, Vec<DepartmentBreakdown>) {
    let mut role_direct_slots = vec![0usize; schedule.roles.len()];
    let mut front_desk_slots_by_employee = vec![0usize; schedule.employees.len()];

    for e in 0..schedule.employees.len() {
        for day in Day::ALL {
            for t in 0..SLOT_COUNT {
                if let Some(role) = schedule.role_at(e, day, t) {
                    role_direct_slots[role] += 1;
                    if role == 0 {
                        front_desk_slots_by_employee[e] += 1;
                    }
                }
            }
        }
    }

    let mut dual_slots_by_role = vec![0usize; schedule.roles.len()];
    for (e, &fd_slots) in front_desk_slots_by_employee.iter().enumerate() {
        match schedule.primary_department[e] {
            Some(primary) => dual_slots_by_role[primary] += fd_slots,
            None => {
                // No primary department: credit every qualified department.
                for &role in &schedule.employee_qualifications[e] {
                    if role != 0 {
                        dual_slots_by_role[role] += fd_slots;
                    }
                }
            }
        }
    }

    let breakdown = schedule
        .department_roles
        .iter()
        .map(|&role| {
            let focused_slots = role_direct_slots[role];
            let dual_slots = dual_slots_by_role[role];
            let focused_hours = focused_slots as f64 * 0.5;
            let dual_hours_total = dual_slots as f64 * 0.5;
            let dual_hours_counted = dual_hours_total * 0.5;
            DepartmentBreakdown {
                role,
                focused_slots,
                dual_slots,
                focused_hours,
                dual_hours_total,
                dual_hours_counted,
                actual_hours: focused_hours + dual_hours_counted,
            }
        })
        .collect();

    (role_direct_slots, front_desk_slots_by_employee, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SolverStatus;

    /// Two employees, front desk + one department. Alice works front desk
    /// Mon slots 0-3 (her primary is events); Bob works events Mon slots 0-3.
    fn sample_schedule() -> Schedule {
        let employees = vec!["Alice".to_string(), "Bob".to_string()];
        let roles = vec!["front_desk".to_string(), "events".to_string()];
        let mut cells = vec![None; employees.len() * 5 * SLOT_COUNT];
        for t in 0..4 {
            cells[t] = Some(0); // Alice, Mon
            cells[5 * SLOT_COUNT + t] = Some(1); // Bob, Mon
        }
        Schedule::new(
            SolverStatus::Optimal,
            0.0,
            0.1,
            employees,
            roles.clone(),
            vec!["Front Desk".to_string(), "Events".to_string()],
            vec![1],
            cells,
            vec![10.0, 10.0],
            vec![12.0, 12.0],
            vec![vec![0, 1], vec![1]],
            vec![0.0, 5.0],
            vec![0.0, 10.0],
            vec![Some(1), Some(1)],
        )
    }

    #[test]
    fn test_focused_and_dual_accounting() {
        let schedule = sample_schedule();
        let (direct, fd_by_employee, breakdown) = aggregate_department_hours(&schedule);
        assert_eq!(direct[0], 4); // front desk slots
        assert_eq!(direct[1], 4); // events slots
        assert_eq!(fd_by_employee, vec![4, 0]);

        let events = &breakdown[0];
        assert_eq!(events.focused_slots, 4);
        assert_eq!(events.dual_slots, 4); // Alice's desk time, primary events
        assert_eq!(events.focused_hours, 2.0);
        assert_eq!(events.dual_hours_total, 2.0);
        assert_eq!(events.dual_hours_counted, 1.0);
        assert_eq!(events.actual_hours, 3.0);
    }
}
