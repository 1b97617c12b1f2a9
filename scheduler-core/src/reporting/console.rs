//! Console output for solved schedules.

use shared::{Day, SLOT_COUNT};

use crate::config::slot_range_label;
use crate::domain::{InfeasibilityReport, Schedule};
use crate::reporting::stats::aggregate_department_hours;

const COLUMN_WIDTH: usize = 22;

pub fn print_schedule(schedule: &Schedule) {
    println!("\n{}", "=".repeat(120));
    println!("SCHEDULE STATUS: {:?}", schedule.status);
    println!("{}", "=".repeat(120));

    println!("\nSolution found!");
    println!("\nSolver Statistics:");
    println!("  - Solve time: {:.2} seconds", schedule.solve_seconds);
    println!("  - Objective value: {:.1}", schedule.objective);
    if !schedule.invariant_violations.is_empty() {
        println!(
            "  - WARNING: {} post-solve invariant violations",
            schedule.invariant_violations.len()
        );
    }

    let role_columns: Vec<usize> =
        std::iter::once(0).chain(schedule.department_roles.iter().copied()).collect();

    for day in Day::ALL {
        println!("\n{}", "─".repeat(120));
        println!("{}", day.label().to_uppercase());
        println!("{}", "─".repeat(120));

        let mut header = format!("\n{:<12}", "Time");
        for &role in &role_columns {
            header.push_str(&format!(
                "{:<width$}",
                schedule.role_display_names[role],
                width = COLUMN_WIDTH
            ));
        }
        println!("{}", header);
        println!("{}", "─".repeat(12 + COLUMN_WIDTH * role_columns.len()));

        for t in 0..SLOT_COUNT {
            let mut row = format!("{:<12}", slot_range_label(t));
            for &role in &role_columns {
                let workers: Vec<&str> = schedule
                    .workers_in_role(role, day, t)
                    .into_iter()
                    .map(|e| schedule.employees[e].as_str())
                    .collect();
                let cell = if workers.is_empty() {
                    if role == 0 {
                        "ERROR: UNCOVERED".to_string()
                    } else {
                        "-".to_string()
                    }
                } else {
                    workers.join(", ")
                };
                row.push_str(&format!("{:<width$}", cell, width = COLUMN_WIDTH));
            }
            println!("{}", row);
        }
    }

    print_employee_summary(schedule);
    print_role_distribution(schedule);
}

fn print_employee_summary(schedule: &Schedule) {
    println!("\n{}", "=".repeat(120));
    println!("EMPLOYEE SUMMARY");
    println!("{}\n", "=".repeat(120));

    println!(
        "{:<15}{:<35}{:<30}{}",
        "Employee", "Qualifications", "Hours (Target/Max)", "Days Worked"
    );
    println!("{}", "─".repeat(120));

    for (e, name) in schedule.employees.iter().enumerate() {
        let mut total_slots = 0;
        let mut days_worked = Vec::new();
        for day in Day::ALL {
            let day_slots = schedule.day_slots(e, day);
            if day_slots > 0 {
                days_worked.push(format!("{}({:.1}h)", day.label(), day_slots as f64 * 0.5));
                total_slots += day_slots;
            }
        }

        let quals: Vec<&str> = schedule.employee_qualifications[e]
            .iter()
            .map(|&role| schedule.roles[role].as_str())
            .collect();
        let days_string = if days_worked.is_empty() {
            "None".to_string()
        } else {
            days_worked.join(", ")
        };

        let target = schedule.employee_target_hours[e];
        let max = schedule.employee_max_hours[e];
        let total_hours = total_slots as f64 * 0.5;
        let mut hours_string = format!("{:.1} (target {}/max {})", total_hours, target, max);
        if (total_hours - target).abs() <= 0.5 {
            hours_string = format!("* {}", hours_string);
        }

        println!(
            "{:<15}{:<35}{:<30}{}",
            name,
            quals.join(", "),
            hours_string,
            days_string
        );
    }
}

fn print_role_distribution(schedule: &Schedule) {
    println!("\n{}", "=".repeat(120));
    println!("ROLE DISTRIBUTION");
    println!("{}\n", "=".repeat(120));

    for day in Day::ALL {
        let mut parts = Vec::new();
        for (role, display) in schedule.role_display_names.iter().enumerate() {
            let slots: usize = (0..SLOT_COUNT)
                .map(|t| schedule.workers_in_role(role, day, t).len())
                .sum();
            if slots > 0 {
                parts.push(format!("{} {:.1}h", display, slots as f64 * 0.5));
            }
        }
        let summary = if parts.is_empty() {
            "No assignments".to_string()
        } else {
            parts.join(", ")
        };
        println!("{}: {}", day.label(), summary);
    }

    println!("\nTOTAL HOURS BY ROLE");
    println!("{}", "─".repeat(140));
    println!(
        "{:<25}{:<12}{:<12}{:<12}{:<12}{:<14}{:<15}{:<12}{}",
        "Role", "Actual", "Target", "Max", "Delta", "Dual Hours", "Dual Counted", "Focused", "Status"
    );
    println!("{}", "─".repeat(140));

    let (role_direct_slots, _, breakdown) = aggregate_department_hours(schedule);

    // Front desk first: direct hours only, no dual accounting.
    let fd_hours = role_direct_slots[0] as f64 * 0.5;
    println!(
        "{:<25}{:<12}{:<12}{:<12}{:<12}{:<14}{:<15}{:<12}{}",
        schedule.role_display_names[0],
        format!("{:.1}h", fd_hours),
        "-",
        "-",
        "-",
        "-",
        "-",
        format!("{:.1}h", fd_hours),
        "-"
    );

    for stats in &breakdown {
        let role = stats.role;
        let target = schedule.department_targets[role];
        let max = schedule.department_max_hours[role];
        let delta = stats.actual_hours - target;
        let status = if delta.abs() <= 1.0 {
            "On Target"
        } else if delta > 0.0 {
            "Over"
        } else {
            "Under"
        };
        println!(
            "{:<25}{:<12}{:<12}{:<12}{:<12}{:<14}{:<15}{:<12}{}",
            schedule.role_display_names[role],
            format!("{:.1}h", stats.actual_hours),
            format!("{:.1}h", target),
            format!("{:.1}h", max),
            format!("{:+.1}h", delta),
            format!("{:.1}h", stats.dual_hours_total),
            format!("{:.1}h", stats.dual_hours_counted),
            format!("{:.1}h", stats.focused_hours),
            status
        );
    }
}

pub fn print_infeasibility(report: &InfeasibilityReport) {
    println!("\n{}", "=".repeat(120));
    println!("SCHEDULE STATUS: INFEASIBLE");
    println!("{}", "=".repeat(120));
    println!("\nNo solution found!");
    println!("\nDiagnostics:");

    if !report.front_desk_gaps.is_empty() {
        let preview: Vec<String> = report
            .front_desk_gaps
            .iter()
            .take(5)
            .map(|&(day, slot)| format!("{} {}", day.label(), slot_range_label(slot)))
            .collect();
        let more = if report.front_desk_gaps.len() > 5 {
            format!(" (+{} more)", report.front_desk_gaps.len() - 5)
        } else {
            String::new()
        };
        println!(
            "  - Front desk has no available staff at: {}{}",
            preview.join(", "),
            more
        );
    }
    for line in &report.timeset_coverage_gaps {
        println!("  - {}", line);
    }
    for line in &report.training_without_overlap {
        println!("  - {}", line);
    }
    println!("  - {}", report.hour_balance);
    for hint in &report.hints {
        println!("  - {}", hint);
    }
}
