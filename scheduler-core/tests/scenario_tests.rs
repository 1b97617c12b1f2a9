//! End-to-end solves on small fixtures, checking the invariants every
//! returned schedule must satisfy.

use std::collections::BTreeSet;

use scheduler_core::domain::staff::{DepartmentRequirement, StaffMember};
use scheduler_core::domain::{
    DepartmentRequirements, EqualityRequest, ScheduleRequests, StaffData, TimesetRequest,
    TrainingRequest,
};
use scheduler_core::{solve_schedule, Day, Schedule, ScheduleOutcome, SolveSettings};
use shared::SLOT_COUNT;

const FRONT_DESK: usize = 0;

fn member(name: &str, roles: &[&str], target: f64, max: f64, year: u8) -> StaffMember {
    StaffMember {
        name: name.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        target_hours: target,
        max_hours: max,
        year,
        unavailable: [[false; SLOT_COUNT]; 5],
    }
}

fn staff(members: Vec<StaffMember>) -> StaffData {
    let mut roles: BTreeSet<String> = BTreeSet::new();
    for m in &members {
        roles.extend(m.roles.iter().cloned());
    }
    StaffData {
        employees: members,
        roles: roles.into_iter().collect(),
    }
}

fn departments(rows: &[(&str, f64, f64)]) -> DepartmentRequirements {
    DepartmentRequirements {
        departments: rows
            .iter()
            .map(|&(name, target, max)| DepartmentRequirement {
                name: name.to_string(),
                display_name: name.to_string(),
                target_hours: target,
                max_hours: max,
            })
            .collect(),
    }
}

fn test_settings() -> SolveSettings {
    SolveSettings {
        solver_max_time: 30,
        ..SolveSettings::default()
    }
}

fn solve(
    staff_data: &StaffData,
    requirements: &DepartmentRequirements,
    requests: &ScheduleRequests,
) -> Schedule {
    match solve_schedule(staff_data, requirements, requests, &test_settings()).unwrap() {
        ScheduleOutcome::Solved(schedule) => schedule,
        ScheduleOutcome::Infeasible(report) => {
            panic!("expected a feasible schedule, got diagnostics: {:?}", report)
        }
    }
}

/// The invariants of every returned schedule: role exclusivity, contiguity,
/// length bounds, front-desk exclusivity and supervision.
fn assert_schedule_invariants(schedule: &Schedule, requests: &ScheduleRequests) {
    assert!(
        schedule.invariant_violations.is_empty(),
        "post-validator flagged: {:?}",
        schedule.invariant_violations
    );

    // Front desk exclusivity: at most one person on the desk per slot.
    for day in Day::ALL {
        for t in 0..SLOT_COUNT {
            assert!(schedule.workers_in_role(FRONT_DESK, day, t).len() <= 1);
        }
    }

    // Department supervision: department work only under a staffed desk.
    for day in Day::ALL {
        for t in 0..SLOT_COUNT {
            let dept_active = schedule
                .department_roles
                .iter()
                .any(|&role| !schedule.workers_in_role(role, day, t).is_empty());
            if dept_active {
                assert_eq!(
                    schedule.workers_in_role(FRONT_DESK, day, t).len(),
                    1,
                    "unsupervised department work on {} slot {}",
                    day,
                    t
                );
            }
        }
    }

    // Contiguity and per-day length: one block (two on split-licensed days),
    // and never a bare 30-minute shift.
    let forced_days: BTreeSet<(String, usize)> = requests
        .timesets
        .iter()
        .map(|ts| (ts.employee.to_lowercase(), Day::parse(&ts.day).unwrap().index()))
        .collect();
    for (e, name) in schedule.employees.iter().enumerate() {
        for day in Day::ALL {
            let worked: Vec<usize> = (0..SLOT_COUNT)
                .filter(|&t| schedule.is_working(e, day, t))
                .collect();
            if worked.is_empty() {
                continue;
            }
            let gaps = worked.windows(2).filter(|w| w[1] - w[0] > 1).count();
            assert!(gaps <= 1, "{} has {} gaps on {}", name, gaps, day);
            let forced = forced_days.contains(&(name.to_lowercase(), day.index()));
            if gaps > 0 {
                assert!(forced, "{} split a shift on {} without a timeset", name, day);
            }
            if !forced {
                assert!(
                    worked.len() >= 4,
                    "{} works a sub-minimum shift of {} slots on {}",
                    name,
                    worked.len(),
                    day
                );
            }
        }
    }
}

/// A single front-desk employee staffs the desk and nothing else. The
/// requirements row for a department nobody is qualified for is ignored with
/// a warning.
#[test]
fn test_single_front_desk_employee_covers_the_desk() {
    let staff_data = staff(vec![member("Alice", &["front_desk"], 10.0, 12.0, 1)]);
    let requirements = departments(&[("events", 0.0, 0.0)]);
    let requests = ScheduleRequests::default();
    let schedule = solve(&staff_data, &requirements, &requests);
    assert_schedule_invariants(&schedule, &requests);

    let weekly = schedule.weekly_slots(0);
    // Hard window: target 20 slots, +/- 10, capped by the 24-slot personal max.
    assert!((10..=24).contains(&weekly), "worked {} slots", weekly);
    // Zero-capacity department: every worked slot is front desk.
    assert_eq!(schedule.role_total_slots(FRONT_DESK), weekly);
    for day in Day::ALL {
        for t in 0..SLOT_COUNT {
            let covered = !schedule.workers_in_role(FRONT_DESK, day, t).is_empty();
            assert_eq!(covered, schedule.is_working(0, day, t));
        }
    }
}

/// An unavailable slot leaves the desk uncovered but the solve succeeds.
#[test]
fn test_front_desk_gap_is_soft() {
    let mut alice = member("Alice", &["front_desk"], 10.0, 12.0, 1);
    alice.unavailable[Day::Mon.index()][0] = true;
    let staff_data = staff(vec![alice]);
    let requirements = departments(&[("events", 0.0, 0.0)]);
    let requests = ScheduleRequests::default();
    let schedule = solve(&staff_data, &requirements, &requests);
    assert_schedule_invariants(&schedule, &requests);
    assert!(schedule.workers_in_role(FRONT_DESK, Day::Mon, 0).is_empty());
}

/// A timeset pins the assignment and pulls front-desk cover with it.
#[test]
fn test_timeset_forces_assignment_with_cover() {
    let staff_data = staff(vec![
        member("Alice", &["marketing"], 10.0, 12.0, 2),
        member("Bob", &["front_desk"], 10.0, 19.0, 1),
    ]);
    let requirements = departments(&[("marketing", 5.0, 10.0)]);
    let requests = ScheduleRequests {
        timesets: vec![TimesetRequest {
            employee: "Alice".to_string(),
            day: "Wed".to_string(),
            department: "marketing".to_string(),
            start_slot: 2,
            end_slot: 10,
        }],
        ..Default::default()
    };
    let schedule = solve(&staff_data, &requirements, &requests);
    assert_schedule_invariants(&schedule, &requests);

    let marketing = schedule
        .roles
        .iter()
        .position(|r| r == "marketing")
        .unwrap();
    for t in 2..10 {
        assert_eq!(schedule.role_at(0, Day::Wed, t), Some(marketing));
        // Hard supervision: Bob is on the desk for every forced slot.
        assert_eq!(schedule.workers_in_role(FRONT_DESK, Day::Wed, t), vec![1]);
    }
    assert!(schedule.weekly_slots(0) >= 8);
}

/// Trainees are steered into overlapping department time.
#[test]
fn test_training_pair_overlaps() {
    let staff_data = staff(vec![
        member("Bob", &["events"], 10.0, 12.0, 2),
        member("Cara", &["events"], 10.0, 12.0, 2),
        member("Dana", &["front_desk"], 15.0, 19.0, 1),
    ]);
    let requirements = departments(&[("events", 10.0, 15.0)]);
    let requests = ScheduleRequests {
        training: vec![TrainingRequest {
            department: "events".to_string(),
            trainee_one: "Bob".to_string(),
            trainee_two: "Cara".to_string(),
        }],
        ..Default::default()
    };
    let schedule = solve(&staff_data, &requirements, &requests);
    assert_schedule_invariants(&schedule, &requests);

    let events = schedule.roles.iter().position(|r| r == "events").unwrap();
    let mut overlap = 0;
    for day in Day::ALL {
        for t in 0..SLOT_COUNT {
            if schedule.role_at(0, day, t) == Some(events)
                && schedule.role_at(1, day, t) == Some(events)
            {
                overlap += 1;
            }
        }
    }
    // Derived goal: floor(0.35 * 20) = 7 slots.
    assert!(overlap >= 7, "trainees overlap only {} slots", overlap);
}

/// A four-slot day cannot be split one hour + one hour across departments.
#[test]
fn test_no_cross_department_hour_split() {
    let staff_data = staff(vec![
        member("Dan", &["events", "marketing"], 2.0, 2.0, 2),
        member("Eve", &["front_desk"], 15.0, 19.0, 1),
    ]);
    let requirements = departments(&[("events", 1.0, 5.0), ("marketing", 1.0, 5.0)]);
    let requests = ScheduleRequests {
        favored_employees: [("Dan".to_string(), 1.0)].into(),
        ..Default::default()
    };
    let schedule = solve(&staff_data, &requirements, &requests);

    // Dan is favored, so two-slot role blocks are legal; the cross-department
    // split restriction still forbids 2+2 on a four-slot day.
    for day in Day::ALL {
        let day_total = schedule.day_slots(0, day);
        if day_total != 4 {
            continue;
        }
        let two_slot_departments = schedule
            .department_roles
            .iter()
            .filter(|&&role| {
                let slots = (0..SLOT_COUNT)
                    .filter(|&t| schedule.role_at(0, day, t) == Some(role))
                    .count();
                slots == 2
            })
            .count();
        assert!(
            two_slot_departments <= 1,
            "Dan split a 2-hour day across departments on {}",
            day
        );
    }
}

/// Equality requests drive paired employees to the same department hours.
#[test]
fn test_equality_request_balances_hours() {
    let staff_data = staff(vec![
        member("Dan", &["events"], 4.0, 6.0, 2),
        member("Eva", &["events"], 4.0, 6.0, 2),
        member("Fay", &["front_desk"], 15.0, 19.0, 1),
    ]);
    let requirements = departments(&[("events", 4.0, 8.0)]);
    let requests = ScheduleRequests {
        equality: vec![EqualityRequest {
            department: "events".to_string(),
            employee_one: "Dan".to_string(),
            employee_two: "Eva".to_string(),
        }],
        ..Default::default()
    };
    let schedule = solve(&staff_data, &requirements, &requests);
    assert_schedule_invariants(&schedule, &requests);

    let events = schedule.roles.iter().position(|r| r == "events").unwrap();
    let slots_of = |e: usize| {
        Day::ALL
            .iter()
            .map(|&day| {
                (0..SLOT_COUNT)
                    .filter(|&t| schedule.role_at(e, day, t) == Some(events))
                    .count()
            })
            .sum::<usize>()
    };
    assert_eq!(slots_of(0), slots_of(1));
}

/// Same inputs, same objective: the solve is deterministic.
#[test]
fn test_repeat_solve_is_deterministic() {
    let staff_data = staff(vec![
        member("Alice", &["front_desk", "events"], 10.0, 12.0, 2),
        member("Bob", &["front_desk", "marketing"], 10.0, 14.0, 3),
        member("Cara", &["marketing", "events"], 8.0, 10.0, 1),
    ]);
    let requirements = departments(&[("marketing", 8.0, 12.0), ("events", 6.0, 10.0)]);
    let requests = ScheduleRequests::default();
    let first = solve(&staff_data, &requirements, &requests);
    let second = solve(&staff_data, &requirements, &requests);
    assert_schedule_invariants(&first, &requests);
    assert_eq!(first.objective, second.objective);
}

/// A mixed fixture exercising favors, timesets and department limits at once.
#[test]
fn test_mixed_week_respects_all_hard_limits() {
    let mut cara = member("Cara", &["marketing", "events"], 8.0, 10.0, 1);
    cara.unavailable[Day::Fri.index()] = [true; SLOT_COUNT];
    let staff_data = staff(vec![
        member("Alice", &["front_desk", "events"], 10.0, 12.0, 2),
        member("Bob", &["front_desk", "marketing"], 10.0, 14.0, 3),
        cara,
    ]);
    let requirements = departments(&[("marketing", 8.0, 12.0), ("events", 6.0, 10.0)]);
    let requests = ScheduleRequests {
        favored_employees: [("Bob".to_string(), 1.5)].into(),
        timesets: vec![TimesetRequest {
            employee: "Cara".to_string(),
            day: "Tue".to_string(),
            department: "marketing".to_string(),
            start_slot: 4,
            end_slot: 8,
        }],
        ..Default::default()
    };
    let schedule = solve(&staff_data, &requirements, &requests);
    assert_schedule_invariants(&schedule, &requests);

    // Forced block honored.
    let marketing = schedule
        .roles
        .iter()
        .position(|r| r == "marketing")
        .unwrap();
    for t in 4..8 {
        assert_eq!(schedule.role_at(2, Day::Tue, t), Some(marketing));
    }

    // Unavailability honored.
    assert_eq!(schedule.day_slots(2, Day::Fri), 0);

    // Weekly ceilings: personal max and the universal cap.
    for (e, &max_hours) in schedule.employee_max_hours.iter().enumerate() {
        let slots = schedule.weekly_slots(e);
        assert!(slots as f64 <= max_hours * 2.0);
        assert!(slots <= 38);
    }

    // Department effective units within four units per max hour.
    let (role_direct, fd_by_employee, _) =
        scheduler_core::reporting::aggregate_department_hours(&schedule);
    for &role in &schedule.department_roles {
        let dual: usize = (0..schedule.employees.len())
            .filter(|&e| schedule.primary_department[e] == Some(role))
            .map(|e| fd_by_employee[e])
            .sum();
        let units = 2 * role_direct[role] + dual;
        assert!(units as f64 <= schedule.department_max_hours[role] * 4.0);
    }
}
