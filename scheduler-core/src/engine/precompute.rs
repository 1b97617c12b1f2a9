//! Derived structures computed once before the model is built: workable-slot
//! runs, availability totals, and front-desk coverage diagnostics.

use itertools::Itertools;
use shared::{Day, SLOT_COUNT};

use crate::config::{FAVORED_MIN_SLOTS, SolveSettings};
use crate::engine::normalize::Normalized;

/// Precomputed per-solve helpers. Everything here is a pure function of the
/// normalized inputs and the settings.
#[derive(Debug, Clone)]
pub struct DomainContext {
    /// `workable[e][d][t]`: the slot sits inside a maximal contiguous run of
    /// available slots at least one minimum shift long.
    workable: Vec<[[bool; SLOT_COUNT]; 5]>,
    /// Count of available slots per employee across the week.
    pub availability_slots: Vec<i64>,
    /// `(day, slot)` pairs where no front-desk-qualified employee is
    /// available. Used only for infeasibility diagnostics.
    pub front_desk_gaps: Vec<(Day, usize)>,
}

impl DomainContext {
    pub fn build(normalized: &Normalized, settings: &SolveSettings) -> Self {
        let workable = normalized
            .employees
            .iter()
            .map(|employee| {
                let min_len = if employee.is_favored() {
                    FAVORED_MIN_SLOTS
                } else {
                    settings.min_slots
                };
                let mut grid = [[false; SLOT_COUNT]; 5];
                for day in Day::ALL {
                    let available: Vec<usize> = (0..SLOT_COUNT)
                        .filter(|&t| !employee.is_unavailable(day, t))
                        .collect();
                    // Group into maximal contiguous runs; only runs long
                    // enough for a legal shift count as workable.
                    for (_, run) in &available
                        .iter()
                        .copied()
                        .enumerate()
                        .chunk_by(|&(position, slot)| slot as i64 - position as i64)
                    {
                        let run: Vec<usize> = run.map(|(_, slot)| slot).collect();
                        if run.len() as i64 >= min_len {
                            for slot in run {
                                grid[day.index()][slot] = true;
                            }
                        }
                    }
                }
                grid
            })
            .collect();

        let availability_slots = normalized
            .employees
            .iter()
            .map(|employee| {
                Day::ALL
                    .iter()
                    .map(|&day| {
                        (0..SLOT_COUNT)
                            .filter(|&t| !employee.is_unavailable(day, t))
                            .count() as i64
                    })
                    .sum()
            })
            .collect();

        let front_desk_qualified = normalized.front_desk_qualified();
        let mut front_desk_gaps = Vec::new();
        for day in Day::ALL {
            for slot in 0..SLOT_COUNT {
                let covered = front_desk_qualified
                    .iter()
                    .any(|&e| !normalized.employees[e].is_unavailable(day, slot));
                if !covered {
                    front_desk_gaps.push((day, slot));
                }
            }
        }

        Self {
            workable,
            availability_slots,
            front_desk_gaps,
        }
    }

    /// Can the employee legally work this slot (available, and inside a run
    /// long enough for a minimum-length shift)?
    pub fn is_workable(&self, employee: usize, day: usize, slot: usize) -> bool {
        self.workable[employee][day][slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::domain::staff::{DepartmentRequirement, StaffMember};
    use crate::domain::{DepartmentRequirements, ScheduleRequests, StaffData};
    use crate::engine::normalize::validate_inputs;

    fn normalized_with_unavailability(
        unavailable: &[(Day, usize)],
    ) -> (Normalized, SolveSettings) {
        let mut grid = [[false; SLOT_COUNT]; 5];
        for &(day, slot) in unavailable {
            grid[day.index()][slot] = true;
        }
        let staff = StaffData {
            employees: vec![StaffMember {
                name: "Alice".to_string(),
                roles: vec!["front_desk".to_string(), "events".to_string()],
                target_hours: 10.0,
                max_hours: 12.0,
                year: 2,
                unavailable: grid,
            }],
            roles: BTreeSet::from(["front_desk".to_string(), "events".to_string()])
                .into_iter()
                .collect(),
        };
        let requirements = DepartmentRequirements {
            departments: vec![DepartmentRequirement {
                name: "events".to_string(),
                display_name: "Events".to_string(),
                target_hours: 5.0,
                max_hours: 10.0,
            }],
        };
        let normalized =
            validate_inputs(&staff, &requirements, &ScheduleRequests::default()).unwrap();
        (normalized, SolveSettings::default())
    }

    #[test]
    fn test_short_runs_are_not_workable() {
        // Unavailable at slots 3 and 7 leaves runs 0-2 (short), 4-6 (short)
        // and 8-17 (long enough).
        let (normalized, settings) =
            normalized_with_unavailability(&[(Day::Mon, 3), (Day::Mon, 7)]);
        let context = DomainContext::build(&normalized, &settings);
        assert!(!context.is_workable(0, Day::Mon.index(), 0));
        assert!(!context.is_workable(0, Day::Mon.index(), 5));
        assert!(context.is_workable(0, Day::Mon.index(), 8));
        assert!(context.is_workable(0, Day::Mon.index(), 17));
        // Other days are fully open.
        assert!(context.is_workable(0, Day::Tue.index(), 0));
    }

    #[test]
    fn test_availability_slot_counts() {
        let (normalized, settings) =
            normalized_with_unavailability(&[(Day::Mon, 0), (Day::Fri, 17)]);
        let context = DomainContext::build(&normalized, &settings);
        assert_eq!(context.availability_slots[0], 90 - 2);
    }

    #[test]
    fn test_front_desk_gap_detection() {
        let (normalized, settings) = normalized_with_unavailability(&[(Day::Mon, 0)]);
        let context = DomainContext::build(&normalized, &settings);
        assert_eq!(context.front_desk_gaps, vec![(Day::Mon, 0)]);
    }
}
