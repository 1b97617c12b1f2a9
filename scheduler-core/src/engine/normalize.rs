//! Input normalization and cross-reference validation.
//!
//! Everything downstream of this module works with integer indices: employees
//! in staff-file order, roles with the front desk at index 0 followed by the
//! departments in requirements-file order. All name matching is done here,
//! against case-folded keys.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use shared::{Day, DomainError, DomainResult, HalfDay, SLOT_COUNT};

use crate::config::{self, FRONT_DESK_ROLE, TRAINING_MIN_SLOTS, TRAINING_TARGET_FRACTION};
use crate::domain::{
    normalize_name, DepartmentRequirements, ScheduleRequests, StaffData,
};

#[derive(Debug, Clone)]
pub struct NormalizedEmployee {
    pub name: String,
    pub key: String,
    /// Qualified role indices.
    pub qualifications: BTreeSet<usize>,
    pub target_hours: f64,
    pub max_hours: f64,
    pub target_slots: i64,
    pub max_slots: i64,
    pub year: u8,
    /// Favor multiplier when the employee was named in a favor request.
    pub favored: Option<f64>,
    pub unavailable: [[bool; SLOT_COUNT]; 5],
}

impl NormalizedEmployee {
    pub fn is_favored(&self) -> bool {
        self.favored.is_some()
    }

    pub fn is_qualified(&self, role: usize) -> bool {
        self.qualifications.contains(&role)
    }

    pub fn is_unavailable(&self, day: Day, slot: usize) -> bool {
        self.unavailable[day.index()][slot]
    }
}

#[derive(Debug, Clone)]
pub struct TrainingPlan {
    pub department: usize,
    pub trainee_one: usize,
    pub trainee_two: usize,
    pub goal_slots: i64,
}

/// Fully cross-referenced model inputs.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub employees: Vec<NormalizedEmployee>,
    /// Role names; index 0 is the front desk, departments follow in
    /// requirements-file order.
    pub roles: Vec<String>,
    pub role_display_names: Vec<String>,
    /// Indices of department roles (everything but the front desk).
    pub department_roles: Vec<usize>,
    /// Target/max hours per role index; `None` for the front desk.
    pub department_targets: Vec<Option<f64>>,
    pub department_max_hours: Vec<Option<f64>>,
    /// Qualified-employee count per role index.
    pub department_sizes: Vec<u32>,
    /// Forced `(employee, day, slot, role)` assignments, deduplicated and in
    /// deterministic order.
    pub forced: BTreeSet<(usize, usize, usize, usize)>,
    pub training: Vec<TrainingPlan>,
    pub favored_departments: BTreeMap<usize, f64>,
    pub favored_frontdesk_departments: BTreeMap<usize, f64>,
    /// `(employee, role, multiplier)` soft placement preferences.
    pub favored_employee_departments: Vec<(usize, usize, f64)>,
    /// `(employee, day index)` -> preferred half-day.
    pub shift_preferences: BTreeMap<(usize, usize), HalfDay>,
    /// `(department role, employee, employee)` hour-equalization requests.
    pub equality: Vec<(usize, usize, usize)>,
    /// Smallest qualified department per employee (dual front-desk credit);
    /// `None` when the employee is front-desk only.
    pub primary_department: Vec<Option<usize>>,
}

impl Normalized {
    pub const FRONT_DESK: usize = 0;

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// An assignment variable exists for `(e, d, t, r)` iff the employee is
    /// qualified for the role or a timeset forces the tuple.
    pub fn assign_exists(&self, employee: usize, day: usize, slot: usize, role: usize) -> bool {
        self.employees[employee].is_qualified(role)
            || self.forced.contains(&(employee, day, slot, role))
    }

    pub fn forced_slots_on(&self, employee: usize, day: usize) -> Vec<usize> {
        self.forced
            .iter()
            .filter(|&&(e, d, _, _)| e == employee && d == day)
            .map(|&(_, _, t, _)| t)
            .collect()
    }

    /// Employee-days whose forced slots are non-contiguous; these are the only
    /// days where a split shift is allowed.
    pub fn split_shift_days(&self) -> BTreeSet<(usize, usize)> {
        let mut by_day: BTreeMap<(usize, usize), BTreeSet<usize>> = BTreeMap::new();
        for &(e, d, t, _) in &self.forced {
            by_day.entry((e, d)).or_default().insert(t);
        }
        by_day
            .into_iter()
            .filter(|(_, slots)| {
                let slots: Vec<usize> = slots.iter().copied().collect();
                slots.windows(2).any(|pair| pair[1] - pair[0] > 1)
            })
            .map(|(key, _)| key)
            .collect()
    }

    pub fn front_desk_qualified(&self) -> Vec<usize> {
        (0..self.employees.len())
            .filter(|&e| self.employees[e].is_qualified(Self::FRONT_DESK))
            .collect()
    }
}

fn role_display_name(role: &str) -> String {
    if role == FRONT_DESK_ROLE {
        return "Front Desk".to_string();
    }
    role.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate the staff, department and request inputs and produce the
/// cross-referenced bundle the model is built from. Every rejection carries
/// the offending record.
pub fn validate_inputs(
    staff: &StaffData,
    departments: &DepartmentRequirements,
    requests: &ScheduleRequests,
) -> DomainResult<Normalized> {
    if !staff.roles.iter().any(|r| r == FRONT_DESK_ROLE) {
        return Err(DomainError::InvalidInput(format!(
            "Role '{}' is required but missing from staff data.",
            FRONT_DESK_ROLE
        )));
    }

    // Departments in requirements-file order, restricted to roles someone is
    // actually qualified for; extra requirement rows are ignored with a
    // warning, staff departments with no requirements row are a hard error.
    let staff_dept_roles: BTreeSet<String> = staff
        .roles
        .iter()
        .filter(|r| r.as_str() != FRONT_DESK_ROLE)
        .cloned()
        .collect();

    let mut roles: Vec<String> = vec![FRONT_DESK_ROLE.to_string()];
    let mut role_display_names = vec![role_display_name(FRONT_DESK_ROLE)];
    let mut department_targets: Vec<Option<f64>> = vec![None];
    let mut department_max_hours: Vec<Option<f64>> = vec![None];

    for requirement in &departments.departments {
        if requirement.name == FRONT_DESK_ROLE {
            continue;
        }
        if !staff_dept_roles.contains(&requirement.name) {
            tracing::warn!(
                department = %requirement.name,
                "Ignoring department requirements with no matching role"
            );
            continue;
        }
        roles.push(requirement.name.clone());
        role_display_names.push(role_display_name(&requirement.name));
        department_targets.push(Some(requirement.target_hours));
        department_max_hours.push(Some(requirement.max_hours));
    }

    let missing_targets: Vec<&str> = staff_dept_roles
        .iter()
        .filter(|role| !roles.contains(role))
        .map(|role| role.as_str())
        .collect();
    if !missing_targets.is_empty() {
        return Err(DomainError::InvalidInput(format!(
            "Department targets missing for: {}",
            missing_targets.join(", ")
        )));
    }

    let department_roles: Vec<usize> = (1..roles.len()).collect();
    let role_lookup: HashMap<&str, usize> = roles
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    // Favored employees, by case-folded key. Unknown names are ignored with a
    // warning so a stale favor list does not block the solve.
    let favored_lookup: HashMap<String, f64> = requests
        .favored_employees
        .iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, &mult)| (name.trim().to_lowercase(), mult))
        .collect();

    let mut employees: Vec<NormalizedEmployee> = Vec::with_capacity(staff.employees.len());
    let mut employee_lookup: HashMap<String, usize> = HashMap::new();
    for member in &staff.employees {
        let key = member.key();
        if employee_lookup.contains_key(&key) {
            return Err(DomainError::InvalidInput(format!(
                "Duplicate employee name detected: '{}'",
                member.name
            )));
        }
        let qualifications: BTreeSet<usize> = member
            .roles
            .iter()
            .filter_map(|role| role_lookup.get(role.as_str()).copied())
            .collect();
        let target_hours = member.target_hours.min(member.max_hours);
        employee_lookup.insert(key.clone(), employees.len());
        employees.push(NormalizedEmployee {
            name: member.name.clone(),
            key: key.clone(),
            qualifications,
            target_hours,
            max_hours: member.max_hours,
            target_slots: (target_hours * 2.0).round() as i64,
            max_slots: (member.max_hours * 2.0).round() as i64,
            year: member.year,
            favored: favored_lookup.get(&key).copied(),
            unavailable: member.unavailable,
        });
    }

    for name in favored_lookup.keys() {
        if !employee_lookup.contains_key(name) {
            tracing::warn!(employee = %name, "Ignoring favored employee not found in staff data");
        }
    }

    let department_sizes: Vec<u32> = (0..roles.len())
        .map(|role| employees.iter().filter(|e| e.is_qualified(role)).count() as u32)
        .collect();
    let zero_capacity: Vec<&str> = department_roles
        .iter()
        .filter(|&&role| department_sizes[role] == 0)
        .map(|&role| roles[role].as_str())
        .collect();
    if !zero_capacity.is_empty() {
        return Err(DomainError::InvalidInput(format!(
            "No qualified employees found for departments: {}",
            zero_capacity.join(", ")
        )));
    }

    let find_employee = |name: &str, context: &str| -> DomainResult<usize> {
        employee_lookup
            .get(&name.trim().to_lowercase())
            .copied()
            .ok_or_else(|| {
                DomainError::InvalidInput(format!(
                    "{} employee '{}' not found in staff data.",
                    context, name
                ))
            })
    };
    let find_role = |name: &str, context: &str, allow_front_desk: bool| -> DomainResult<usize> {
        let key = normalize_name(name);
        match role_lookup.get(key.as_str()) {
            Some(&role) if role != Normalized::FRONT_DESK || allow_front_desk => Ok(role),
            _ => Err(DomainError::InvalidInput(format!(
                "{} department '{}' not found among {}.",
                context,
                name,
                if allow_front_desk { "roles" } else { "department roles" }
            ))),
        }
    };

    // Timesets: the qualification check is deliberately skipped, but the
    // slots must exist, be available, and fit the employee's weekly maximum.
    let mut forced: BTreeSet<(usize, usize, usize, usize)> = BTreeSet::new();
    let mut forced_slots_per_employee: BTreeMap<usize, i64> = BTreeMap::new();
    for request in &requests.timesets {
        let employee = find_employee(&request.employee, "Timeset")?;
        let day = Day::parse(&request.day).ok_or_else(|| {
            DomainError::InvalidInput(format!(
                "Timeset day '{}' is invalid. Expected one of: Mon, Tue, Wed, Thu, Fri.",
                request.day
            ))
        })?;
        let role = find_role(&request.department, "Timeset", true)?;

        if request.start_slot >= request.end_slot {
            return Err(DomainError::InvalidInput(format!(
                "Timeset for {} on {} has an empty time range.",
                employees[employee].name, day
            )));
        }
        if request.end_slot > SLOT_COUNT {
            return Err(DomainError::InvalidInput(format!(
                "Timeset for {} on {} runs past the end of the day.",
                employees[employee].name, day
            )));
        }

        let blocked: Vec<String> = (request.start_slot..request.end_slot)
            .filter(|&t| employees[employee].is_unavailable(day, t))
            .map(config::slot_range_label)
            .collect();
        if !blocked.is_empty() {
            return Err(DomainError::InvalidInput(format!(
                "Timeset person '{}' is unavailable on {} at: {}.",
                employees[employee].name,
                day,
                blocked.join(", ")
            )));
        }

        let mut added = 0;
        for t in request.start_slot..request.end_slot {
            if forced.insert((employee, day.index(), t, role)) {
                added += 1;
            }
        }
        let total = forced_slots_per_employee.entry(employee).or_insert(0);
        *total += added;
        if *total > employees[employee].max_slots {
            return Err(DomainError::InvalidInput(format!(
                "Timesets for '{}' require {:.1} hours, exceeding their max_hours of {:.1}.",
                employees[employee].name,
                *total as f64 / 2.0,
                employees[employee].max_hours
            )));
        }
    }

    let mut favored_departments: BTreeMap<usize, f64> = BTreeMap::new();
    for (name, &mult) in &requests.favored_departments {
        let role = find_role(name, "Favored", false)?;
        favored_departments.insert(role, mult);
    }
    let mut favored_frontdesk_departments: BTreeMap<usize, f64> = BTreeMap::new();
    for (name, &mult) in &requests.favored_frontdesk_departments {
        let role = find_role(name, "Favored front-desk", false)?;
        favored_frontdesk_departments.insert(role, mult);
    }

    // Unlike timesets, employee-department favors do require qualification.
    let mut favored_employee_departments = Vec::new();
    for favor in &requests.favored_employee_departments {
        let employee = find_employee(&favor.employee, "Favored-employee-department")?;
        let role = find_role(&favor.department, "Favored-employee-department", true)?;
        if !employees[employee].is_qualified(role) {
            let quals: Vec<&str> = employees[employee]
                .qualifications
                .iter()
                .map(|&r| roles[r].as_str())
                .collect();
            return Err(DomainError::InvalidInput(format!(
                "Favored-employee-department: '{}' is not qualified for '{}'. Their qualifications are: {}",
                employees[employee].name,
                roles[role],
                if quals.is_empty() { "none".to_string() } else { quals.join(", ") }
            )));
        }
        favored_employee_departments.push((employee, role, favor.multiplier));
    }

    let mut training = Vec::new();
    for request in &requests.training {
        let department = find_role(&request.department, "Training", false)?;
        let one = find_employee(&request.trainee_one, "Training")?;
        let two = find_employee(&request.trainee_two, "Training")?;
        if one == two {
            return Err(DomainError::InvalidInput(
                "Training requires two distinct people.".to_string(),
            ));
        }
        for &trainee in &[one, two] {
            if !employees[trainee].is_qualified(department) {
                return Err(DomainError::InvalidInput(format!(
                    "Training person '{}' is not qualified for department '{}'.",
                    employees[trainee].name, roles[department]
                )));
            }
        }
        training.push(TrainingPlan {
            department,
            trainee_one: one,
            trainee_two: two,
            goal_slots: training_goal_slots(
                employees[one].target_slots,
                employees[two].target_slots,
            ),
        });
    }

    let mut shift_preferences: BTreeMap<(usize, usize), HalfDay> = BTreeMap::new();
    for preference in &requests.shift_time_preferences {
        let Some(&employee) = employee_lookup.get(&preference.employee.trim().to_lowercase())
        else {
            tracing::warn!(
                employee = %preference.employee,
                "Ignoring shift-time preference for unknown employee"
            );
            continue;
        };
        let Some(day) = Day::parse(&preference.day) else {
            tracing::warn!(
                day = %preference.day,
                "Ignoring shift-time preference with unknown day"
            );
            continue;
        };
        shift_preferences.insert((employee, day.index()), preference.preference);
    }

    let mut equality = Vec::new();
    for request in &requests.equality {
        let department = find_role(&request.department, "Equality", false)?;
        let one = find_employee(&request.employee_one, "Equality")?;
        let two = find_employee(&request.employee_two, "Equality")?;
        if one == two {
            return Err(DomainError::InvalidInput(
                "Equality requires two distinct people.".to_string(),
            ));
        }
        for &employee in &[one, two] {
            if !employees[employee].is_qualified(department) {
                return Err(DomainError::InvalidInput(format!(
                    "Equality person '{}' is not qualified for department '{}'.",
                    employees[employee].name, roles[department]
                )));
            }
        }
        equality.push((department, one, two));
    }

    // Primary department: the scarcest qualified department, ties broken by
    // name, frozen here because both the department maximum and reporting use
    // it.
    let primary_department: Vec<Option<usize>> = employees
        .iter()
        .map(|employee| {
            department_roles
                .iter()
                .filter(|&&role| employee.is_qualified(role))
                .min_by_key(|&&role| (department_sizes[role], roles[role].clone()))
                .copied()
        })
        .collect();

    Ok(Normalized {
        employees,
        roles,
        role_display_names,
        department_roles,
        department_targets,
        department_max_hours,
        department_sizes,
        forced,
        training,
        favored_departments,
        favored_frontdesk_departments,
        favored_employee_departments,
        shift_preferences,
        equality,
        primary_department,
    })
}

/// Goal overlap for a training pair: a fraction of the smaller target,
/// clamped between the training minimum and that target.
fn training_goal_slots(target_one: i64, target_two: i64) -> i64 {
    let min_target_slots = target_one.min(target_two);
    if min_target_slots <= 0 {
        return 0;
    }
    let fraction = (min_target_slots as f64 * TRAINING_TARGET_FRACTION).floor() as i64;
    fraction.max(TRAINING_MIN_SLOTS).min(min_target_slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::TimesetRequest;
    use crate::domain::staff::{DepartmentRequirement, StaffMember};

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

    fn requirements(depts: &[(&str, f64, f64)]) -> DepartmentRequirements {
        DepartmentRequirements {
            departments: depts
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

    fn basic_inputs() -> (StaffData, DepartmentRequirements) {
        (
            staff(vec![
                member("Alice", &["front_desk", "events"], 10.0, 12.0, 2),
                member("Bob", &["front_desk", "marketing", "events"], 10.0, 14.0, 3),
                member("Cara", &["marketing"], 8.0, 10.0, 1),
            ]),
            requirements(&[("marketing", 10.0, 15.0), ("events", 8.0, 12.0)]),
        )
    }

    #[test]
    fn test_roles_ordered_front_desk_first_then_file_order() {
        let (staff, reqs) = basic_inputs();
        let normalized = validate_inputs(&staff, &reqs, &ScheduleRequests::default()).unwrap();
        assert_eq!(normalized.roles, vec!["front_desk", "marketing", "events"]);
        assert_eq!(normalized.department_roles, vec![1, 2]);
        assert_eq!(normalized.role_display_names[0], "Front Desk");
        assert_eq!(normalized.department_targets[1], Some(10.0));
    }

    #[test]
    fn test_department_without_targets_rejected() {
        let (staff, _) = basic_inputs();
        let reqs = requirements(&[("marketing", 10.0, 15.0)]); // events missing
        let err = validate_inputs(&staff, &reqs, &ScheduleRequests::default()).unwrap_err();
        assert!(err.to_string().contains("Department targets missing"));
        assert!(err.to_string().contains("events"));
    }

    #[test]
    fn test_primary_department_prefers_scarce_then_alphabetical() {
        let (staff, reqs) = basic_inputs();
        let normalized = validate_inputs(&staff, &reqs, &ScheduleRequests::default()).unwrap();
        // Alice: events only -> events (index 2).
        assert_eq!(normalized.primary_department[0], Some(2));
        // Bob: marketing (2 qualified) and events (2 qualified); tie broken
        // alphabetically -> events.
        assert_eq!(normalized.primary_department[1], Some(2));
        // Cara: marketing only.
        assert_eq!(normalized.primary_department[2], Some(1));
    }

    #[test]
    fn test_timeset_unknown_employee_rejected() {
        let (staff, reqs) = basic_inputs();
        let requests = ScheduleRequests {
            timesets: vec![TimesetRequest {
                employee: "Zed".to_string(),
                day: "Mon".to_string(),
                department: "marketing".to_string(),
                start_slot: 0,
                end_slot: 4,
            }],
            ..Default::default()
        };
        let err = validate_inputs(&staff, &reqs, &requests).unwrap_err();
        assert!(err.to_string().contains("Zed"));
    }

    #[test]
    fn test_timeset_skips_qualification_check() {
        let (staff, reqs) = basic_inputs();
        // Alice is not qualified for marketing; timesets allow it anyway.
        let requests = ScheduleRequests {
            timesets: vec![TimesetRequest {
                employee: "alice".to_string(),
                day: "Wednesday".to_string(),
                department: "Marketing".to_string(),
                start_slot: 2,
                end_slot: 6,
            }],
            ..Default::default()
        };
        let normalized = validate_inputs(&staff, &reqs, &requests).unwrap();
        assert!(normalized.forced.contains(&(0, Day::Wed.index(), 2, 1)));
        assert!(normalized.assign_exists(0, Day::Wed.index(), 3, 1));
        assert!(!normalized.assign_exists(0, Day::Wed.index(), 7, 1));
    }

    #[test]
    fn test_timeset_overlapping_unavailability_rejected() {
        let (mut staff, reqs) = basic_inputs();
        staff.employees[0].unavailable[Day::Mon.index()][3] = true;
        let requests = ScheduleRequests {
            timesets: vec![TimesetRequest {
                employee: "Alice".to_string(),
                day: "Mon".to_string(),
                department: "events".to_string(),
                start_slot: 2,
                end_slot: 5,
            }],
            ..Default::default()
        };
        let err = validate_inputs(&staff, &reqs, &requests).unwrap_err();
        assert!(err.to_string().contains("unavailable on Mon"));
        assert!(err.to_string().contains("9:30-10:00"));
    }

    #[test]
    fn test_cumulative_timesets_beyond_max_rejected() {
        let (staff, reqs) = basic_inputs();
        // Cara's max is 10 hours = 20 slots; two 12-slot timesets exceed it.
        let requests = ScheduleRequests {
            timesets: vec![
                TimesetRequest {
                    employee: "Cara".to_string(),
                    day: "Mon".to_string(),
                    department: "marketing".to_string(),
                    start_slot: 0,
                    end_slot: 12,
                },
                TimesetRequest {
                    employee: "Cara".to_string(),
                    day: "Tue".to_string(),
                    department: "marketing".to_string(),
                    start_slot: 0,
                    end_slot: 12,
                },
            ],
            ..Default::default()
        };
        let err = validate_inputs(&staff, &reqs, &requests).unwrap_err();
        assert!(err.to_string().contains("exceeding their max_hours"));
    }

    #[test]
    fn test_training_goal_slot_derivation() {
        // 0.35 * 20 slots = 7, clamped to [2, 20].
        assert_eq!(training_goal_slots(20, 20), 7);
        // Small targets clamp up to the minimum...
        assert_eq!(training_goal_slots(4, 8), 2);
        // ...but never above the smaller target.
        assert_eq!(training_goal_slots(1, 20), 1);
        assert_eq!(training_goal_slots(0, 20), 0);
    }

    #[test]
    fn test_training_requires_qualified_distinct_trainees() {
        let (staff, reqs) = basic_inputs();
        let requests = ScheduleRequests {
            training: vec![crate::domain::TrainingRequest {
                department: "events".to_string(),
                trainee_one: "Alice".to_string(),
                trainee_two: "Cara".to_string(), // not qualified for events
            }],
            ..Default::default()
        };
        let err = validate_inputs(&staff, &reqs, &requests).unwrap_err();
        assert!(err.to_string().contains("not qualified for department 'events'"));
    }

    #[test]
    fn test_split_shift_days_require_non_contiguous_forcing() {
        let (staff, reqs) = basic_inputs();
        let requests = ScheduleRequests {
            timesets: vec![
                TimesetRequest {
                    employee: "Bob".to_string(),
                    day: "Tue".to_string(),
                    department: "marketing".to_string(),
                    start_slot: 0,
                    end_slot: 4,
                },
                TimesetRequest {
                    employee: "Bob".to_string(),
                    day: "Tue".to_string(),
                    department: "marketing".to_string(),
                    start_slot: 8,
                    end_slot: 12,
                },
            ],
            ..Default::default()
        };
        let normalized = validate_inputs(&staff, &reqs, &requests).unwrap();
        let split = normalized.split_shift_days();
        assert!(split.contains(&(1, Day::Tue.index())));
        assert_eq!(split.len(), 1);
    }
}
