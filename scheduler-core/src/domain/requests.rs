use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared::HalfDay;

/// Hard request: assign an employee to a department for a slot range on one
/// day. `start_slot..end_slot` is half-open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesetRequest {
    pub employee: String,
    pub day: String,
    pub department: String,
    pub start_slot: usize,
    pub end_slot: usize,
}

/// Goal: have two trainees overlap in a department for part of the week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingRequest {
    pub department: String,
    pub trainee_one: String,
    pub trainee_two: String,
}

/// Soft preference for assigning an employee to a specific department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoredEmployeeDepartment {
    pub employee: String,
    pub department: String,
    /// Strength of preference (0.5 = half, 1.0 = normal, 2.0 = double).
    pub multiplier: f64,
}

/// Soft preference for an employee to work morning or afternoon on a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftTimePreference {
    pub employee: String,
    pub day: String,
    pub preference: HalfDay,
}

/// Request to equalize two employees' hours in a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EqualityRequest {
    pub department: String,
    pub employee_one: String,
    pub employee_two: String,
}

/// Everything the caller can ask of a single solve beyond the staff and
/// department files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequests {
    /// Employee name -> target-adherence multiplier.
    pub favored_employees: HashMap<String, f64>,
    /// Department name -> multiplier (boosts target adherence and focused
    /// slots, penalizes dual-counted front-desk slots).
    pub favored_departments: HashMap<String, f64>,
    /// Department name -> multiplier (bonus per front-desk slot filled by a
    /// member of that department).
    pub favored_frontdesk_departments: HashMap<String, f64>,
    pub favored_employee_departments: Vec<FavoredEmployeeDepartment>,
    pub timesets: Vec<TimesetRequest>,
    pub training: Vec<TrainingRequest>,
    pub shift_time_preferences: Vec<ShiftTimePreference>,
    pub equality: Vec<EqualityRequest>,
}
