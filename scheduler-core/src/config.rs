//! Centralized knobs for the scheduler. Tweak values here instead of touching
//! the engine.

use std::collections::BTreeMap;

use chrono::{NaiveTime, Timelike};
use config::{Config, ConfigError, File};
use serde::Deserialize;

/// The role that must be staffed at all times.
pub const FRONT_DESK_ROLE: &str = "front_desk";

/// Allowable +/- hour wiggle room for departments before the large-deviation
/// penalty kicks in.
pub const DEPARTMENT_HOUR_THRESHOLD: i64 = 4;

pub const MIN_SLOTS: i64 = 4; // 2 hours minimum shift (4 x 30-min slots)
pub const MAX_SLOTS: i64 = 8; // 4 hours maximum shift
pub const MIN_FRONT_DESK_SLOTS: i64 = MIN_SLOTS;
pub const FAVORED_MIN_SLOTS: i64 = 4;
pub const FAVORED_MAX_SLOTS: i64 = 16; // favored staff may work up to 8 hours a day

/// Hard ceiling on anyone's weekly hours regardless of personal preference.
pub const UNIVERSAL_MAXIMUM_HOURS: i64 = 19;

/// Hard bound: keep each employee within +/- this many hours of target when
/// feasible.
pub const TARGET_HARD_DELTA_HOURS: i64 = 5;

pub const TRAINING_MIN_SLOTS: i64 = 2; // minimum overlapping hour for training pairs
pub const TRAINING_TARGET_FRACTION: f64 = 0.35;
pub const TRAINING_OVERLAP_WEIGHT: i64 = 5_000;
pub const TRAINING_OVERLAP_BONUS: i64 = 200;

pub const FAVORED_DEPARTMENT_FOCUSED_BONUS: i64 = 30;
pub const FAVORED_DEPARTMENT_DUAL_PENALTY: i64 = 20;
pub const FAVORED_FRONT_DESK_DEPT_BONUS: i64 = 40;
pub const FAVORED_EMPLOYEE_DEPT_BONUS: i64 = 50;

pub const DEFAULT_SOLVER_MAX_TIME: u64 = 180; // seconds

pub const FRONT_DESK_COVERAGE_WEIGHT: i64 = 10_000;
pub const SHIFT_LENGTH_DAILY_COST: i64 = 6;
pub const DEPARTMENT_SCARCITY_BASE_WEIGHT: i64 = 10;
pub const TIMESET_BONUS_WEIGHT: i64 = 20_000;

pub const LARGE_DEVIATION_SLOT_THRESHOLD: i64 = 4; // 4 slots = 2 hours off target
pub const EMPLOYEE_LARGE_DEVIATION_PENALTY: i64 = 5_000;
pub const DEPARTMENT_LARGE_DEVIATION_PENALTY: i64 = 4_000;
pub const FAVORED_HOURS_BONUS_WEIGHT: i64 = 200;
pub const SHIFT_PREF_BONUS_WEIGHT: i64 = 15;
pub const EQUALITY_PENALTY_WEIGHT: i64 = 200;

/// Every objective coefficient is multiplied by this so the half-weight
/// morning-preference term can be emitted with an integer coefficient of 1.
pub const OBJECTIVE_SCALE: i64 = 2;

/// Target-hour adherence multiplier by academic year; upperclassmen deviations
/// are penalized more heavily.
pub fn year_multiplier(year: u8) -> f64 {
    match year {
        1 => 1.0,
        2 => 1.2,
        3 => 1.5,
        4 => 2.0,
        _ => 1.0,
    }
}

/// Quantize a fractional favor multiplier the way the objective expects:
/// `floor(mult * 10) / 10`, applied to an integer base weight.
pub fn scaled_weight(base: i64, multiplier: f64) -> i64 {
    let tenths = (multiplier * 10.0).floor() as i64;
    (base * tenths).div_euclid(10)
}

fn start_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).expect("08:00 is a valid time")
}

/// 24-hour label for the start of a slot, e.g. "08:00". These double as the
/// staff CSV availability column suffixes.
pub fn slot_start_label(slot: usize) -> String {
    let time = start_of_day() + chrono::Duration::minutes(30 * slot as i64);
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Human-facing slot range, 12-hour style without am/pm: "8:00-8:30",
/// "12:30-1:00".
pub fn slot_range_label(slot: usize) -> String {
    let start = start_of_day() + chrono::Duration::minutes(30 * slot as i64);
    let end = start + chrono::Duration::minutes(30);
    format!("{}-{}", twelve_hour(start), twelve_hour(end))
}

fn twelve_hour(time: NaiveTime) -> String {
    let hour = time.hour();
    let display = if hour > 12 { hour - 12 } else { hour };
    format!("{}:{:02}", display, time.minute())
}

fn default_collaboration_minimum_hours() -> BTreeMap<String, i64> {
    // Expected collaborative hours (2+ people in the same department at once).
    BTreeMap::from([
        ("career_education".to_string(), 1),
        ("marketing".to_string(), 1),
        ("employer_engagement".to_string(), 2),
        ("events".to_string(), 4),
        ("data_systems".to_string(), 0), // single-person team
    ])
}

/// Scalar weights applied to each score/penalty component in the objective.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    pub department_target: i64,
    pub collaborative_hours: i64,
    pub office_coverage: i64,
    pub single_coverage: i64,
    pub target_adherence: i64,
    pub department_spread: i64,
    pub department_day_coverage: i64,
    pub shift_length: i64,
    pub department_scarcity: i64,
    pub underclassmen_front_desk: i64,
    pub department_total: i64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            department_target: 1_000,
            collaborative_hours: 200,
            office_coverage: 150,
            single_coverage: 500,
            target_adherence: 100,
            department_spread: 60,
            department_day_coverage: 30,
            shift_length: 20,
            department_scarcity: 8,
            underclassmen_front_desk: 3,
            department_total: 1,
        }
    }
}

/// Per-solve options. Defaults match the office's standing configuration;
/// individual fields can be overridden from the settings file, environment or
/// CLI flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolveSettings {
    pub solver_max_time: u64,
    pub enforce_min_dept_block: bool,
    pub show_progress: bool,
    pub min_slots: i64,
    pub max_slots: i64,
    pub front_desk_weight: i64,
    pub dept_hour_threshold: i64,
    pub target_hard_delta: i64,
    pub favored_employee_dept_bonus: i64,
    pub collaboration_minimum_hours: BTreeMap<String, i64>,
    pub weights: ObjectiveWeights,
}

impl Default for SolveSettings {
    fn default() -> Self {
        Self {
            solver_max_time: DEFAULT_SOLVER_MAX_TIME,
            enforce_min_dept_block: true,
            show_progress: false,
            min_slots: MIN_SLOTS,
            max_slots: MAX_SLOTS,
            front_desk_weight: FRONT_DESK_COVERAGE_WEIGHT,
            dept_hour_threshold: DEPARTMENT_HOUR_THRESHOLD,
            target_hard_delta: TARGET_HARD_DELTA_HOURS,
            favored_employee_dept_bonus: FAVORED_EMPLOYEE_DEPT_BONUS,
            collaboration_minimum_hours: default_collaboration_minimum_hours(),
            weights: ObjectiveWeights::default(),
        }
    }
}

impl SolveSettings {
    /// Layered load: optional `config/default` file, then `APP__`-prefixed
    /// environment variables (e.g. `APP__SOLVER_MAX_TIME=60`).
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
