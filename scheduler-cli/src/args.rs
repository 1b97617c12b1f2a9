//! Argument parsing for the scheduler front end.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use scheduler_core::config::{slot_start_label, DEFAULT_SOLVER_MAX_TIME};
use scheduler_core::domain::{
    EqualityRequest, FavoredEmployeeDepartment, ScheduleRequests, ShiftTimePreference,
    TimesetRequest, TrainingRequest,
};
use shared::{HalfDay, SLOT_COUNT};

/// Generate an optimized weekly schedule for CPD student employees.
#[derive(Debug, Parser)]
#[command(name = "scheduler", version, about)]
pub struct Args {
    /// CSV file containing employee information, roles, hours, and
    /// availability.
    pub staff_csv: PathBuf,

    /// CSV file specifying department hour targets and maximums.
    pub requirements_csv: PathBuf,

    /// Destination path for the exported schedule grid CSV. A JSON summary is
    /// written alongside it.
    #[arg(long, default_value = "schedule.csv")]
    pub output: PathBuf,

    /// Override for the solver time limit in seconds.
    #[arg(long)]
    pub max_solve_seconds: Option<u64>,

    /// Employee to prioritize hitting target hours, NAME or NAME:MULT.
    /// Repeatable.
    #[arg(long = "favor", short = 'f', value_name = "EMPLOYEE[:MULT]")]
    pub favor: Vec<String>,

    /// Training trio: DEPT,PERSON1,PERSON2 (brackets optional). Repeatable.
    #[arg(long, value_name = "DEPT,PERSON1,PERSON2")]
    pub training: Vec<String>,

    /// Softly favor a department's focused hours and target adherence,
    /// DEPT or DEPT:MULT. Repeatable.
    #[arg(long = "favor-dept", value_name = "DEPT[:MULT]")]
    pub favor_dept: Vec<String>,

    /// Softly favor a department's members for front desk duty. Repeatable.
    #[arg(long = "favor-frontdesk-dept", value_name = "DEPT[:MULT]")]
    pub favor_frontdesk_dept: Vec<String>,

    /// Softly favor assigning EMPLOYEE to work in DEPT. The employee must be
    /// qualified. Repeatable.
    #[arg(long = "favor-employee-dept", value_name = "EMPLOYEE,DEPT[:MULT]")]
    pub favor_employee_dept: Vec<String>,

    /// Hard-assign NAME to DEPT on DAY from START (inclusive) to END
    /// (exclusive), HH:MM on 30-minute increments. Repeatable.
    #[arg(long, num_args = 5, value_names = ["NAME", "DAY", "DEPT", "START", "END"])]
    pub timeset: Vec<String>,

    /// Per-day half-day preference: EMPLOYEE,DAY,morning|afternoon.
    /// Repeatable.
    #[arg(long = "shift-pref", value_name = "EMPLOYEE,DAY,HALF")]
    pub shift_pref: Vec<String>,

    /// Equalize two employees' hours in a department: DEPT,PERSON1,PERSON2.
    /// Repeatable.
    #[arg(long = "equalize", value_name = "DEPT,PERSON1,PERSON2")]
    pub equalize: Vec<String>,

    /// Show a simple progress timer toward the max solve time.
    #[arg(long)]
    pub progress: bool,

    /// Disable the 2-hour minimum department block rules.
    #[arg(long = "no-min-dept-block")]
    pub no_min_dept_block: bool,
}

impl Args {
    pub fn solver_max_time(&self) -> u64 {
        self.max_solve_seconds.unwrap_or(DEFAULT_SOLVER_MAX_TIME)
    }

    pub fn requests(&self) -> Result<ScheduleRequests> {
        Ok(ScheduleRequests {
            favored_employees: parse_multiplier_map(&self.favor, "--favor")?,
            favored_departments: parse_multiplier_map(&self.favor_dept, "--favor-dept")?,
            favored_frontdesk_departments: parse_multiplier_map(
                &self.favor_frontdesk_dept,
                "--favor-frontdesk-dept",
            )?,
            favored_employee_departments: self
                .favor_employee_dept
                .iter()
                .map(|raw| parse_favored_employee_dept(raw))
                .collect::<Result<_>>()?,
            timesets: self
                .timeset
                .chunks(5)
                .map(parse_timeset)
                .collect::<Result<_>>()?,
            training: self
                .training
                .iter()
                .map(|raw| parse_training(raw))
                .collect::<Result<_>>()?,
            shift_time_preferences: self
                .shift_pref
                .iter()
                .map(|raw| parse_shift_pref(raw))
                .collect::<Result<_>>()?,
            equality: self
                .equalize
                .iter()
                .map(|raw| parse_equalize(raw))
                .collect::<Result<_>>()?,
        })
    }
}

/// Split `NAME[:MULT]` into name and multiplier (default 1.0).
fn parse_name_multiplier(raw: &str, flag: &str) -> Result<(String, f64)> {
    let value = raw.trim();
    let (name, multiplier) = match value.split_once(':') {
        Some((name, mult)) => {
            let multiplier: f64 = mult
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} multiplier in '{}'", flag, raw))?;
            (name.trim(), multiplier)
        }
        None => (value, 1.0),
    };
    if name.is_empty() {
        bail!("Invalid {} value '{}'. A name is required.", flag, raw);
    }
    Ok((name.to_string(), multiplier))
}

fn parse_multiplier_map(raw: &[String], flag: &str) -> Result<HashMap<String, f64>> {
    let mut map = HashMap::new();
    for entry in raw {
        if entry.trim().is_empty() {
            continue;
        }
        let (name, multiplier) = parse_name_multiplier(entry, flag)?;
        map.insert(name, multiplier);
    }
    Ok(map)
}

/// `DEPT,PERSON1,PERSON2`, brackets optional.
fn parse_training(raw: &str) -> Result<TrainingRequest> {
    let mut value = raw.trim();
    if value.starts_with('[') && value.ends_with(']') {
        value = &value[1..value.len() - 1];
    }
    let parts: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    let [department, one, two] = parts.as_slice() else {
        bail!(
            "Invalid --training value '{}'. Expected format: DEPT,PERSON1,PERSON2",
            raw
        );
    };
    if one.to_lowercase() == two.to_lowercase() {
        bail!(
            "Invalid --training value '{}': trainees must be different people.",
            raw
        );
    }
    Ok(TrainingRequest {
        department: department.to_string(),
        trainee_one: one.to_string(),
        trainee_two: two.to_string(),
    })
}

/// `EMPLOYEE,DEPT[:MULT]`.
fn parse_favored_employee_dept(raw: &str) -> Result<FavoredEmployeeDepartment> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [employee, dept_spec] = parts.as_slice() else {
        bail!(
            "Invalid --favor-employee-dept value '{}'. Expected format: EMPLOYEE,DEPT[:MULT]",
            raw
        );
    };
    if employee.is_empty() || dept_spec.is_empty() {
        bail!(
            "Invalid --favor-employee-dept value '{}'. Both employee and department are required.",
            raw
        );
    }
    let (department, multiplier) = parse_name_multiplier(dept_spec, "--favor-employee-dept")?;
    Ok(FavoredEmployeeDepartment {
        employee: employee.to_string(),
        department,
        multiplier,
    })
}

/// `EMPLOYEE,DAY,morning|afternoon`.
fn parse_shift_pref(raw: &str) -> Result<ShiftTimePreference> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [employee, day, half] = parts.as_slice() else {
        bail!(
            "Invalid --shift-pref value '{}'. Expected format: EMPLOYEE,DAY,morning|afternoon",
            raw
        );
    };
    let preference = HalfDay::parse(half).with_context(|| {
        format!(
            "Invalid --shift-pref half-day '{}'. Use 'morning' or 'afternoon'.",
            half
        )
    })?;
    Ok(ShiftTimePreference {
        employee: employee.to_string(),
        day: day.to_string(),
        preference,
    })
}

/// `DEPT,PERSON1,PERSON2`.
fn parse_equalize(raw: &str) -> Result<EqualityRequest> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [department, one, two] = parts.as_slice() else {
        bail!(
            "Invalid --equalize value '{}'. Expected format: DEPT,PERSON1,PERSON2",
            raw
        );
    };
    Ok(EqualityRequest {
        department: department.to_string(),
        employee_one: one.to_string(),
        employee_two: two.to_string(),
    })
}

/// Convert `HH:MM` (leading zero optional) into a slot index; end times may
/// also name the final edge of the day.
fn parse_slot_time(value: &str, is_end: bool) -> Result<usize> {
    let mut text = value.trim().to_string();
    if text.len() == 4 && text.as_bytes()[1] == b':' {
        text = format!("0{}", text);
    }
    if is_end && text == "17:00" {
        return Ok(SLOT_COUNT);
    }
    (0..SLOT_COUNT)
        .find(|&slot| slot_start_label(slot) == text)
        .with_context(|| {
            format!(
                "Invalid time '{}'. Expected HH:MM on 30-minute increments from 08:00 to 16:30.",
                value
            )
        })
}

/// `NAME DAY DEPT START END` as collected by clap.
fn parse_timeset(entry: &[String]) -> Result<TimesetRequest> {
    let [name, day, dept, start, end] = entry else {
        bail!(
            "Invalid --timeset entry {:?}. Expected: NAME DAY DEPT START END (30-minute aligned).",
            entry
        );
    };
    let start_slot = parse_slot_time(start, false)?;
    let end_slot = parse_slot_time(end, true)?;
    if end_slot <= start_slot {
        bail!(
            "--timeset end time must be after start time (got {} to {}).",
            start,
            end
        );
    }
    Ok(TimesetRequest {
        employee: name.trim().to_string(),
        day: day.trim().to_string(),
        department: dept.trim().to_string(),
        start_slot,
        end_slot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_multiplier_defaults_to_one() {
        assert_eq!(
            parse_name_multiplier("Alice", "--favor").unwrap(),
            ("Alice".to_string(), 1.0)
        );
        assert_eq!(
            parse_name_multiplier("Alice:1.5", "--favor").unwrap(),
            ("Alice".to_string(), 1.5)
        );
        assert!(parse_name_multiplier("Alice:x", "--favor").is_err());
        assert!(parse_name_multiplier(":2", "--favor").is_err());
    }

    #[test]
    fn test_parse_training_accepts_brackets() {
        let request = parse_training("[events, Bob, Cara]").unwrap();
        assert_eq!(request.department, "events");
        assert_eq!(request.trainee_one, "Bob");
        assert_eq!(request.trainee_two, "Cara");
        assert!(parse_training("events,Bob,bob").is_err());
        assert!(parse_training("events,Bob").is_err());
    }

    #[test]
    fn test_parse_slot_times() {
        assert_eq!(parse_slot_time("08:00", false).unwrap(), 0);
        assert_eq!(parse_slot_time("8:00", false).unwrap(), 0);
        assert_eq!(parse_slot_time("16:30", false).unwrap(), 17);
        assert_eq!(parse_slot_time("17:00", true).unwrap(), SLOT_COUNT);
        assert!(parse_slot_time("17:00", false).is_err());
        assert!(parse_slot_time("08:15", false).is_err());
    }

    #[test]
    fn test_parse_timeset_entry() {
        let entry: Vec<String> = ["Alice", "Wed", "marketing", "09:00", "13:00"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let request = parse_timeset(&entry).unwrap();
        assert_eq!(request.start_slot, 2);
        assert_eq!(request.end_slot, 10);

        let backwards: Vec<String> = ["Alice", "Wed", "marketing", "13:00", "09:00"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(parse_timeset(&backwards).is_err());
    }

    #[test]
    fn test_parse_shift_pref() {
        let pref = parse_shift_pref("Alice, Mon, morning").unwrap();
        assert_eq!(pref.preference, HalfDay::Morning);
        assert!(parse_shift_pref("Alice,Mon,noon").is_err());
    }

    #[test]
    fn test_args_collect_requests() {
        let args = Args::parse_from([
            "scheduler",
            "staff.csv",
            "departments.csv",
            "--favor",
            "Alice:2",
            "--equalize",
            "events,Dan,Eva",
            "--timeset",
            "Bob",
            "Mon",
            "events",
            "09:00",
            "11:00",
        ]);
        let requests = args.requests().unwrap();
        assert_eq!(requests.favored_employees["Alice"], 2.0);
        assert_eq!(requests.equality.len(), 1);
        assert_eq!(requests.timesets.len(), 1);
        assert_eq!(requests.timesets[0].start_slot, 2);
        assert_eq!(requests.timesets[0].end_slot, 6);
    }
}
