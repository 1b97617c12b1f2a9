//! CSV loading for staff data.
//!
//! One row per employee: `name`, `roles` (semicolon- or comma-separated),
//! `target_hours`, `max_hours`, `year`, plus one `Day_HH:MM` cell per slot in
//! the weekly grid where `1` means available.

use std::collections::HashSet;
use std::path::Path;

use shared::{Day, DomainError, DomainResult, SLOT_COUNT};

use super::{coerce_numeric, normalize_headers};
use crate::config::{slot_start_label, FRONT_DESK_ROLE};
use crate::domain::{normalize_name, StaffData, StaffMember};

/// Parse roles from a semicolon/comma-separated string, normalized for
/// matching.
pub(crate) fn parse_roles(raw: &str) -> Vec<String> {
    raw.split([';', ','])
        .map(normalize_name)
        .filter(|role| !role.is_empty())
        .collect()
}

pub fn load_staff_data(path: &Path) -> DomainResult<StaffData> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| {
        DomainError::DataError(format!("Staff CSV not readable: {}: {}", path.display(), err))
    })?;

    let headers = reader
        .headers()
        .map_err(|err| DomainError::DataError(format!("Staff CSV headers: {}", err)))?
        .clone();
    let column_map = normalize_headers(&headers)?;

    let require_column = |name: &str| -> DomainResult<usize> {
        column_map.get(name).copied().ok_or_else(|| {
            DomainError::DataError(format!(
                "Required column '{}' not found in {}",
                name,
                path.display()
            ))
        })
    };

    let name_col = require_column("name")?;
    let roles_col = require_column("roles")?;
    let target_col = require_column("target_hours")?;
    let max_col = require_column("max_hours")?;
    let year_col = require_column("year")?;

    // All 90 availability cells must be present before any row is parsed.
    let mut availability_cols = [[0usize; SLOT_COUNT]; 5];
    let mut missing = Vec::new();
    for day in Day::ALL {
        for slot in 0..SLOT_COUNT {
            let column = format!("{}_{}", day.label(), slot_start_label(slot));
            match column_map.get(&column.to_lowercase()) {
                Some(&index) => availability_cols[day.index()][slot] = index,
                None => missing.push(column),
            }
        }
    }
    if !missing.is_empty() {
        let preview = missing.iter().take(5).cloned().collect::<Vec<_>>().join(", ");
        let suffix = if missing.len() > 5 { "..." } else { "" };
        return Err(DomainError::DataError(format!(
            "Missing availability columns in {}: {}{}",
            path.display(),
            preview,
            suffix
        )));
    }

    let mut employees: Vec<StaffMember> = Vec::new();
    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut all_roles: HashSet<String> = HashSet::new();

    for record in reader.records() {
        let record =
            record.map_err(|err| DomainError::DataError(format!("Staff CSV row: {}", err)))?;
        let field = |index: usize| record.get(index).unwrap_or("").trim();

        let name = field(name_col).to_string();
        if name.is_empty() {
            return Err(DomainError::DataError(
                "Encountered employee row with empty name.".to_string(),
            ));
        }
        if !seen_keys.insert(name.to_lowercase()) {
            return Err(DomainError::DataError(format!(
                "Duplicate employee name detected: '{}'",
                name
            )));
        }

        let roles = parse_roles(field(roles_col));
        if roles.is_empty() {
            return Err(DomainError::DataError(format!(
                "Employee '{}' must have at least one role defined.",
                name
            )));
        }
        all_roles.extend(roles.iter().cloned());

        let max_hours = coerce_numeric(field(max_col), "max_hours", &name)?;
        let target_hours = coerce_numeric(field(target_col), "target_hours", &name)?.min(max_hours);
        let year = coerce_numeric(field(year_col), "year", &name)? as u8;

        let mut unavailable = [[false; SLOT_COUNT]; 5];
        for day in Day::ALL {
            for slot in 0..SLOT_COUNT {
                let value = field(availability_cols[day.index()][slot]);
                let can_work = value
                    .parse::<f64>()
                    .map(|v| v as i64 == 1)
                    .unwrap_or(false);
                unavailable[day.index()][slot] = !can_work;
            }
        }

        employees.push(StaffMember {
            name,
            roles,
            target_hours,
            max_hours,
            year,
            unavailable,
        });
    }

    if !all_roles.contains(FRONT_DESK_ROLE) {
        return Err(DomainError::DataError(format!(
            "No employees qualified for required role '{}'.",
            FRONT_DESK_ROLE
        )));
    }

    let mut roles: Vec<String> = all_roles.into_iter().collect();
    roles.sort();

    Ok(StaffData { employees, roles })
}
