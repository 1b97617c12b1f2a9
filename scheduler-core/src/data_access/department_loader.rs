//! CSV loading for department requirements.
//!
//! One row per department: `department`, `target_hours`, `max_hours`. Row
//! order defines the display order downstream.

use std::path::Path;

use shared::{DomainError, DomainResult};

use super::{coerce_numeric, normalize_headers};
use crate::domain::staff::DepartmentRequirement;
use crate::domain::{normalize_name, DepartmentRequirements};

pub fn load_department_requirements(path: &Path) -> DomainResult<DepartmentRequirements> {
    let mut reader = csv::Reader::from_path(path).map_err(|err| {
        DomainError::DataError(format!(
            "Department requirements CSV not readable: {}: {}",
            path.display(),
            err
        ))
    })?;

    let headers = reader
        .headers()
        .map_err(|err| DomainError::DataError(format!("Department CSV headers: {}", err)))?
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

    let dept_col = require_column("department")?;
    let target_col = require_column("target_hours")?;
    let max_col = require_column("max_hours")?;

    let mut departments: Vec<DepartmentRequirement> = Vec::new();

    for record in reader.records() {
        let record =
            record.map_err(|err| DomainError::DataError(format!("Department CSV row: {}", err)))?;
        let field = |index: usize| record.get(index).unwrap_or("").trim();

        let display_name = field(dept_col).to_string();
        let name = normalize_name(&display_name);
        if name.is_empty() {
            return Err(DomainError::DataError(
                "Department requirements CSV contains an empty department name.".to_string(),
            ));
        }
        if departments.iter().any(|d| d.name == name) {
            return Err(DomainError::DataError(format!(
                "Duplicate department entry detected: '{}'",
                name
            )));
        }

        let target_hours = coerce_numeric(field(target_col), "target_hours", &name)?;
        let max_hours = coerce_numeric(field(max_col), "max_hours", &name)?;
        if max_hours < target_hours {
            return Err(DomainError::DataError(format!(
                "Department '{}' has target hours ({}) exceeding max hours ({}).",
                name, target_hours, max_hours
            )));
        }

        departments.push(DepartmentRequirement {
            name,
            display_name,
            target_hours,
            max_hours,
        });
    }

    Ok(DepartmentRequirements { departments })
}
