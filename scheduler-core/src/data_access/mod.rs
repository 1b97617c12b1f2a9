pub mod department_loader;
pub mod staff_loader;

pub use department_loader::load_department_requirements;
pub use staff_loader::load_staff_data;

use std::collections::HashMap;

use shared::{DomainError, DomainResult};

/// Map lowercase header names to column indices, rejecting collisions like
/// "Name" and "NAME" in the same file.
pub(crate) fn normalize_headers(headers: &csv::StringRecord) -> DomainResult<HashMap<String, usize>> {
    let mut normalized = HashMap::new();
    for (index, column) in headers.iter().enumerate() {
        let key = column.trim().to_lowercase();
        if normalized.insert(key, index).is_some() {
            return Err(DomainError::DataError(format!(
                "Duplicate column detected when normalizing headers: '{}'",
                column.trim()
            )));
        }
    }
    Ok(normalized)
}

pub(crate) fn coerce_numeric(value: &str, column: &str, record: &str) -> DomainResult<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        DomainError::DataError(format!(
            "Invalid numeric value '{}' for column '{}' on record '{}'",
            value, column, record
        ))
    })
}
