use serde::{Deserialize, Serialize};
use shared::{Day, SLOT_COUNT};

/// Normalize department/role names for consistent matching.
///
/// "Career Education", "career_education" and "CAREER  EDUCATION" all become
/// "career_education": lowercase, trimmed, runs of whitespace or underscores
/// collapsed to a single underscore.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() || ch == '_' {
            pending_separator = !out.is_empty();
        } else {
            if pending_separator {
                out.push('_');
                pending_separator = false;
            }
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// One employee row from the staff CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub name: String,
    /// Normalized role names the employee is qualified for.
    pub roles: Vec<String>,
    pub target_hours: f64,
    pub max_hours: f64,
    pub year: u8,
    /// `unavailable[day][slot]` is true when the employee cannot work.
    pub unavailable: [[bool; SLOT_COUNT]; 5],
}

impl StaffMember {
    /// Case-folded lookup key.
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    pub fn is_unavailable(&self, day: Day, slot: usize) -> bool {
        self.unavailable[day.index()][slot]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffData {
    pub employees: Vec<StaffMember>,
    /// Union of all normalized role names, sorted.
    pub roles: Vec<String>,
}

/// Department hour requirements, in the display order of the input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRequirements {
    /// (normalized name, target hours, max hours) in file order.
    pub departments: Vec<DepartmentRequirement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRequirement {
    pub name: String,
    pub display_name: String,
    pub target_hours: f64,
    pub max_hours: f64,
}

impl DepartmentRequirements {
    pub fn get(&self, name: &str) -> Option<&DepartmentRequirement> {
        self.departments.iter().find(|d| d.name == name)
    }
}
