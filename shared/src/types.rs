use serde::{Deserialize, Serialize};

/// Number of 30-minute slots in a working day (08:00 through 17:00).
pub const SLOT_COUNT: usize = 18;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Day::ALL.get(index).copied()
    }

    /// Parse a day name, accepting full names ("Monday"), the short labels
    /// ("Mon") and 3-letter prefixes in any case.
    pub fn parse(value: &str) -> Option<Day> {
        let key = value.trim().to_lowercase();
        if key.len() < 3 {
            return None;
        }
        let full = ["monday", "tuesday", "wednesday", "thursday", "friday"];
        for (i, name) in full.iter().enumerate() {
            if key == *name || key == name[..3] || name.starts_with(&key) {
                return Some(Day::ALL[i]);
            }
        }
        None
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Morning covers slots 0..8 (08:00-12:00), afternoon the rest of the day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HalfDay {
    Morning,
    Afternoon,
}

impl HalfDay {
    pub fn parse(value: &str) -> Option<HalfDay> {
        match value.trim().to_lowercase().as_str() {
            "morning" | "am" => Some(HalfDay::Morning),
            "afternoon" | "pm" => Some(HalfDay::Afternoon),
            _ => None,
        }
    }

    pub fn contains_slot(self, slot: usize) -> bool {
        match self {
            HalfDay::Morning => slot < 8,
            HalfDay::Afternoon => slot >= 8,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    Optimal,
    Feasible,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parsing_accepts_prefixes() {
        assert_eq!(Day::parse("Mon"), Some(Day::Mon));
        assert_eq!(Day::parse("wednesday"), Some(Day::Wed));
        assert_eq!(Day::parse("THU"), Some(Day::Thu));
        assert_eq!(Day::parse("fr"), None);
        assert_eq!(Day::parse("Sat"), None);
    }

    #[test]
    fn test_half_day_slot_split() {
        assert!(HalfDay::Morning.contains_slot(0));
        assert!(HalfDay::Morning.contains_slot(7));
        assert!(!HalfDay::Morning.contains_slot(8));
        assert!(HalfDay::Afternoon.contains_slot(8));
        assert!(HalfDay::Afternoon.contains_slot(17));
    }
}
