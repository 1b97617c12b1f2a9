pub mod requests;
pub mod schedule;
pub mod staff;

pub use requests::{
    EqualityRequest, FavoredEmployeeDepartment, ScheduleRequests, ShiftTimePreference,
    TimesetRequest, TrainingRequest,
};
pub use schedule::{
    DepartmentBreakdown, InfeasibilityReport, Schedule, ScheduleOutcome,
};
pub use staff::{normalize_name, DepartmentRequirements, StaffData, StaffMember};
