//! Weekly staffing scheduler for a student-employee office.
//!
//! The pipeline: normalize and cross-check the inputs, precompute the domain
//! helpers, build an integer-linear model of the week (hard constraints plus
//! a weighted soft objective), hand it to HiGHS, then post-validate and
//! report the returned assignment.

pub mod config;
pub mod data_access;
pub mod domain;
pub mod engine;
pub mod reporting;

pub use config::SolveSettings;
pub use domain::{
    DepartmentRequirements, InfeasibilityReport, Schedule, ScheduleOutcome, ScheduleRequests,
    StaffData,
};
pub use shared::{Day, DomainError, DomainResult, SolverStatus};

/// Build and solve a weekly schedule from in-memory inputs.
pub fn solve_schedule(
    staff: &StaffData,
    departments: &DepartmentRequirements,
    requests: &ScheduleRequests,
    settings: &SolveSettings,
) -> DomainResult<ScheduleOutcome> {
    engine::solve(staff, departments, requests, settings)
}
