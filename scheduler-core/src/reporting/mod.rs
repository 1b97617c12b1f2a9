pub mod console;
pub mod export;
pub mod stats;

pub use console::{print_infeasibility, print_schedule};
pub use export::{export_schedule_csv, export_summary_json};
pub use stats::aggregate_department_hours;
