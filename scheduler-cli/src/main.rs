mod args;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scheduler_core::data_access::{load_department_requirements, load_staff_data};
use scheduler_core::reporting::{
    export_schedule_csv, export_summary_json, print_infeasibility, print_schedule,
};
use scheduler_core::{ScheduleOutcome, SolveSettings};

use args::Args;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduler_core=info,scheduler_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // Load configuration, then apply CLI overrides
    let mut settings = SolveSettings::load().context("Failed to load configuration")?;
    settings.solver_max_time = args.solver_max_time();
    settings.show_progress = args.progress;
    if args.no_min_dept_block {
        settings.enforce_min_dept_block = false;
    }
    tracing::debug!(?settings, "Configuration loaded");

    let staff = load_staff_data(&args.staff_csv)?;
    let departments = load_department_requirements(&args.requirements_csv)?;
    let requests = args.requests()?;

    match scheduler_core::solve_schedule(&staff, &departments, &requests, &settings)? {
        ScheduleOutcome::Solved(schedule) => {
            print_schedule(&schedule);
            export_schedule_csv(&schedule, &args.output)?;
            export_summary_json(&schedule, &args.output.with_extension("json"))?;
        }
        ScheduleOutcome::Infeasible(report) => {
            // Infeasibility is a diagnosis, not a crash.
            print_infeasibility(&report);
        }
    }

    Ok(())
}
