mod handlers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use handlers::RenderConfig;
use pipeline_view::engine::errors::describe_error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pview", version, about = "Status and step views for pipeline runs")]
struct Cli {
    /// Emit JSON instead of human output
    #[arg(long, global = true)]
    json: bool,
    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Show the Succeeded condition of a resource
    Status { resource: PathBuf },
    /// List the steps of a task run
    Steps {
        /// Task definitions (object, array, or List)
        tasks: PathBuf,
        /// The task run resource
        taskrun: PathBuf,
    },
    /// Show one step of a task run
    Step {
        tasks: PathBuf,
        /// Task run resources (object, array, or List)
        taskruns: PathBuf,
        /// Task run uid (or name when it has no uid)
        run: String,
        step: String,
    },
    /// Print the plural tag of a resource type
    Plural { kind: String },
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .with_env_var("PVIEW_LOG")
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = RenderConfig {
        json: cli.json,
        ..RenderConfig::default()
    }
    .without_color(cli.no_color);
    if !config.color {
        colored::control::set_override(false);
    }

    match dispatch(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if config.json {
                eprintln!("{}", describe_error(err.as_ref()));
            } else {
                eprintln!("{} {err:#}", "error:".red());
            }
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cmd: Commands, config: &RenderConfig) -> Result<()> {
    match cmd {
        Commands::Status { resource } => handlers::status::handle(&resource, config),
        Commands::Steps { tasks, taskrun } => handlers::steps::handle(&tasks, &taskrun, config),
        Commands::Step {
            tasks,
            taskruns,
            run,
            step,
        } => handlers::step::handle(&tasks, &taskruns, &run, &step, config),
        Commands::Plural { kind } => handlers::plural::handle(&kind, config),
    }
}
