use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use motion_api::MotionClient;
use std::io::Read;

mod commands;
mod config;
mod hints;
mod input;
mod logging;
mod state;
mod tools;

use commands::capture::CaptureArgs;
use commands::projects::ProjectsArgs;
use commands::tasks::TasksArgs;
use config::Config;
use tools::ToolContext;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MOTION_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "motion",
    version,
    long_version = LONG_VERSION,
    about = "Motion task manager from the command line"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). MOTION_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks, most pressing first
    Tasks {
        /// Workspace id (defaults to [defaults] workspace_id)
        #[arg(long)]
        workspace: Option<String>,

        /// Page cursor printed by a previous call
        #[arg(long)]
        cursor: Option<String>,

        /// Print at most this many tasks
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Create a task
    Capture {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// ASAP, HIGH, MEDIUM, LOW (or words like "urgent")
        #[arg(long)]
        priority: Option<String>,

        /// "today", "tomorrow", "in 3 days", "next friday", 2026-05-01, ...
        #[arg(long)]
        due: Option<String>,

        /// HARD, SOFT or NONE
        #[arg(long)]
        deadline_type: Option<String>,

        /// Minutes, NONE or REMINDER
        #[arg(long)]
        duration: Option<String>,

        /// Create a minimal test task instead
        #[arg(long)]
        test: bool,
    },

    /// Check the API key, workspace access and task creation
    Debug,

    /// List workspaces with their projects
    Workspaces,

    /// Search projects across workspaces
    Projects {
        /// Filter by project name, description or workspace name
        query: Option<String>,

        /// Include completed and archived projects
        #[arg(long)]
        all: bool,

        /// Show the detail view for a project id
        #[arg(long, value_name = "ID")]
        show: Option<String>,
    },

    /// Run an AI tool with JSON parameters (read from stdin when INPUT is omitted)
    Tool {
        /// create-motion-task, search-motion-tasks, update-task-status,
        /// get-task-summary or search-projects
        name: String,

        input: Option<String>,
    },

    /// Manage ~/.motion/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,

    /// Print the effective config (API key masked)
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let output = match cli.command {
        Command::Config { command } => config_command(command)?,
        command => {
            let cfg = config::load_config()?;
            let api = client(&cfg)?;
            let ctx = ToolContext::from_config(&cfg)?;
            run(command, &api, &ctx).await?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn client(cfg: &Config) -> Result<MotionClient> {
    Ok(MotionClient::with_base_url(cfg.api_key()?, cfg.api.base_url.clone()))
}

async fn run(command: Command, api: &MotionClient, ctx: &ToolContext) -> Result<String> {
    match command {
        Command::Tasks {
            workspace,
            cursor,
            limit,
        } => {
            let args = TasksArgs {
                workspace_id: workspace,
                cursor,
                limit,
            };
            commands::tasks::run(api, ctx, args).await
        }
        Command::Capture {
            name,
            description,
            priority,
            due,
            deadline_type,
            duration,
            test,
        } => {
            let args = CaptureArgs {
                name,
                description,
                priority,
                due,
                deadline_type,
                duration,
                test,
            };
            commands::capture::run(api, ctx, args).await
        }
        Command::Debug => commands::debug::run(api, ctx).await,
        Command::Workspaces => commands::workspaces::run(api).await,
        Command::Projects { query, all, show } => {
            commands::projects::run(api, ctx, ProjectsArgs { query, all, show }).await
        }
        Command::Tool { name, input } => {
            let raw = match input {
                Some(raw) => raw,
                None => read_stdin()?,
            };
            tools::dispatch(api, ctx, &name, &raw).await
        }
        Command::Config { command } => config_command(command),
    }
}

fn config_command(command: ConfigCommand) -> Result<String> {
    match command {
        ConfigCommand::Init => config::init_config(),
        ConfigCommand::Show => config::load_config()?.to_masked_toml(),
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read tool parameters from stdin")?;
    Ok(buf)
}
