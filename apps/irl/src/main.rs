#![warn(clippy::pedantic)]

//! # irl
//!
//! `irl` scaffolds research project folders: a dated folder name, a fixed
//! directory skeleton, a plan written from a Markdown template, and a git
//! repository. It can also adopt existing folders into the workspace and
//! list or open the projects there.
//!
//! ## Subcommands
//!
//! - `init` - Create a new project
//! - `adopt` - Copy an existing folder into the workspace
//! - `list` - List projects in the workspace
//! - `open` - Open a project in an editor
//! - `config` - Show or change settings
//! - `profile` - Researcher identity used in plans
//! - `templates` - List plan templates
//! - `update` - Refresh the template cache
//! - `doctor` - Check the environment
//!
//! ## Usage Modes
//!
//! ### Interactive Mode (default)
//!
//! When run without subcommands in a terminal, `irl` launches a TUI with
//! wizards for creating and adopting projects.
//!
//! ### Headless Mode (`--headless`)
//!
//! When run with `--headless` but no subcommand, `irl` prints a short usage
//! note instead of launching the TUI.
//!
//! ## Examples
//!
//! ```bash
//! irl config set-dir ~/research
//! irl init "protein folding baseline"
//! irl list
//! irl open 250307-protein-folding-baseline
//! ```

mod commands;
mod errors;
mod project;
mod settings;
mod templates;
mod tools;
mod tui;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{adopt, config, doctor, init, list, open, profile, templates as templates_cmd, update};
use settings::IrlPaths;
use tracing_subscriber::EnvFilter;

/// Research project scaffolding.
#[derive(Parser)]
#[command(
    name = "irl",
    author,
    version,
    about = "Scaffold, adopt and browse research project folders",
    long_about = "The 'irl' command creates dated research project folders with a plan, \
    a standard layout and a git repository, and manages the workspace that holds them. \
    Run it without arguments for the interactive interface.",
    after_help = "\
ENVIRONMENT VARIABLES:
    IRL_HOME                State directory (default: ~/.irl)
    IRL_NO_TUI              Disable interactive TUI
    IRL_TEMPLATES_URL       Remote template listing URL
    IRL_TEMPLATES_RAW_URL   Base URL for raw template downloads
    NO_COLOR                Disable colors in the TUI
    RUST_LOG                Log filter (e.g. irl=debug)"
)]
pub struct Cli {
    /// Run in headless mode without TUI.
    ///
    /// When specified without a subcommand, prints usage information
    /// instead of launching the interactive TUI.
    #[clap(long = "headless", global = true, action = clap::ArgAction::SetTrue)]
    pub headless: bool,

    /// Log debug output to stderr.
    #[clap(short, long, global = true, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the irl CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new research project.
    ///
    /// The folder name is today's date followed by a slug of the purpose,
    /// e.g. `250307-protein-folding-baseline`. A plan is written from the
    /// chosen template and a git repository is initialized.
    Init(init::InitArgs),

    /// Copy an existing folder into the workspace.
    ///
    /// The source is left untouched. The copy gets the standard layout and
    /// a plan if it has none.
    Adopt(adopt::AdoptArgs),

    /// List projects in the workspace, newest first.
    List(list::ListArgs),

    /// Open a project in an editor.
    Open(open::OpenArgs),

    /// Show or change settings.
    Config(config::ConfigArgs),

    /// Show or change the researcher profile used in plans.
    Profile(profile::ProfileArgs),

    /// List available plan templates.
    Templates(templates_cmd::TemplatesArgs),

    /// Refresh the template cache from the remote source.
    Update,

    /// Check the environment irl depends on.
    ///
    /// Verifies git, the config file, the workspace directory, the template
    /// cache and the available editors.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli).await {
        let exit_code = handle_error(&e);
        std::process::exit(exit_code);
    }
}

/// Prints the error chain and returns the process exit code.
fn handle_error(e: &anyhow::Error) -> i32 {
    eprintln!("Error: {e:?}");
    1
}

/// Installs the tracing subscriber.
///
/// Subcommands log to stderr at `warn` (or `debug` with `--verbose`). The
/// TUI owns the terminal, so it logs to a file under the irl home instead.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let tui_mode = cli.command.is_none() && !cli.headless && tui::should_use_tui();
    if tui_mode {
        let log_file = IrlPaths::new().ok().and_then(|paths| {
            std::fs::create_dir_all(&paths.root).ok()?;
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(paths.log_file())
                .ok()
        });
        if let Some(file) = log_file {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init(args)) => init::execute(&args).await,
        Some(Commands::Adopt(args)) => adopt::execute(&args).await,
        Some(Commands::List(args)) => list::execute(&args),
        Some(Commands::Open(args)) => open::execute(&args),
        Some(Commands::Config(args)) => config::execute(&args),
        Some(Commands::Profile(args)) => profile::execute(args),
        Some(Commands::Templates(args)) => templates_cmd::execute(&args).await,
        Some(Commands::Update) => update::execute().await,
        Some(Commands::Doctor) => doctor::execute(),
        None => {
            if cli.headless || !tui::should_use_tui() {
                println!("irl: research project scaffolding");
                println!();
                println!("Run 'irl --help' for usage information.");
                println!("Run 'irl init --help' to create a project from the command line.");
                Ok(())
            } else {
                tui::run()
            }
        }
    }
}
