use std::path::{Path, PathBuf};

mod calendar;
mod dashboard;
mod equipment;
mod init;
mod request;
mod session;
mod team;
mod terminal;
mod user;

use clap::ArgAction;
use gearguard::{Session, Store, storage};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the maintenance workspace
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Dashboard(dashboard::Command::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show KPIs, fleet health and team workload (default)
    Dashboard(dashboard::Command),

    /// Initialize a new maintenance workspace
    Init(init::Command),

    /// Log in by email
    Login(session::Login),

    /// Log out
    Logout,

    /// Show the logged-in user and the sections their role can see
    Whoami,

    /// List or register equipment
    #[command(subcommand)]
    Equipment(equipment::Command),

    /// List, board or raise maintenance requests
    #[command(subcommand)]
    Request(request::Command),

    /// Show requests on the calendar
    Calendar(calendar::Command),

    /// Manage teams and their members
    #[command(subcommand)]
    Team(team::Command),

    /// List or onboard personnel
    #[command(subcommand)]
    User(user::Command),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Dashboard(command) => command.run(root)?,
            Self::Init(command) => command.run(root)?,
            Self::Login(command) => command.run(root)?,
            Self::Logout => session::logout(root)?,
            Self::Whoami => session::whoami(root)?,
            Self::Equipment(command) => command.run(root)?,
            Self::Request(command) => command.run(root)?,
            Self::Calendar(command) => command.run(root)?,
            Self::Team(command) => command.run(root)?,
            Self::User(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// Output formats shared by the listing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Opens the store for this invocation: the seed data, with the workspace
/// configuration.
fn open_store(root: &Path) -> Store {
    Store::seeded_with(storage::load_config(root))
}

/// The logged-in session, required by commands that record who acted.
fn require_session(root: &Path) -> anyhow::Result<Session> {
    let Some(session) = Session::load(root)? else {
        anyhow::bail!("Not logged in. Run 'gear login --email <EMAIL>' first.");
    };
    Ok(session)
}

/// Prints a value as pretty JSON.
fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
