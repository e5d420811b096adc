//! FD Manager CLI
//!
//! Terminal front end for the FD backend. Each subcommand corresponds to one
//! screen of the browser front end and passes the same route guard:
//! - `login`, `logout`, `whoami`
//! - `dashboard`
//! - `fd create|list|show|simulate|close|mature|receipt`
//! - `preview` (offline maturity calculator)
//! - `config show|set`, `users list|create` (supervisors)
//! - `init-config`

pub mod commands;
pub mod render;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::guard::Route;
use crate::models::{FdStatus, IdType, InterestType, Role, TenureUnit};

pub use commands::run;

#[derive(Parser, Debug)]
#[command(name = "fdctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fixed Deposit management from the terminal")]
#[command(long_about = "fdctl talks to the FD backend: open and close fixed deposits,\nbrowse the register, preview maturity and manage system settings.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and FD_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "FD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Totals and the most recent FDs
    Dashboard,

    /// Fixed deposit operations
    #[command(subcommand)]
    Fd(FdCommands),

    /// Estimate maturity without contacting the server
    Preview {
        /// Principal amount
        #[arg(short, long)]
        amount: f64,
        /// Annual interest rate in percent
        #[arg(short, long)]
        rate: f64,
        /// Tenure value
        #[arg(short, long)]
        tenure: u32,
        #[arg(short, long, value_parser = parse_tenure_unit, default_value = "months")]
        unit: TenureUnit,
        /// Start date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        start: Option<NaiveDate>,
        #[arg(short, long, value_parser = parse_interest_type, default_value = "compound")]
        interest_type: InterestType,
    },

    /// System configuration (supervisors)
    #[command(subcommand)]
    Config(ConfigCommands),

    /// User management (supervisors)
    #[command(subcommand)]
    Users(UsersCommands),

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FdCommands {
    /// Open a new FD
    Create {
        /// Customer name
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_id_type, default_value = "Aadhaar")]
        id_type: IdType,
        #[arg(long)]
        id_number: String,
        /// Deposit amount
        #[arg(long)]
        amount: String,
        /// Annual rate in percent (default: configured rate for the tenure)
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        tenure: String,
        #[arg(long, value_parser = parse_tenure_unit, default_value = "months")]
        unit: TenureUnit,
        /// Start date (YYYY-MM-DD, default: today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Validate and show the maturity preview without creating
        #[arg(long)]
        preview_only: bool,
    },

    /// List the FD register
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<FdStatus>,
        /// Customer name contains (case-insensitive)
        #[arg(long)]
        name: Option<String>,
        /// Start date on or after
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Start date on or before
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Maturity date on or after
        #[arg(long)]
        maturity_from: Option<NaiveDate>,
        /// Maturity date on or before
        #[arg(long)]
        maturity_to: Option<NaiveDate>,
        /// Filter on the server instead of locally
        #[arg(long)]
        remote: bool,
    },

    /// Show one FD
    Show { fd_no: String },

    /// Simulate a premature closure
    Simulate {
        fd_no: String,
        /// Closure date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Prematurely close an FD (simulates first)
    Close {
        fd_no: String,
        /// Closure date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Close after showing the simulation instead of stopping there
        #[arg(long)]
        yes: bool,
    },

    /// Mark a matured FD as closed
    Mature { fd_no: String },

    /// Download the PDF receipt
    Receipt {
        fd_no: String,
        /// Output path (default: FD_Receipt_<fd_no>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the system configuration
    Show,

    /// Change settings; omitted values are kept
    Set {
        #[arg(long, value_parser = parse_interest_type)]
        interest_type: Option<InterestType>,
        /// Penalty on accrued interest, percent (0-10)
        #[arg(long)]
        penalty: Option<String>,
        #[arg(long)]
        rate_12m: Option<String>,
        #[arg(long)]
        rate_24m: Option<String>,
        #[arg(long)]
        rate_36m: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// List users
    List,

    /// Create a user
    Create {
        username: String,
        #[arg(short, long, env = "FD_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(short, long, value_parser = parse_role, default_value = "officer")]
        role: Role,
    },
}

fn parse_tenure_unit(s: &str) -> Result<TenureUnit, String> {
    s.parse()
}

fn parse_interest_type(s: &str) -> Result<InterestType, String> {
    s.parse()
}

fn parse_id_type(s: &str) -> Result<IdType, String> {
    s.parse()
}

fn parse_status(s: &str) -> Result<FdStatus, String> {
    s.parse()
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse()
}

impl Commands {
    /// Screen this command stands in for; `None` when no guard applies
    pub fn route(&self) -> Option<Route> {
        match self {
            Commands::Login { .. } => Some(Route::Login),
            Commands::Whoami | Commands::Dashboard => Some(Route::Dashboard),
            Commands::Fd(fd) => Some(match fd {
                FdCommands::Create { .. } => Route::CreateFd,
                FdCommands::List { .. } => Route::Register,
                FdCommands::Show { fd_no }
                | FdCommands::Simulate { fd_no, .. }
                | FdCommands::Close { fd_no, .. }
                | FdCommands::Mature { fd_no }
                | FdCommands::Receipt { fd_no, .. } => Route::FdDetails(fd_no.clone()),
            }),
            Commands::Config(_) => Some(Route::Config),
            Commands::Users(_) => Some(Route::Users),
            // Logout clears whatever is saved, valid or not
            Commands::Logout | Commands::Preview { .. } | Commands::InitConfig { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fdctl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_flags() {
        let cli = parse(&[
            "fd", "list", "--status", "prematurely-closed", "--name", "ram", "--from", "2025-01-01",
            "--format", "csv",
        ]);
        assert_eq!(cli.format, OutputFormat::Csv);
        match cli.command {
            Commands::Fd(FdCommands::List {
                status, name, from, remote, ..
            }) => {
                assert_eq!(status, Some(FdStatus::PrematurelyClosed));
                assert_eq!(name.as_deref(), Some("ram"));
                assert_eq!(from, NaiveDate::from_ymd_opt(2025, 1, 1));
                assert!(!remote);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_routes() {
        assert_eq!(parse(&["config", "show"]).command.route(), Some(Route::Config));
        assert_eq!(parse(&["users", "list"]).command.route(), Some(Route::Users));
        assert_eq!(
            parse(&["fd", "mature", "FD9"]).command.route(),
            Some(Route::FdDetails("FD9".to_string()))
        );
        assert_eq!(
            parse(&["preview", "-a", "1000", "-r", "7", "-t", "12"]).command.route(),
            None
        );
        assert_eq!(
            parse(&["login", "-u", "admin", "-p", "admin123"]).command.route(),
            Some(Route::Login)
        );
        assert_eq!(parse(&["logout"]).command.route(), None);
    }

    #[test]
    fn test_preview_defaults() {
        match parse(&["preview", "-a", "1000", "-r", "7", "-t", "2", "-u", "years"]).command {
            Commands::Preview {
                unit, interest_type, start, ..
            } => {
                assert_eq!(unit, TenureUnit::Years);
                assert_eq!(interest_type, InterestType::Compound);
                assert_eq!(start, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
