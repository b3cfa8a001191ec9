//! photovault CLI
//!
//! Command-line interface for browsing a photo-asset vault with SQLite
//! trace/profile diagnostics enabled on the driver.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "photovault")]
#[command(about = "Browse a photo-asset vault with driver tracing", long_about = None)]
struct Cli {
    /// Path to the vault database (defaults to ./vault.db)
    #[arg(short, long, global = true)]
    db: Option<PathBuf>,

    /// Verbose logging; shows the driver's trace and profile lines
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Credentials the browse battery presents.
#[derive(Args, Clone)]
struct AuthArgs {
    /// Users to browse as
    #[arg(short, long, value_delimiter = ',', default_value = "alice,bob")]
    users: Vec<String>,

    /// Bearer token presented for every user
    #[arg(short, long, default_value = photovault_db::operations::DEMO_TOKEN)]
    token: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and populate the demo database
    Seed,

    /// Run the browse battery: years, then every month and day per year
    Run {
        #[command(flatten)]
        auth: AuthArgs,

        /// First year of the battery
        #[arg(long, default_value_t = 2007)]
        from_year: i32,

        /// Last year of the battery (inclusive)
        #[arg(long, default_value_t = 2019)]
        to_year: i32,

        /// Show the driver's trace and profile lines for this run
        #[arg(long)]
        trace: bool,
    },

    /// Show vault statistics
    Stats,
}

fn main() {
    let cli = Cli::parse();

    let debug = cli.verbose || matches!(cli.command, Commands::Run { trace: true, .. });
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_timestamp(None)
    .init();

    let db_path = cli.db.unwrap_or_else(commands::default_db_path);

    let result = match cli.command {
        Commands::Seed => commands::seed::run_seed(&db_path),
        Commands::Run {
            auth,
            from_year,
            to_year,
            trace: _,
        } => commands::run::run_battery(&db_path, &auth.users, &auth.token, from_year, to_year),
        Commands::Stats => commands::stats::run_stats(&db_path),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn run_accepts_trace_flag() {
        let cli = Cli::try_parse_from(["photovault", "run", "--trace"]).unwrap();
        match cli.command {
            Commands::Run { trace, .. } => assert!(trace),
            _ => panic!("expected run subcommand"),
        }
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["photovault", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                auth,
                from_year,
                to_year,
                trace,
            } => {
                assert_eq!(auth.users, ["alice", "bob"]);
                assert_eq!(auth.token, "1234567");
                assert_eq!(from_year, 2007);
                assert_eq!(to_year, 2019);
                assert!(!trace);
            }
            _ => panic!("expected run subcommand"),
        }
    }
}
