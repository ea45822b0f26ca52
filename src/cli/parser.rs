use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for gymtrack
/// CLI application to track gym member attendance with SQLite
#[derive(Parser)]
#[command(
    name = "gymtrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple attendance CLI: QR check-in/check-out for gym members using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Override the clock (RFC 3339 or "YYYY-MM-DD HH:MM"), for tests
    #[arg(global = true, long = "at", hide = true)]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Manage the gym registry used for QR code resolution
    Gym {
        #[arg(long = "add", value_name = "NAME", help = "Register a new gym")]
        add: Option<String>,

        #[arg(
            long = "code",
            value_name = "CODE",
            help = "QR code payload for the gym (required with --add)",
            requires = "add"
        )]
        code: Option<String>,

        #[arg(long = "list", help = "List registered gyms")]
        list: bool,
    },

    /// Check a member in with a decoded QR code
    Checkin {
        /// Member identifier (resolved by the caller's auth layer)
        member: String,

        /// Decoded QR code payload identifying the gym
        #[arg(long = "code", value_name = "CODE")]
        code: String,

        /// Record the check-in as a manual front-desk entry instead of a scan
        #[arg(long = "manual")]
        manual: bool,
    },

    /// Check a member out of their open session
    Checkout {
        /// Member identifier
        member: String,
    },

    /// Show a member's attendance status for today
    Status {
        /// Member identifier
        member: String,
    },

    /// List a member's attendance history, most recent first
    History {
        /// Member identifier
        member: String,

        #[arg(long = "days", default_value = "30", help = "How many days back to list")]
        days: u32,
    },

    /// Close every session left open past the dwell limit
    Sweep,

    /// Run a scanner loop: read decoded frames from stdin and check in
    Kiosk {
        /// Member identifier the scans belong to
        member: String,
    },

    /// Export a member's attendance history
    Export {
        /// Member identifier
        member: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long = "days", default_value = "30", help = "How many days back to export")]
        days: u32,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}
