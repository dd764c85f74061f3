pub mod commands;
pub mod error;
pub mod output;
pub mod ux;
pub mod workbench;

pub use clap::{Parser, Subcommand};
use std::path::PathBuf;


#[derive(Parser)]
#[command(name = "sqlbench", version, about = "sqlbench runs SQL scripts statement by statement and shows their results.")]
pub struct Cli {
    #[arg(
        long = "db",
        help = "Database connection string, e.g.:
    postgresql://<username>:<password>@<host>:<port>/<database>\n",
        env = "DB_CONNECTION_STRING",
        hide_env_values = true
    )]
    pub db_connection_string: String,

    #[arg(
        long = "result-file",
        help = "Scratch file each statement's result is written to.",
        env = "SQLBENCH_RESULT_FILE",
        default_value = "output.txt",
    )]
    pub result_file: PathBuf,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Set level of verbosity. [default: INFO]\n\t-v: DEBUG\n\t-vv: TRACE\n--quiet takes precedence over --verbose."
    )]
    pub verbose: u8,

    #[arg(
        short,
        long,
        action = clap::ArgAction::SetTrue,
        help = "Disable all information logs (only ERROR level logs are shown).\n--quiet takes precedence over --verbose."
    )]
    pub quiet: bool,

    #[arg(
        long,
        action = clap::ArgAction::SetTrue,
        help = "Enable JSON output format. Human readable output is disabled when this flag is set."
    )]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Test connection to the database.")]
    Peck {},

    #[command(about = "Run a script file as if submitted from the editor.")]
    Run {
        #[arg(help = "Path to the SQL script.")]
        file: PathBuf,
    },

    #[command(about = "Run a script file without success notices, e.g. when importing a database dump.")]
    Import {
        #[arg(help = "Path to the SQL script.")]
        file: PathBuf,
    },

    #[command(about = "Run SQL given inline as if submitted from the editor.")]
    Exec {
        #[arg(help = "One or more `;`-separated statements.")]
        sql: String,
    },
}

impl Commands {
    /// Editor submissions get success notices; imports do not.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, Commands::Import { .. })
    }
}

impl std::fmt::Display for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Commands::Peck { .. } => "peck",
            Commands::Run { .. } => "run",
            Commands::Import { .. } => "import",
            Commands::Exec { .. } => "exec",
        };
        write!(f, "{name}")
    }
}
