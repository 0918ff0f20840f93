use crate::store::Ticket;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Registrar: course registration backed by tab-delimited record files
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(version)]
#[command(about = "Course registration record manager")]
#[command(
    long_about = "Registrar keeps students, courses and enrollments in tab-delimited files and enforces per-course capacity and per-student unit limits on every registration."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./registrar.yaml, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the record files, overrides data_dir from the config
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level for diagnostics written to stderr
    #[arg(long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Course listing by ticket
    List,

    /// A student's registered courses and total units
    Info {
        /// Student identifier
        student: String,
    },

    /// A course and the students registered for it
    Detail {
        /// Course ticket number
        ticket: Ticket,
    },

    /// Register a student for a course
    Register {
        /// Student identifier
        student: String,

        /// Course ticket number
        ticket: Ticket,
    },

    /// Drop a student from a course
    Drop {
        /// Student identifier
        student: String,

        /// Course ticket number
        ticket: Ticket,
    },

    /// Add a student; prints the generated identifier
    Add {
        /// First name
        first_name: String,

        /// Last name
        last_name: String,
    },

    /// Interactive registration session
    Shell,
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::List => "list",
            Commands::Info { .. } => "info",
            Commands::Detail { .. } => "detail",
            Commands::Register { .. } => "register",
            Commands::Drop { .. } => "drop",
            Commands::Add { .. } => "add",
            Commands::Shell => "shell",
        }
    }
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
