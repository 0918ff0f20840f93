use anyhow::{Context, Result};
use clap::Parser;
use registrar::cli::commands::{
    add::AddCommand, detail::DetailCommand, drop::DropCommand, finish, info::InfoCommand,
    list::ListCommand, register::RegisterCommand, shell::ShellCommand, CommandHandler,
    CommandOptions, CommandResult,
};
use registrar::cli::{Cli, Commands, LogLevel};
use registrar::config::ConfigLoader;
use registrar::store::RecordStore;
use registrar::Session;
use std::io::Write;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

fn initialize_tracing(log_level: LogLevel) {
    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    match run(cli) {
        Ok(result) => {
            if let Some(message) = result.message() {
                debug!("Request rejected: {}", message);
            }
            std::process::exit(result.exit_code());
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<CommandResult> {
    let working_dir = std::env::current_dir().context("Failed to determine working directory")?;
    let loaded = ConfigLoader::new(&working_dir)
        .with_explicit_path(cli.config.clone())
        .load()
        .context("Failed to load configuration")?;

    let mut config = loaded.config;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    info!(
        source = ?loaded.source,
        data_dir = ?config.data_dir,
        "Configuration resolved"
    );

    let mut session = Session::open_config(&config)
        .with_context(|| format!("Failed to open records in {}", config.data_dir.display()))?;

    let options = CommandOptions { format: cli.format };
    debug!("Executing {} command", cli.command.name());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = match cli.command {
        Commands::List => dispatch(ListCommand::new(options), &mut session, &mut out),
        Commands::Info { student } => {
            dispatch(InfoCommand::new(student, options), &mut session, &mut out)
        }
        Commands::Detail { ticket } => {
            dispatch(DetailCommand::new(ticket, options), &mut session, &mut out)
        }
        Commands::Register { student, ticket } => dispatch(
            RegisterCommand::new(student, ticket, options),
            &mut session,
            &mut out,
        ),
        Commands::Drop { student, ticket } => dispatch(
            DropCommand::new(student, ticket, options),
            &mut session,
            &mut out,
        ),
        Commands::Add {
            first_name,
            last_name,
        } => dispatch(
            AddCommand::new(first_name, last_name, options),
            &mut session,
            &mut out,
        ),
        Commands::Shell => dispatch(ShellCommand, &mut session, &mut out),
    };
    out.flush()?;

    // Closing retries any write that failed during the command
    let closed = session.close().map(|_| ());
    Ok(finish(outcome, closed)?)
}

fn dispatch<H: CommandHandler, S: RecordStore, W: Write>(
    handler: H,
    session: &mut Session<S>,
    out: &mut W,
) -> registrar::Result<CommandResult> {
    handler.execute(session, out).inspect_err(|e| {
        error!("{} failed: {}", handler.name(), e);
    })
}
