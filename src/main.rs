use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use spendlog::cli::{
    handle_category_command, handle_config_command, handle_expense_command, handle_export_command,
    handle_import_command, handle_stats_command, CategoryCommands, ConfigCommands, ExpenseCommands,
    ExportArgs, ImportArgs, StatsArgs,
};
use spendlog::config::paths::DATA_DIR_ENV;
use spendlog::config::{Settings, SpendPaths};
use spendlog::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendlog",
    version,
    about = "Track expenses and see where the money goes",
    long_about = "spendlog keeps a local log of expenses and reports on them by day, \
                  week, month or year: period-over-period comparisons, top categories \
                  and trend charts in the terminal."
)]
struct Cli {
    /// Log level for spendlog's own messages (RUST_LOG overrides it)
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    /// Directory holding settings and data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Period statistics, top categories and trends
    Stats(StatsArgs),

    /// Export a backup (JSON/YAML) or the expense list (CSV)
    Export(ExportArgs),

    /// Restore a JSON or YAML backup
    Import(ImportArgs),

    /// Show current configuration and paths, or change settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    let paths = match cli.data_dir {
        Some(dir) => SpendPaths::with_base_dir(dir),
        None => SpendPaths::new()?,
    };
    debug!(base_dir = %paths.base_dir().display(), "Resolved paths");
    let mut settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::open(&paths)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&mut storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&mut storage, &settings, cmd)?,
        Some(Commands::Stats(args)) => handle_stats_command(&storage, &settings, args)?,
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Import(args)) => handle_import_command(&mut storage, args)?,
        Some(Commands::Config { action }) => {
            handle_config_command(&paths, &mut settings, &storage, action)?
        }
        None => {
            println!("spendlog - track expenses from the command line");
            println!();
            println!("Run 'spendlog --help' for usage information.");
        }
    }

    Ok(())
}

/// Send tracing output to stderr, honoring `RUST_LOG` when it is set
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
