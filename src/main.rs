use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tally::cli::{handle_category_command, handle_statement_command, open_rule_store};
use tally::config::paths::{TallyPaths, DATA_DIR_ENV};
use tally::config::settings::Settings;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Categorize bank statements with keyword rules that learn from your corrections",
    long_about = "Tally sorts bank-statement transactions into spending categories by \
                  matching their details against saved keywords. Every time you move a \
                  transaction to another category, its details become a new keyword so \
                  next month's statement gets it right."
)]
struct Cli {
    /// Directory holding settings and category rules
    #[arg(long, env = DATA_DIR_ENV, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, default categories and settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Category and keyword management
    #[command(subcommand)]
    Category(tally::cli::CategoryCommands),

    /// Classify and summarize statements
    #[command(subcommand)]
    Statement(tally::cli::StatementCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = match cli.data_dir {
        Some(dir) => TallyPaths::with_base_dir(dir),
        None => TallyPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Tally at: {}", paths.base_dir().display());
            let created = tally::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            if created {
                println!("Created {}", paths.rules_file().display());
            } else {
                println!("Keeping existing {}", paths.rules_file().display());
            }
            println!();
            println!("Run 'tally category add <name>' to create categories.");
        }
        Some(Commands::Config) => {
            let store = open_rule_store(&paths);
            println!("Tally Configuration");
            println!("===================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Rules file:     {}", paths.rules_file().display());
            println!();
            println!("Settings:");
            println!("  Currency label:   {}", settings.currency_label);
            println!("  Statement dates:  {}", settings.statement_date_format);
            println!("  Display dates:    {}", settings.display_date_format);
            println!();
            println!(
                "Rules: {} categories, {} keywords",
                store.rules().len(),
                store.rules().keyword_count()
            );
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&paths, cmd)?;
        }
        Some(Commands::Statement(cmd)) => {
            handle_statement_command(&paths, &settings, cmd)?;
        }
        None => {
            println!("Tally - keyword-rule categorization for bank statements");
            println!();
            println!("Run 'tally --help' for usage information.");
        }
    }

    Ok(())
}
