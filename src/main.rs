use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ledger_cli::cli::{
    handle_file_command, handle_restore_command, handle_show_command, handle_users_command,
    handle_verify_command, FileAction,
};
use ledger_cli::config::{paths::LedgerPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "ledger",
    author = "Groupe 2",
    version,
    about = "Per-user obfuscated ledger store",
    long_about = "ledger inspects and maintains the obfuscated, hash-sealed files \
                  holding each user's accounts, transactions and budgets."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Obfuscate a text file in place
    Encrypt {
        /// File to transform
        path: PathBuf,
        /// Shift key (defaults to the global index key)
        #[arg(short, long, allow_hyphen_values = true)]
        key: Option<i64>,
    },

    /// Reveal an obfuscated text file in place
    Decrypt {
        /// File to transform
        path: PathBuf,
        /// Shift key (defaults to the global index key)
        #[arg(short, long, allow_hyphen_values = true)]
        key: Option<i64>,
    },

    /// List registered users
    Users,

    /// Check the integrity of a user's file
    Verify {
        /// User id
        user: String,
    },

    /// Print a user's ledger
    Show {
        /// User id
        user: String,
        /// Output JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Restore a user's file from its backup
    Restore {
        /// User id
        user: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing ledger store at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("Ledger Configuration");
            println!("====================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Users directory:  {}", paths.users_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Credential index: {}", paths.ident_file().display());
            println!();
            println!("Settings:");
            println!("  Keep backup: {}", settings.keep_backup);
            println!("  Date format: {}", settings.date_format);
            if !paths.is_initialized() {
                println!();
                println!("Not initialized yet. Run 'ledger init'.");
            }
        }
        Some(Commands::Encrypt { path, key }) => {
            handle_file_command(&settings, FileAction::Encrypt, &path, key)?;
        }
        Some(Commands::Decrypt { path, key }) => {
            handle_file_command(&settings, FileAction::Decrypt, &path, key)?;
        }
        Some(Commands::Users) => {
            handle_users_command(&paths, &settings)?;
        }
        Some(Commands::Verify { user }) => {
            handle_verify_command(&paths, &settings, &user)?;
        }
        Some(Commands::Show { user, json }) => {
            handle_show_command(&paths, &settings, &user, json)?;
        }
        Some(Commands::Restore { user }) => {
            handle_restore_command(&paths, &settings, &user)?;
        }
        None => {
            println!("ledger - per-user obfuscated ledger store");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
