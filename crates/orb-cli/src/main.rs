//! orb — sandboxed org notes over MCP and the command line.
//!
//! `orb serve` speaks MCP over stdio; the remaining subcommands run the
//! same vault operations directly.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use rmcp::{transport::stdio, ServiceExt};

use orb_core::config::NotesConfig;
use orb_core::error::VaultError;
use orb_core::org;
use orb_mcp::NotesService;
use orb_vault::{InitOutcome, Vault};

#[derive(Parser)]
#[command(name = "orb")]
#[command(version)]
#[command(about = "Sandboxed org notes: journal, search, MCP server")]
struct Cli {
    /// Notes root directory (defaults to $NOTES_PATH)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Journal directory relative to the root (defaults to
    /// $JOURNAL_REL_PATH or "journal")
    #[arg(long, global = true)]
    journal: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the MCP server over stdio
    Serve,
    /// Print today's journal
    Today,
    /// Search note filenames (org-roam ID prefixes are ignored)
    Search { query: String },
    /// Print a note by its root-relative path
    Read { path: String },
    /// Manage journal day files
    #[command(subcommand)]
    Journal(JournalCommand),
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
}

#[derive(clap::Subcommand)]
enum JournalCommand {
    /// Create the day file with header metadata
    Init {
        /// Day as YYYY-MM-DD
        date: String,
        /// Title for the day file (defaults to the date)
        #[arg(long)]
        title: Option<String>,
    },
    /// Append a timestamped entry
    Add {
        /// Day as YYYY-MM-DD
        date: String,
        /// Entry body text
        body: String,
        /// Optional entry title
        #[arg(long)]
        title: Option<String>,
    },
    /// Replace every occurrence of a literal text span
    Edit {
        /// Day as YYYY-MM-DD
        date: String,
        /// Exact text to replace
        old_text: String,
        /// Replacement text
        new_text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "orb", &mut std::io::stdout());
        return Ok(());
    }

    // Stdout may carry the MCP protocol or command output; logs go to
    // stderr only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = NotesConfig::resolve(cli.root, cli.journal)?;
    let vault = Vault::new(config);

    match cli.command {
        Commands::Serve => serve(vault).await?,
        Commands::Today => {
            let today = Local::now().date_naive();
            match vault.daily_note(today) {
                Ok(content) => print!("{content}"),
                Err(_) => println!(
                    "No journal entry for today ({}).",
                    today.format(org::DATE_FORMAT)
                ),
            }
        }
        Commands::Search { query } => {
            for path in vault.search(&query) {
                println!("{path}");
            }
        }
        Commands::Read { path } => match vault.read_note(&path) {
            Ok(content) => print!("{content}"),
            Err(VaultError::AccessDenied { .. }) => {
                println!("Error: Access denied (path out of bounds).");
            }
            Err(e) => println!("Reading error: {e}"),
        },
        Commands::Journal(cmd) => journal_command(&vault, cmd)?,
        Commands::Completions { .. } => unreachable!("handled above"),
    }
    Ok(())
}

async fn serve(vault: Vault) -> Result<()> {
    tracing::info!(
        root = %vault.config().root().display(),
        journal = vault.config().journal_dir(),
        "starting MCP server on stdio"
    );
    let service = NotesService::new(vault).serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

fn journal_command(vault: &Vault, cmd: JournalCommand) -> Result<()> {
    match cmd {
        JournalCommand::Init { date, title } => {
            let date = parse_date(&date)?;
            match vault.init_day(date, title.as_deref())? {
                InitOutcome::Created(file) => println!("File created: {file}"),
                InitOutcome::AlreadyInitialized => println!(
                    "Warning: The journal for {} is already initialized.",
                    date.format(org::DATE_FORMAT)
                ),
            }
        }
        JournalCommand::Add { date, body, title } => {
            let date = parse_date(&date)?;
            let timestamp = vault.append_entry(date, &body, title.as_deref())?;
            println!("Entry recorded with active timestamp: {timestamp}");
        }
        JournalCommand::Edit {
            date,
            old_text,
            new_text,
        } => {
            let date = parse_date(&date)?;
            match vault.edit_entry(date, &old_text, &new_text) {
                Ok(()) => println!("Journal entry updated successfully."),
                Err(VaultError::NotFound { file }) => {
                    println!("Error: The file {file} does not exist.");
                }
                Err(VaultError::TextNotFound) => {
                    println!("Error: Original text not found. Update failed.");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, org::DATE_FORMAT)
        .map_err(|_| anyhow!("invalid date '{raw}': expected YYYY-MM-DD"))
}
