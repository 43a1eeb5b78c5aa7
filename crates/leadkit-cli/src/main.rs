//! LeadKit CLI - Command-line interface for lead extraction

use clap::{Parser, Subcommand, ValueEnum};
use leadkit::{
    LeadError, LeadRecord, LeadScraper, LeadStore, LeadSubmission, SqliteStore, StoredLead,
};
use serde::Serialize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for scrape and list
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown with YAML frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// Which schema to print
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SchemaKind {
    /// Lead submission accepted by `add`
    Input,
    /// Lead record produced by `scrape`
    #[default]
    Output,
}

/// LeadKit - extract business leads from company websites
#[derive(Parser, Debug)]
#[command(name = "leadkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database file
    #[arg(long, global = true, env = "LEADKIT_DB", default_value = "leads.db")]
    db: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape a website and print the extracted lead
    Scrape {
        /// Website URL (https:// is assumed when no scheme is given)
        url: String,

        /// Store the lead in the database
        #[arg(long)]
        save: bool,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
    },
    /// Store a lead read as JSON from FILE (or stdin)
    Add {
        /// JSON file, `-` for stdin
        file: Option<PathBuf>,
    },
    /// List stored leads, newest first
    List {
        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
    /// Print the JSON schema of submitted or scraped leads
    Schema {
        #[arg(default_value = "output")]
        kind: SchemaKind,
    },
}

/// Response printed by `add`
#[derive(Debug, Serialize)]
struct AddResponse {
    message: &'static str,
    id: i64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            url,
            save,
            output,
            user_agent,
            timeout_secs,
        } => {
            run_scrape(&url, save, output, user_agent, timeout_secs, &cli.db).await;
        }
        Commands::Add { file } => run_add(file.as_deref(), &cli.db),
        Commands::List { output } => run_list(output, &cli.db),
        Commands::Schema { kind } => {
            let schema = match kind {
                SchemaKind::Input => LeadScraper::input_schema(),
                SchemaKind::Output => LeadScraper::output_schema(),
            };
            writeln_safe(&to_json(&schema));
        }
    }
}

async fn run_scrape(
    url: &str,
    save: bool,
    output: OutputFormat,
    user_agent: Option<String>,
    timeout_secs: u64,
    db: &Path,
) {
    let mut builder = LeadScraper::builder().timeout(Duration::from_secs(timeout_secs));
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    let scraper = builder.build().unwrap_or_else(|e| fail(e));

    let lead = scraper.scrape(url).await.unwrap_or_else(|e| fail(e));

    if save {
        let id = open_store(db).insert(&lead).unwrap_or_else(|e| fail(e));
        eprintln!("Saved lead {} to {}", id, db.display());
    }

    match output {
        OutputFormat::Md => writeln_safe(&format_lead_md(&lead, None)),
        OutputFormat::Json => writeln_safe(&to_json(&lead)),
    }
}

fn run_add(file: Option<&Path>, db: &Path) {
    let mut input = String::new();
    let read = match file {
        Some(path) if path != Path::new("-") => std::fs::File::open(path)
            .and_then(|mut f| f.read_to_string(&mut input)),
        _ => io::stdin().read_to_string(&mut input),
    };
    if let Err(e) = read {
        fail(format!("Error reading input: {}", e));
    }

    let submission: LeadSubmission =
        serde_json::from_str(&input).unwrap_or_else(|e| fail(format!("Invalid JSON: {}", e)));

    let id = add_submission(submission, &open_store(db)).unwrap_or_else(|e| fail(e));

    writeln_safe(&to_json(&AddResponse {
        message: "Lead added successfully",
        id,
    }));
}

/// Validate a submission and insert it
fn add_submission(submission: LeadSubmission, store: &dyn LeadStore) -> Result<i64, LeadError> {
    let lead = submission.into_record()?;
    Ok(store.insert(&lead)?)
}

fn run_list(output: OutputFormat, db: &Path) {
    let leads = open_store(db).list_all().unwrap_or_else(|e| fail(e));

    match output {
        OutputFormat::Md => writeln_safe(&format_leads_md(&leads)),
        OutputFormat::Json => writeln_safe(&to_json(&leads)),
    }
}

fn open_store(db: &Path) -> SqliteStore {
    debug!(db = %db.display(), "Opening lead store");
    SqliteStore::open(db).unwrap_or_else(|e| fail(format!("{} ({})", e, db.display())))
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| fail(format!("Error serializing response: {}", e)))
}

/// Print the error to stderr and exit 1
fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

/// Format a lead as markdown with YAML frontmatter
///
/// Frontmatter carries the structured fields; the body is the title as a
/// heading followed by the description.
fn format_lead_md(lead: &LeadRecord, stored: Option<&StoredLead>) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    if let Some(stored) = stored {
        output.push_str(&format!("id: {}\n", stored.id));
        if let Some(created_at) = stored.created_at {
            output.push_str(&format!("created_at: {}\n", created_at.to_rfc3339()));
        }
    }
    output.push_str(&format!("company: {}\n", lead.company));
    output.push_str(&format!("url: {}\n", lead.url));

    let optional = [
        ("email", &lead.email),
        ("phone", &lead.phone),
        ("logo_url", &lead.logo_url),
        ("favicon_url", &lead.favicon_url),
        ("twitter_handle", &lead.twitter_handle),
        ("linkedin_url", &lead.linkedin_url),
        ("facebook_url", &lead.facebook_url),
        ("instagram_url", &lead.instagram_url),
        ("contact_page", &lead.contact_page),
        ("industry_keywords", &lead.industry_keywords),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            output.push_str(&format!("{}: {}\n", key, value));
        }
    }
    output.push_str(&format!("language: {}\n", lead.language));
    output.push_str("---\n");

    output.push_str(&format!("# {}\n\n{}", lead.title, lead.description));

    output
}

/// Format stored leads, separated by blank lines
fn format_leads_md(leads: &[StoredLead]) -> String {
    if leads.is_empty() {
        return "No leads stored.".to_string();
    }
    leads
        .iter()
        .map(|stored| format_lead_md(&stored.lead, Some(stored)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
