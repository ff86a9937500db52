//! `StreamConn` CLI - Command-line interface for stream connection strings
//!
//! Provides commands for parsing connection strings, saving them under an
//! alias, listing, showing and removing saved entries, and importing stream
//! lists.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use streamconn_core::config::ConfigManager;
use streamconn_core::import::{ImportSource, SkippedEntry, StreamListImporter};
use streamconn_core::models::{ConnectionEntry, Protocol, SavedConnection};
use streamconn_core::parse_connection_string;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// `StreamConn` command-line interface for stream connection strings
#[derive(Parser)]
#[command(name = "streamconn-cli")]
#[command(author, version, about = "StreamConn command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a connection string and print the resolved entry
    #[command(about = "Parse a connection string without saving it")]
    Parse {
        /// Connection string (e.g. udp://239.1.1.1:1234)
        url: String,

        /// Alias attached to the parsed entry
        #[arg(short, long, default_value = "")]
        alias: String,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Parse a connection string and save it
    #[command(about = "Save a connection string under an alias")]
    Add {
        /// Connection string (e.g. rtsp://camera.local/live)
        url: String,

        /// Alias for the saved entry
        #[arg(short, long)]
        alias: String,
    },

    /// List saved connections
    #[command(about = "List all saved connections")]
    List {
        /// Output format for the connection list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,

        /// Filter connections by protocol scheme (udp, rtsp, ...)
        #[arg(short, long)]
        protocol: Option<Protocol>,
    },

    /// Show a saved connection
    #[command(about = "Show saved connection details")]
    Show {
        /// Connection alias or UUID
        name: String,
    },

    /// Remove a saved connection
    #[command(about = "Remove a saved connection")]
    Remove {
        /// Connection alias or UUID
        name: String,
    },

    /// Import stream lists
    #[command(about = "Import connection strings from stream list files")]
    Import {
        /// Stream list files, one `alias = url` or bare url per line
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List supported protocols
    #[command(about = "List supported protocols and their default ports")]
    Protocols {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },
}

/// Output format for printing entries
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
    /// Output as CSV
    Csv,
}

fn main() {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(dir) => ConfigManager::with_config_dir(dir),
        None => match ConfigManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(exit_codes::GENERAL_ERROR);
            }
        },
    };

    init_tracing(&config_manager);

    let result = match cli.command {
        Commands::Parse { url, alias, format } => cmd_parse(&url, &alias, format),
        Commands::Add { url, alias } => cmd_add(&config_manager, &url, &alias),
        Commands::List { format, protocol } => cmd_list(&config_manager, format, protocol),
        Commands::Show { name } => cmd_show(&config_manager, &name),
        Commands::Remove { name } => cmd_remove(&config_manager, &name),
        Commands::Import { files } => cmd_import(&config_manager, &files),
        Commands::Protocols { format } => cmd_protocols(format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Installs the stderr `tracing` subscriber
///
/// `RUST_LOG` takes precedence over the level in `config.toml`.
fn init_tracing(config_manager: &ConfigManager) {
    let level = config_manager
        .load_settings()
        .map(|settings| settings.logging.level)
        .unwrap_or_else(|_| "warn".to_string());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse command handler
fn cmd_parse(url: &str, alias: &str, format: OutputFormat) -> Result<(), CliError> {
    let entry = parse_connection_string(alias, url)
        .ok_or_else(|| CliError::InvalidUrl(url.to_string()))?;

    match format {
        OutputFormat::Table => println!("{}", format_entry(&entry)),
        OutputFormat::Json => println!("{}", to_json(&EntryOutput::from(&entry))?),
        OutputFormat::Csv => println!("{}", format_csv(&[&entry])),
    }

    Ok(())
}

/// Add command handler
fn cmd_add(config_manager: &ConfigManager, url: &str, alias: &str) -> Result<(), CliError> {
    let saved = add_connection(config_manager, url, alias)?;
    println!(
        "Added connection '{}' -> {} (ID: {})",
        saved.alias(),
        saved.entry,
        saved.id
    );
    Ok(())
}

/// Parses `url` and appends it to the saved connections
///
/// # Errors
///
/// Returns `CliError::InvalidUrl` if the string does not parse and
/// `CliError::AlreadyExists` if the alias is taken.
pub fn add_connection(
    config_manager: &ConfigManager,
    url: &str,
    alias: &str,
) -> Result<SavedConnection, CliError> {
    if alias.trim().is_empty() {
        return Err(CliError::Config("Alias cannot be empty".to_string()));
    }

    let entry =
        parse_connection_string(alias, url).ok_or_else(|| CliError::InvalidUrl(url.to_string()))?;

    let mut connections = load_connections(config_manager)?;
    if connections.iter().any(|c| c.alias() == alias) {
        return Err(CliError::AlreadyExists(alias.to_string()));
    }

    let saved = SavedConnection::new(entry);
    connections.push(saved.clone());
    save_connections(config_manager, &connections)?;
    info!(alias, url = %saved.entry, "Saved connection");

    Ok(saved)
}

/// List command handler
fn cmd_list(
    config_manager: &ConfigManager,
    format: OutputFormat,
    protocol: Option<Protocol>,
) -> Result<(), CliError> {
    let connections = load_connections(config_manager)?;

    let filtered: Vec<&ConnectionEntry> = connections
        .iter()
        .map(|c| &c.entry)
        .filter(|entry| protocol.is_none_or(|p| entry.protocol() == p))
        .collect();

    match format {
        OutputFormat::Table => println!("{}", format_table(&filtered)),
        OutputFormat::Json => {
            let output: Vec<EntryOutput> = filtered.iter().map(|e| EntryOutput::from(*e)).collect();
            println!("{}", to_json(&output)?);
        }
        OutputFormat::Csv => println!("{}", format_csv(&filtered)),
    }

    Ok(())
}

/// Show command handler
fn cmd_show(config_manager: &ConfigManager, name: &str) -> Result<(), CliError> {
    let connections = load_connections(config_manager)?;
    let saved = ConfigManager::find_connection(&connections, name)
        .ok_or_else(|| CliError::ConnectionNotFound(name.to_string()))?;

    println!("ID:        {}", saved.id);
    println!("{}", format_entry(&saved.entry));
    println!("Created:   {}", saved.created_at.to_rfc3339());
    println!("Updated:   {}", saved.updated_at.to_rfc3339());

    Ok(())
}

/// Remove command handler
fn cmd_remove(config_manager: &ConfigManager, name: &str) -> Result<(), CliError> {
    let removed = remove_connection(config_manager, name)?;
    println!("Removed connection '{}' (ID: {})", removed.alias(), removed.id);
    Ok(())
}

/// Removes a saved connection by alias or UUID
///
/// # Errors
///
/// Returns `CliError::ConnectionNotFound` if nothing matches `name`.
pub fn remove_connection(
    config_manager: &ConfigManager,
    name: &str,
) -> Result<SavedConnection, CliError> {
    let mut connections = load_connections(config_manager)?;
    let id = ConfigManager::find_connection(&connections, name)
        .map(|c| c.id)
        .ok_or_else(|| CliError::ConnectionNotFound(name.to_string()))?;

    let index = connections
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| CliError::ConnectionNotFound(name.to_string()))?;
    let removed = connections.remove(index);

    save_connections(config_manager, &connections)?;
    info!(alias = removed.alias(), id = %removed.id, "Removed connection");

    Ok(removed)
}

/// Import command handler
fn cmd_import(config_manager: &ConfigManager, files: &[PathBuf]) -> Result<(), CliError> {
    let outcome = import_connections(config_manager, files)?;

    println!(
        "Imported {} connection(s), {} duplicate(s) ignored",
        outcome.added, outcome.duplicates
    );

    if !outcome.skipped.is_empty() {
        eprintln!("\nSkipped entries:");
        for skipped in &outcome.skipped {
            eprintln!("  - {}", describe_skipped(skipped));
        }
    }

    if !outcome.errors.is_empty() {
        eprintln!("\nFailed files:");
        for error in &outcome.errors {
            eprintln!("  - {error}");
        }
        return Err(CliError::Import(format!(
            "{} of {} file(s) could not be imported",
            outcome.errors.len(),
            files.len()
        )));
    }

    Ok(())
}

/// Counts reported by [`import_connections`]
#[derive(Debug, Default)]
pub struct ImportOutcome {
    /// Entries appended to the saved connections
    pub added: usize,
    /// Entries ignored because the same alias and URL were already saved
    pub duplicates: usize,
    /// Lines that did not parse and entries whose alias was already taken
    pub skipped: Vec<SkippedEntry>,
    /// Files that could not be read at all
    pub errors: Vec<String>,
}

/// Imports stream list files into the saved connections
///
/// Aliases stay unique: an imported entry whose alias is already saved, or
/// was taken earlier in the same run, is skipped. When
/// `import.skip_duplicates` is set an exact repeat of a saved entry is
/// counted as a duplicate instead of being reported as skipped.
///
/// # Errors
///
/// Returns `CliError::Import` if none of the files can be read and
/// `CliError::Config` if the connections cannot be loaded or saved.
pub fn import_connections(
    config_manager: &ConfigManager,
    files: &[PathBuf],
) -> Result<ImportOutcome, CliError> {
    let settings = config_manager
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))?;

    let importer = StreamListImporter::new();
    info!(source = importer.display_name(), files = files.len(), "Importing connections");
    let paths: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
    let result = importer.import_from_paths(&paths);

    if result.has_errors() && result.total_processed() == result.errors.len() {
        let reasons: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        return Err(CliError::Import(reasons.join("; ")));
    }

    let mut connections = load_connections(config_manager)?;
    let mut outcome = ImportOutcome {
        skipped: result.skipped,
        errors: result.errors.iter().map(ToString::to_string).collect(),
        ..ImportOutcome::default()
    };

    for entry in result.entries {
        let taken = connections
            .iter()
            .find(|c| c.alias() == entry.alias())
            .map(|c| c.entry.clone());
        match taken {
            None => {
                connections.push(SavedConnection::new(entry));
                outcome.added += 1;
            }
            Some(existing) if existing == entry && settings.import.skip_duplicates => {
                debug!(alias = entry.alias(), "Skipping duplicate entry");
                outcome.duplicates += 1;
            }
            Some(existing) => {
                outcome.skipped.push(SkippedEntry::new(
                    entry.alias(),
                    format!("Alias already used by {existing}"),
                ));
            }
        }
    }

    for skipped in &outcome.skipped {
        warn!(identifier = %skipped.identifier, reason = %skipped.reason, "Skipped entry");
    }

    if outcome.added > 0 {
        save_connections(config_manager, &connections)?;
    }

    Ok(outcome)
}

fn describe_skipped(skipped: &SkippedEntry) -> String {
    match &skipped.location {
        Some(location) => format!("{location}, {}: {}", skipped.identifier, skipped.reason),
        None => format!("{}: {}", skipped.identifier, skipped.reason),
    }
}

/// Protocols command handler
fn cmd_protocols(format: OutputFormat) -> Result<(), CliError> {
    let rows: Vec<ProtocolOutput> = Protocol::ALL.iter().map(ProtocolOutput::from).collect();

    match format {
        OutputFormat::Table => {
            let mut output = String::new();
            let _ = writeln!(output, "{:<8}  {:<8}  {:<5}", "SCHEME", "PROTOCOL", "PORT");
            let _ = writeln!(output, "{:-<8}  {:-<8}  {:-<5}", "", "", "");
            for row in &rows {
                let _ = writeln!(
                    output,
                    "{:<8}  {:<8}  {:<5}",
                    row.scheme, row.name, row.default_port
                );
            }
            println!("{}", output.trim_end());
        }
        OutputFormat::Json => println!("{}", to_json(&rows)?),
        OutputFormat::Csv => {
            println!("scheme,protocol,default_port");
            for row in &rows {
                println!("{},{},{}", row.scheme, row.name, row.default_port);
            }
        }
    }

    Ok(())
}

fn load_connections(config_manager: &ConfigManager) -> Result<Vec<SavedConnection>, CliError> {
    config_manager
        .load_connections()
        .map_err(|e| CliError::Config(format!("Failed to load connections: {e}")))
}

fn save_connections(
    config_manager: &ConfigManager,
    connections: &[SavedConnection],
) -> Result<(), CliError> {
    config_manager
        .save_connections(connections)
        .map_err(|e| CliError::Config(format!("Failed to save connections: {e}")))
}

// ============================================================================
// Formatting
// ============================================================================

/// Format a single entry as labelled lines
#[must_use]
pub fn format_entry(entry: &ConnectionEntry) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Alias:     {}", entry.alias());
    let _ = writeln!(output, "Protocol:  {}", entry.protocol());
    let _ = writeln!(output, "Address:   {}", entry.address());
    let _ = writeln!(output, "Port:      {}", entry.port());
    let _ = writeln!(output, "Path:      {}", entry.path().unwrap_or("-"));
    let _ = writeln!(output, "Multicast: {}", entry.is_multicast());
    let _ = write!(output, "URL:       {}", entry.to_url());
    output
}

/// Format entries as a table string
#[must_use]
pub fn format_table(entries: &[&ConnectionEntry]) -> String {
    if entries.is_empty() {
        return "No connections found.".to_string();
    }

    let mut output = String::new();

    let alias_width = entries
        .iter()
        .map(|e| e.alias().len())
        .max()
        .unwrap_or(5)
        .max(5);
    let address_width = entries
        .iter()
        .map(|e| e.address().len())
        .max()
        .unwrap_or(7)
        .max(7);
    let protocol_width = 8; // "PROTOCOL"
    let port_width = 5;

    let _ = writeln!(
        output,
        "{:<alias_width$}  {:<protocol_width$}  {:<address_width$}  {:<port_width$}  PATH",
        "ALIAS", "PROTOCOL", "ADDRESS", "PORT"
    );
    let _ = writeln!(
        output,
        "{:-<alias_width$}  {:-<protocol_width$}  {:-<address_width$}  {:-<port_width$}  ----",
        "", "", "", ""
    );

    for entry in entries {
        let _ = writeln!(
            output,
            "{:<alias_width$}  {:<protocol_width$}  {:<address_width$}  {:<port_width$}  {}",
            entry.alias(),
            entry.protocol().to_string(),
            entry.address(),
            entry.port(),
            entry.path().unwrap_or("")
        );
    }

    output.trim_end().to_string()
}

/// Format entries as CSV string
#[must_use]
pub fn format_csv(entries: &[&ConnectionEntry]) -> String {
    let mut output = String::new();

    output.push_str("alias,protocol,address,port,path\n");

    for entry in entries {
        let _ = writeln!(
            output,
            "{},{},{},{},{}",
            escape_csv_field(entry.alias()),
            entry.protocol().as_str(),
            escape_csv_field(entry.address()),
            entry.port(),
            escape_csv_field(entry.path().unwrap_or(""))
        );
    }

    output.trim_end().to_string()
}

/// Escape a CSV field if it contains special characters
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Config(format!("Failed to serialize to JSON: {e}")))
}

/// Flattened entry output for JSON
#[derive(Debug, Clone, serde::Serialize)]
pub struct EntryOutput {
    pub alias: String,
    pub protocol: Protocol,
    pub address: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub url: String,
}

impl From<&ConnectionEntry> for EntryOutput {
    fn from(entry: &ConnectionEntry) -> Self {
        Self {
            alias: entry.alias().to_string(),
            protocol: entry.protocol(),
            address: entry.address().to_string(),
            port: entry.port(),
            path: entry.path().map(str::to_string),
            url: entry.to_url(),
        }
    }
}

/// Protocol table row
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProtocolOutput {
    pub scheme: &'static str,
    pub name: String,
    pub default_port: u16,
}

impl From<&Protocol> for ProtocolOutput {
    fn from(protocol: &Protocol) -> Self {
        Self {
            scheme: protocol.as_str(),
            name: protocol.to_string(),
            default_port: protocol.default_port(),
        }
    }
}

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, import, or other errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Lookup failure - connection string did not parse or entry not found
    pub const LOOKUP_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection string could not be parsed
    #[error("Invalid connection string: {0}")]
    InvalidUrl(String),

    /// Connection not found
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// Alias already in use
    #[error("Connection already exists: {0}")]
    AlreadyExists(String),

    /// Import error
    #[error("Import error: {0}")]
    Import(String),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 1: General error (configuration, import, duplicate alias)
    /// - 2: Lookup failure (invalid connection string, connection not found)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidUrl(_) | Self::ConnectionNotFound(_) => exit_codes::LOOKUP_FAILURE,
            Self::Config(_) | Self::AlreadyExists(_) | Self::Import(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
