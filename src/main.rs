//! Claude Code transcript publisher - entry point.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Claude Code transcript publisher
#[derive(Parser, Debug)]
#[command(name = "ccpub")]
#[command(version)]
#[command(about = "Render Claude Code JSONL session logs to static HTML pages")]
pub struct Args {
    /// Path to a session JSONL file (most recent local session if not provided)
    pub session: Option<PathBuf>,

    /// Directory to write the generated pages into
    #[arg(short, long, default_value = "transcript")]
    pub output: PathBuf,

    /// GitHub repository (owner/name) for commit hyperlinks
    #[arg(long)]
    pub repo: Option<String>,

    /// Per-page rendered-size budget in bytes
    #[arg(long)]
    pub page_budget: Option<usize>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// List recent local sessions and exit
    #[arg(long)]
    pub list: bool,

    /// Maximum number of sessions to list
    #[arg(long, default_value = "10")]
    pub limit: usize,

    /// Log at debug level (RUST_LOG still wins)
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config =
        ccpub::config::resolve_config(args.config.clone(), args.repo.clone(), args.page_budget)?;

    let default_filter = if args.verbose { "debug" } else { "info" };
    ccpub::logging::init(config.log_file.as_deref(), default_filter)?;

    info!(config = ?config, "Configuration loaded and resolved");

    if args.list {
        return list_sessions(args.limit);
    }

    let options = config.render_options()?;

    // Explicit session path, or the most recently modified local session
    let session_path = match args.session {
        Some(path) => path,
        None => {
            let projects = ccpub::session::default_projects_dir()?;
            let latest = ccpub::session::latest_session(&projects)?;
            info!(path = %latest.display(), "Using most recent local session");
            latest
        }
    };

    let report = ccpub::pages::generate_from_file(&session_path, &args.output, &options)?;

    println!(
        "Wrote {} page(s) and index.html to {}",
        report.pages(),
        args.output.display()
    );

    Ok(())
}

/// Print the newest local sessions, one per line with an indented summary.
fn list_sessions(limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let projects = ccpub::session::default_projects_dir()?;
    let sessions = ccpub::session::find_local_sessions(&projects, limit)?;

    if sessions.is_empty() {
        println!("No local sessions found under {}", projects.display());
        return Ok(());
    }

    for session in &sessions {
        let project = session
            .path()
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|name| name.to_str())
            .map(ccpub::session::project_display_name)
            .unwrap_or_default();
        let when = session
            .modified()
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());

        println!("{when}  {project}  {}", session.path().display());
        if !session.summary().is_empty() {
            println!("    {}", session.summary());
        }
    }

    Ok(())
}
