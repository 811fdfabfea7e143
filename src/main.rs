use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use complete_from_text::completion::{CompletionEngine, DocumentScope};
use complete_from_text::logging::init_logger;
use complete_from_text::models::{CompletionRequest, Document};
use complete_from_text::settings::Settings;

/// Complete the word under the cursor from the text of open documents
#[derive(Debug, Parser)]
#[command(name = "complete-from-text", version, about)]
struct Args {
    /// Documents to scan; the first one holds the cursor
    #[arg(required = true)]
    documents: Vec<PathBuf>,

    /// Cursor line, 1 based
    #[arg(long)]
    line: usize,

    /// Number of characters left of the cursor on its line
    #[arg(long)]
    column: usize,

    /// Lexer name of the documents (empty for none)
    #[arg(long, default_value = "")]
    language: String,

    /// Lexer at the caret, if it differs (selects the dictionary file)
    #[arg(long)]
    caret_language: Option<String>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Directory containing `autocomplete/<lexer>.acp` dictionary files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Scan all given documents, not only the first
    #[arg(long)]
    all_documents: bool,

    /// Complete even if the lexer is not in the allow-list
    #[arg(long)]
    ignore_lexer: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log level (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in log output
    #[arg(long)]
    no_color: bool,

    /// Also write a debug log to the user cache directory
    #[arg(long)]
    log_file: bool,
}

fn read_document(path: &Path, language: &str) -> Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read document {:?}", path))?;
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Document::new(label, language, String::from_utf8_lossy(&bytes)))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let _guard = init_logger(args.no_color, args.log_level.as_deref(), args.log_file)
        .context("Failed to initialize logging")?;

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut config = settings.config_for(&args.language);
    if args.all_documents {
        config.scope = DocumentScope::All;
    }
    debug!("Completion config: {:?}", config);

    let documents = args
        .documents
        .iter()
        .map(|path| read_document(path, &args.language))
        .collect::<Result<Vec<_>>>()?;

    let request = CompletionRequest {
        documents,
        current: 0,
        line: args.line.saturating_sub(1),
        column: args.column,
        caret_language: args.caret_language.clone(),
        ignore_lexer: args.ignore_lexer,
    };

    let engine = match &args.data_dir {
        Some(dir) => CompletionEngine::with_data_dir(config, dir),
        None => CompletionEngine::new(config),
    };

    let Some(result) = engine.complete(&request) else {
        info!("No completions");
        return Ok(ExitCode::FAILURE);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in result.lines() {
            println!("{}", line);
        }
    }

    Ok(ExitCode::SUCCESS)
}
