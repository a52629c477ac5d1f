// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use mdpad::utils::logging::{format_document_row, format_error, format_info, format_success};
use mdpad::{
    Config, DocumentRepository, EditorSession, FileStore, HtmlExporter, JsonExporter,
    MarkdownExporter, MarkdownRenderer, Validator, ViewMode,
};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "mdpad")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Multi-document markdown editor with live preview and print-ready export", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved documents, most recently updated first
    List,

    /// Print a saved document with its heading outline
    Show { id: String },

    /// Save a new document
    Create {
        #[arg(short, long)]
        title: String,

        /// Read the body from this file
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    Rename { id: String, title: String },

    Delete { id: String },

    /// Export one document for printing (html) or as raw markdown
    Export {
        id: String,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Html)]
        format: ExportFormat,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write every saved document to a JSON backup
    Backup {
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,
    },

    /// Interactive editing session on stdin with a live html preview file
    Session {
        #[arg(long, default_value = "preview.html")]
        preview_out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Html,
    Md,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    mdpad::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::List => cmd_list(&config)?,
        Commands::Show { id } => cmd_show(&config, &id)?,
        Commands::Create { title, file } => cmd_create(&config, &title, file.as_deref())?,
        Commands::Rename { id, title } => cmd_rename(&config, &id, &title)?,
        Commands::Delete { id } => cmd_delete(&config, &id)?,
        Commands::Export { id, format, output } => {
            cmd_export(&config, &id, format, output.as_deref())?
        }
        Commands::Backup { output, pretty } => cmd_backup(&config, output.as_deref(), pretty)?,
        Commands::Session { preview_out } => cmd_session(&config, &preview_out).await?,
    }

    Ok(())
}

fn open_repository(config: &Config) -> Result<DocumentRepository<FileStore>> {
    let store = FileStore::open(config.storage.path.clone()).with_context(|| {
        format!(
            "Failed to open document store at {}",
            config.storage.path.display()
        )
    })?;

    Ok(DocumentRepository::new(store, config.storage.keys()))
}

fn cmd_list(config: &Config) -> Result<()> {
    let repo = open_repository(config)?;
    let documents = repo.list_documents();

    if documents.is_empty() {
        println!("{}", format_info("No saved documents"));
        return Ok(());
    }

    for doc in &documents {
        println!("{}", format_document_row(doc));
    }

    Ok(())
}

fn cmd_show(config: &Config, id: &str) -> Result<()> {
    let repo = open_repository(config)?;
    let doc = repo
        .find_document(id)
        .with_context(|| format!("No saved document with id {}", id))?;

    println!("{}", format_document_row(&doc));

    let outline = MarkdownRenderer::from_config(&config.preview).outline(&doc.content);
    for entry in &outline {
        let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
        println!("{}- {}", indent, entry.text);
    }

    println!("\n{}", doc.content);
    Ok(())
}

fn cmd_create(config: &Config, title: &str, file: Option<&Path>) -> Result<()> {
    let title = Validator::title(title)?;
    let content = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => String::new(),
    };

    let mut repo = open_repository(config)?;
    repo.update_title(title);
    let doc = repo.update_content(content);

    println!("{}", format_success(&format!("Created {}", doc.id)));
    Ok(())
}

fn cmd_rename(config: &Config, id: &str, title: &str) -> Result<()> {
    let title = Validator::title(title)?;
    let mut repo = open_repository(config)?;

    if repo.find_document(id).is_none() {
        println!("{}", format_error(&format!("No saved document with id {}", id)));
        return Ok(());
    }

    repo.rename_document(id, &title);
    println!("{}", format_success(&format!("Renamed {} to {}", id, title)));
    Ok(())
}

fn cmd_delete(config: &Config, id: &str) -> Result<()> {
    let mut repo = open_repository(config)?;

    if repo.find_document(id).is_none() {
        println!("{}", format_error(&format!("No saved document with id {}", id)));
        return Ok(());
    }

    repo.delete_document(id);
    println!("{}", format_success(&format!("Deleted {}", id)));
    Ok(())
}

fn cmd_export(
    config: &Config,
    id: &str,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let repo = open_repository(config)?;
    let doc = repo
        .find_document(id)
        .with_context(|| format!("No saved document with id {}", id))?;

    let path = match format {
        ExportFormat::Html => HtmlExporter::from_config(config, output)?.export(&doc)?,
        ExportFormat::Md => {
            let dir = output.unwrap_or(config.export.output_dir.as_path());
            MarkdownExporter::new(dir)?.export(&doc)?
        }
    };

    println!("{}", format_success(&format!("Wrote {}", path.display())));
    if matches!(format, ExportFormat::Html) {
        println!(
            "{}",
            format_info("Open it in a browser and print to save as PDF")
        );
    }
    Ok(())
}

fn cmd_backup(config: &Config, output: Option<&Path>, pretty: bool) -> Result<()> {
    let repo = open_repository(config)?;
    let dir = output.unwrap_or(config.export.output_dir.as_path());

    let manifest = JsonExporter::new(dir)?.export_all(repo.list_documents(), pretty)?;
    println!(
        "{}",
        format_success(&format!(
            "Backed up {} documents to {}",
            manifest.total_documents,
            dir.join(JsonExporter::FILE_NAME).display()
        ))
    );
    Ok(())
}

async fn cmd_session(config: &Config, preview_out: &Path) -> Result<()> {
    let store = FileStore::open(config.storage.path.clone())
        .context("Failed to open document store")?;
    let mut session = EditorSession::from_config(store, config);

    let page_dir = preview_out.parent().unwrap_or(Path::new("."));
    let pages = HtmlExporter::from_config(config, Some(page_dir))?;

    println!(
        "{}",
        format_info("Type markdown lines; commands: :new :title :open :rename :delete :list :view :export :quit")
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                if !handle_session_line(&mut session, &line, config)? {
                    break;
                }
            }
            Some(html) = session.next_preview() => {
                let page = pages.wrap_page(session.current().display_title(), &html);
                tokio::fs::write(preview_out, page)
                    .await
                    .with_context(|| format!("Failed to write {}", preview_out.display()))?;
            }
        }
    }

    let title = session.current().display_title().to_string();
    if let Some(html) = session.close().await {
        tokio::fs::write(preview_out, pages.wrap_page(&title, &html))
            .await
            .with_context(|| format!("Failed to write {}", preview_out.display()))?;
    }

    Ok(())
}

/// Returns false when the session should end.
fn handle_session_line(
    session: &mut EditorSession<FileStore>,
    line: &str,
    config: &Config,
) -> Result<bool> {
    let Some(command) = line.strip_prefix(':') else {
        session.append_line(line);
        return Ok(true);
    };

    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    let rest = rest.trim();

    match name {
        "quit" | "q" => return Ok(false),
        "new" => {
            let id = session.new_document().id.clone();
            println!("{}", format_info(&format!("New document {}", id)));
        }
        "title" => {
            let doc = session.set_title(rest);
            if doc.is_persistable() {
                println!("{}", format_success(&format!("Saved as {}", doc.display_title())));
            }
        }
        "open" => match session.open_document(rest) {
            Ok(doc) => println!("{}", format_success(&format!("Opened {}", doc.display_title()))),
            Err(e) => println!("{}", format_error(&e.to_string())),
        },
        "rename" => {
            let (id, title) = rest.split_once(' ').unwrap_or((rest, ""));
            match session.rename_document(id, title) {
                Ok(()) => println!("{}", format_success(&format!("Renamed {}", id))),
                Err(e) => println!("{}", format_error(&e.to_string())),
            }
        }
        "delete" => {
            let id = if rest.is_empty() {
                session.current().id.clone()
            } else {
                rest.to_string()
            };
            session.delete_document(&id);
            println!("{}", format_success(&format!("Deleted {}", id)));
        }
        "list" => {
            for doc in session.list_documents() {
                println!("{}", format_document_row(&doc));
            }
        }
        "view" => {
            let mode = if rest.is_empty() {
                session.cycle_view()
            } else {
                match rest.parse::<ViewMode>() {
                    Ok(mode) => {
                        session.set_view(mode);
                        mode
                    }
                    Err(e) => {
                        println!("{}", format_error(&e.to_string()));
                        return Ok(true);
                    }
                }
            };
            println!("{}", format_info(&format!("View: {}", mode)));
        }
        "export" => {
            let dir = if rest.is_empty() {
                config.export.output_dir.as_path()
            } else {
                Path::new(rest)
            };
            let path = HtmlExporter::from_config(config, Some(dir))?.export(session.current())?;
            println!("{}", format_success(&format!("Wrote {}", path.display())));
        }
        other => println!("{}", format_error(&format!("Unknown command :{}", other))),
    }

    Ok(true)
}
