//! Formtext - plain-text previews of documents with embedded form fields.
//!
//! # Usage
//!
//! ```bash
//! formtext form.json5
//! formtext form.json5 --values answers.json
//! formtext form.json5 --values answers.json --output form --comments
//! formtext --watch form.json5 --values answers.json
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use formtext::config::{
    ConfigFlags, OutputMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use formtext::dispatch::DispatchTable;
use formtext::document::Document;
use formtext::render::{RenderOptions, render_to_string};
use formtext::serialize::serialize_with_store;
use formtext::store::{FieldStore, ValueSnapshot};
use formtext::watcher::FileWatcher;

/// Render documents with embedded form fields as plain text
#[derive(Parser, Debug)]
#[command(name = "formtext", version, about, long_about = None)]
struct Cli {
    /// Document file (JSON, or JSON5 with a .json5 extension)
    #[arg(value_name = "FILE")]
    document: PathBuf,

    /// Field values file: a JSON object of field name to value
    #[arg(long, value_name = "FILE")]
    values: Option<PathBuf>,

    /// What to print
    #[arg(short, long, value_enum)]
    output: Option<OutputMode>,

    /// Hide document text in the form preview, keeping only the fields
    #[arg(long)]
    hide_text: bool,

    /// Preview in editing mode: fields are disabled and show placeholders
    #[arg(long)]
    edit: bool,

    /// Show comment buttons in the form preview
    #[arg(long)]
    comments: bool,

    /// Watch the document and values files and re-render on change
    #[arg(short, long)]
    watch: bool,

    /// Save current command-line flags as defaults in the global config
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in the global config
    #[arg(long)]
    clear: bool,
}

/// One document plus the value store it is rendered against.
struct Session {
    document_path: PathBuf,
    flags: ConfigFlags,
    store: FieldStore,
}

impl Session {
    fn new(document_path: PathBuf, flags: ConfigFlags) -> Self {
        let mut store = FieldStore::new();
        store.subscribe(|change| {
            tracing::info!(
                field = %change.name,
                version = change.version,
                "field value changed"
            );
        });
        Self {
            document_path,
            flags,
            store,
        }
    }

    fn watched_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.document_path.clone()];
        paths.extend(self.flags.values.clone());
        paths
    }

    /// Reload both files and produce the configured output.
    fn pass(&mut self) -> Result<String> {
        let document = Document::load(&self.document_path).with_context(|| {
            format!("Failed to load document {}", self.document_path.display())
        })?;
        if let Some(path) = &self.flags.values {
            let snapshot = ValueSnapshot::load(path)
                .with_context(|| format!("Failed to load values {}", path.display()))?;
            self.store.replace(snapshot);
        }
        self.output(&document)
    }

    fn output(&self, document: &Document) -> Result<String> {
        let text = match self.flags.output.unwrap_or(OutputMode::Plain) {
            OutputMode::Plain => serialize_with_store(document, &self.store),
            OutputMode::Form => {
                let options = RenderOptions {
                    hide_text: self.flags.hide_text,
                    read_only: !self.flags.edit,
                    comments: self.flags.comments,
                };
                let snapshot = self.store.snapshot();
                render_to_string(document, &*snapshot, &DispatchTable::default(), options)
            }
            OutputMode::Content => document.to_json_pretty()?,
            OutputMode::Values => serde_json::to_string_pretty(&*self.store.snapshot())?,
        };
        Ok(text)
    }
}

fn watch(session: &mut Session) -> Result<()> {
    let paths = session.watched_paths();
    let mut watcher =
        FileWatcher::new(&paths, Duration::from_millis(200)).context("Failed to watch files")?;
    loop {
        std::thread::sleep(Duration::from_millis(250));
        if !watcher.take_change_ready() {
            continue;
        }
        match session.pass() {
            Ok(text) => println!("\n{text}"),
            Err(err) => eprintln!("[error] {err:#}"),
        }
    }
}

fn ensure_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("{what} not found: {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::debug!(?effective, "effective flags");

    ensure_exists(&cli.document, "Document")?;
    if let Some(values) = &effective.values {
        ensure_exists(values, "Values file")?;
    }

    let watching = effective.watch;
    let mut session = Session::new(cli.document, effective);
    let text = session.pass()?;
    println!("{text}");

    if watching {
        watch(&mut session).context("Watch error")?;
    }
    Ok(())
}
