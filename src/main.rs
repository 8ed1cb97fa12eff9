//! abcedit - view ABC notation with highlighting and a host-driven selection

use std::io;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::Instant;

use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use abcedit::render::Renderer;
use abcedit::terminal::Terminal;
use abcedit::{AbcLexer, Config, Document, EditorProps, EditorView, HostListener, Result, SelectionRequest, Synchronizer};

#[derive(Parser, Debug)]
#[command(name = "abcedit", version, about = "Highlight ABC notation and apply a selection")]
struct Cli {
    /// ABC file to open (stdin when omitted)
    file: Option<PathBuf>,

    /// Select FROM:TO (char offsets) as a host would
    #[arg(long, value_parser = parse_range, allow_hyphen_values = true)]
    select: Option<SelectionRequest>,

    /// Viewport height in lines
    #[arg(long)]
    height: Option<usize>,

    /// Disable colors
    #[arg(long)]
    no_color: bool,

    /// Show line numbers
    #[arg(long)]
    line_numbers: bool,

    /// Open read-only
    #[arg(long)]
    read_only: bool,

    /// Print tokens instead of the highlighted view
    #[arg(long)]
    tokens: bool,

    /// Config file (default ~/.abcedit.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Host that reports editor notifications to the log
struct LogHost {
    name: String,
}

impl HostListener for LogHost {
    fn on_change(&mut self, text: &str) {
        info!("{}: content changed ({} chars)", self.name, text.chars().count());
    }

    fn on_selection_change(&mut self, from: usize, to: usize) {
        info!("{}: selection {}..{}", self.name, from, to);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::load(),
    };
    if let Some(height) = cli.height {
        config.height = height.max(1);
    }
    if cli.line_numbers {
        config.show_line_numbers = true;
    }

    let (text, name) = match &cli.file {
        Some(path) => (
            std::fs::read_to_string(path)?,
            path.file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "unnamed".to_string()),
        ),
        None => (io::read_to_string(io::stdin())?, "*stdin*".to_string()),
    };

    if cli.tokens {
        for line in token_lines(&text) {
            println!("{}", line);
        }
        return Ok(());
    }

    let view = EditorView::new(text.as_str(), config.height);
    let host = LogHost { name: name.clone() };
    let mut sync = Synchronizer::new(view, host, config.sync_options());

    sync.reconcile(&EditorProps {
        value: text,
        selected_range: cli.select,
        disabled: cli.read_only,
    });

    if sync.has_pending_focus() {
        thread::sleep(config.focus_delay);
        sync.poll_deferred(Instant::now());
    }

    let mut renderer = Renderer::new(config.theme.clone(), config.show_line_numbers, config.highlight);
    let mut terminal = Terminal::stdout(!cli.no_color);
    renderer.render(&mut terminal, sync.handle(), &name)?;

    sync.destroy();
    Ok(())
}

/// One line per token, offsets in chars so they can be fed to `--select`
fn token_lines(text: &str) -> Vec<String> {
    let lexer = AbcLexer::new();
    let doc = Document::new(text);
    lexer
        .tokens(text)
        .map(|token| {
            format!(
                "{:<10} {}..{} {:?}",
                token.tag.name(),
                token.start,
                token.end,
                doc.slice(token.start, token.end).unwrap_or_default()
            )
        })
        .collect()
}

/// Parse `FROM:TO` into a selection request
fn parse_range(s: &str) -> std::result::Result<SelectionRequest, String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got {}", s))?;
    let from = from.trim().parse::<i64>().map_err(|e| format!("bad FROM: {}", e))?;
    let to = to.trim().parse::<i64>().map_err(|e| format!("bad TO: {}", e))?;
    Ok(SelectionRequest::new(from, to))
}
