//! Tern Browser CLI
//!
//! Fetches one resource and prints it to the terminal.

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use tern_browser::dom::DomTree;
use tern_browser::{Browser, LoadedDocument, PageContent};
use tern_html::{extract_text, print_tree};
use tern_net::FetchConfig;
use tern_net::config::USER_AGENT;
use tracing_subscriber::EnvFilter;

/// Tern: fetch a resource and show its document tree or text
#[derive(Parser, Debug)]
#[command(name = "tern")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the document tree of a page
    tern http://example.org/

    # Print only the text of a local file
    tern --text ./index.html

    # Show the source instead of parsing it
    tern view-source:https://example.org/

    # Dump the tree as JSON
    tern --json 'data:text/html,<h1>Test</h1>'
"#)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Resource to load: http(s) URL, file path, file:// or data: identifier
    #[arg(value_name = "IDENTIFIER", default_value = "http://example.org")]
    identifier: String,

    /// Value of the User-Agent request header
    #[arg(long, value_name = "STRING", default_value = USER_AGENT)]
    user_agent: String,

    /// Print the indented document tree (default for HTML)
    #[arg(long, group = "mode")]
    tree: bool,

    /// Print the text with all tags removed
    #[arg(long, group = "mode")]
    text: bool,

    /// Print the document tree as JSON
    #[arg(long, group = "mode")]
    json: bool,

    /// Print the raw token stream
    #[arg(long, group = "mode")]
    tokens: bool,

    /// Log fetch and parse details to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// What to print for the loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Tree,
    Text,
    Json,
    Tokens,
}

impl Cli {
    const fn mode(&self) -> OutputMode {
        match (self.tree, self.text, self.json, self.tokens) {
            (false, true, _, _) => OutputMode::Text,
            (false, false, true, _) => OutputMode::Json,
            (false, false, false, true) => OutputMode::Tokens,
            _ => OutputMode::Tree,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mode = cli.mode();
    tracing::debug!(identifier = %cli.identifier, ?mode, "loading");

    let mut browser = Browser::new(FetchConfig::default().with_user_agent(cli.user_agent.clone()));
    let doc = browser
        .load(&cli.identifier)
        .with_context(|| format!("could not load {}", cli.identifier))?;

    print_summary(&doc);

    match mode {
        OutputMode::Tokens => {
            let _ = require_html(&doc)?;
            for token in &doc.tokens {
                println!("{token}");
            }
        }
        OutputMode::Text => print_text(&doc),
        OutputMode::Json => {
            let dom = require_html(&doc)?;
            println!("{}", dom.to_json().context("could not serialize the tree")?);
        }
        OutputMode::Tree => match &doc.content {
            PageContent::Document(dom) => print_tree(dom, dom.root(), 0),
            PageContent::Text(text) => println!("{text}"),
        },
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// One status line on stderr so stdout carries only the document.
fn print_summary(doc: &LoadedDocument) {
    let origin = if doc.served_from_cache {
        "cache".green().to_string()
    } else {
        "network".cyan().to_string()
    };
    eprintln!(
        "{} {} [{origin}]",
        doc.final_identifier.bold(),
        doc.content_type.dimmed()
    );
}

/// The parsed tree, or an error naming the content type it was not.
fn require_html(doc: &LoadedDocument) -> Result<&DomTree> {
    let Some(dom) = doc.dom() else {
        bail!(
            "{} is not an HTML document ({})",
            doc.final_identifier,
            doc.content_type
        );
    };
    Ok(dom)
}

fn print_text(doc: &LoadedDocument) {
    match &doc.content {
        PageContent::Document(_) => println!("{}", extract_text(&doc.tokens)),
        PageContent::Text(text) => println!("{text}"),
    }
}
