//! `cifra process` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use pulldown_cmark::{Options, Parser};

use cifra_config::Config;
use cifra_dom::{Node, parse_fragment, serialize_fragment};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the process command.
#[derive(Args)]
pub(crate) struct ProcessArgs {
    /// Input document. Markdown (`.md`) is rendered to HTML first; any
    /// other file is parsed as an HTML fragment.
    input: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover cifra.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ProcessArgs {
    /// Execute the process command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or parsed, or the
    /// output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref());

        let source = std::fs::read_to_string(&self.input)?;
        let html = if self.input.extension().is_some_and(|ext| ext == "md") {
            render_markdown(&source)
        } else {
            source
        };

        let mut root = Node::Element(parse_fragment(&html)?);
        cifra_highlight::process(&mut root, &config);

        let rendered = match &root {
            Node::Element(el) => serialize_fragment(el),
            Node::Text(text) => text.clone(),
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }

        Ok(())
    }
}

/// Render markdown to HTML with GFM extensions enabled.
fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;
    let parser = Parser::new_ext(markdown, options);

    let mut html = String::with_capacity(markdown.len() * 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}
