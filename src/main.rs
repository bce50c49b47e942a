//! memodown - render notes written with the memodown markdown extensions.
//!
//! # Usage
//!
//! ```bash
//! memodown notes.md
//! memodown --theme dark -o notes.html notes.md
//! memodown --tokens notes.md
//! cat notes.md | memodown -
//! ```

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use memodown::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use memodown::document::Renderer;

/// Render memodown notes to HTML
#[derive(Parser, Debug)]
#[command(name = "memodown", version, about, long_about = None)]
struct Cli {
    /// Markdown file to render, or `-` for stdin
    #[arg(value_name = "FILE", required_unless_present_any = ["save", "clear"])]
    file: Option<PathBuf>,

    /// Write HTML here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Keep single newlines as soft breaks instead of <br />
    #[arg(long)]
    no_breaks: bool,

    /// Disable GitHub extensions (tables, strikethrough, autolinks, task lists)
    #[arg(long)]
    no_gfm: bool,

    /// Pass raw HTML in notes through to the output
    #[arg(long)]
    raw_html: bool,

    /// Leave fenced code blocks unhighlighted
    #[arg(long)]
    no_highlight: bool,

    /// Highlight palette for a light or dark page
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Print the extension tokens as JSON instead of HTML
    #[arg(long)]
    tokens: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write stdout")
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
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
        tracing::info!(path = %global_path.display(), "saved defaults");
    }

    let Some(file) = cli.file else {
        return Ok(());
    };

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let source = read_source(&file)?;
    let renderer = Renderer::new(effective.to_render_options());
    tracing::debug!(file = %file.display(), options = ?renderer.options(), "rendering");

    let output = if cli.tokens {
        let mut json = serde_json::to_string_pretty(&renderer.tokens(&source))
            .context("Failed to serialize tokens")?;
        json.push('\n');
        json
    } else {
        renderer.render(&source)
    };

    write_output(cli.output.as_deref(), &output)
}
