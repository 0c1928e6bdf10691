//! # cargo-e-msg
//!
//! Reads rustc/cargo JSON diagnostics from files or stdin and prints one
//! location-anchored message per span.
//!
//! ## Quick Start
//! ```sh
//! cargo check --message-format=json | cargo-e-msg
//! cargo-e-msg --format json build.json
//! ```

use cargo_e_msg::e_cli::{Cli, OutputFormat};
use cargo_e_msg::e_collect::collect_messages;
use cargo_e_msg::e_flatten::retrieve_all_display_messages;
use cargo_e_msg::e_message::SubMessage;
use cargo_e_msg::e_render::{render_json, render_plain, use_color};
use cargo_e_msg::e_severity::SeverityCounts;
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("CLI options: {:?}", cli);

    let colorful = use_color(cli.color);
    let collected = collect_messages(cli.input_paths(), cli.jobs);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failed = false;

    for item in collected {
        let name = item.input.display().to_string();
        let messages = match item.messages {
            Ok(messages) => messages,
            Err(e) => {
                failed = true;
                eprintln!("error: {:#}", e);
                continue;
            }
        };

        let deepest = messages
            .iter()
            .flat_map(|msg| &msg.spans)
            .map(SubMessage::nested_depth)
            .max()
            .unwrap_or(0);
        tracing::debug!("{}: deepest macro chain {}", name, deepest);

        if cli.tree {
            writeln!(out, "{}", serde_json::to_string_pretty(&messages)?)?;
            continue;
        }

        let mut counts = SeverityCounts::default();
        for msg in retrieve_all_display_messages(&messages) {
            counts.add(msg.severity);
            match cli.format {
                OutputFormat::Plain => writeln!(out, "{}", render_plain(&msg, colorful))?,
                OutputFormat::Json => writeln!(out, "{}", render_json(&msg)?)?,
            }
        }
        eprintln!(
            "{}: {} diagnostic(s), {}",
            name,
            messages.len(),
            counts
        );
    }
    out.flush()?;
    drop(out);

    if failed && !cli.skip_invalid {
        exit(1);
    }
    Ok(())
}
