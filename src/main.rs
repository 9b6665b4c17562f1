mod commands;
mod core;
mod graph;
mod ui;
mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::context::RepoContext;
use crate::core::error::{RippleError, print_error};

/// Trace pull-request impact through source import graphs
#[derive(Parser)]
#[command(name = "ripple")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct RippleCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show which files are affected by changes between two git refs
  Impact {
    /// Base ref to compare against (default: auto-detected from origin)
    #[arg(long)]
    base: Option<String>,
    /// Head ref to analyze (default: current branch)
    #[arg(long)]
    head: Option<String>,
    /// Maximum reverse-dependency depth to crawl
    #[arg(long)]
    max_depth: Option<usize>,
    /// Skip the reverse-dependency crawl (forward edges only)
    #[arg(long)]
    no_reverse_deps: bool,
    /// Output format: text (default), json, names-only
    #[arg(long, default_value = "text")]
    format: String,
  },

  /// Write an impact graph document for CI annotation or visualization
  Graph {
    /// Base ref to compare against (default: auto-detected from origin)
    #[arg(long)]
    base: Option<String>,
    /// Head ref to analyze (default: current branch)
    #[arg(long)]
    head: Option<String>,
    /// Maximum reverse-dependency depth to crawl
    #[arg(long)]
    max_depth: Option<usize>,
    /// Skip the reverse-dependency crawl (forward edges only)
    #[arg(long)]
    no_reverse_deps: bool,
    /// Write the document to this path instead of the output directory
    #[arg(long)]
    output: Option<PathBuf>,
    /// Also write a Mermaid diagram next to the JSON document
    #[arg(long)]
    mermaid: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = RippleCli::parse();

  let start_dir = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  // Build the repository context once; every command needs the git root
  let ctx = match RepoContext::build(&start_dir) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Impact {
      base,
      head,
      max_depth,
      no_reverse_deps,
      format,
    } => commands::run_impact(&ctx, base, head, max_depth, no_reverse_deps, format),
    Commands::Graph {
      base,
      head,
      max_depth,
      no_reverse_deps,
      output,
      mermaid,
    } => commands::run_graph(&ctx, base, head, max_depth, no_reverse_deps, output, mermaid),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RippleError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
