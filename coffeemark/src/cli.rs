use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for coffeemark
#[derive(Parser, Debug)]
#[command(author, version, about = "CoffeeMarkdown: markdown for storytellers")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a JSON file with style overrides. Keys are element kinds
  /// (h1, p, blockquote, ...); values replace the built-in inline styles.
  #[arg(short = 's', long = "styles", global = true)]
  pub styles: Option<PathBuf>,
}

/// All supported subcommands for the coffeemark CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render a single markdown document to HTML.
  Render {
    /// Input markdown file. Reads stdin when omitted or given as `-`.
    input: Option<PathBuf>,

    /// Output HTML file. Writes stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Render every markdown file under a directory tree, mirroring the
  /// layout into the output directory.
  RenderDir {
    /// Directory containing markdown files.
    input_dir: PathBuf,

    /// Output directory for the generated HTML files.
    output_dir: PathBuf,

    /// Number of threads to use for parallel rendering.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
