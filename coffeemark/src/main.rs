use std::{
  fs,
  io::{Read as _, Write as _},
  path::{Path, PathBuf},
};

use coffeemark_render::{Renderer, StyleOverrides, load_style_overrides};
use color_eyre::eyre::{Context, Result};
use log::{LevelFilter, debug, info};
use rayon::prelude::*;
use walkdir::WalkDir;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  let overrides = match &cli.styles {
    Some(path) => load_style_overrides(path).wrap_err_with(|| {
      format!("Failed to load style overrides from {}", path.display())
    })?,
    None => StyleOverrides::default(),
  };
  let renderer = Renderer::new(overrides);

  match &cli.command {
    Commands::Render { input, output } => {
      render_one(&renderer, input.as_deref(), output.as_deref())
    },
    Commands::RenderDir {
      input_dir,
      output_dir,
      jobs,
    } => render_dir(&renderer, input_dir, output_dir, *jobs),
  }
}

/// Render a single document from a file or stdin.
fn render_one(
  renderer: &Renderer,
  input: Option<&Path>,
  output: Option<&Path>,
) -> Result<()> {
  let markdown = match input {
    Some(path) if path != Path::new("-") => fs::read_to_string(path)
      .wrap_err_with(|| format!("Failed to read {}", path.display()))?,
    _ => {
      let mut buffer = String::new();
      std::io::stdin()
        .read_to_string(&mut buffer)
        .wrap_err("Failed to read markdown from stdin")?;
      buffer
    },
  };

  let html = renderer.render(&markdown);

  match output {
    Some(path) => {
      if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
          fs::create_dir_all(parent).wrap_err_with(|| {
            format!("Failed to create directory: {}", parent.display())
          })?;
        }
      }
      fs::write(path, &html)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
      info!("Wrote {}", path.display());
    },
    None => {
      let mut stdout = std::io::stdout().lock();
      stdout
        .write_all(html.as_bytes())
        .and_then(|()| stdout.write_all(b"\n"))
        .wrap_err("Failed to write HTML to stdout")?;
    },
  }
  Ok(())
}

/// Render every `.md` file under `input_dir` into `output_dir`, in parallel,
/// preserving the relative directory layout.
fn render_dir(
  renderer: &Renderer,
  input_dir: &Path,
  output_dir: &Path,
  jobs: Option<usize>,
) -> Result<()> {
  // Setup thread pool once for all parallel operations
  if let Some(jobs) = jobs {
    rayon::ThreadPoolBuilder::new()
      .num_threads(jobs)
      .build_global()?;
  }

  let files: Vec<PathBuf> = WalkDir::new(input_dir)
    .into_iter()
    .filter_map(std::result::Result::ok)
    .filter(|entry| {
      entry.file_type().is_file()
        && entry
          .path()
          .extension()
          .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
    })
    .map(walkdir::DirEntry::into_path)
    .collect();

  info!(
    "Rendering {} markdown files from {}",
    files.len(),
    input_dir.display()
  );

  files.par_iter().try_for_each(|path| -> Result<()> {
    let relative = path.strip_prefix(input_dir).unwrap_or(path);
    let target = output_dir.join(relative).with_extension("html");
    if let Some(parent) = target.parent() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
    }

    let markdown = fs::read_to_string(path)
      .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let html = renderer.render(&markdown);
    fs::write(&target, html)
      .wrap_err_with(|| format!("Failed to write {}", target.display()))?;

    debug!("Rendered {} -> {}", path.display(), target.display());
    Ok(())
  })?;

  info!(
    "Rendered {} files into {}",
    files.len(),
    output_dir.display()
  );
  Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Fine in tests")]
mod tests {
  use super::*;

  #[test]
  fn render_one_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("post.md");
    let target = dir.path().join("out/post.html");
    fs::write(&input, "hello **world**").unwrap();

    let renderer = Renderer::default();
    render_one(&renderer, Some(&input), Some(&target)).unwrap();

    let html = fs::read_to_string(&target).unwrap();
    assert!(html.contains("<b style="));
  }

  #[test]
  fn render_dir_mirrors_the_tree() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::create_dir_all(input.path().join("nested")).unwrap();
    fs::write(input.path().join("a.md"), "# A").unwrap();
    fs::write(input.path().join("nested/b.md"), "**b**").unwrap();
    fs::write(input.path().join("notes.txt"), "not markdown").unwrap();

    let renderer = Renderer::default();
    render_dir(&renderer, input.path(), output.path(), None).unwrap();

    let a = fs::read_to_string(output.path().join("a.html")).unwrap();
    assert!(a.contains("<h1"));
    let b = fs::read_to_string(output.path().join("nested/b.html")).unwrap();
    assert!(b.contains("<b style="));
    assert!(!output.path().join("notes.html").exists());
  }
}
