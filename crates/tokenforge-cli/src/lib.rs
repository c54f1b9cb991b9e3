//! Library interface for the tokenforge CLI.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use tokenforge_core::{generate, Baseline, GenerateOptions};

/// How the previous generation should be located, as selected on the
/// command line.
#[derive(Debug, Clone, Default)]
pub enum BaselineArg {
    /// Read the last committed version of the output file via git.
    /// Falls back to [`Baseline::Disabled`] when there is no output path.
    #[default]
    GitHead,
    /// Read a snapshot file.
    File(PathBuf),
    /// Treat every token as new.
    Disabled,
}

impl BaselineArg {
    fn resolve(&self, output: Option<&Path>) -> Baseline {
        match self {
            BaselineArg::File(path) => Baseline::File(path.clone()),
            BaselineArg::Disabled => Baseline::Disabled,
            BaselineArg::GitHead => match output {
                Some(path) => Baseline::GitHead {
                    repo: PathBuf::from("."),
                    path: path.to_string_lossy().into_owned(),
                },
                None => Baseline::Disabled,
            },
        }
    }
}

/// Run the generate pipeline and write (or print) the unified document.
///
/// The document is fully assembled in memory before the output file is
/// touched, so a failing run never leaves a partial `tokens.json` behind.
pub fn handle_generate(
    root: PathBuf,
    output: Option<PathBuf>,
    baseline: BaselineArg,
) -> Result<()> {
    let options = GenerateOptions::new(&root).with_baseline(baseline.resolve(output.as_deref()));

    let document = generate(&options)
        .with_context(|| format!("Failed to generate tokens from {:?}", root))?;

    let mut json = document.to_json_pretty()?;
    json.push('\n');

    match &output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write output: {:?}", path))?;
            info!(
                "Generated {} collections into {:?}",
                document.collections.len(),
                path
            );
        }
        None => print!("{}", json),
    }

    Ok(())
}
