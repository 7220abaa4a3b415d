// Load, normalize, and publish the processed career dataset.

use crate::config::Config;
use crate::loader;
use anyhow::Context;
use careerline_core::navigator::{nav_entries, NavEntry, Navigator};
use careerline_core::normalize::{self, ProcessedDataset};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Document consumed by the rendering layer.
#[derive(Debug, Serialize)]
pub struct Output<'a> {
    pub dataset: &'a ProcessedDataset,
    pub nav: Vec<NavEntry>,
}

/// Counts reported after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub hitters: usize,
    pub pitchers: usize,
    pub nav_entries: usize,
    /// File written, or `None` when the output went to stdout.
    pub output: Option<PathBuf>,
}

/// Load both record files (paths relative to `base_dir`) and normalize them.
pub fn build_dataset(config: &Config, base_dir: &Path) -> anyhow::Result<ProcessedDataset> {
    let pitchers_path = base_dir.join(&config.data.pitchers);
    let hitters_path = base_dir.join(&config.data.hitters);

    let pitchers = loader::load_records(&pitchers_path)
        .with_context(|| format!("failed to load pitchers from {}", pitchers_path.display()))?;
    let hitters = loader::load_records(&hitters_path)
        .with_context(|| format!("failed to load hitters from {}", hitters_path.display()))?;
    info!(
        "Loaded {} pitcher rows, {} hitter rows",
        pitchers.len(),
        hitters.len()
    );

    let dataset = normalize::process(pitchers, hitters, &config.normalize)
        .context("failed to normalize career data")?;
    Ok(dataset)
}

/// Serialize the dataset and its navigation entries as pretty JSON.
pub fn write_output<W: Write>(dataset: &ProcessedDataset, writer: W) -> anyhow::Result<usize> {
    let output = Output {
        dataset,
        nav: nav_entries(dataset),
    };
    serde_json::to_writer_pretty(writer, &output).context("failed to serialize output")?;
    Ok(output.nav.len())
}

/// Full run: load, normalize, check the navigation ids, write the output.
pub fn run(config: &Config, base_dir: &Path) -> anyhow::Result<Summary> {
    let dataset = build_dataset(config, base_dir)?;

    let navigator = Navigator::for_dataset(&dataset, &config.navigator.nav_id, config.navigator.settings());
    check_unique_ids(navigator.sections())?;

    let (nav_entries, output) = match &config.output.path {
        Some(path) => {
            let path = base_dir.join(path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let file = std::fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let count = write_output(&dataset, std::io::BufWriter::new(file))?;
            info!("Wrote processed dataset to {}", path.display());
            (count, Some(path))
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            let count = write_output(&dataset, &mut lock)?;
            writeln!(lock).context("failed to write to stdout")?;
            (count, None)
        }
    };

    Ok(Summary {
        hitters: dataset.hitters().len(),
        pitchers: dataset.pitchers().len(),
        nav_entries,
        output,
    })
}

/// Two players whose names map to the same id would share a page section.
fn check_unique_ids(ids: &[String]) -> anyhow::Result<()> {
    for (i, id) in ids.iter().enumerate() {
        if ids[..i].contains(id) {
            anyhow::bail!("duplicate player section id `{id}`");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_are_rejected() {
        let ids = vec!["Cy_Young".to_string(), "Babe_Ruth".into(), "Cy_Young".into()];
        assert!(check_unique_ids(&ids).is_err());
        assert!(check_unique_ids(&ids[..2]).is_ok());
    }
}
