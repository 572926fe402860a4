pub mod list;
pub mod serve;

use activities_core::seed::{default_seed, load_seed};
use activities_core::Directory;
use anyhow::{Context, Result};
use std::path::Path;

/// Build the directory from `seed` if given, otherwise from the built-in catalogue.
pub fn load_directory(seed: Option<&Path>) -> Result<Directory> {
    let entries = match seed {
        Some(path) => load_seed(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?,
        None => default_seed(),
    };
    let directory = Directory::from_seed(entries)?;
    tracing::debug!("loaded {} activities", directory.len());
    Ok(directory)
}
