//! Corpus loading

use std::path::Path;

use tracing::debug;

use itbot_core::{Error, Result};

/// Read the whole corpus file as UTF-8 text.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), chars = text.chars().count(), "corpus loaded");
    Ok(text)
}
