//! CLI command implementations

mod chapters;
mod info;
mod list;
mod stats;
mod validate;

pub use chapters::{chapters, ChapterArgs};
pub use info::info;
pub use list::{list, ViewArgs};
pub use stats::stats;
pub use validate::validate;

use anyhow::{Context, Result};
use mangashelf_core::{LibrarySnapshot, TriState};

/// Read and parse a library file
pub async fn load_library(path: &str) -> Result<LibrarySnapshot> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to open library file: {}", path))?;

    let library = LibrarySnapshot::from_json(&data)
        .with_context(|| format!("Failed to parse library file: {}", path))?;

    tracing::debug!(path, mangas = library.len(), "Loaded library");
    Ok(library)
}

/// Parse a tri-state flag value (true, false or unset)
fn parse_tri_state(s: &str) -> Result<TriState, String> {
    s.parse().map_err(|e: mangashelf_core::FilterError| e.to_string())
}

/// Render an optional count for table output
fn count(value: Option<i64>) -> String {
    value.map_or_else(|| "?".to_string(), |n| n.to_string())
}
