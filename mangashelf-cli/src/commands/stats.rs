//! Stats command implementation

use super::ViewArgs;
use anyhow::Result;
use mangashelf_core::progress::SelectionGroups;
use mangashelf_core::{visible_mangas, LibrarySnapshot};

/// Count the bulk-action groups of the visible mangas
pub fn stats(library: &LibrarySnapshot, view: &ViewArgs, json: bool) -> Result<()> {
    let options = view.to_options()?;
    let result = visible_mangas(
        &library.mangas,
        view.query.as_deref(),
        &options,
        view.ignore_filters,
    );
    let counts = SelectionGroups::from_mangas(result.visible.iter().copied()).counts();

    if json {
        let output = serde_json::json!({
            "total": library.len(),
            "visible": result.visible.len(),
            "downloadable": counts.downloadable,
            "downloaded": counts.downloaded,
            "unread": counts.unread,
            "read": counts.read,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Mangas:       {} of {}", result.visible.len(), library.len());
        println!("Unread:       {}", counts.unread);
        println!("Read:         {}", counts.read);
        println!("Downloadable: {}", counts.downloadable);
        println!("Downloaded:   {}", counts.downloaded);
    }

    Ok(())
}
