//! The persisted library: manga records plus their chapter lists

use super::{Chapter, Manga};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of the user's library
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LibrarySnapshot {
    /// Manga records in library order
    #[serde(default)]
    pub mangas: Vec<Manga>,

    /// Chapter lists keyed by manga id
    #[serde(default)]
    pub chapters: BTreeMap<i64, Vec<Chapter>>,
}

impl LibrarySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a library document.
    ///
    /// Accepts a full snapshot object, or a bare array of mangas as exported
    /// from the server's manga query.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        if json.trim_start().starts_with('[') {
            let mangas: Vec<Manga> = serde_json::from_str(json)?;
            return Ok(Self {
                mangas,
                chapters: BTreeMap::new(),
            });
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn get(&self, id: i64) -> Option<&Manga> {
        self.mangas.iter().find(|m| m.id == id)
    }

    /// Insert a manga, replacing any record with the same id in place.
    ///
    /// Returns the replaced record.
    pub fn upsert(&mut self, manga: Manga) -> Option<Manga> {
        match self.mangas.iter_mut().find(|m| m.id == manga.id) {
            Some(slot) => Some(std::mem::replace(slot, manga)),
            None => {
                self.mangas.push(manga);
                None
            }
        }
    }

    /// Remove a manga and its chapter list
    pub fn remove(&mut self, id: i64) -> Option<Manga> {
        let index = self.mangas.iter().position(|m| m.id == id)?;
        self.chapters.remove(&id);
        Some(self.mangas.remove(index))
    }

    pub fn chapters_of(&self, id: i64) -> &[Chapter] {
        self.chapters.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.mangas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mangas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_keeps_position() {
        let mut library = LibrarySnapshot::new();
        library.upsert(Manga::new(1, "First"));
        library.upsert(Manga::new(2, "Second"));

        let replaced = library.upsert(Manga::new(1, "First, revised"));
        assert_eq!(replaced.unwrap().title, "First");
        assert_eq!(library.mangas[0].title, "First, revised");
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_from_json_accepts_both_layouts() {
        let snapshot = LibrarySnapshot::from_json(
            r#"{"mangas": [{"id": 1, "title": "A"}], "chapters": {"1": []}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.chapters.contains_key(&1));

        let bare = LibrarySnapshot::from_json(r#"[{"id": 2, "title": "B"}]"#).unwrap();
        assert_eq!(bare.get(2).unwrap().title, "B");

        assert!(LibrarySnapshot::from_json("42").is_err());
    }

    #[test]
    fn test_remove_drops_chapters() {
        let mut library = LibrarySnapshot::new();
        library.upsert(Manga::new(1, "Gone"));
        library
            .chapters
            .insert(1, vec![Chapter::new(10, 1, "Chapter 1")]);

        assert!(library.remove(1).is_some());
        assert!(library.chapters_of(1).is_empty());
        assert!(library.remove(1).is_none());
    }
}
