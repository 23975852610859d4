//! Library management handlers

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use mangashelf_core::chapters::visible_chapters;
use mangashelf_core::progress::{DownloadProgress, ReadProgress, SelectionCounts, SelectionGroups};
use mangashelf_core::types::parse_tracker_overrides;
use mangashelf_core::{
    visible_mangas, Chapter, ChapterListOptions, ChapterSortMode, FilterError, LibraryOptions,
    LibrarySortMode, Manga, MangaStatus, StatusFilter, TriState,
};
use serde::{Deserialize, Serialize};

/// Query parameters for listing mangas.
///
/// Filter parameters that are not given fall back to the persisted library options.
#[derive(Debug, Default, Deserialize)]
pub struct ListMangasQuery {
    /// Free-text search
    pub query: Option<String>,

    pub unread: Option<String>,
    pub read: Option<String>,
    pub bookmarked: Option<String>,
    pub downloaded: Option<String>,
    pub duplicates: Option<String>,

    /// Status constraints, e.g. `ONGOING:true,COMPLETED:false`
    pub status: Option<String>,

    /// Tracker constraints, e.g. `1:true`
    pub tracker: Option<String>,

    pub sort: Option<String>,
    pub desc: Option<bool>,

    /// Bypass filters while searching
    pub ignore_filters: Option<bool>,

    /// Page number (1-indexed, 0 treated as 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    20
}

/// Sanitize page number (treat 0 as 1 to prevent underflow)
fn sanitize_page(page: u32) -> u32 {
    page.max(1)
}

fn override_flag(slot: &mut TriState, value: Option<&str>) -> Result<(), FilterError> {
    if let Some(value) = value {
        *slot = value.parse()?;
    }
    Ok(())
}

impl ListMangasQuery {
    /// Layer the request parameters over the persisted options
    pub fn apply(&self, mut options: LibraryOptions) -> Result<LibraryOptions, FilterError> {
        override_flag(&mut options.has_unread_chapters, self.unread.as_deref())?;
        override_flag(&mut options.has_read_chapters, self.read.as_deref())?;
        override_flag(&mut options.has_bookmarked_chapters, self.bookmarked.as_deref())?;
        override_flag(&mut options.has_downloaded_chapters, self.downloaded.as_deref())?;
        override_flag(&mut options.has_duplicate_chapters, self.duplicates.as_deref())?;

        if let Some(ref status) = self.status {
            options.has_status = StatusFilter::parse_overrides(status)?;
        }
        if let Some(ref tracker) = self.tracker {
            options.has_tracker_binding = parse_tracker_overrides(tracker)?;
        }
        if let Some(ref sort) = self.sort {
            options.sort_by = LibrarySortMode::parse_lenient(sort);
        }
        if let Some(desc) = self.desc {
            options.sort_desc = desc;
        }
        Ok(options)
    }
}

/// Manga summary for list response
#[derive(Debug, Serialize)]
pub struct MangaSummary {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub status: MangaStatus,
    pub unread_count: Option<i64>,
    pub total_chapters: Option<i64>,
    pub read_progress: Option<ReadProgress>,
}

impl From<&Manga> for MangaSummary {
    fn from(manga: &Manga) -> Self {
        Self {
            id: manga.id,
            title: manga.title.clone(),
            author: manga.author.clone(),
            status: manga.status,
            unread_count: manga.unread_count,
            total_chapters: manga.total_chapters,
            read_progress: ReadProgress::of(manga),
        }
    }
}

/// List response with pagination
#[derive(Debug, Serialize)]
pub struct ListMangasResponse {
    pub mangas: Vec<MangaSummary>,
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
    pub show_filtered_out_message: bool,
    pub filter_key: String,
}

/// List the visible part of the library
pub async fn list_mangas(
    State(state): State<AppState>,
    Query(query): Query<ListMangasQuery>,
) -> Result<Json<ListMangasResponse>, (StatusCode, String)> {
    let (options, default_ignore) = {
        let settings = state.settings.read().await;
        (settings.library_options.clone(), settings.ignore_filters)
    };
    let options = query
        .apply(options)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let ignore_filters = query.ignore_filters.unwrap_or(default_ignore);

    let library = state.library.read().await;
    let view = visible_mangas(
        &library.mangas,
        query.query.as_deref(),
        &options,
        ignore_filters,
    );

    let total = view.visible.len() as u32;

    // Paginate (sanitize page to prevent underflow)
    let page = sanitize_page(query.page);
    let start = (page - 1).saturating_mul(query.per_page) as usize;
    let mangas: Vec<MangaSummary> = view
        .visible
        .iter()
        .skip(start)
        .take(query.per_page as usize)
        .map(|m| MangaSummary::from(*m))
        .collect();

    Ok(Json(ListMangasResponse {
        mangas,
        total,
        page,
        per_page: query.per_page,
        show_filtered_out_message: view.show_filtered_out_message,
        filter_key: view.filter_key,
    }))
}

/// Manga detail response
#[derive(Debug, Serialize)]
pub struct MangaResponse {
    #[serde(flatten)]
    pub manga: Manga,
    pub read_progress: Option<ReadProgress>,
    pub download_progress: Option<DownloadProgress>,
    pub stored_chapters: usize,
}

/// Get a single manga
pub async fn get_manga(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MangaResponse>, StatusCode> {
    let library = state.library.read().await;
    let manga = library.get(id).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(MangaResponse {
        manga: manga.clone(),
        read_progress: ReadProgress::of(manga),
        download_progress: DownloadProgress::of(manga),
        stored_chapters: library.chapters_of(id).len(),
    }))
}

/// Upsert response
#[derive(Debug, Serialize)]
pub struct UpsertResponse {
    pub id: i64,
    pub title: String,
    pub replaced: bool,
}

/// Add a manga to the library, replacing a record with the same id
pub async fn upsert_manga(
    State(state): State<AppState>,
    Json(manga): Json<Manga>,
) -> Result<(StatusCode, Json<UpsertResponse>), (StatusCode, String)> {
    let id = manga.id;
    let title = manga.title.clone();

    let mut library = state.library.write().await;
    let previous = library.upsert(manga);

    if let Err(e) = state.save_library(&library).await {
        // Restore the previous record on failure
        match previous {
            Some(old) => {
                library.upsert(old);
            }
            None => {
                library.remove(id);
            }
        }
        tracing::error!("Failed to save library after upsert: {}", e);
        return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
    }
    drop(library);

    let replaced = previous.is_some();
    tracing::info!(id, replaced, "Stored manga");

    state.broadcast(ServerEvent::MangaAdded {
        id,
        title: title.clone(),
    });

    let status = if replaced {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(UpsertResponse { id, title, replaced })))
}

/// Delete a manga and its chapters
pub async fn delete_manga(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    // Remove from library
    let mut library = state.library.write().await;
    if library.get(id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    let chapters = library.chapters.remove(&id);
    let manga = library.remove(id).ok_or(StatusCode::NOT_FOUND)?;

    // If save fails, restore the entry for consistency
    if let Err(e) = state.save_library(&library).await {
        library.upsert(manga);
        if let Some(chapters) = chapters {
            library.chapters.insert(id, chapters);
        }
        tracing::error!("Failed to save library after delete: {}", e);
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    drop(library);

    state.broadcast(ServerEvent::MangaRemoved { id });

    Ok(StatusCode::NO_CONTENT)
}

/// Query parameters for a chapter list.
///
/// Parameters that are not given fall back to the persisted chapter options.
#[derive(Debug, Default, Deserialize)]
pub struct ChapterListQuery {
    pub unread: Option<String>,
    pub downloaded: Option<String>,
    pub bookmarked: Option<String>,
    pub sort: Option<String>,
    pub reverse: Option<bool>,
}

impl ChapterListQuery {
    pub fn apply(&self, mut options: ChapterListOptions) -> Result<ChapterListOptions, FilterError> {
        override_flag(&mut options.unread, self.unread.as_deref())?;
        override_flag(&mut options.downloaded, self.downloaded.as_deref())?;
        override_flag(&mut options.bookmarked, self.bookmarked.as_deref())?;
        if let Some(ref sort) = self.sort {
            options.sort_by = ChapterSortMode::parse_lenient(sort).unwrap_or_default();
        }
        if let Some(reverse) = self.reverse {
            options.reverse = reverse;
        }
        Ok(options)
    }
}

/// Chapter list response
#[derive(Debug, Serialize)]
pub struct ChapterListResponse {
    pub manga_id: i64,
    pub chapters: Vec<Chapter>,
    pub total: usize,
}

/// List the visible chapters of a manga
pub async fn list_chapters(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ChapterListQuery>,
) -> Result<Json<ChapterListResponse>, (StatusCode, String)> {
    let options = {
        let settings = state.settings.read().await;
        settings.chapter_options.clone()
    };
    let options = query
        .apply(options)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let library = state.library.read().await;
    if library.get(id).is_none() {
        return Err((StatusCode::NOT_FOUND, format!("Manga {} not found", id)));
    }

    let all = library.chapters_of(id);
    let chapters: Vec<Chapter> = visible_chapters(all, &options)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ChapterListResponse {
        manga_id: id,
        total: all.len(),
        chapters,
    }))
}

/// Replace the chapter list of a manga
pub async fn replace_chapters(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(chapters): Json<Vec<Chapter>>,
) -> Result<StatusCode, (StatusCode, String)> {
    if let Some(stray) = chapters.iter().find(|c| c.manga_id != id) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Chapter {} belongs to manga {}", stray.id, stray.manga_id),
        ));
    }
    let count = chapters.len();

    let mut library = state.library.write().await;
    if library.get(id).is_none() {
        return Err((StatusCode::NOT_FOUND, format!("Manga {} not found", id)));
    }
    let previous = library.chapters.insert(id, chapters);

    if let Err(e) = state.save_library(&library).await {
        match previous {
            Some(old) => {
                library.chapters.insert(id, old);
            }
            None => {
                library.chapters.remove(&id);
            }
        }
        tracing::error!("Failed to save library after chapter update: {}", e);
        return Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
    }
    drop(library);

    state.broadcast(ServerEvent::ChaptersUpdated { id, count });

    Ok(StatusCode::NO_CONTENT)
}

/// Bulk-action counts of the current view
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: usize,
    pub visible: usize,
    #[serde(flatten)]
    pub groups: SelectionCounts,
}

/// Count the bulk-action groups of the visible mangas
pub async fn library_stats(
    State(state): State<AppState>,
    Query(query): Query<ListMangasQuery>,
) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    let (options, default_ignore) = {
        let settings = state.settings.read().await;
        (settings.library_options.clone(), settings.ignore_filters)
    };
    let options = query
        .apply(options)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let library = state.library.read().await;
    let view = visible_mangas(
        &library.mangas,
        query.query.as_deref(),
        &options,
        query.ignore_filters.unwrap_or(default_ignore),
    );
    let groups = SelectionGroups::from_mangas(view.visible.iter().copied());

    Ok(Json(StatsResponse {
        total: library.len(),
        visible: view.visible.len(),
        groups: groups.counts(),
    }))
}
