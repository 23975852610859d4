//! Publication status and the per-status filter map

use super::TriState;
use crate::error::FilterError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Publication status reported by the source.
///
/// Deserialization is lenient: `null` and unrecognised names become `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MangaStatus {
    Cancelled,
    Completed,
    Licensed,
    Ongoing,
    OnHiatus,
    PublishingFinished,
    #[default]
    Unknown,
}

impl MangaStatus {
    /// Every status, in declaration order
    pub const ALL: [MangaStatus; 7] = [
        MangaStatus::Cancelled,
        MangaStatus::Completed,
        MangaStatus::Licensed,
        MangaStatus::Ongoing,
        MangaStatus::OnHiatus,
        MangaStatus::PublishingFinished,
        MangaStatus::Unknown,
    ];

    /// Wire name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            MangaStatus::Cancelled => "CANCELLED",
            MangaStatus::Completed => "COMPLETED",
            MangaStatus::Licensed => "LICENSED",
            MangaStatus::Ongoing => "ONGOING",
            MangaStatus::OnHiatus => "ON_HIATUS",
            MangaStatus::PublishingFinished => "PUBLISHING_FINISHED",
            MangaStatus::Unknown => "UNKNOWN",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for MangaStatus {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', ' '], "_").to_ascii_uppercase();
        MangaStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| FilterError::InvalidStatus(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for MangaStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(name) = Option::<String>::deserialize(deserializer)? else {
            return Ok(MangaStatus::Unknown);
        };
        Ok(name.parse().unwrap_or_else(|_| {
            tracing::debug!(status = %name, "Treating unrecognised manga status as unknown");
            MangaStatus::Unknown
        }))
    }
}

impl fmt::Display for MangaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state toggle for every publication status.
///
/// Backed by a fixed array indexed by [`MangaStatus`], so a filter always
/// covers the whole enumeration. Deserializing from a map requires an entry
/// for every status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusFilter {
    states: [TriState; MangaStatus::ALL.len()],
}

impl StatusFilter {
    /// A filter with every status unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from explicit entries, requiring every status to be present
    pub fn from_entries(
        entries: impl IntoIterator<Item = (MangaStatus, TriState)>,
    ) -> Result<Self, FilterError> {
        let entries: BTreeMap<MangaStatus, TriState> = entries.into_iter().collect();
        let mut filter = Self::new();
        for status in MangaStatus::ALL {
            let state = entries
                .get(&status)
                .copied()
                .ok_or(FilterError::MissingStatus(status))?;
            filter.set(status, state);
        }
        Ok(filter)
    }

    /// Set a single status entry
    pub fn with(mut self, status: MangaStatus, state: TriState) -> Self {
        self.set(status, state);
        self
    }

    pub fn set(&mut self, status: MangaStatus, state: TriState) {
        self.states[status.index()] = state;
    }

    pub fn get(&self, status: MangaStatus) -> TriState {
        self.states[status.index()]
    }

    /// Iterate over `(status, state)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (MangaStatus, TriState)> + '_ {
        MangaStatus::ALL.into_iter().map(|status| (status, self.get(status)))
    }

    /// Whether any status entry constrains the result
    pub fn is_active(&self) -> bool {
        self.states.iter().any(|state| state.is_set())
    }

    /// Parse `ONGOING:true,COMPLETED:false` into a filter; unlisted statuses stay unset
    pub fn parse_overrides(s: &str) -> Result<Self, FilterError> {
        let mut filter = Self::new();
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (status, state) = pair
                .split_once([':', '='])
                .ok_or_else(|| FilterError::InvalidStatus(pair.to_string()))?;
            filter.set(status.parse()?, state.parse()?);
        }
        Ok(filter)
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Keys are parsed strictly; a typo must not silently become `UNKNOWN`
        let entries = BTreeMap::<String, TriState>::deserialize(deserializer)?
            .into_iter()
            .map(|(name, state)| Ok((name.parse::<MangaStatus>()?, state)))
            .collect::<Result<Vec<_>, FilterError>>()
            .map_err(serde::de::Error::custom)?;
        StatusFilter::from_entries(entries).map_err(serde::de::Error::custom)
    }
}
