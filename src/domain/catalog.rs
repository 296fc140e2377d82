use std::{collections::HashSet, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A playable track as listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub youtube_url: String,
    /// total length in seconds as listed; zero or negative means unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Track {
    /// Listed length floored to whole seconds, `None` when unknown or `<= 0`
    pub fn duration_seconds(&self) -> Option<u32> {
        self.duration
            .filter(|d| *d > 0.0)
            .map(|d| d.floor() as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub name: String,
    pub jacket_url: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub albums: Vec<Album>,
}

/// Root of the artist -> album -> track tree. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub artists: Vec<Artist>,
}

/// An album together with the artist that owns it
#[derive(Debug, Clone, Copy)]
pub struct AlbumEntry<'a> {
    pub artist: &'a Artist,
    pub album: &'a Album,
}

impl Catalog {
    pub fn load(path: &Path) -> anyhow::Result<Catalog> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.to_string_lossy()))?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Catalog> {
        serde_json::from_str(json).with_context(|| "Failed to parse catalog JSON")
    }

    /// All albums in catalog order (artist order, then album order)
    pub fn albums(&self) -> impl Iterator<Item = AlbumEntry<'_>> {
        self.artists.iter().flat_map(|artist| {
            artist
                .albums
                .iter()
                .map(move |album| AlbumEntry { artist, album })
        })
    }

    /// Albums whose ids are in `selected_ids`, in catalog order.
    /// Unknown ids are ignored.
    pub fn selected_albums<S: AsRef<str>>(&self, selected_ids: &[S]) -> Vec<&Album> {
        let selected: HashSet<&str> = selected_ids.iter().map(|id| id.as_ref()).collect();
        self.albums()
            .filter(|entry| selected.contains(entry.album.id.as_str()))
            .map(|entry| entry.album)
            .collect()
    }

    /// Every track of the selected albums, concatenated in catalog order.
    ///
    /// An empty selection gives an empty list; callers must not start a quiz
    /// from it.
    pub fn tracks_for_albums<S: AsRef<str>>(&self, selected_ids: &[S]) -> Vec<Track> {
        self.selected_albums(selected_ids)
            .into_iter()
            .flat_map(|album| album.tracks.iter().cloned())
            .collect()
    }

    pub fn find_track(&self, track_id: &str) -> Option<&Track> {
        self.albums()
            .flat_map(|entry| entry.album.tracks.iter())
            .find(|track| track.id == track_id)
    }
}
