use serde::{Deserialize, Serialize};

use super::{catalog::Track, question::QuizQuestion};

const WATCH_MARKER: &str = "youtube.com/watch?v=";
const SHORT_MARKER: &str = "youtu.be/";

/// Extracts the video id from a `youtube.com/watch?v=` or `youtu.be/` url
pub fn youtube_video_id(url: &str) -> Option<String> {
    let rest = [WATCH_MARKER, SHORT_MARKER].iter().find_map(|marker| {
        url.find(marker).map(|pos| &url[pos + marker.len()..])
    })?;

    let id: String = rest
        .chars()
        .take_while(|c| !matches!(c, '&' | '?' | '#' | '\n'))
        .collect();

    if id.is_empty() { None } else { Some(id) }
}

/// What the player needs to start one track of a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackCue {
    pub track_id: String,
    pub media_url: String,
    pub video_id: Option<String>,
    pub start_seconds: u32,
    pub duration_seconds: u32,
}

impl PlaybackCue {
    pub fn new(track: &Track, start_seconds: u32, duration_seconds: u32) -> Self {
        Self {
            track_id: track.id.clone(),
            media_url: track.youtube_url.clone(),
            video_id: youtube_video_id(&track.youtube_url),
            start_seconds,
            duration_seconds,
        }
    }

    /// One cue per slot, in slot order
    pub fn for_question(question: &QuizQuestion, duration_seconds: u32) -> [PlaybackCue; 3] {
        std::array::from_fn(|slot| {
            PlaybackCue::new(
                &question.tracks[slot],
                question.start_times[slot],
                duration_seconds,
            )
        })
    }
}
