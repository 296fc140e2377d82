//! Picks where each excerpt starts.
//!
//! With a known duration the window is drawn around the middle of the track,
//! which keeps intros and fade-outs out of the quiz. Without one, a plausible
//! verse region early in the track is used instead.

use log::trace;

use super::random::RandomSource;
use crate::domain::catalog::Track;

/// Earliest start offered when the track length is unknown
pub const FALLBACK_MIN_START: u32 = 90;
/// Latest start offered when the track length is unknown
pub const FALLBACK_MAX_START: u32 = 150;
/// Assumed length of a track whose duration is unknown
pub const FALLBACK_TRACK_LENGTH: u32 = 180;

/// Start offset in seconds for playing `excerpt_seconds` of `track`
pub fn start_time<R>(track: &Track, excerpt_seconds: u32, rng: &mut R) -> u32
where
    R: RandomSource + ?Sized,
{
    match track.duration_seconds() {
        Some(duration) => midpoint_start_time(duration, excerpt_seconds, rng),
        None => fallback_start_time(excerpt_seconds, rng),
    }
}

/// Start offset drawn from `mid ± duration / 4`, never running past the end
pub fn midpoint_start_time<R>(duration: u32, excerpt_seconds: u32, rng: &mut R) -> u32
where
    R: RandomSource + ?Sized,
{
    if duration <= excerpt_seconds {
        return 0;
    }

    let latest = duration - excerpt_seconds;
    let mid = duration / 2;
    let spread = duration / 4;
    let lo = mid.saturating_sub(spread);
    let hi = latest.min(mid + spread);

    if lo >= hi {
        trace!("window collapsed for {duration}s track, starting at {latest}");
        return latest;
    }
    rng.pick_inclusive(lo, hi)
}

/// Start offset for a track of unknown length
pub fn fallback_start_time<R>(excerpt_seconds: u32, rng: &mut R) -> u32
where
    R: RandomSource + ?Sized,
{
    let hi = FALLBACK_MAX_START.min(FALLBACK_TRACK_LENGTH.saturating_sub(excerpt_seconds));
    if hi <= FALLBACK_MIN_START {
        return FALLBACK_MIN_START;
    }
    rng.pick_inclusive(FALLBACK_MIN_START, hi)
}
