use std::collections::HashSet;

use log::debug;
use serde::Deserialize;

use super::{
    error::QuizError, random::RandomSource, sampler::sample_without_replacement,
    start_time::start_time,
};
use crate::domain::{
    catalog::Track,
    question::{QuizQuestion, TRACKS_PER_QUESTION},
};

/// Upper bound on questions generated for one session
pub const MAX_QUESTION_COUNT: usize = 100;

/// Tunables for one quiz session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    pub question_count: usize,
    /// seconds of each track played per question
    pub excerpt_seconds: u32,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: 5,
            excerpt_seconds: 5,
        }
    }
}

/// Builds the question sequence for a session.
///
/// Tracks are not reused until fewer than three unused ones remain; then the
/// whole pool becomes available again. That reset is global, so a track can
/// come back in the question right after it.
pub fn generate_questions<R>(
    tracks: &[Track],
    settings: &QuizSettings,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError>
where
    R: RandomSource + ?Sized,
{
    if settings.question_count > MAX_QUESTION_COUNT {
        return Err(QuizError::TooManyQuestions {
            requested: settings.question_count,
            max: MAX_QUESTION_COUNT,
        });
    }
    if tracks.len() < TRACKS_PER_QUESTION {
        return Err(QuizError::InsufficientTracks {
            available: tracks.len(),
        });
    }
    debug!(
        "generating {} questions from {} tracks",
        settings.question_count,
        tracks.len()
    );

    let (questions, _used) = (1..=settings.question_count).try_fold(
        (Vec::new(), HashSet::new()),
        |(mut questions, mut used), number| {
            let question = next_question(tracks, &mut used, number as u32, settings, rng)?;
            questions.push(question);
            Ok::<_, QuizError>((questions, used))
        },
    )?;

    Ok(questions)
}

fn next_question<'a, R>(
    tracks: &'a [Track],
    used: &mut HashSet<&'a str>,
    question_number: u32,
    settings: &QuizSettings,
    rng: &mut R,
) -> Result<QuizQuestion, QuizError>
where
    R: RandomSource + ?Sized,
{
    let mut available: Vec<&Track> = tracks
        .iter()
        .filter(|t| !used.contains(t.id.as_str()))
        .collect();

    if available.len() < TRACKS_PER_QUESTION {
        debug!(
            "question {question_number}: only {} unused tracks left, resetting pool",
            available.len()
        );
        used.clear();
        available = tracks.iter().collect();
    }

    let picked: [&Track; TRACKS_PER_QUESTION] =
        sample_without_replacement(&available, TRACKS_PER_QUESTION, rng)
            .try_into()
            .map_err(|_| QuizError::InsufficientTracks {
                available: available.len(),
            })?;

    used.extend(picked.iter().map(|t| t.id.as_str()));

    let start_times = picked.map(|t| start_time(t, settings.excerpt_seconds, rng));
    Ok(QuizQuestion::new(
        question_number,
        picked.map(Track::clone),
        start_times,
    ))
}
