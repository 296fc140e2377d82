use serde::{Deserialize, Serialize};

use super::catalog::Track;
use crate::quiz::error::QuizError;

/// Number of tracks played together in one question
pub const TRACKS_PER_QUESTION: usize = 3;

/// One quiz question: three tracks played at once, and what the player
/// has identified so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// 1-based position in the sequence
    pub question_number: u32,
    pub tracks: [Track; TRACKS_PER_QUESTION],
    /// excerpt start offset in seconds, `start_times[i]` belongs to `tracks[i]`
    pub start_times: [u32; TRACKS_PER_QUESTION],
    /// ids of correctly identified tracks, in the order they were guessed
    pub correct_answers: Vec<String>,
    pub is_answer_revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    AlreadyAnswered,
}

/// Result of a guess: the outcome and the question after applying it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guess {
    pub outcome: GuessOutcome,
    pub question: QuizQuestion,
}

impl QuizQuestion {
    pub fn new(
        question_number: u32,
        tracks: [Track; TRACKS_PER_QUESTION],
        start_times: [u32; TRACKS_PER_QUESTION],
    ) -> Self {
        Self {
            question_number,
            tracks,
            start_times,
            correct_answers: Vec::new(),
            is_answer_revealed: false,
        }
    }

    pub fn contains_track(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == track_id)
    }

    pub fn is_identified(&self, track_id: &str) -> bool {
        self.correct_answers.iter().any(|id| id == track_id)
    }

    /// All three tracks identified, or the answer was revealed
    pub fn is_complete(&self) -> bool {
        self.correct_answers.len() == TRACKS_PER_QUESTION || self.is_answer_revealed
    }

    /// Checks a question received from outside: three distinct tracks, and
    /// answers that are unique ids of those tracks.
    pub fn validate(&self) -> Result<(), QuizError> {
        let invalid = |reason: String| QuizError::InvalidQuestion {
            question_number: self.question_number,
            reason,
        };

        for (i, track) in self.tracks.iter().enumerate() {
            if self.tracks[..i].iter().any(|t| t.id == track.id) {
                return Err(invalid(format!("track {} appears twice", track.id)));
            }
        }
        if self.correct_answers.len() > TRACKS_PER_QUESTION {
            return Err(invalid(format!(
                "{} answers for {TRACKS_PER_QUESTION} tracks",
                self.correct_answers.len()
            )));
        }
        for (i, answer) in self.correct_answers.iter().enumerate() {
            if !self.contains_track(answer) {
                return Err(invalid(format!("answer {answer} is not one of its tracks")));
            }
            if self.correct_answers[..i].contains(answer) {
                return Err(invalid(format!("answer {answer} is counted twice")));
            }
        }
        Ok(())
    }

    /// Applies a guess without touching `self`.
    pub fn submit_guess(&self, guessed_track_id: &str) -> Guess {
        let outcome = if !self.contains_track(guessed_track_id) {
            GuessOutcome::Incorrect
        } else if self.is_identified(guessed_track_id) {
            GuessOutcome::AlreadyAnswered
        } else {
            GuessOutcome::Correct
        };

        let mut question = self.clone();
        if outcome == GuessOutcome::Correct {
            question.correct_answers.push(guessed_track_id.to_string());
        }

        Guess { outcome, question }
    }

    /// Idempotent
    pub fn reveal_answer(&self) -> QuizQuestion {
        QuizQuestion {
            is_answer_revealed: true,
            ..self.clone()
        }
    }
}
