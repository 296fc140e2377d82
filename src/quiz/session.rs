use log::{debug, info};

use super::{
    error::QuizError,
    generator::{QuizSettings, generate_questions},
    random::RandomSource,
    score::{FinalScore, Progress, final_score, progress},
};
use crate::domain::{
    catalog::{Album, Catalog},
    media::PlaybackCue,
    question::{Guess, GuessOutcome, QuizQuestion, TRACKS_PER_QUESTION},
    selection::AlbumSelection,
};

/// What happened when the player moved on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    Next(Progress),
    Finished(FinalScore),
}

/// Owns the question sequence of one game and applies player actions to it.
pub struct QuizSession<'c> {
    catalog: &'c Catalog,
    selection: AlbumSelection,
    settings: QuizSettings,
    questions: Vec<QuizQuestion>,
    current_index: usize,
    finished: bool,
}

impl<'c> QuizSession<'c> {
    pub fn start<R>(
        catalog: &'c Catalog,
        selection: AlbumSelection,
        settings: QuizSettings,
        rng: &mut R,
    ) -> Result<Self, QuizError>
    where
        R: RandomSource + ?Sized,
    {
        if selection.is_empty() {
            return Err(QuizError::EmptySelection);
        }

        let tracks = catalog.tracks_for_albums(selection.ids());
        let questions = generate_questions(&tracks, &settings, rng)?;
        info!(
            "quiz started: {} questions for {}",
            questions.len(),
            selection.to_query_param()
        );

        Ok(Self {
            catalog,
            selection,
            settings,
            questions,
            current_index: 0,
            finished: false,
        })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn progress(&self) -> Progress {
        progress(&self.questions, self.current_index)
    }

    pub fn final_score(&self) -> FinalScore {
        final_score(&self.questions)
    }

    /// Albums the player picks answers from
    pub fn answer_albums(&self) -> Vec<&'c Album> {
        self.catalog.selected_albums(self.selection.ids())
    }

    pub fn playback_cues(&self) -> Option<[PlaybackCue; TRACKS_PER_QUESTION]> {
        self.current()
            .map(|q| PlaybackCue::for_question(q, self.settings.excerpt_seconds))
    }

    fn current_mut(&mut self) -> Result<&mut QuizQuestion, QuizError> {
        if self.finished {
            return Err(QuizError::QuizFinished);
        }
        self.questions
            .get_mut(self.current_index)
            .ok_or(QuizError::QuizFinished)
    }

    pub fn submit_guess(&mut self, track_id: &str) -> Result<GuessOutcome, QuizError> {
        let question = self.current_mut()?;
        let Guess { outcome, question: updated } = question.submit_guess(track_id);
        debug!(
            "question {}: guess {track_id} -> {outcome:?}",
            updated.question_number
        );
        *question = updated;
        Ok(outcome)
    }

    /// Guess which track plays in `slot` (0-based)
    pub fn guess_slot(&mut self, slot: usize, track_id: &str) -> Result<GuessOutcome, QuizError> {
        let question = self.current_mut()?;
        let expected = question
            .tracks
            .get(slot)
            .ok_or(QuizError::InvalidSlot { slot })?;

        if expected.id != track_id {
            debug!(
                "question {}: slot {slot} guessed {track_id}, expected {}",
                question.question_number, expected.id
            );
            return Ok(GuessOutcome::Incorrect);
        }
        self.submit_guess(track_id)
    }

    pub fn reveal(&mut self) -> Result<&QuizQuestion, QuizError> {
        let question = self.current_mut()?;
        *question = question.reveal_answer();
        Ok(question)
    }

    pub fn can_advance(&self) -> bool {
        self.current().is_some_and(QuizQuestion::is_complete)
    }

    pub fn advance(&mut self) -> Result<Advanced, QuizError> {
        let question = self.current().ok_or(QuizError::QuizFinished)?;
        if !question.is_complete() {
            return Err(QuizError::QuestionNotComplete {
                question_number: question.question_number,
            });
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            return Ok(Advanced::Next(self.progress()));
        }

        self.finished = true;
        let score = self.final_score();
        info!(
            "quiz finished: {}/{} ({}%)",
            score.total_correct, score.total_possible, score.percentage
        );
        Ok(Advanced::Finished(score))
    }
}
