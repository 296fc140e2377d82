use serde::{Deserialize, Serialize};

use crate::domain::question::{QuizQuestion, TRACKS_PER_QUESTION};

/// Where the player is in the sequence, ready for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total_questions: usize,
    /// questions strictly before the current one
    pub completed_questions: usize,
    /// 1-based
    pub current_question: usize,
    pub progress_percentage: u32,
    pub is_last_question: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalScore {
    pub total_correct: usize,
    pub total_possible: usize,
    pub percentage: u32,
    /// questions with all three tracks identified
    pub perfect_questions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    KeepTrying,
}

fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}

pub fn progress(questions: &[QuizQuestion], current_index: usize) -> Progress {
    let total_questions = questions.len();
    Progress {
        total_questions,
        completed_questions: current_index,
        current_question: current_index + 1,
        progress_percentage: rounded_percentage(current_index, total_questions),
        is_last_question: current_index + 1 == total_questions,
    }
}

pub fn final_score(questions: &[QuizQuestion]) -> FinalScore {
    let total_correct = questions.iter().map(|q| q.correct_answers.len()).sum();
    let total_possible = TRACKS_PER_QUESTION * questions.len();
    FinalScore {
        total_correct,
        total_possible,
        percentage: rounded_percentage(total_correct, total_possible),
        perfect_questions: questions
            .iter()
            .filter(|q| q.correct_answers.len() == TRACKS_PER_QUESTION)
            .count(),
    }
}

impl FinalScore {
    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage)
    }
}

impl Grade {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Grade::Excellent,
            70..=89 => Grade::Good,
            50..=69 => Grade::Fair,
            _ => Grade::KeepTrying,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::Excellent => "Outstanding result!",
            Grade::Good => "Well done!",
            Grade::Fair => "Not bad, keep at it!",
            Grade::KeepTrying => "Keep listening and try again!",
        }
    }
}
