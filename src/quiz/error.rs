use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("insufficient tracks: need at least 3, got {available}")]
    InsufficientTracks { available: usize },

    #[error("no albums selected")]
    EmptySelection,

    #[error("question count {requested} exceeds the maximum of {max}")]
    TooManyQuestions { requested: usize, max: usize },

    #[error("question {question_number} is inconsistent: {reason}")]
    InvalidQuestion { question_number: u32, reason: String },

    #[error("question {question_number} is not complete yet")]
    QuestionNotComplete { question_number: u32 },

    #[error("track slot {slot} does not exist")]
    InvalidSlot { slot: usize },

    #[error("quiz is already finished")]
    QuizFinished,
}
