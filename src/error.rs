use thiserror::Error;

/// Errors raised by the vocabulary, the word picker and the game session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("every word in the vocabulary has already been used")]
    ExhaustedVocabulary,

    #[error("cannot {command} after the game is over")]
    InvalidStateTransition { command: &'static str },

    #[error("{rounds} rounds need at least {rounds} words, but the vocabulary has {size}")]
    VocabularyTooSmall { rounds: u32, size: usize },

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),

    #[error("vocabulary contains no usable words")]
    EmptyVocabulary,

    #[error("'{0}' needs at least two distinct letters to be scrambled")]
    UnscramblableWord(String),

    #[error("'{0}' is not a word of letters only")]
    InvalidWord(String),
}
