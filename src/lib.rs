// Library interface for unscramble
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod picker;
pub mod session;
pub mod tui;
pub mod vocabulary;

// Re-export commonly used items for easier testing
pub use error::GameError;
pub use game_state::{GameInterface, UserAction, game_loop};
pub use picker::{PickedWord, WordPicker};
pub use session::{
    GameConfig, GameSession, MAX_NO_OF_WORDS, Phase, RoundState, SCORE_INCREASE, StateStream,
};
pub use vocabulary::{
    EMBEDDED_VOCABULARY, Vocabulary, load_vocabulary_from_file, load_vocabulary_from_str,
};
