//! Game session: the round state machine and its published snapshots.
//!
//! # State Machine
//! - `Playing` → `Playing` on a correct guess or a skip while rounds remain
//! - `Playing` → `GameOver` when a round advance is requested on the last round
//! - any state → `Playing` on `reset`
//!
//! Every transition replaces the current [`RoundState`] with a new snapshot
//! and sends it to all live [`StateStream`] subscribers.

use crate::error::GameError;
use crate::picker::WordPicker;
use crate::vocabulary::Vocabulary;
use crate::{debug_log, info_log};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

pub const SCORE_INCREASE: u32 = 20;
pub const MAX_NO_OF_WORDS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Immutable snapshot of a session after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub current_scrambled_word: String,
    pub current_word_count: u32,
    pub score: u32,
    pub is_guessed_word_wrong: bool,
    pub is_game_over: bool,
}

impl RoundState {
    fn first_round(scrambled: String) -> Self {
        Self {
            current_scrambled_word: scrambled,
            current_word_count: 1,
            score: 0,
            is_guessed_word_wrong: false,
            is_game_over: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_game_over {
            Phase::GameOver
        } else {
            Phase::Playing
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub max_rounds: u32,
    pub score_increase: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_NO_OF_WORDS,
            score_increase: SCORE_INCREASE,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Every round needs its own word, so the vocabulary must cover them all.
    pub fn validate(&self, vocabulary: &Vocabulary) -> Result<(), GameError> {
        if self.max_rounds == 0 {
            return Err(GameError::InvalidConfig(
                "a game needs at least one round".to_string(),
            ));
        }
        if self.max_rounds.checked_mul(self.score_increase).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "a score increase of {} overflows over {} rounds",
                self.score_increase, self.max_rounds
            )));
        }
        if self.max_rounds as usize > vocabulary.len() {
            return Err(GameError::VocabularyTooSmall {
                rounds: self.max_rounds,
                size: vocabulary.len(),
            });
        }
        Ok(())
    }
}

/// Subscription to a session's snapshots.
///
/// Starts with the snapshot current at subscribe time, then yields each
/// later snapshot in order. Iteration never blocks: it ends once every
/// published snapshot has been read, and resumes after the next transition.
#[derive(Debug)]
pub struct StateStream {
    receiver: Receiver<RoundState>,
}

impl StateStream {
    /// Drains pending snapshots and returns the newest one.
    pub fn latest(&mut self) -> Option<RoundState> {
        self.by_ref().last()
    }
}

impl Iterator for StateStream {
    type Item = RoundState;

    fn next(&mut self) -> Option<RoundState> {
        self.receiver.try_recv().ok()
    }
}

pub struct GameSession<R: Rng = ChaCha8Rng> {
    vocabulary: Arc<Vocabulary>,
    config: GameConfig,
    picker: WordPicker<R>,
    used_words: HashSet<String>,
    current_word: String,
    user_guess: String,
    state: RoundState,
    subscribers: Vec<Sender<RoundState>>,
}

impl<R: Rng> GameSession<R> {
    /// Validates the configuration and starts the first round.
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        config: GameConfig,
        mut picker: WordPicker<R>,
    ) -> Result<Self, GameError> {
        config.validate(&vocabulary)?;
        let mut used_words = HashSet::new();
        let first = picker.pick_next(&vocabulary, &mut used_words)?;
        info_log!(
            "GameSession::new() - {} words, {} rounds",
            vocabulary.len(),
            config.max_rounds
        );

        Ok(Self {
            vocabulary,
            config,
            picker,
            used_words,
            current_word: first.word,
            user_guess: String::new(),
            state: RoundState::first_round(first.scrambled),
            subscribers: Vec::new(),
        })
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The unscrambled answer for the current round.
    #[must_use]
    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    #[must_use]
    pub fn used_words(&self) -> &HashSet<String> {
        &self.used_words
    }

    #[must_use]
    pub fn user_guess(&self) -> &str {
        &self.user_guess
    }

    pub fn update_user_guess(&mut self, guess: impl Into<String>) {
        self.user_guess = guess.into();
    }

    pub fn subscribe(&mut self) -> StateStream {
        let (sender, receiver) = mpsc::channel();
        // The receiver is still alive, so this send cannot fail.
        let _ = sender.send(self.state.clone());
        self.subscribers.push(sender);
        StateStream { receiver }
    }

    /// Starts a new game. Legal from any state.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.used_words.clear();
        self.user_guess.clear();
        let first = self.picker.pick_next(&self.vocabulary, &mut self.used_words)?;
        self.current_word = first.word;
        info_log!("reset() - new game started");
        self.publish(RoundState::first_round(first.scrambled));
        Ok(())
    }

    /// Checks the pending guess against the current word, ignoring case.
    ///
    /// The pending guess is cleared whatever the outcome.
    pub fn submit_guess(&mut self) -> Result<(), GameError> {
        self.ensure_playing("submit a guess")?;
        let guess = std::mem::take(&mut self.user_guess);

        if guess.trim().to_lowercase() == self.current_word {
            debug_log!("submit_guess() - '{}' is correct", guess);
            let score = self.state.score + self.config.score_increase;
            self.advance_round(score)
        } else {
            debug_log!("submit_guess() - '{}' is wrong", guess);
            self.publish(RoundState {
                is_guessed_word_wrong: true,
                ..self.state.clone()
            });
            Ok(())
        }
    }

    pub fn skip_word(&mut self) -> Result<(), GameError> {
        self.ensure_playing("skip a word")?;
        self.user_guess.clear();
        debug_log!("skip_word() - skipping '{}'", self.current_word);
        self.advance_round(self.state.score)
    }

    fn ensure_playing(&self, command: &'static str) -> Result<(), GameError> {
        match self.state.phase() {
            Phase::Playing => Ok(()),
            Phase::GameOver => Err(GameError::InvalidStateTransition { command }),
        }
    }

    fn advance_round(&mut self, score: u32) -> Result<(), GameError> {
        let next = if self.state.current_word_count >= self.config.max_rounds {
            info_log!("advance_round() - game over with score {}", score);
            RoundState {
                score,
                is_guessed_word_wrong: false,
                is_game_over: true,
                ..self.state.clone()
            }
        } else {
            let picked = self.picker.pick_next(&self.vocabulary, &mut self.used_words)?;
            self.current_word = picked.word;
            RoundState {
                current_scrambled_word: picked.scrambled,
                current_word_count: self.state.current_word_count + 1,
                score,
                is_guessed_word_wrong: false,
                is_game_over: false,
            }
        };
        self.publish(next);
        Ok(())
    }

    fn publish(&mut self, state: RoundState) {
        self.subscribers
            .retain(|subscriber| subscriber.send(state.clone()).is_ok());
        self.state = state;
    }
}
