use crate::game_state::{GameInterface, UserAction};
use crate::session::RoundState;
use clap::Parser;
use std::io::BufRead;

/// Unscramble: guess the word hidden behind the shuffled letters
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited vocabulary file
    #[arg(short = 'i', long = "input")]
    pub vocabulary_path: Option<String>,

    /// Number of words per game
    #[arg(short = 'r', long = "rounds")]
    pub rounds: Option<u32>,

    /// Seed for a reproducible word sequence
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Play with the line-based interface instead of the TUI
    #[arg(long = "cli")]
    pub line_mode: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

#[derive(Debug, PartialEq, Eq)]
pub enum LineInput {
    Guess(String),
    Skip,
    NewGame,
    Exit,
    Invalid,
}

fn is_valid_guess(guess: &str) -> bool {
    !guess.is_empty() && guess.chars().all(char::is_alphabetic)
}

/// Reads one line; end of input counts as `exit`.
pub fn read_line_input<R: BufRead>(reader: &mut R, game_over: bool) -> LineInput {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => return LineInput::Exit,
        Ok(_) => {}
    }
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "exit" => LineInput::Exit,
        "new" => LineInput::NewGame,
        _ if game_over => {
            println!("The game is over. Type 'new' to play again or 'exit' to quit.");
            LineInput::Invalid
        }
        "skip" => LineInput::Skip,
        _ if is_valid_guess(input) => LineInput::Guess(input.to_string()),
        _ => {
            println!("Invalid guess. Please enter letters only.");
            LineInput::Invalid
        }
    }
}

#[must_use]
pub fn format_progress(state: &RoundState, max_rounds: u32) -> String {
    format!(
        "Word {}/{} | Score {}",
        state.current_word_count, max_rounds, state.score
    )
}

pub fn display_round(state: &RoundState, max_rounds: u32) {
    println!("\n{}", format_progress(state, max_rounds));
    println!("Unscramble: {}", state.current_scrambled_word.to_uppercase());
    println!("Enter your guess ('skip', 'new' or 'exit'):");
}

pub fn display_wrong_guess(guess: &str) {
    println!("Wrong guess: '{guess}'. Try again.");
}

pub fn display_skipped(word: &str) {
    println!("Skipped. The word was '{word}'.");
}

pub fn display_game_over(state: &RoundState) {
    println!("\nCongratulations! You scored {}.", state.score);
    println!("Type 'new' to play again or 'exit' to quit.");
}

pub fn display_new_game_message() {
    println!("New game started.");
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the `GameInterface` trait
/// This struct wraps a `BufRead` reader and plays the game line by line
pub struct CliInterface<R: BufRead> {
    reader: R,
    max_rounds: u32,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R, max_rounds: u32) -> Self {
        Self { reader, max_rounds }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_round(&mut self, state: &RoundState) {
        // A wrong guess republishes the same round; the error line covers it.
        if !state.is_guessed_word_wrong {
            display_round(state, self.max_rounds);
        }
    }

    fn read_action(&mut self, state: &RoundState) -> Option<UserAction> {
        match read_line_input(&mut self.reader, state.is_game_over) {
            LineInput::Guess(guess) => Some(UserAction::Guess(guess)),
            LineInput::Skip => Some(UserAction::Skip),
            LineInput::NewGame => Some(UserAction::NewGame),
            LineInput::Exit => Some(UserAction::Exit),
            LineInput::Invalid => None,
        }
    }

    fn display_wrong_guess(&mut self, guess: &str) {
        display_wrong_guess(guess);
    }

    fn display_skipped(&mut self, word: &str) {
        display_skipped(word);
    }

    fn display_game_over(&mut self, state: &RoundState) {
        display_game_over(state);
    }

    fn display_new_game_message(&mut self) {
        display_new_game_message();
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
