//! Full-screen terminal front end for Unscramble, drawn with Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: renders the latest round snapshot and turns key presses
//!   into `UserAction`s for the game loop
//!
//! # Screen States
//! - `Playing`: letters edit the guess field, ENTER submits, TAB skips
//! - `GameOver`: the final score popup is shown until the player chooses
//!   to play again or quit

use crate::game_state::{GameInterface, UserAction};
use crate::session::RoundState;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;

const MAX_GUESS_LENGTH: usize = 24;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const POPUP_WIDTH: u16 = 40;
const POPUP_HEIGHT: u16 = 7;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const TILE_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Playing,
    /// Final score popup is showing
    GameOver,
}

/// Borrowed view of everything one frame draws.
struct RenderContext<'a> {
    round: Option<&'a RoundState>,
    max_rounds: u32,
    seed: u64,
    current_input: &'a str,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Message line tied to a round change.
///
/// A notice set just before the round advances (a skip, a new game) stays
/// up for that new round. Any later round change clears it.
#[derive(Debug, Default)]
struct Notice {
    text: String,
    fresh: bool,
}

impl Notice {
    fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.fresh = true;
    }

    fn clear(&mut self) {
        self.text.clear();
        self.fresh = false;
    }

    fn round_changed(&mut self) {
        if self.fresh {
            self.fresh = false;
        } else {
            self.text.clear();
        }
    }

    fn as_str(&self) -> &str {
        &self.text
    }
}

/// Ratatui screen for one game session: letter tiles, progress, the guess
/// field and a final-score popup.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    round: Option<RoundState>,
    max_rounds: u32,
    seed: u64,
    current_input: String,
    state: TuiState,
    message: Notice,
    error_message: String,
    status: String,
}

impl TuiInterface {
    /// `seed` is shown in the title so a game can be replayed with `--seed`.
    pub fn new(max_rounds: u32, seed: u64) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - entering raw mode, seed {}", seed);
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            round: None,
            max_rounds,
            seed,
            current_input: String::new(),
            state: TuiState::Playing,
            message: Notice::default(),
            error_message: String::new(),
            status: "Picking the first word".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            round: self.round.as_ref(),
            max_rounds: self.max_rounds,
            seed: self.seed,
            current_input: &self.current_input,
            state: self.state,
            message: self.message.as_str(),
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| Self::render_screen(f, &ctx))?;
        Ok(())
    }

    fn redraw(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("redraw() - terminal draw failed: {}", e);
        }
    }

    fn render_screen(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Scrambled word
                Constraint::Length(3), // Word count and score
                Constraint::Length(3), // Guess field
                Constraint::Min(3),    // Messages
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_header(f, chunks[0], ctx.seed);
        if let Some(round) = ctx.round {
            Self::render_word(f, chunks[1], &round.current_scrambled_word);
            Self::render_progress(f, chunks[2], round, ctx.max_rounds);
        }
        Self::render_input(
            f,
            chunks[3],
            ctx.current_input,
            ctx.round.is_some_and(|r| r.is_guessed_word_wrong),
        );
        Self::render_messages(f, chunks[4], ctx.message, ctx.error_message);
        Self::render_status_line(f, chunks[5], ctx.status);
        Self::render_instructions(f, chunks[6], ctx.state);

        if ctx.state == TuiState::GameOver
            && let Some(round) = ctx.round
        {
            let area = f.area();
            Self::render_game_over(f, area, round.score);
        }
    }

    fn render_header(f: &mut Frame, area: Rect, seed: u64) {
        let header = Line::from(vec![
            Span::styled("UNSCRAMBLE", HEADER_STYLE),
            Span::raw("    "),
            Span::styled(format!("seed {seed}"), Style::new().fg(Color::DarkGray)),
        ]);
        f.render_widget(Paragraph::new(header).block(Block::bordered()), area);
    }

    fn render_word(f: &mut Frame, area: Rect, scrambled: &str) {
        let mut spans = Vec::new();
        for letter in scrambled.chars() {
            spans.push(Span::styled(
                format!(" {} ", letter.to_ascii_uppercase()),
                TILE_STYLE,
            ));
            spans.push(Span::raw(" "));
        }

        let paragraph = Paragraph::new(vec![Line::from(""), Line::from(spans)])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title("Unscramble the word using all the letters")
                    .borders(Borders::ALL),
            );
        f.render_widget(paragraph, area);
    }

    fn render_progress(f: &mut Frame, area: Rect, round: &RoundState, max_rounds: u32) {
        let line = Line::from(vec![
            Span::styled(
                format!("Word {}/{}", round.current_word_count, max_rounds),
                INFO_STYLE,
            ),
            Span::raw("    "),
            Span::styled(format!("Score: {}", round.score), SUCCESS_STYLE),
        ]);
        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::bordered());
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, current_input: &str, guess_wrong: bool) {
        let (title, border_style) = if guess_wrong {
            ("Wrong guess!", ERROR_STYLE)
        } else {
            ("Enter your word", Style::default())
        };

        let paragraph = Paragraph::new(format!("{current_input}_")).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, message: &str, error_message: &str) {
        let lines: Vec<Line> = [(message, MESSAGE_STYLE), (error_message, ERROR_STYLE)]
            .into_iter()
            .filter(|(text, _)| !text.is_empty())
            .map(|(text, style)| Line::styled(text, style))
            .collect();

        f.render_widget(
            Paragraph::new(lines)
                .block(Block::bordered().title("Messages"))
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_status_line(f: &mut Frame, area: Rect, status: &str) {
        f.render_widget(
            Paragraph::new(status)
                .style(HEADER_STYLE)
                .block(Block::bordered()),
            area,
        );
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::Playing => "Type your guess | ENTER: Submit | TAB: Skip | ESC: Quit",
            TuiState::GameOver => "N: Play again | ESC: Exit",
        };

        f.render_widget(
            Paragraph::new(text)
                .style(Style::new().fg(Color::Gray))
                .block(Block::bordered()),
            area,
        );
    }

    fn render_game_over(f: &mut Frame, area: Rect, score: u32) {
        let popup = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!("You scored: {score}"), SUCCESS_STYLE)),
            Line::from(""),
            Line::from("N: Play again    ESC: Exit"),
        ];
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title("Congratulations!")
                .borders(Borders::ALL)
                .border_style(HEADER_STYLE),
        );
        f.render_widget(Clear, popup);
        f.render_widget(paragraph, popup);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(None);
        };
        // Release and repeat events would type every letter twice.
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }
        // Alt-tab can leak escape-sequence bytes as chars.
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - dropping stray char {:?}", c);
            return Ok(None);
        }

        match self.state {
            TuiState::Playing => Ok(self.handle_guess_input(key)),
            TuiState::GameOver => Ok(Self::handle_game_over_input(key)),
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char(c)
                if c.is_alphabetic() && self.current_input.chars().count() < MAX_GUESS_LENGTH =>
            {
                if Self::is_shortcut(&key) {
                    debug_log!("handle_guess_input() - shortcut {:?} not typed", key);
                } else {
                    self.current_input.push(c);
                    self.error_message.clear();
                }
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if !self.current_input.is_empty() => {
                let guess = std::mem::take(&mut self.current_input);
                debug_log!("handle_guess_input() - guess '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message = "Type a word before submitting!".to_string();
            }
            KeyCode::Tab => {
                self.current_input.clear();
                return Some(UserAction::Skip);
            }
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Char(c) if !c.is_alphabetic() => {
                self.error_message = format!("'{c}' is not a letter.");
            }
            _ => {}
        }
        None
    }

    fn is_shortcut(key: &KeyEvent) -> bool {
        key.modifiers
            .intersects(event::KeyModifiers::ALT | event::KeyModifiers::CONTROL)
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'n') => Some(UserAction::NewGame),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl GameInterface for TuiInterface {
    fn display_round(&mut self, state: &RoundState) {
        let previous_count = self.round.as_ref().map(|r| r.current_word_count);
        if previous_count != Some(state.current_word_count) {
            self.message.round_changed();
        }
        if !state.is_guessed_word_wrong {
            self.error_message.clear();
        }
        self.round = Some(state.clone());
        self.state = TuiState::Playing;
        self.status = format!("Word {} of {}", state.current_word_count, self.max_rounds);
        self.redraw();
    }

    fn read_action(&mut self, _state: &RoundState) -> Option<UserAction> {
        loop {
            if let Err(e) = self.draw() {
                info_log!("read_action() - cannot draw ({}), leaving", e);
                return Some(UserAction::Exit);
            }
            match self.handle_input() {
                Ok(Some(action)) => return Some(action),
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - cannot read input ({}), leaving", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_wrong_guess(&mut self, guess: &str) {
        self.message.clear();
        self.error_message = format!("'{guess}' is not the word. Try again!");
        self.redraw();
    }

    fn display_skipped(&mut self, word: &str) {
        self.message.set(format!("Skipped. The word was '{word}'."));
        self.redraw();
    }

    fn display_game_over(&mut self, state: &RoundState) {
        self.round = Some(state.clone());
        self.state = TuiState::GameOver;
        self.status = format!("Game over, final score {}", state.score);
        self.redraw();
    }

    fn display_new_game_message(&mut self) {
        self.current_input.clear();
        self.error_message.clear();
        self.state = TuiState::Playing;
        self.message.set("New game started.");
        self.redraw();
    }

    fn display_exit_message(&mut self) {
        self.message.set("Goodbye!");
        self.status = "Closing".to_string();
        self.redraw();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
