use crate::error::GameError;
use crate::session::{GameSession, Phase, RoundState, StateStream};
use crate::{debug_log, info_log};
use log::warn;
use rand::Rng;

/// Action requested by the player through a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Skip,
    NewGame,
    Exit,
}

/// Front-end seam used by `game_loop`.
pub trait GameInterface {
    fn display_round(&mut self, state: &RoundState);
    /// `None` means the input was rejected and should be asked for again.
    fn read_action(&mut self, state: &RoundState) -> Option<UserAction>;
    fn display_wrong_guess(&mut self, guess: &str);
    fn display_skipped(&mut self, word: &str);
    fn display_game_over(&mut self, state: &RoundState);
    fn display_new_game_message(&mut self);
    fn display_exit_message(&mut self);
}

/// Plays `session` until the player exits.
///
/// Every snapshot the session publishes is rendered through `interface`.
/// Commands the session rejects as invalid for its state are logged and
/// ignored; any other error ends the loop.
pub fn game_loop<R, I>(session: &mut GameSession<R>, interface: &mut I) -> Result<(), GameError>
where
    R: Rng,
    I: GameInterface + ?Sized,
{
    let mut stream = session.subscribe();
    let mut state = session.state().clone();
    render_pending(&mut stream, interface, &mut state);

    loop {
        let Some(action) = interface.read_action(&state) else {
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        let result = match action {
            UserAction::Exit => {
                interface.display_exit_message();
                info_log!("game_loop() - exiting with score {}", state.score);
                return Ok(());
            }
            UserAction::NewGame => {
                session.reset().map(|()| interface.display_new_game_message())
            }
            UserAction::Skip => {
                let skipped = session.current_word().to_string();
                session
                    .skip_word()
                    .map(|()| interface.display_skipped(&skipped))
            }
            UserAction::Guess(guess) => {
                session.update_user_guess(guess.as_str());
                session.submit_guess().map(|()| {
                    if session.state().is_guessed_word_wrong {
                        interface.display_wrong_guess(&guess);
                    }
                })
            }
        };

        match result {
            Ok(()) => {}
            Err(e @ GameError::InvalidStateTransition { .. }) => {
                warn!("Ignoring command: {e}");
            }
            Err(e) => return Err(e),
        }

        render_pending(&mut stream, interface, &mut state);
    }
}

fn render_pending<I: GameInterface + ?Sized>(
    stream: &mut StateStream,
    interface: &mut I,
    state: &mut RoundState,
) {
    for snapshot in stream.by_ref() {
        match snapshot.phase() {
            Phase::Playing => interface.display_round(&snapshot),
            Phase::GameOver => interface.display_game_over(&snapshot),
        }
        *state = snapshot;
    }
}
