use log::info;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use unscramble::cli::{CliInterface, parse_cli};
use unscramble::logging::init_logger;
use unscramble::tui::TuiInterface;
use unscramble::{
    EMBEDDED_VOCABULARY, GameConfig, GameSession, Vocabulary, WordPicker, game_loop,
    load_vocabulary_from_file, load_vocabulary_from_str,
};

fn load_vocabulary(path: Option<&str>) -> Result<Vocabulary, String> {
    match path {
        Some(path) => load_vocabulary_from_file(path)
            .map_err(|e| format!("Failed to load vocabulary from '{path}': {e}")),
        None => load_vocabulary_from_str(EMBEDDED_VOCABULARY)
            .map_err(|e| format!("Embedded vocabulary is unusable: {e}")),
    }
}

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logger(!cli.line_mode);

    let vocabulary = match load_vocabulary(cli.vocabulary_path.as_deref()) {
        Ok(vocabulary) => Arc::new(vocabulary),
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = GameConfig::default();
    if let Some(rounds) = cli.rounds {
        config = config.with_max_rounds(rounds);
    }

    let (picker, seed) = match cli.seed {
        Some(seed) => (WordPicker::seeded(seed), seed),
        None => WordPicker::from_entropy(),
    };
    info!("Starting game with seed {seed}");

    let mut session = match GameSession::new(vocabulary, config, picker) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Cannot start game: {e}");
            return ExitCode::FAILURE;
        }
    };

    let max_rounds = session.config().max_rounds;
    let result = if cli.line_mode {
        println!("Loaded {} words.", session.vocabulary().len());
        println!("Seed {seed} (replay with --seed {seed})");
        let mut interface = CliInterface::new(io::stdin().lock(), max_rounds);
        game_loop(&mut session, &mut interface)
    } else {
        match TuiInterface::new(max_rounds, seed) {
            Ok(mut interface) => game_loop(&mut session, &mut interface),
            Err(e) => {
                eprintln!("Failed to initialize terminal: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Game stopped: {e}");
            ExitCode::FAILURE
        }
    }
}
