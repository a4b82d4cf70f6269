use std::io;
use std::process::ExitCode;

use wordle_game::cli::{Cli, CliInterface, parse_cli};
use wordle_game::game_state::{Outcome, game_loop};
use wordle_game::logging::{default_log_path, init_logging};
use wordle_game::service::{LocalWordService, WordServiceError};
use wordle_game::tui::TuiInterface;
use wordle_game::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};

fn build_service(cli: &Cli) -> Result<LocalWordService, WordServiceError> {
    let words = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path)?,
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    let service = LocalWordService::new(words)?;
    Ok(match cli.word {
        Some(secret) => service.with_fixed_word(secret),
        None => service,
    })
}

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Some(path) = cli.log_file.clone().or_else(default_log_path)
        && let Err(e) = init_logging(&path)
    {
        eprintln!("Logging disabled, could not open '{}': {e}", path.display());
    }

    let service = match build_service(&cli) {
        Ok(service) => service,
        Err(e) => {
            log::error!("failed to load word bank: {e}");
            match &cli.wordbank_path {
                Some(path) => eprintln!("Failed to load word bank from '{path}': {e}"),
                None => eprintln!("Failed to load the built-in word bank: {e}"),
            }
            return ExitCode::FAILURE;
        }
    };
    log::info!("loaded {} words", service.len());

    let first_puzzle = cli
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let records = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&service, &mut interface, first_puzzle)
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                eprintln!("Try again with --plain.");
                return ExitCode::FAILURE;
            }
        };
        let records = game_loop(&service, &mut interface, first_puzzle);
        drop(interface);
        records
    };

    let won = records.iter().filter(|r| r.outcome == Outcome::Won).count();
    log::info!("session over: {won} of {} games won", records.len());
    if !records.is_empty() {
        println!("You won {won} of {} games.", records.len());
    }
    ExitCode::SUCCESS
}
