use std::io;
use std::process::ExitCode;

use word_builder::cli::{CliInterface, parse_cli};
use word_builder::game_state::{GameInterface, game_loop};
use word_builder::logging::init_logging;
use word_builder::tui::TuiInterface;
use word_builder::wordbank::load_dictionary;

fn main() -> ExitCode {
    let cli = parse_cli();

    match init_logging(cli.tui) {
        Ok(Some(path)) => eprintln!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Failed to set up logging: {e}"),
    }

    let source = cli.word_source();
    let wordbank = match load_dictionary(&source) {
        Ok(wordbank) => wordbank,
        Err(e) => {
            eprintln!("Failed to load word list: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut interface: Box<dyn GameInterface> = if cli.tui {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Box::new(CliInterface::new(io::stdin().lock()))
    };

    let outcome = game_loop(
        &wordbank.words,
        cli.first_player(),
        wordbank.origin,
        interface.as_mut(),
    );
    // Restore the terminal before printing the result.
    drop(interface);
    if cli.tui {
        println!("{}", word_builder::cli::outcome_message(&outcome));
    }
    ExitCode::SUCCESS
}
