use clap::Parser;
use crate::fragment::{Fragment, Side};
use crate::game_state::{ComputerMove, EndReason, GameInterface, GameOutcome, Player, StartInfo};
use crate::wordbank::{DEFAULT_FETCH_TIMEOUT, DEFAULT_WORDLIST_URL, WordSource};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

/// Word building game: take turns adding letters, and don't be the one stuck with a dead end
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (skips the download)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// URL of the newline-delimited word list to download
    #[arg(short = 'u', long = "url", default_value = DEFAULT_WORDLIST_URL)]
    pub url: String,

    /// Play with the built-in word list without downloading anything
    #[arg(long)]
    pub offline: bool,

    /// Seconds to wait for the word list download
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Let the computer make the opening move
    #[arg(long)]
    pub computer_first: bool,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

impl Cli {
    #[must_use]
    pub fn word_source(&self) -> WordSource {
        if let Some(path) = &self.wordbank_path {
            WordSource::File(PathBuf::from(path))
        } else if self.offline {
            WordSource::Fallback
        } else {
            WordSource::Remote {
                url: self.url.clone(),
                timeout: Duration::from_secs(self.timeout),
            }
        }
    }

    #[must_use]
    pub fn first_player(&self) -> Player {
        if self.computer_first {
            Player::Computer
        } else {
            Player::Human
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Read one line; `None` at end of input or on a read error.
fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

pub fn read_side<R: BufRead>(reader: &mut R) -> Option<Side> {
    loop {
        println!("Add a letter at the (B)eginning or (E)nd?");
        let input = read_line(reader)?;
        if let Some(side) = Side::parse(&input) {
            return Some(side);
        }
        println!("Invalid choice. Please enter 'B' for beginning or 'E' for end.");
    }
}

pub fn read_letter<R: BufRead>(reader: &mut R) -> Option<String> {
    println!("Enter a letter:");
    read_line(reader).map(|input| input.trim().to_lowercase())
}

pub fn display_start(info: &StartInfo) {
    println!("Welcome to the Word Building Game!");
    println!("Loaded {} words ({}).", info.word_count, info.origin.describe());
    if info.first_player == Player::Computer {
        println!("The computer moves first.");
    }
}

pub fn display_fragment(fragment: &Fragment, to_move: Player) {
    println!("\nCurrent word fragment: '{fragment}'");
    match to_move {
        Player::Human => println!("Your turn!"),
        Player::Computer => println!("Computer's turn!"),
    }
}

pub fn display_computer_move(chosen: &ComputerMove) {
    println!("Computer chose to add {}.", chosen.mv);
}

#[must_use]
pub fn outcome_message(outcome: &GameOutcome) -> String {
    let reason = match &outcome.reason {
        EndReason::DeadFragment => {
            format!("'{}' cannot form any valid word", outcome.fragment)
        }
        reason => reason.to_string(),
    };
    match outcome.winner {
        Some(Player::Human) => format!("{}. You win!", capitalise(&reason)),
        Some(Player::Computer) => format!("{}. Computer wins!", capitalise(&reason)),
        None => format!("Game ended: {reason}."),
    }
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn display_outcome(outcome: &GameOutcome) {
    println!("{}", outcome_message(outcome));
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_start(&mut self, info: &StartInfo) {
        display_start(info);
    }

    fn display_fragment(&mut self, fragment: &Fragment, to_move: Player) {
        display_fragment(fragment, to_move);
    }

    fn read_side(&mut self) -> Option<Side> {
        read_side(&mut self.reader)
    }

    fn read_letter(&mut self, _side: Side) -> Option<String> {
        read_letter(&mut self.reader)
    }

    fn display_computer_move(&mut self, chosen: &ComputerMove) {
        display_computer_move(chosen);
    }

    fn display_outcome(&mut self, outcome: &GameOutcome) {
        display_outcome(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["word-builder"]).unwrap();
        assert_eq!(cli.wordbank_path, None);
        assert_eq!(cli.url, DEFAULT_WORDLIST_URL);
        assert_eq!(cli.timeout, 10);
        assert!(!cli.offline && !cli.computer_first && !cli.tui);
        assert_eq!(cli.first_player(), Player::Human);
        assert_eq!(
            cli.word_source(),
            WordSource::Remote {
                url: DEFAULT_WORDLIST_URL.to_string(),
                timeout: Duration::from_secs(10),
            }
        );
    }

    #[test]
    fn test_parse_cli_with_path() {
        let cli = Cli::try_parse_from(["word-builder", "-i", "words.txt", "--offline"]).unwrap();
        // a local file wins over --offline
        assert_eq!(cli.word_source(), WordSource::File(PathBuf::from("words.txt")));
    }

    #[test]
    fn test_parse_cli_offline_and_flags() {
        let cli =
            Cli::try_parse_from(["word-builder", "--offline", "--computer-first", "--tui"]).unwrap();
        assert_eq!(cli.word_source(), WordSource::Fallback);
        assert_eq!(cli.first_player(), Player::Computer);
        assert!(cli.tui);
    }

    #[test]
    fn test_parse_cli_custom_url() {
        let cli = Cli::try_parse_from([
            "word-builder",
            "--url",
            "http://localhost/words.txt",
            "--timeout",
            "3",
        ])
        .unwrap();
        assert_eq!(
            cli.word_source(),
            WordSource::Remote {
                url: "http://localhost/words.txt".to_string(),
                timeout: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn test_read_side_valid() {
        let mut reader = Cursor::new("B\n");
        assert_eq!(read_side(&mut reader), Some(Side::Begin));
        let mut reader = Cursor::new(" e \n");
        assert_eq!(read_side(&mut reader), Some(Side::End));
    }

    #[test]
    fn test_read_side_reprompts_until_valid() {
        let mut reader = Cursor::new("x\n\nbegin\nE\n");
        assert_eq!(read_side(&mut reader), Some(Side::End));
    }

    #[test]
    fn test_read_side_end_of_input() {
        let mut reader = Cursor::new("nope\n");
        assert_eq!(read_side(&mut reader), None);
    }

    #[test]
    fn test_read_letter_trims_and_lowercases() {
        let mut reader = Cursor::new("  Q \n");
        assert_eq!(read_letter(&mut reader), Some("q".to_string()));
        let mut reader = Cursor::new("");
        assert_eq!(read_letter(&mut reader), None);
    }

    #[test]
    fn test_outcome_message() {
        let outcome = GameOutcome {
            winner: Some(Player::Human),
            reason: EndReason::NoMoveAvailable,
            fragment: Fragment::new("xy"),
        };
        assert_eq!(
            outcome_message(&outcome),
            "The computer cannot make a valid move. You win!"
        );

        let outcome = GameOutcome {
            winner: Some(Player::Computer),
            reason: EndReason::InvalidFragment("zq".to_string()),
            fragment: Fragment::default(),
        };
        assert_eq!(
            outcome_message(&outcome),
            "'zq' is not a valid fragment. Computer wins!"
        );

        let outcome = GameOutcome {
            winner: None,
            reason: EndReason::InputClosed,
            fragment: Fragment::default(),
        };
        assert_eq!(outcome_message(&outcome), "Game ended: input ended.");
    }

    #[test]
    fn test_dead_fragment_message_names_fragment() {
        let outcome = GameOutcome {
            winner: Some(Player::Computer),
            reason: EndReason::DeadFragment,
            fragment: Fragment::new("cater"),
        };
        assert_eq!(
            outcome_message(&outcome),
            "'cater' cannot form any valid word. Computer wins!"
        );
    }
}
