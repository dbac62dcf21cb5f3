// Library interface for word-builder
// This allows integration tests to access internal modules

pub mod cli;
pub mod fragment;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod tui;
pub mod wordbank;

// Re-export commonly used functions for easier testing
pub use fragment::{Fragment, Move, Side, can_form_complete_word, is_valid_fragment};
pub use game_state::{EndReason, GameInterface, GameOutcome, Player, game_loop};
pub use solver::{Candidate, choose_move, computer_move, generate_candidates, shortest_target};
pub use wordbank::{
    FALLBACK_WORDBANK, LoadedWordbank, WordSource, WordbankOrigin, load_dictionary,
    load_wordbank_from_file, load_wordbank_from_str,
};
