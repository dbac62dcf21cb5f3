use std::fmt;

use crate::fragment::{Fragment, Move, Side, can_form_complete_word, is_valid_fragment};
use crate::solver::{Candidate, choose_move, generate_candidates, shortest_target};
use crate::wordbank::WordbankOrigin;
use crate::{debug_log, info_log};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::Human => Self::Computer,
            Self::Computer => Self::Human,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => write!(f, "You"),
            Self::Computer => write!(f, "Computer"),
        }
    }
}

/// Why a game stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// The human's move produced a fragment no word starts or ends with.
    InvalidFragment(String),
    /// The human's letter entry was not a single letter.
    InvalidLetter(String),
    /// The computer had no valid extension.
    NoMoveAvailable,
    /// The fragment cannot grow into any longer word.
    DeadFragment,
    EmptyDictionary,
    InputClosed,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFragment(text) => write!(f, "'{text}' is not a valid fragment"),
            Self::InvalidLetter(text) => write!(f, "'{text}' is not a single letter"),
            Self::NoMoveAvailable => write!(f, "the computer cannot make a valid move"),
            Self::DeadFragment => write!(f, "the fragment cannot form any longer word"),
            Self::EmptyDictionary => write!(f, "the dictionary is empty"),
            Self::InputClosed => write!(f, "input ended"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    /// `None` when the game stopped without a result.
    pub winner: Option<Player>,
    pub reason: EndReason,
    pub fragment: Fragment,
}

/// Details shown once before the first turn.
#[derive(Clone, Debug)]
pub struct StartInfo {
    pub word_count: usize,
    pub origin: WordbankOrigin,
    pub first_player: Player,
}

/// A computer move as presented to the player.
#[derive(Clone, Debug)]
pub struct ComputerMove {
    pub mv: Move,
    pub fragment: Fragment,
    /// The shortest word the computer is steering toward.
    pub target: Option<String>,
}

/// Front-end contract for the turn loop. Implemented by the line-oriented CLI and the TUI.
pub trait GameInterface {
    fn display_start(&mut self, info: &StartInfo);
    fn display_fragment(&mut self, fragment: &Fragment, to_move: Player);
    /// Keeps asking until the player picks a side; `None` once input has ended.
    fn read_side(&mut self) -> Option<Side>;
    /// Raw letter entry, validated by the game loop; `None` once input has ended.
    fn read_letter(&mut self, side: Side) -> Option<String>;
    fn display_computer_move(&mut self, chosen: &ComputerMove);
    fn display_outcome(&mut self, outcome: &GameOutcome);
}

enum TurnResult {
    Played(Fragment),
    Ended {
        winner: Option<Player>,
        reason: EndReason,
    },
}

fn human_turn<I: GameInterface + ?Sized>(
    fragment: &Fragment,
    dictionary: &[String],
    interface: &mut I,
) -> TurnResult {
    let closed = || TurnResult::Ended {
        winner: None,
        reason: EndReason::InputClosed,
    };
    let Some(side) = interface.read_side() else {
        return closed();
    };
    let Some(input) = interface.read_letter(side) else {
        return closed();
    };

    let Some(mv) = Move::from_input(side, &input) else {
        info_log!("Human entered invalid letter {:?}", input);
        return TurnResult::Ended {
            winner: Some(Player::Computer),
            reason: EndReason::InvalidLetter(input.trim().to_string()),
        };
    };

    let next = fragment.extend(mv);
    if !is_valid_fragment(next.as_str(), dictionary) {
        info_log!("Human produced invalid fragment '{}'", next);
        return TurnResult::Ended {
            winner: Some(Player::Computer),
            reason: EndReason::InvalidFragment(next.to_string()),
        };
    }
    TurnResult::Played(next)
}

fn computer_turn<I: GameInterface + ?Sized>(
    fragment: &Fragment,
    dictionary: &[String],
    interface: &mut I,
) -> TurnResult {
    let candidates = generate_candidates(fragment, dictionary);
    debug_log!(
        "computer_turn() - {} candidates for '{}'",
        candidates.len(),
        fragment
    );
    let Some(Candidate { mv, fragment: next }) = choose_move(&candidates, dictionary).cloned()
    else {
        return TurnResult::Ended {
            winner: Some(Player::Human),
            reason: EndReason::NoMoveAvailable,
        };
    };

    let chosen = ComputerMove {
        mv,
        target: shortest_target(next.as_str(), dictionary).map(str::to_string),
        fragment: next.clone(),
    };
    info_log!("Computer chose {} -> '{}'", mv, next);
    interface.display_computer_move(&chosen);
    TurnResult::Played(next)
}

/// Play one game to completion and report how it ended.
///
/// Turns alternate starting with `first_player`. A move that leaves a fragment no longer
/// word can grow from ends the game, and the opponent of the player who made it wins.
pub fn game_loop<I: GameInterface + ?Sized>(
    dictionary: &[String],
    first_player: Player,
    origin: WordbankOrigin,
    interface: &mut I,
) -> GameOutcome {
    interface.display_start(&StartInfo {
        word_count: dictionary.len(),
        origin,
        first_player,
    });

    let mut fragment = Fragment::default();
    let mut player = first_player;

    let outcome = if dictionary.is_empty() {
        GameOutcome {
            winner: None,
            reason: EndReason::EmptyDictionary,
            fragment,
        }
    } else {
        loop {
            interface.display_fragment(&fragment, player);

            let result = match player {
                Player::Human => human_turn(&fragment, dictionary, interface),
                Player::Computer => computer_turn(&fragment, dictionary, interface),
            };

            match result {
                TurnResult::Ended { winner, reason } => {
                    break GameOutcome {
                        winner,
                        reason,
                        fragment,
                    };
                }
                TurnResult::Played(next) => {
                    if !can_form_complete_word(next.as_str(), dictionary) {
                        break GameOutcome {
                            winner: Some(player.opponent()),
                            reason: EndReason::DeadFragment,
                            fragment: next,
                        };
                    }
                    fragment = next;
                    player = player.opponent();
                }
            }
        }
    };

    info_log!(
        "Game over: {} (winner: {:?}, fragment '{}')",
        outcome.reason,
        outcome.winner,
        outcome.fragment
    );
    interface.display_outcome(&outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers and records what the loop showed.
    #[derive(Default)]
    struct Scripted {
        sides: VecDeque<Side>,
        letters: VecDeque<&'static str>,
        computer_moves: Vec<String>,
        fragments_shown: Vec<String>,
        outcome: Option<GameOutcome>,
    }

    impl Scripted {
        fn new(turns: &[(Side, &'static str)]) -> Self {
            Self {
                sides: turns.iter().map(|(s, _)| *s).collect(),
                letters: turns.iter().map(|(_, l)| *l).collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for Scripted {
        fn display_start(&mut self, _info: &StartInfo) {}

        fn display_fragment(&mut self, fragment: &Fragment, _to_move: Player) {
            self.fragments_shown.push(fragment.to_string());
        }

        fn read_side(&mut self) -> Option<Side> {
            self.sides.pop_front()
        }

        fn read_letter(&mut self, _side: Side) -> Option<String> {
            self.letters.pop_front().map(str::to_string)
        }

        fn display_computer_move(&mut self, chosen: &ComputerMove) {
            self.computer_moves.push(chosen.fragment.to_string());
        }

        fn display_outcome(&mut self, outcome: &GameOutcome) {
            self.outcome = Some(outcome.clone());
        }
    }

    fn dict(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn play(words: &[&str], first: Player, turns: &[(Side, &'static str)]) -> (GameOutcome, Scripted) {
        let mut ui = Scripted::new(turns);
        let outcome = game_loop(&dict(words), first, WordbankOrigin::Fallback, &mut ui);
        (outcome, ui)
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::Human.opponent(), Player::Computer);
        assert_eq!(Player::Computer.opponent(), Player::Human);
    }

    #[test]
    fn test_human_completes_word_and_loses() {
        let (outcome, ui) = play(&["cat"], Player::Human, &[(Side::End, "c"), (Side::End, "t")]);
        // human "c", computer "ca", human "cat" which cannot grow
        assert_eq!(ui.computer_moves, vec!["ca"]);
        assert_eq!(outcome.reason, EndReason::DeadFragment);
        assert_eq!(outcome.winner, Some(Player::Computer));
        assert_eq!(outcome.fragment.as_str(), "cat");
    }

    #[test]
    fn test_computer_completes_word_and_loses() {
        let (outcome, ui) = play(&["dog", "dodge"], Player::Computer, &[(Side::End, "o")]);
        // computer opens "d", then from "do" heads for the shorter "dog"
        assert_eq!(ui.computer_moves, vec!["d", "dog"]);
        assert_eq!(outcome.reason, EndReason::DeadFragment);
        assert_eq!(outcome.winner, Some(Player::Human));
    }

    #[test]
    fn test_invalid_fragment_ends_game() {
        let (outcome, ui) = play(&["cat"], Player::Human, &[(Side::Begin, "z")]);
        assert_eq!(outcome.reason, EndReason::InvalidFragment("z".to_string()));
        assert_eq!(outcome.winner, Some(Player::Computer));
        assert_eq!(outcome.fragment.as_str(), "");
        assert!(ui.computer_moves.is_empty());
    }

    #[test]
    fn test_invalid_letter_ends_game() {
        let (outcome, _) = play(&["cat"], Player::Human, &[(Side::End, "ca")]);
        assert_eq!(outcome.reason, EndReason::InvalidLetter("ca".to_string()));
        assert_eq!(outcome.winner, Some(Player::Computer));
    }

    #[test]
    fn test_input_closed_has_no_winner() {
        let (outcome, _) = play(&["cat"], Player::Human, &[]);
        assert_eq!(outcome.reason, EndReason::InputClosed);
        assert_eq!(outcome.winner, None);
    }

    #[test]
    fn test_empty_dictionary_ends_immediately() {
        let (outcome, ui) = play(&[], Player::Human, &[(Side::End, "a")]);
        assert_eq!(outcome.reason, EndReason::EmptyDictionary);
        assert_eq!(outcome.winner, None);
        assert!(ui.fragments_shown.is_empty());
    }

    #[test]
    fn test_computer_without_move_loses() {
        let (outcome, _) = play(&["123"], Player::Computer, &[]);
        assert_eq!(outcome.reason, EndReason::NoMoveAvailable);
        assert_eq!(outcome.winner, Some(Player::Human));
    }

    #[test]
    fn test_computer_first_move() {
        let (outcome, ui) = play(&["cat", "cater", "bat", "battle"], Player::Computer, &[]);
        assert_eq!(ui.computer_moves, vec!["b"]);
        assert_eq!(outcome.reason, EndReason::InputClosed);
        assert_eq!(outcome.fragment.as_str(), "b");
    }

    #[test]
    fn test_fragment_grows_one_letter_per_turn() {
        let (_, ui) = play(
            &["apple", "apply", "applicable", "apex"],
            Player::Human,
            &[(Side::End, "a"), (Side::End, "p"), (Side::End, "l")],
        );
        for pair in ui.fragments_shown.windows(2) {
            assert_eq!(pair[1].len(), pair[0].len() + 1);
        }
    }
}
