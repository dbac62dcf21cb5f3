//! Fragments, moves, and the checks that decide whether a fragment is still alive.

use std::fmt;

pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Which end of the fragment a letter is added to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Begin,
    End,
}

impl Side {
    /// Parse a human side choice ("B" or "E", any case, surrounding whitespace ignored).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "B" => Some(Self::Begin),
            "E" => Some(Self::End),
            _ => None,
        }
    }

    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Begin => "beginning",
            Self::End => "end",
        }
    }
}

/// A single letter placed on one side of the fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    side: Side,
    letter: char,
}

impl Move {
    /// Returns `None` unless `letter` is in `'a'..='z'`.
    #[must_use]
    pub fn new(side: Side, letter: char) -> Option<Self> {
        letter.is_ascii_lowercase().then_some(Self { side, letter })
    }

    /// Build a move from raw human input; the text must be exactly one ASCII letter.
    #[must_use]
    pub fn from_input(side: Side, input: &str) -> Option<Self> {
        let mut chars = input.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Self::new(side, c.to_ascii_lowercase()),
            _ => None,
        }
    }

    /// All 52 moves: Begin a..z, then End a..z.
    pub fn all() -> impl Iterator<Item = Move> {
        [Side::Begin, Side::End].into_iter().flat_map(|side| {
            ALPHABET.chars().map(move |letter| Move { side, letter })
        })
    }

    #[must_use]
    pub fn side(self) -> Side {
        self.side
    }

    #[must_use]
    pub fn letter(self) -> char {
        self.letter
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at the {}", self.letter, self.side.describe())
    }
}

/// The shared word-in-progress. Each move produces a new, one letter longer, fragment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn extend(&self, mv: Move) -> Self {
        let mut text = String::with_capacity(self.0.len() + 1);
        match mv.side {
            Side::Begin => {
                text.push(mv.letter);
                text.push_str(&self.0);
            }
            Side::End => {
                text.push_str(&self.0);
                text.push(mv.letter);
            }
        }
        Self(text)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn matches(word: &str, fragment: &str) -> bool {
    word.starts_with(fragment) || word.ends_with(fragment)
}

/// True if some dictionary word starts or ends with `fragment`.
#[must_use]
pub fn is_valid_fragment(fragment: &str, dictionary: &[String]) -> bool {
    dictionary.iter().any(|word| matches(word, fragment))
}

/// True if some dictionary word strictly longer than `fragment` starts or ends with it.
///
/// A fragment that is already a whole word and cannot grow any further is valid
/// but not extendable, which ends the game.
#[must_use]
pub fn can_form_complete_word(fragment: &str, dictionary: &[String]) -> bool {
    let length = fragment.chars().count();
    dictionary
        .iter()
        .any(|word| matches(word, fragment) && word.chars().count() > length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_side_parse() {
        assert_eq!(Side::parse("B"), Some(Side::Begin));
        assert_eq!(Side::parse("e"), Some(Side::End));
        assert_eq!(Side::parse("  b \n"), Some(Side::Begin));
        assert_eq!(Side::parse("X"), None);
        assert_eq!(Side::parse("BE"), None);
        assert_eq!(Side::parse(""), None);
    }

    #[test]
    fn test_move_rejects_non_letters() {
        assert!(Move::new(Side::End, 'a').is_some());
        assert!(Move::new(Side::End, 'A').is_none());
        assert!(Move::new(Side::End, '1').is_none());
        assert!(Move::new(Side::Begin, 'é').is_none());
    }

    #[test]
    fn test_move_from_input() {
        assert_eq!(Move::from_input(Side::End, " C\n"), Move::new(Side::End, 'c'));
        assert_eq!(Move::from_input(Side::Begin, "ab"), None);
        assert_eq!(Move::from_input(Side::Begin, ""), None);
        assert_eq!(Move::from_input(Side::Begin, "7"), None);
    }

    #[test]
    fn test_all_moves_order() {
        let moves: Vec<Move> = Move::all().collect();
        assert_eq!(moves.len(), 52);
        assert_eq!(moves[0], Move::new(Side::Begin, 'a').unwrap());
        assert_eq!(moves[25], Move::new(Side::Begin, 'z').unwrap());
        assert_eq!(moves[26], Move::new(Side::End, 'a').unwrap());
        assert_eq!(moves[51], Move::new(Side::End, 'z').unwrap());
    }

    #[test]
    fn test_fragment_extend() {
        let start = Fragment::new("at");
        assert_eq!(start.extend(Move::new(Side::Begin, 'c').unwrap()).as_str(), "cat");
        assert_eq!(start.extend(Move::new(Side::End, 'e').unwrap()).as_str(), "ate");
        // original is untouched
        assert_eq!(start.as_str(), "at");
        assert_eq!(Fragment::default().extend(Move::new(Side::End, 'q').unwrap()).len(), 1);
    }

    #[test]
    fn test_is_valid_fragment_prefix_and_suffix() {
        let d = dict(&["cat", "cater", "bat", "battle"]);
        assert!(is_valid_fragment("ca", &d));
        assert!(is_valid_fragment("tle", &d));
        assert!(is_valid_fragment("cater", &d));
        assert!(!is_valid_fragment("att", &d)); // infix only
        assert!(!is_valid_fragment("z", &d));
    }

    #[test]
    fn test_empty_fragment_valid_with_words() {
        assert!(is_valid_fragment("", &dict(&["dog"])));
        assert!(can_form_complete_word("", &dict(&["dog"])));
    }

    #[test]
    fn test_empty_dictionary() {
        let d: Vec<String> = Vec::new();
        for f in ["", "a", "cat"] {
            assert!(!is_valid_fragment(f, &d));
            assert!(!can_form_complete_word(f, &d));
        }
    }

    #[test]
    fn test_complete_word_is_dead() {
        let d = dict(&["cat"]);
        assert!(is_valid_fragment("cat", &d));
        assert!(!can_form_complete_word("cat", &d));
    }

    #[test]
    fn test_can_form_complete_word_needs_longer_match() {
        let d = dict(&["dog", "dodge"]);
        assert!(is_valid_fragment("do", &d));
        assert!(can_form_complete_word("do", &d));
        assert!(can_form_complete_word("dod", &d));
        assert!(!can_form_complete_word("dog", &d));
        assert!(can_form_complete_word("ge", &d)); // suffix of dodge
    }

    #[test]
    fn test_extendable_implies_valid() {
        let d = dict(&["apple", "apply", "apex", "bat", "battle", "dodge"]);
        for f in ["", "a", "ap", "ple", "bat", "le", "x", "dodge", "odg"] {
            if can_form_complete_word(f, &d) {
                assert!(is_valid_fragment(f, &d), "{f} extendable but not valid");
            }
        }
    }
}
