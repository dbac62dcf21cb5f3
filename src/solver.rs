use crate::fragment::{Fragment, Move, is_valid_fragment, matches};

/// A move together with the fragment it produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub mv: Move,
    pub fragment: Fragment,
}

/// Every single-letter extension of `fragment` that stays a prefix or suffix of some word.
///
/// Candidates come out in `Move::all()` order (Begin a..z, then End a..z); `choose_move`
/// relies on that order for its tie-break.
pub fn generate_candidates(fragment: &Fragment, dictionary: &[String]) -> Vec<Candidate> {
    Move::all()
        .map(|mv| Candidate {
            mv,
            fragment: fragment.extend(mv),
        })
        .filter(|candidate| is_valid_fragment(candidate.fragment.as_str(), dictionary))
        .collect()
}

/// The first shortest word that starts or ends with `fragment`.
pub fn shortest_target<'a>(fragment: &str, dictionary: &'a [String]) -> Option<&'a str> {
    let mut best: Option<(&str, usize)> = None;
    for word in dictionary.iter().filter(|word| matches(word.as_str(), fragment)) {
        let len = word.chars().count();
        if best.is_none_or(|(_, best_len)| len < best_len) {
            best = Some((word.as_str(), len));
        }
    }
    best.map(|(word, _)| word)
}

/// Greedy one-ply choice: the candidate that can reach the shortest dictionary word.
///
/// Candidates and words are scanned in order and only a strictly shorter word replaces
/// the running best, so the earliest candidate wins a tie. If no candidate matches any
/// word the first candidate is returned; `None` only for an empty slice.
pub fn choose_move<'a>(candidates: &'a [Candidate], dictionary: &[String]) -> Option<&'a Candidate> {
    let mut best: Option<(&Candidate, usize)> = None;
    for candidate in candidates {
        if let Some(word) = shortest_target(candidate.fragment.as_str(), dictionary) {
            let len = word.chars().count();
            if best.is_none_or(|(_, best_len)| len < best_len) {
                best = Some((candidate, len));
            }
        }
    }
    best.map(|(candidate, _)| candidate).or_else(|| candidates.first())
}

/// Generate and choose in one step, for callers that only want the computer's move.
pub fn computer_move(fragment: &Fragment, dictionary: &[String]) -> Option<Candidate> {
    let candidates = generate_candidates(fragment, dictionary);
    choose_move(&candidates, dictionary).cloned()
}
