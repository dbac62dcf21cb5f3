use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;

use crate::info_log;

pub const DEFAULT_WORDLIST_URL: &str =
    "https://raw.githubusercontent.com/powerlanguage/word-lists/refs/heads/master/1000-most-common-words.txt";

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Used whenever the download fails or comes back without any words.
pub const FALLBACK_WORDBANK: [&str; 10] = [
    "apple",
    "apply",
    "applicable",
    "apex",
    "bat",
    "battle",
    "cat",
    "cater",
    "dog",
    "dodge",
];

#[derive(Debug)]
pub enum WordbankError {
    Io(io::Error),
    Fetch(reqwest::Error),
    Empty,
}

impl fmt::Display for WordbankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read word list: {e}"),
            Self::Fetch(e) => write!(f, "could not download word list: {e}"),
            Self::Empty => write!(f, "word list contains no usable words"),
        }
    }
}

impl std::error::Error for WordbankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Fetch(e) => Some(e),
            Self::Empty => None,
        }
    }
}

impl From<io::Error> for WordbankError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<reqwest::Error> for WordbankError {
    fn from(e: reqwest::Error) -> Self {
        Self::Fetch(e)
    }
}

/// Where the dictionary for a game comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordSource {
    Remote { url: String, timeout: Duration },
    File(PathBuf),
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordbankOrigin {
    Remote,
    File,
    Fallback,
}

impl WordbankOrigin {
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Remote => "downloaded word list",
            Self::File => "local word list",
            Self::Fallback => "built-in word list",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedWordbank {
    pub words: Vec<String>,
    pub origin: WordbankOrigin,
}

#[must_use]
pub fn fallback_wordbank() -> Vec<String> {
    FALLBACK_WORDBANK.iter().map(|w| (*w).to_string()).collect()
}

/// One word per line: trimmed, lowercased, blank or non-alphabetic lines skipped.
pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()))
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, WordbankError> {
    let data = fs::read_to_string(path)?;
    Ok(load_wordbank_from_str(&data))
}

/// Download the raw text of a word list. Non-success HTTP statuses are errors.
pub fn fetch_wordbank(url: &str, timeout: Duration) -> Result<String, WordbankError> {
    let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
    let body = client.get(url).send()?.error_for_status()?.text()?;
    Ok(body)
}

/// Parse a downloaded body; a body without a single usable word is an error.
pub fn parse_downloaded(body: &str) -> Result<Vec<String>, WordbankError> {
    let words = load_wordbank_from_str(body);
    if words.is_empty() {
        return Err(WordbankError::Empty);
    }
    Ok(words)
}

fn fetch_words(url: &str, timeout: Duration) -> Result<Vec<String>, WordbankError> {
    parse_downloaded(&fetch_wordbank(url, timeout)?)
}

fn remote_or_fallback(url: &str, fetched: Result<Vec<String>, WordbankError>) -> LoadedWordbank {
    match fetched {
        Ok(words) => LoadedWordbank {
            words,
            origin: WordbankOrigin::Remote,
        },
        Err(e) => {
            warn!("Error fetching dictionary from {url}: {e}; using built-in word list");
            LoadedWordbank {
                words: fallback_wordbank(),
                origin: WordbankOrigin::Fallback,
            }
        }
    }
}

/// Load the dictionary for a game.
///
/// Download problems never reach the caller: they are logged and the fallback list
/// is used instead. A local file that cannot be read is an error.
pub fn load_dictionary(source: &WordSource) -> Result<LoadedWordbank, WordbankError> {
    let loaded = match source {
        WordSource::Remote { url, timeout } => remote_or_fallback(url, fetch_words(url, *timeout)),
        WordSource::File(path) => LoadedWordbank {
            words: load_wordbank_from_file(path)?,
            origin: WordbankOrigin::File,
        },
        WordSource::Fallback => LoadedWordbank {
            words: fallback_wordbank(),
            origin: WordbankOrigin::Fallback,
        },
    };
    info_log!(
        "Loaded {} words from {}",
        loaded.words.len(),
        loaded.origin.describe()
    );
    Ok(loaded)
}
