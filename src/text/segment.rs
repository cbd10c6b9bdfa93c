//! Splitting of run-together Latin words.
//!
//! OCR and broken text layers often glue English words together
//! ("thequickbrownfox"). Word runs longer than [`LONG_WORD_THRESHOLD`] are
//! split into the sequence of dictionary words with the lowest total Zipf
//! cost, the same model `wordninja` popularised. Runs with no complete
//! split are left alone.
//!
//! The built-in list has about 46,000 English words ranked by frequency.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

/// Word runs longer than this many characters are segmented.
pub const LONG_WORD_THRESHOLD: usize = 15;

/// English words, most frequent first.
const RANKED_WORDS: &str = include_str!("words.txt");

static DEFAULT_DICTIONARY: Lazy<Arc<WordDictionary>> =
    Lazy::new(|| Arc::new(WordDictionary::from_ranked_words(RANKED_WORDS.lines())));

static WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word-run pattern"));

/// Read-only word cost table.
#[derive(Debug, Clone, Default)]
pub struct WordDictionary {
    costs: HashMap<String, f64>,
    max_word_len: usize,
}

impl WordDictionary {
    /// Build a dictionary from words ordered by descending frequency.
    ///
    /// The word at rank `r` (0-based) of `n` costs `ln((r + 1) * ln(n))`.
    /// Blank entries and words longer than [`LONG_WORD_THRESHOLD`] are
    /// ignored; a repeated word keeps its best rank.
    pub fn from_ranked_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && w.chars().count() <= LONG_WORD_THRESHOLD)
            .collect();

        let log_n = (words.len().max(2) as f64).ln();
        let mut costs = HashMap::with_capacity(words.len());
        let mut max_word_len = 0;

        for (rank, word) in words.into_iter().enumerate() {
            max_word_len = max_word_len.max(word.chars().count());
            costs
                .entry(word)
                .or_insert_with(|| ((rank + 1) as f64 * log_n).ln());
        }

        Self {
            costs,
            max_word_len,
        }
    }

    /// The built-in English dictionary, shared by every default segmenter.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&DEFAULT_DICTIONARY)
    }

    /// Cost of a lowercase word, if known.
    pub fn cost(&self, word: &str) -> Option<f64> {
        self.costs.get(word).copied()
    }

    /// Check if a lowercase word is known.
    pub fn contains(&self, word: &str) -> bool {
        self.costs.contains_key(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Check if the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Length in characters of the longest word.
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }
}

/// Minimum-cost segmenter over a [`WordDictionary`].
#[derive(Debug, Clone)]
pub struct WordSegmenter {
    dictionary: Arc<WordDictionary>,
}

impl WordSegmenter {
    /// Create a segmenter over the given dictionary.
    pub fn new(dictionary: Arc<WordDictionary>) -> Self {
        Self { dictionary }
    }

    /// Get the dictionary.
    pub fn dictionary(&self) -> &WordDictionary {
        &self.dictionary
    }

    /// Split one word into dictionary words, keeping the original casing.
    ///
    /// Digit runs and runs of non-ASCII letters are kept whole as their own
    /// pieces. Every ASCII letter run must split completely into dictionary
    /// words; if one does not, or the word contains a connector such as
    /// `_`, the word is returned as a single piece.
    pub fn split_word<'a>(&self, word: &'a str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        for (class, run) in char_runs(word) {
            match class {
                CharClass::AsciiLetter => match self.split_letters(run) {
                    Some(words) => pieces.extend(words),
                    None => return vec![word],
                },
                CharClass::Digit | CharClass::OtherLetter => pieces.push(run),
                CharClass::Connector => return vec![word],
            }
        }
        pieces
    }

    /// Cheapest split of an ASCII letter run, if one exists.
    fn split_letters<'a>(&self, run: &'a str) -> Option<Vec<&'a str>> {
        let lower = run.to_ascii_lowercase();
        let n = run.len();
        let max_len = self.dictionary.max_word_len();

        let mut best = vec![f64::INFINITY; n + 1];
        let mut back = vec![0usize; n + 1];
        best[0] = 0.0;

        for end in 1..=n {
            for len in 1..=end.min(max_len) {
                let start = end - len;
                if !best[start].is_finite() {
                    continue;
                }
                if let Some(cost) = self.dictionary.cost(&lower[start..end]) {
                    let total = best[start] + cost;
                    if total < best[end] {
                        best[end] = total;
                        back[end] = len;
                    }
                }
            }
        }

        if !best[n].is_finite() {
            return None;
        }

        let mut pieces = Vec::new();
        let mut end = n;
        while end > 0 {
            let start = end - back[end];
            pieces.push(&run[start..end]);
            end = start;
        }
        pieces.reverse();
        Some(pieces)
    }

    /// Split every overlong word in a space-separated text.
    ///
    /// Tokens are split on `' '` and rejoined with `' '`. Inside a token,
    /// word-character runs are separated from punctuation; a run longer
    /// than [`LONG_WORD_THRESHOLD`] characters goes through
    /// [`split_word`](Self::split_word). Punctuation stays attached exactly
    /// where it was.
    pub fn split_long_words(&self, text: &str) -> String {
        text.split(' ')
            .map(|token| self.split_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn split_token(&self, token: &str) -> String {
        let mut result = String::with_capacity(token.len() + 8);
        let mut last = 0;

        for run in WORD_RUN.find_iter(token) {
            result.push_str(&token[last..run.start()]);
            if run.as_str().chars().count() > LONG_WORD_THRESHOLD {
                result.push_str(&self.split_word(run.as_str()).join(" "));
            } else {
                result.push_str(run.as_str());
            }
            last = run.end();
        }

        result.push_str(&token[last..]);
        result
    }
}

impl Default for WordSegmenter {
    fn default() -> Self {
        Self::new(WordDictionary::shared())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    AsciiLetter,
    Digit,
    OtherLetter,
    /// Underscores, combining marks and other non-alphanumeric word chars
    Connector,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_ascii_alphabetic() {
            CharClass::AsciiLetter
        } else if c.is_numeric() {
            CharClass::Digit
        } else if c.is_alphabetic() {
            CharClass::OtherLetter
        } else {
            CharClass::Connector
        }
    }
}

/// Maximal runs of characters sharing a [`CharClass`].
fn char_runs(word: &str) -> Vec<(CharClass, &str)> {
    let mut runs = Vec::new();
    let mut current: Option<(CharClass, usize)> = None;

    for (i, c) in word.char_indices() {
        let class = CharClass::of(c);
        match current {
            Some((prev, _)) if prev == class => {}
            Some((prev, start)) => {
                runs.push((prev, &word[start..i]));
                current = Some((class, i));
            }
            None => current = Some((class, i)),
        }
    }
    if let Some((class, start)) = current {
        runs.push((class, &word[start..]));
    }
    runs
}
