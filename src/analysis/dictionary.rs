// bundled wordlist matching (aho-corasick) and leetspeak normalization

use aho_corasick::{AhoCorasick, MatchKind};

use crate::error::{Error, Result};

/// words shorter than this are never matched
pub const MIN_WORD_LEN: usize = 4;

/// the embedded common-password list
const BUNDLED_WORDS: &str = include_str!("../data/common-passwords.txt");

/// leetspeak substitutions applied before the second dictionary pass.
/// '1' is handled separately because it stands for both 'i' and 'l'.
const LEET_TABLE: &[(char, char)] = &[
    ('0', 'o'),
    ('3', 'e'),
    ('4', 'a'),
    ('5', 's'),
    ('7', 't'),
    ('@', 'a'),
    ('$', 's'),
];

/// a dictionary hit in code-point offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMatch {
    pub start: usize,
    pub len: usize,
    /// index into Dictionary::word
    pub word: usize,
}

/// compiled, read-only wordlist
pub struct Dictionary {
    automaton: AhoCorasick,
    words: Vec<String>,
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("words", &self.words.len())
            .finish()
    }
}

/// parse the bundled list: one word per line, '#' comments, blank lines skipped
pub fn bundled_words() -> impl Iterator<Item = &'static str> {
    BUNDLED_WORDS
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}

impl Dictionary {
    /// the bundled list plus caller-supplied extra words
    pub fn with_extra_words(extra: &[String]) -> Result<Self> {
        // re-borrow so the bundled 'static items unify with the shorter extra lifetime
        let bundled = bundled_words().map(|w| -> &str { w });
        Self::from_words(bundled.chain(extra.iter().map(String::as_str)))
    }

    /// build from an arbitrary word source.
    /// words are lowercased, deduplicated, and filtered to MIN_WORD_LEN.
    pub fn from_words<'a, I>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut list: Vec<String> = Vec::new();
        for word in words {
            let word = word.trim().to_lowercase();
            if word.chars().count() < MIN_WORD_LEN || list.contains(&word) {
                continue;
            }
            list.push(word);
        }

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&list)
            .map_err(|e| Error::Build(format!("failed to build dictionary automaton: {}", e)))?;

        tracing::debug!(words = list.len(), "dictionary compiled");
        Ok(Self {
            automaton,
            words: list,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, index: usize) -> &str {
        &self.words[index]
    }

    /// leftmost-longest, non-overlapping matches in `chars`
    pub fn find(&self, chars: &[char]) -> Vec<WordMatch> {
        if self.words.is_empty() || chars.len() < MIN_WORD_LEN {
            return Vec::new();
        }

        let text: String = chars.iter().map(|&c| fold_case(c)).collect();
        let mut byte_to_char = vec![0usize; text.len() + 1];
        for (ci, (bi, _)) in text.char_indices().enumerate() {
            byte_to_char[bi] = ci;
        }
        byte_to_char[text.len()] = chars.len();

        self.automaton
            .find_iter(&text)
            .map(|m| {
                let start = byte_to_char[m.start()];
                WordMatch {
                    start,
                    len: byte_to_char[m.end()] - start,
                    word: m.pattern().as_usize(),
                }
            })
            .collect()
    }
}

/// lowercase one code point, keeping it when the lowercase form is not a
/// single character so code-point offsets stay aligned
fn fold_case(c: char) -> char {
    if c.is_ascii() {
        return c;
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// normalize leetspeak substitutions.
/// returns the rewritten characters and, per position, whether it was
/// substituted. `one_as` is the letter '1' is read as.
pub fn normalize_leet(chars: &[char], one_as: char) -> (Vec<char>, Vec<bool>) {
    chars
        .iter()
        .map(|&c| {
            if c == '1' {
                return (one_as, true);
            }
            match LEET_TABLE.iter().find(|(from, _)| *from == c) {
                Some(&(_, to)) => (to, true),
                None => (c, false),
            }
        })
        .unzip()
}

/// leetspeak readings worth scanning: one per meaning of '1', or a single
/// reading when '1' does not occur. empty when nothing was substituted.
pub fn leet_variants(chars: &[char]) -> Vec<(Vec<char>, Vec<bool>)> {
    let readings: &[char] = if chars.contains(&'1') { &['i', 'l'] } else { &['i'] };
    readings
        .iter()
        .map(|&one_as| normalize_leet(chars, one_as))
        .filter(|(_, substituted)| substituted.iter().any(|&s| s))
        .collect()
}
