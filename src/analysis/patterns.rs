// pattern detection: sequences, repeats, keyboard walks, dictionary words,
// leetspeak words and dates
//
// every scanner reports independently; overlapping findings are expected and
// kept. the entropy estimator merges spans before discounting.

use serde::{Deserialize, Serialize};

use crate::analysis::dates::{self, DateShape};
use crate::analysis::dictionary::{self, Dictionary};
use crate::analysis::keyboard;

/// default cap on how many code points the scanners look at
pub const DEFAULT_MAX_SCAN_CHARS: usize = 256;

/// minimum run length for a sequential finding
pub const MIN_SEQUENCE_LEN: usize = 3;

/// severity added per character beyond a scanner's minimum window
const SEVERITY_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PatternKind {
    Sequential,
    Repeated,
    KeyboardWalk,
    DictionaryWord,
    LeetspeakWord,
    DateLike,
}

impl PatternKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Sequential => "sequential",
            PatternKind::Repeated => "repeated",
            PatternKind::KeyboardWalk => "keyboard-walk",
            PatternKind::DictionaryWord => "dictionary-word",
            PatternKind::LeetspeakWord => "leetspeak-word",
            PatternKind::DateLike => "date-like",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// what a finding matched, without echoing the password itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternDetail {
    Letters,
    Digits,
    SameChar,
    Block { size: usize },
    Walk,
    /// a bundled or configured dictionary word
    Word { word: String, whole: bool },
    Date(DateShape),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternFinding {
    pub kind: PatternKind,
    /// code-point offset of the first character
    pub start: usize,
    /// span length in code points
    pub len: usize,
    /// fraction of the span's raw entropy considered predictable, in [0, 1]
    pub severity: f64,
    pub detail: PatternDetail,
}

impl PatternFinding {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// a dictionary or leetspeak word spanning a password of `total` code points
    pub fn is_whole_word(&self, total: usize) -> bool {
        matches!(
            self.kind,
            PatternKind::DictionaryWord | PatternKind::LeetspeakWord
        ) && self.start == 0
            && self.len == total
    }

    /// warning line that never names the matched word. used wherever the
    /// output sits next to a (masked) password.
    pub fn redacted_description(&self) -> String {
        match (&self.kind, &self.detail) {
            (PatternKind::DictionaryWord, PatternDetail::Word { whole: false, .. }) => {
                "Common word detected".to_string()
            }
            (PatternKind::LeetspeakWord, _) => {
                "Leetspeak variant of a common word detected".to_string()
            }
            _ => self.description(),
        }
    }

    /// human-readable warning line
    pub fn description(&self) -> String {
        match (&self.kind, &self.detail) {
            (PatternKind::Sequential, PatternDetail::Digits) => {
                "Sequential numbers detected".to_string()
            }
            (PatternKind::Sequential, _) => "Sequential letters detected".to_string(),
            (PatternKind::Repeated, PatternDetail::Block { size }) => {
                format!("Repeated pattern block detected ({size}-character block)")
            }
            (PatternKind::Repeated, _) => "Repeated characters detected".to_string(),
            (PatternKind::KeyboardWalk, _) => "Keyboard walk detected".to_string(),
            (PatternKind::DictionaryWord, PatternDetail::Word { whole: true, .. }) => {
                "Common password detected".to_string()
            }
            (PatternKind::DictionaryWord, PatternDetail::Word { word, .. }) => {
                format!("Common word '{word}' detected")
            }
            (PatternKind::LeetspeakWord, PatternDetail::Word { word, .. }) => {
                format!("Leetspeak variant of '{word}' detected")
            }
            (PatternKind::DateLike, PatternDetail::Date(DateShape::Year)) => {
                "Year pattern detected".to_string()
            }
            (PatternKind::DateLike, PatternDetail::Date(shape)) => {
                format!("Date pattern detected ({})", shape.label())
            }
            (kind, _) => format!("{kind} pattern detected"),
        }
    }
}

/// base severity per kind at the scanner's minimum window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Severities {
    pub sequential: f64,
    pub repeated: f64,
    pub keyboard_walk: f64,
    pub dictionary_word: f64,
    pub leetspeak_word: f64,
    pub date_like: f64,
}

impl Default for Severities {
    fn default() -> Self {
        Self {
            sequential: 0.5,
            repeated: 0.6,
            keyboard_walk: 0.6,
            dictionary_word: 0.9,
            leetspeak_word: 0.8,
            date_like: 0.7,
        }
    }
}

impl Severities {
    /// all values as (name, value) pairs, for validation and display
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("sequential", self.sequential),
            ("repeated", self.repeated),
            ("keyboard_walk", self.keyboard_walk),
            ("dictionary_word", self.dictionary_word),
            ("leetspeak_word", self.leetspeak_word),
            ("date_like", self.date_like),
        ]
    }
}

/// grow a base severity with span length, capped at 1.0
fn scaled(base: f64, len: usize, min_len: usize) -> f64 {
    let extra = len.saturating_sub(min_len) as f64;
    (base + extra * SEVERITY_STEP).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeqClass {
    Letter,
    Digit,
}

fn seq_value(c: char) -> Option<(SeqClass, i32)> {
    if c.is_ascii_alphabetic() {
        Some((SeqClass::Letter, c.to_ascii_lowercase() as i32))
    } else if c.is_ascii_digit() {
        Some((SeqClass::Digit, c as i32))
    } else {
        None
    }
}

/// maximal ascending/descending runs of letters or digits, step +1 or -1
pub fn find_sequences(chars: &[char], base: f64) -> Vec<PatternFinding> {
    let mut out = Vec::new();
    let values: Vec<Option<(SeqClass, i32)>> = chars.iter().map(|&c| seq_value(c)).collect();

    let mut i = 0;
    while i + 1 < values.len() {
        let (Some((class, a)), Some((next_class, b))) = (values[i], values[i + 1]) else {
            i += 1;
            continue;
        };
        let step = b - a;
        if class != next_class || step.abs() != 1 {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while let Some(Some((c, v))) = values.get(j + 1) {
            let Some((_, prev)) = values[j] else { break };
            if *c != class || v - prev != step {
                break;
            }
            j += 1;
        }

        let len = j - i + 1;
        if len >= MIN_SEQUENCE_LEN {
            out.push(PatternFinding {
                kind: PatternKind::Sequential,
                start: i,
                len,
                severity: scaled(base, len, MIN_SEQUENCE_LEN),
                detail: match class {
                    SeqClass::Letter => PatternDetail::Letters,
                    SeqClass::Digit => PatternDetail::Digits,
                },
            });
        }
        // the last character may start a run in the other direction
        i = j;
    }

    out
}

/// minimum copies for a repeated block of the given size
fn min_copies(block: usize) -> usize {
    if block == 1 {
        3
    } else {
        2
    }
}

/// repeated single characters (aaa) and short repeated blocks (abab, abcabc)
pub fn find_repeats(chars: &[char], base: f64) -> Vec<PatternFinding> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        // (covered length, block size) of the best repeat starting at i
        let mut best: Option<(usize, usize)> = None;

        for block in 1..=3usize {
            if i + block > chars.len() {
                break;
            }
            let unit = &chars[i..i + block];
            if block > 1 && unit.iter().all(|&c| c == unit[0]) {
                // a block of one repeated char is the single-char case
                continue;
            }
            let mut copies = 1;
            while i + (copies + 1) * block <= chars.len()
                && &chars[i + copies * block..i + (copies + 1) * block] == unit
            {
                copies += 1;
            }
            if copies >= min_copies(block) {
                let covered = copies * block;
                if best.map_or(true, |(len, _)| covered > len) {
                    best = Some((covered, block));
                }
            }
        }

        match best {
            Some((len, block)) => {
                out.push(PatternFinding {
                    kind: PatternKind::Repeated,
                    start: i,
                    len,
                    severity: scaled(base, len, block * min_copies(block)),
                    detail: if block == 1 {
                        PatternDetail::SameChar
                    } else {
                        PatternDetail::Block { size: block }
                    },
                });
                i += len;
            }
            None => i += 1,
        }
    }

    out
}

/// keyboard walks as findings
pub fn find_keyboard_walks(chars: &[char], base: f64) -> Vec<PatternFinding> {
    keyboard::find_walks(chars)
        .into_iter()
        .map(|(start, len)| PatternFinding {
            kind: PatternKind::KeyboardWalk,
            start,
            len,
            severity: scaled(base, len, keyboard::MIN_WALK_LEN),
            detail: PatternDetail::Walk,
        })
        .collect()
}

/// dictionary words, then leetspeak readings that reveal additional words
pub fn find_words(chars: &[char], dict: &Dictionary, severities: &Severities) -> Vec<PatternFinding> {
    let mut out: Vec<PatternFinding> = dict
        .find(chars)
        .into_iter()
        .map(|m| PatternFinding {
            kind: PatternKind::DictionaryWord,
            start: m.start,
            len: m.len,
            severity: severities.dictionary_word,
            detail: PatternDetail::Word {
                word: dict.word(m.word).to_string(),
                whole: m.start == 0 && m.len == chars.len(),
            },
        })
        .collect();

    for (variant, substituted) in dictionary::leet_variants(chars) {
        for m in dict.find(&variant) {
            if !substituted[m.start..m.start + m.len].iter().any(|&s| s) {
                continue;
            }
            let seen = out.iter().any(|f| f.start == m.start && f.len == m.len);
            if seen {
                continue;
            }
            out.push(PatternFinding {
                kind: PatternKind::LeetspeakWord,
                start: m.start,
                len: m.len,
                severity: severities.leetspeak_word,
                detail: PatternDetail::Word {
                    word: dict.word(m.word).to_string(),
                    whole: m.start == 0 && m.len == chars.len(),
                },
            });
        }
    }

    out
}

pub fn find_date_patterns(chars: &[char], base: f64) -> Vec<PatternFinding> {
    dates::find_dates(chars)
        .into_iter()
        .map(|m| PatternFinding {
            kind: PatternKind::DateLike,
            start: m.start,
            len: m.len,
            severity: base,
            detail: PatternDetail::Date(m.shape),
        })
        .collect()
}

/// run every scanner over at most `max_scan_chars` code points.
/// findings are ordered by start offset, then kind, then length.
pub fn detect(
    chars: &[char],
    dict: &Dictionary,
    severities: &Severities,
    max_scan_chars: usize,
) -> Vec<PatternFinding> {
    let scanned = &chars[..chars.len().min(max_scan_chars)];
    if scanned.len() < chars.len() {
        tracing::debug!(
            total = chars.len(),
            scanned = scanned.len(),
            "pattern scan truncated"
        );
    }

    let mut findings = find_sequences(scanned, severities.sequential);
    findings.extend(find_repeats(scanned, severities.repeated));
    findings.extend(find_keyboard_walks(scanned, severities.keyboard_walk));
    findings.extend(find_words(scanned, dict, severities));
    findings.extend(find_date_patterns(scanned, severities.date_like));

    findings.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.kind.cmp(&b.kind))
            .then(a.len.cmp(&b.len))
    });
    findings
}
