// brute-force entropy with a pattern discount
//
// raw bits = length * log2(alphabet). findings are merged into disjoint
// intervals (each carrying the highest severity covering it) so a character
// covered by several findings is only discounted once.

use serde::Serialize;

use crate::analysis::charset::CharsetProfile;
use crate::analysis::patterns::PatternFinding;

/// default floor for discounted bits of a non-empty password
pub const DEFAULT_MIN_BITS: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EntropyResult {
    pub raw_bits: f64,
    pub discounted_bits: f64,
}

/// a disjoint span with the severity applied to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedSpan {
    pub start: usize,
    pub end: usize,
    pub severity: f64,
}

impl MergedSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// sweep the findings into disjoint spans. adjacent spans with equal
/// severity are coalesced; where findings overlap the highest severity wins.
pub fn merge_spans(findings: &[PatternFinding]) -> Vec<MergedSpan> {
    // boundaries of every finding, so each elementary segment has one max
    let mut cuts: Vec<usize> = findings
        .iter()
        .filter(|f| f.len > 0)
        .flat_map(|f| [f.start, f.end()])
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut merged: Vec<MergedSpan> = Vec::new();
    for pair in cuts.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let severity = findings
            .iter()
            .filter(|f| f.start <= start && f.end() >= end && f.len > 0)
            .map(|f| f.severity.clamp(0.0, 1.0))
            .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s))));
        let Some(severity) = severity else { continue };

        match merged.last_mut() {
            Some(last) if last.end == start && last.severity == severity => last.end = end,
            _ => merged.push(MergedSpan {
                start,
                end,
                severity,
            }),
        }
    }
    merged
}

/// raw and discounted entropy for a password of `length` code points
pub fn estimate(
    length: usize,
    charset: &CharsetProfile,
    findings: &[PatternFinding],
    min_bits: f64,
) -> EntropyResult {
    let bits_per_char = charset.bits_per_char();
    let raw_bits = length as f64 * bits_per_char;
    if raw_bits <= 0.0 {
        return EntropyResult::default();
    }

    let discount: f64 = merge_spans(findings)
        .iter()
        .map(|span| span.severity * span.len() as f64 * bits_per_char)
        .sum();

    let discounted_bits = (raw_bits - discount).max(min_bits).min(raw_bits);
    EntropyResult {
        raw_bits,
        discounted_bits,
    }
}
