// audit mode: analyze every password in a newline-separated list
//
// passwords are analyzed in parallel and never leave this module unmasked.
// warnings are redacted so a masked entry never sits next to the word it
// contains.

use std::path::Path;

use bstr::ByteSlice;
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::score::StrengthTier;
use crate::analysis::Analyzer;
use crate::error::Result;
use crate::output::masking::mask_password;

/// one analyzed line of the list
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    /// 1-based line number in the input
    pub line: usize,
    pub masked: String,
    pub score: u8,
    pub strength: StrengthTier,
    pub crack_time: String,
    pub ai_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditSummary {
    pub entries: Vec<AuditEntry>,
    /// number of entries in the Weak tier
    pub weak: usize,
    /// blank lines and lines containing NUL bytes
    pub skipped: usize,
}

impl AuditSummary {
    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

/// analyze every non-empty line of `data`. invalid utf-8 is replaced
/// lossily; entries come back in input order.
pub fn audit_bytes(analyzer: &Analyzer, data: &[u8]) -> AuditSummary {
    let mut skipped = 0usize;
    let mut lines: Vec<(usize, String)> = Vec::new();
    for (idx, raw) in data.lines().enumerate() {
        if raw.is_empty() || raw.contains(&0) {
            skipped += 1;
            continue;
        }
        lines.push((idx + 1, raw.to_str_lossy().into_owned()));
    }

    let entries: Vec<AuditEntry> = lines
        .par_iter()
        .map(|(line, password)| {
            let report = analyzer.analyze(password);
            AuditEntry {
                line: *line,
                masked: mask_password(password),
                score: report.score,
                strength: report.strength,
                ai_patterns: report.redacted_patterns(),
                crack_time: report.crack_time,
            }
        })
        .collect();

    let weak = entries
        .iter()
        .filter(|e| e.strength == StrengthTier::Weak)
        .count();
    tracing::debug!(entries = entries.len(), weak, skipped, "audit complete");

    AuditSummary {
        entries,
        weak,
        skipped,
    }
}

/// read a password list from disk and audit it
pub fn audit_file(analyzer: &Analyzer, path: &Path) -> Result<AuditSummary> {
    let data = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read password list");
    Ok(audit_bytes(analyzer, &data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::default_analyzer;
    use crate::error::Error;

    #[test]
    fn audits_in_input_order() {
        let data = b"password\nKj8#mP2!xQ9vL4nR\n\nqwerty123\n";
        let summary = audit_bytes(default_analyzer(), data);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.skipped, 1);
        let lines: Vec<usize> = summary.entries.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
        assert_eq!(summary.entries[0].strength, StrengthTier::Weak);
        assert_eq!(summary.entries[1].strength, StrengthTier::VeryStrong);
        assert_eq!(summary.weak, 2);
    }

    #[test]
    fn entries_are_masked() {
        let summary = audit_bytes(default_analyzer(), b"Kj8#mP2!xQ9vL4nR\n");
        let entry = &summary.entries[0];
        assert_eq!(entry.masked, "Kj************nR");
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("Kj8#mP2!xQ9vL4nR"));
    }

    #[test]
    fn dictionary_words_are_not_named() {
        let summary = audit_bytes(default_analyzer(), b"sunshine7
xP@55w0rdx
");
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("sunshine"));
        assert!(!json.contains("password"));
        assert!(summary.entries[0]
            .ai_patterns
            .contains(&"Common word detected".to_string()));
    }

    #[test]
    fn crlf_and_invalid_utf8_are_tolerated() {
        let data = b"letmein\r\nab\xffcdefgh\r\n";
        let summary = audit_bytes(default_analyzer(), data);
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.entries[0].masked, "le***in");
    }

    #[test]
    fn nul_lines_are_skipped() {
        let summary = audit_bytes(default_analyzer(), b"abc\0def\nhunter22\n");
        assert_eq!(summary.total(), 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn audit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = audit_file(default_analyzer(), &dir.path().join("missing.txt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn audit_file_reads_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        std::fs::write(&path, "monkey\ndragon\n").unwrap();
        let summary = audit_file(default_analyzer(), &path).unwrap();
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.weak, 2);
    }
}
