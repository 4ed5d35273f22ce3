pub mod masking;

use std::fmt::Write as _;

use crate::analysis::report::AnalysisReport;
use crate::audit::AuditSummary;

/// render a report for the terminal. never includes the password.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "strength: {} ({}/100)", report.strength, report.score);
    let _ = writeln!(
        out,
        "entropy: {:.2} bits (raw {:.2})",
        report.entropy, report.raw_entropy
    );
    let _ = writeln!(out, "crack time: {}", report.crack_time);

    let _ = writeln!(out);
    let _ = writeln!(out, "criteria:");
    for outcome in report.criteria.iter() {
        let mark = if outcome.passed { "x" } else { " " };
        let _ = writeln!(out, "  [{}] {}", mark, outcome.name);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "attack times:");
    for estimate in report.attack_times.iter() {
        let _ = writeln!(out, "  {}: {}", estimate.profile, estimate.display);
    }

    let _ = writeln!(out);
    if report.ai_patterns.is_empty() {
        let _ = writeln!(out, "patterns: none detected");
    } else {
        let _ = writeln!(out, "patterns:");
        for pattern in &report.ai_patterns {
            let _ = writeln!(out, "  - {}", pattern);
        }
    }
    let _ = writeln!(out, "pattern attack: {}", report.pattern_attack.as_str());
    out
}

/// render an audit summary, one masked line per entry
pub fn render_audit(summary: &AuditSummary) -> String {
    let mut out = String::new();
    for entry in &summary.entries {
        let _ = write!(
            out,
            "  line {}: {} {} ({}/100, {})",
            entry.line, entry.masked, entry.strength, entry.score, entry.crack_time
        );
        if !entry.ai_patterns.is_empty() {
            let _ = write!(out, " - {}", entry.ai_patterns.join("; "));
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(
        out,
        "{} password(s) analyzed, {} weak, {} line(s) skipped.",
        summary.total(),
        summary.weak,
        summary.skipped
    );
    out
}

/// pretty json for any serializable output
pub fn render_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, default_analyzer};
    use crate::audit::audit_bytes;

    #[test]
    fn text_report_lists_every_section() {
        let report = analyze("Password1!");
        let text = render_report(&report);
        assert!(text.starts_with("strength: Weak"));
        assert!(text.contains("[x] At least 8 characters"));
        assert!(text.contains("[ ] No dictionary words"));
        assert!(text.contains("Brute Force:"));
        assert!(text.contains("pattern attack: Vulnerable"));
        assert!(!text.contains("Password1!"));
    }

    #[test]
    fn text_report_without_patterns() {
        let text = render_report(&analyze("Kj8#mP2!xQ9vL4nR"));
        assert!(text.contains("patterns: none detected"));
        assert!(text.contains("pattern attack: Resistant"));
    }

    #[test]
    fn json_report_shape() {
        let json = render_json(&analyze("abc")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in [
            "entropy",
            "score",
            "strength",
            "crack_time",
            "criteria",
            "attack_times",
            "ai_patterns",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn audit_text_is_masked() {
        let summary = audit_bytes(default_analyzer(), b"sunshine\n\n");
        let text = render_audit(&summary);
        assert!(text.contains("su****ne"));
        assert!(!text.contains("sunshine"));
        assert!(text.contains("1 password(s) analyzed, 1 weak, 1 line(s) skipped."));
    }

    #[test]
    fn audit_text_does_not_reveal_contained_word() {
        let summary = audit_bytes(default_analyzer(), b"sunshine7
");
        let text = render_audit(&summary);
        assert!(text.contains("su*****e7"));
        assert!(text.contains("Common word detected"));
        assert!(!text.contains("sunshine"));
    }
}
