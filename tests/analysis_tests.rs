// integration tests for the analysis pipeline through the public api

use passvet::analysis::patterns::PatternKind;
use passvet::analysis::score::StrengthTier;
use passvet::{analyze, Analyzer, AnalyzerConfig};

const SAMPLES: &[&str] = &[
    "",
    "a",
    "password",
    "Password1!",
    "P@ssw0rd",
    "abcd1234",
    "d1c4ba23",
    "qwertyQWERTY123!",
    "aaaaaaaaaaaa",
    "abababab",
    "19900101",
    "12/25/1990",
    "Kj8#mP2!xQ9vL4nR",
    "correct horse battery staple",
    "Zürich-Straße-42",
    "🔑🔑🔑🔑",
    "\u{0}\u{1}\u{2}",
];

#[test]
fn score_bounds_and_entropy_ordering_hold_for_every_sample() {
    for password in SAMPLES {
        let report = analyze(password);
        assert!(report.score <= 100, "{password:?}");
        assert!(report.entropy <= report.raw_entropy, "{password:?}");
        assert!(report.entropy >= 0.0, "{password:?}");
        assert_eq!(report.strength, StrengthTier::from_score(report.score));
    }
}

#[test]
fn empty_password() {
    let report = analyze("");
    assert_eq!(report.score, 0);
    assert_eq!(report.raw_entropy, 0.0);
    assert_eq!(report.criteria.passed_count(), 0);
    assert!(report.findings.is_empty());
}

#[test]
fn password1_fails_dictionary_criterion() {
    let report = analyze("Password1!");
    assert_eq!(report.criteria.get("No dictionary words"), Some(false));
    assert!(report
        .findings
        .iter()
        .all(|f| f.kind != PatternKind::LeetspeakWord));
    assert!(matches!(
        report.strength,
        StrengthTier::Weak | StrengthTier::Fair
    ));
}

#[test]
fn leetspeak_variant_is_reported() {
    let report = analyze("P@ssw0rd");
    assert!(report
        .findings
        .iter()
        .any(|f| f.kind == PatternKind::LeetspeakWord));
    assert!(report
        .ai_patterns
        .iter()
        .any(|p| p == "Leetspeak variant of 'password' detected"));
}

#[test]
fn sequences_discount_entropy() {
    let seq = analyze("abcd1234");
    let shuffled = analyze("d1c4ba23");
    assert!(seq
        .findings
        .iter()
        .any(|f| f.kind == PatternKind::Sequential && f.start == 0));
    assert!(seq
        .findings
        .iter()
        .any(|f| f.kind == PatternKind::Sequential && f.start == 4));
    assert!(shuffled
        .findings
        .iter()
        .all(|f| f.kind != PatternKind::Sequential));
    assert_eq!(seq.raw_entropy, shuffled.raw_entropy);
    assert!(seq.entropy < shuffled.entropy);
}

#[test]
fn keyboard_walk_has_its_own_criterion() {
    let report = analyze("qwertyQWERTY123!");
    assert!(report
        .findings
        .iter()
        .any(|f| f.kind == PatternKind::KeyboardWalk));
    assert_eq!(report.criteria.get("No keyboard walks"), Some(false));
    assert_eq!(
        report.criteria.get("No sequential or repeated runs"),
        Some(true)
    );
}

#[test]
fn dates_are_detected() {
    for password in ["19900101", "12/25/1990"] {
        let report = analyze(password);
        assert_eq!(report.criteria.get("No date patterns"), Some(false), "{password}");
    }
}

#[test]
fn attack_times_non_increasing_with_speed() {
    for password in SAMPLES {
        let report = analyze(password);
        let estimates: Vec<_> = report.attack_times.iter().collect();
        for pair in estimates.windows(2) {
            if pair[1].guesses_per_second >= pair[0].guesses_per_second {
                assert!(pair[1].log2_seconds <= pair[0].log2_seconds, "{password:?}");
            }
        }
    }
}

#[test]
fn json_matches_public_shape() {
    let value = serde_json::to_value(analyze("Password1!")).unwrap();
    let object = value.as_object().unwrap();
    for key in [
        "entropy",
        "score",
        "strength",
        "crack_time",
        "criteria",
        "attack_times",
        "ai_patterns",
    ] {
        assert!(object.contains_key(key), "missing {key}");
    }
    assert_eq!(value["criteria"]["At least 8 characters"], true);
    assert_eq!(value["criteria"]["No dictionary words"], false);
    assert!(value["attack_times"]["GPU Cluster"].is_string());
}

#[test]
fn custom_words_extend_the_dictionary() {
    let mut config = AnalyzerConfig::defaults().unwrap();
    config.extra_words = vec!["zorblax".to_string()];
    let analyzer = Analyzer::new(config).unwrap();

    let report = analyzer.analyze("Zorblax!93");
    assert_eq!(report.criteria.get("No dictionary words"), Some(false));
    assert_eq!(analyze("Zorblax!93").criteria.get("No dictionary words"), Some(true));
}

#[test]
fn analyzers_share_across_threads() {
    let analyzer = std::sync::Arc::new(Analyzer::with_defaults().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let analyzer = analyzer.clone();
            std::thread::spawn(move || analyzer.analyze(&format!("Thread{i}#Pass")).score)
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap() <= 100);
    }
}
