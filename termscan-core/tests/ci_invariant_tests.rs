//! CI Invariant Tests
//!
//! These tests explicitly validate invariants of the classification pipeline
//! that must always hold. Run in CI to prevent regressions.

use termscan_core::extract::MAX_EXTRACTED_CHARS;
use termscan_core::lexicon::{self, LEXICON};
use termscan_core::{analyze, build_report, classify, filter_lines, segment, RiskTier};

/// Mixed inputs covering punctuation, newlines, unicode and empty text
const CORPUS: &[&str] = &[
    "",
    "No terminator at all",
    "One sentence.",
    "We collect cookies for preferences. We may share your personal information with third parties. By using this service you agree to binding arbitration.",
    "Really?! Yes... absolutely. Maybe",
    "Heading\nFirst line of body. Second line!\n\nThird?",
    "Données personnelles partagées. Café cookies. ✓ done.",
    "   leading spaces.   trailing spaces.   ",
];

#[test]
fn test_critical_phrase_always_wins() {
    let others: Vec<&str> = [RiskTier::Low, RiskTier::Medium, RiskTier::High]
        .iter()
        .map(|t| lexicon::phrases(*t)[0])
        .collect();

    for phrase in lexicon::phrases(RiskTier::Critical) {
        let clause = format!(
            "Including {} and {} we also {}.",
            others.join(", "),
            phrase.to_uppercase(),
            others[2]
        );
        assert_eq!(classify(&clause), RiskTier::Critical, "clause: {}", clause);
    }
}

#[test]
fn test_high_phrase_wins_without_critical() {
    let medium = lexicon::phrases(RiskTier::Medium)[0];
    for phrase in lexicon::phrases(RiskTier::High) {
        let clause = format!("We record {} and {}.", medium, phrase);
        assert_eq!(classify(&clause), RiskTier::High, "clause: {}", clause);
    }
}

#[test]
fn test_medium_phrase_without_higher_tiers() {
    for phrase in lexicon::phrases(RiskTier::Medium) {
        let clause = format!("We keep your {}.", phrase);
        assert_eq!(classify(&clause), RiskTier::Medium, "clause: {}", clause);
    }
}

#[test]
fn test_low_phrases_alone_classify_low() {
    for phrase in lexicon::phrases(RiskTier::Low) {
        assert_eq!(classify(phrase), RiskTier::Low);
    }
    assert_eq!(classify(""), RiskTier::Low);
}

#[test]
fn test_every_tier_has_one_narrative() {
    for entry in &LEXICON {
        assert_eq!(entry.tier.impact(), entry.impact);
    }
}

#[test]
fn test_single_sentence_segments_to_itself() {
    for sentence in ["We sell data.", "Is this fair?", "Never!", "A clause, with commas; and more."] {
        assert_eq!(segment(sentence), vec![sentence]);
    }
}

#[test]
fn test_clause_count_and_ids_match_segmentation() {
    for text in CORPUS {
        let segments = segment(text);
        let result = analyze(text);
        assert_eq!(result.len(), segments.len(), "text: {:?}", text);
        for (i, clause) in result.clauses.iter().enumerate() {
            assert_eq!(clause.id, i);
            assert_eq!(clause.text, segments[i]);
        }
    }
}

#[test]
fn test_summary_sums_to_total() {
    for text in CORPUS {
        let result = analyze(text);
        let summary = result.summary();
        assert_eq!(summary.total(), result.len());
        for tier in RiskTier::ALL {
            let expected = result.clauses.iter().filter(|c| c.risk == tier).count();
            assert_eq!(summary.get(tier), expected);
        }

        let report = build_report(&result);
        let s = report.summary;
        assert_eq!(s.low + s.medium + s.high + s.critical, s.total);
        assert_eq!(report.rows.len(), s.total);
    }
}

#[test]
fn test_analysis_is_deterministic() {
    for text in CORPUS {
        assert_eq!(analyze(text), analyze(text));
    }
}

#[test]
fn test_previews_are_bounded() {
    for text in CORPUS {
        for row in build_report(&analyze(text)).rows {
            assert!(row.preview.chars().count() <= 83);
        }
    }
}

#[test]
fn test_filter_output_is_bounded() {
    let line = "Every clause in this agreement applies to all users of the service worldwide, always.";
    let raw = vec![line; 500].join("\n");
    let text = filter_lines(&raw).unwrap();
    assert!(text.chars().count() <= MAX_EXTRACTED_CHARS);
}
