//! Keyword risk lexicon
//!
//! Static table of trigger phrases and "future impact" narratives per tier.
//! Phrases are stored lowercase and matched as plain substrings of the
//! lowercased clause, so a phrase also matches inside longer words.

use crate::risk::RiskTier;

/// Trigger phrases and narrative for one risk tier
#[derive(Debug)]
pub struct LexiconEntry {
    pub tier: RiskTier,
    pub phrases: &'static [&'static str],
    pub impact: &'static str,
}

const LOW: LexiconEntry = LexiconEntry {
    tier: RiskTier::Low,
    phrases: &[
        "cookies",
        "preferences",
        "session storage",
        "browser type",
        "analytics",
        "basic device info",
    ],
    impact: "Minimal impact. Mostly harmless for personalization.",
};

const MEDIUM: LexiconEntry = LexiconEntry {
    tier: RiskTier::Medium,
    phrases: &[
        "location",
        "usage data",
        "email tracking",
        "ip address",
        "browser fingerprinting",
        "log data",
        "user behavior",
        "metadata",
        "device identifier",
    ],
    impact: "Might lead to behavioral tracking or profiling.",
};

const HIGH: LexiconEntry = LexiconEntry {
    tier: RiskTier::High,
    phrases: &[
        "third parties",
        "data sharing",
        "advertising",
        "personal information",
        "service providers",
        "retargeting",
        "demographic profiling",
        "user profiling",
        "affiliates",
        "data monetization",
        "targeted marketing",
        "tracking pixels",
    ],
    impact: "Your data might be monetized or sold to advertisers.",
};

const CRITICAL: LexiconEntry = LexiconEntry {
    tier: RiskTier::Critical,
    phrases: &[
        "waive rights",
        "binding arbitration",
        "sell your data",
        "no liability",
        "share with government",
        "class action waiver",
        "irrevocable license",
        "subpoena compliance",
        "data breach liability",
        "unilateral change",
        "dispute resolution",
        "forced arbitration",
        "legal indemnity",
        "third-party disclosure",
        "explicit consent",
        "surveillance compliance",
    ],
    impact: "Can result in loss of privacy, legal rights, or financial risk.",
};

/// Full lexicon in ascending severity order
pub static LEXICON: [LexiconEntry; 4] = [LOW, MEDIUM, HIGH, CRITICAL];

/// Lexicon entry for a tier
pub fn entry(tier: RiskTier) -> &'static LexiconEntry {
    match tier {
        RiskTier::Low => &LEXICON[0],
        RiskTier::Medium => &LEXICON[1],
        RiskTier::High => &LEXICON[2],
        RiskTier::Critical => &LEXICON[3],
    }
}

pub fn phrases(tier: RiskTier) -> &'static [&'static str] {
    entry(tier).phrases
}

/// Narrative describing the future impact of a clause in this tier
pub fn impact(tier: RiskTier) -> &'static str {
    entry(tier).impact
}

/// Return the first phrase (in table order) contained in `haystack_lower`.
///
/// The caller lowercases the haystack once; phrases must already be lowercase.
pub fn find_phrase<'a>(haystack_lower: &str, phrases: &[&'a str]) -> Option<&'a str> {
    phrases
        .iter()
        .copied()
        .find(|phrase| haystack_lower.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_indexed_by_tier() {
        for tier in RiskTier::ALL {
            assert_eq!(entry(tier).tier, tier);
        }
    }

    #[test]
    fn test_every_tier_has_phrases_and_narrative() {
        for entry in &LEXICON {
            assert!(!entry.phrases.is_empty(), "{:?} has no phrases", entry.tier);
            assert!(!entry.impact.is_empty(), "{:?} has no impact", entry.tier);
        }
    }

    #[test]
    fn test_phrases_are_stored_lowercase() {
        for entry in &LEXICON {
            for phrase in entry.phrases {
                assert_eq!(*phrase, phrase.to_lowercase());
            }
        }
    }

    #[test]
    fn test_find_phrase_returns_first_in_table_order() {
        let text = "we share data with affiliates and third parties";
        assert_eq!(find_phrase(text, phrases(RiskTier::High)), Some("third parties"));
    }

    #[test]
    fn test_find_phrase_matches_inside_longer_words() {
        // "location" inside "relocation" still counts
        assert_eq!(
            find_phrase("relocation assistance", phrases(RiskTier::Medium)),
            Some("location")
        );
    }

    #[test]
    fn test_find_phrase_no_match() {
        assert_eq!(find_phrase("nothing to see here", phrases(RiskTier::Critical)), None);
        assert_eq!(find_phrase("", phrases(RiskTier::Low)), None);
    }
}
