//! Clause risk classification
//!
//! Global invariants enforced:
//! - Deterministic classification
//! - Maximum severity wins: tiers are tested critical, high, medium; low is the fallback

use crate::lexicon;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk tier, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

/// Display attributes for a tier, consumed by renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStyle {
    pub css_class: &'static str,
    pub fill_rgb: (u8, u8, u8),
    pub marker: &'static str,
}

impl RiskTier {
    /// All tiers in ascending severity order
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Low,
        RiskTier::Medium,
        RiskTier::High,
        RiskTier::Critical,
    ];

    /// Tiers consulted by the classifier, most severe first
    const DECIDING: [RiskTier; 3] = [RiskTier::Critical, RiskTier::High, RiskTier::Medium];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
            RiskTier::Critical => "critical",
        }
    }

    /// Uppercase label used in report rows
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }

    pub fn impact(&self) -> &'static str {
        lexicon::impact(*self)
    }

    pub fn style(&self) -> TierStyle {
        match self {
            RiskTier::Low => TierStyle {
                css_class: "tier-low",
                fill_rgb: (204, 255, 204),
                marker: "ok",
            },
            RiskTier::Medium => TierStyle {
                css_class: "tier-medium",
                fill_rgb: (255, 255, 153),
                marker: "!",
            },
            RiskTier::High => TierStyle {
                css_class: "tier-high",
                fill_rgb: (255, 204, 153),
                marker: "!!",
            },
            RiskTier::Critical => TierStyle {
                css_class: "tier-critical",
                fill_rgb: (255, 153, 153),
                marker: "!!!",
            },
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskTier::Low),
            "medium" => Ok(RiskTier::Medium),
            "high" => Ok(RiskTier::High),
            "critical" => Ok(RiskTier::Critical),
            other => anyhow::bail!(
                "unknown risk tier '{}' (expected low, medium, high or critical)",
                other
            ),
        }
    }
}

/// Classify a clause into exactly one risk tier
pub fn classify(text: &str) -> RiskTier {
    classify_with_trigger(text).0
}

/// Classify a clause and report the phrase that decided the tier.
///
/// Low has no trigger: its phrases never take part in the decision.
pub fn classify_with_trigger(text: &str) -> (RiskTier, Option<&'static str>) {
    let lowered = text.to_lowercase();
    for tier in RiskTier::DECIDING {
        if let Some(phrase) = lexicon::find_phrase(&lowered, lexicon::phrases(tier)) {
            return (tier, Some(phrase));
        }
    }
    (RiskTier::Low, None)
}
