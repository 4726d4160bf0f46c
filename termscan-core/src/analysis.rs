//! Clause analysis: segmentation, classification and per-tier summary
//!
//! Global invariants enforced:
//! - Clause ids are zero-based positions in segmentation order
//! - The summary is always derived from the clauses, never stored separately
//! - Identical input yields identical output

use crate::risk::{classify_with_trigger, RiskTier};
use crate::segment::segment;
use serde::{Deserialize, Serialize};

/// One classified clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: usize,
    pub text: String,
    pub risk: RiskTier,
    pub impact: String,
    /// Lexicon phrase that decided the tier (absent for low)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trigger: Option<String>,
}

/// Clause counts per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl TierCounts {
    pub fn get(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::Low => self.low,
            RiskTier::Medium => self.medium,
            RiskTier::High => self.high,
            RiskTier::Critical => self.critical,
        }
    }

    fn increment(&mut self, tier: RiskTier) {
        match tier {
            RiskTier::Low => self.low += 1,
            RiskTier::Medium => self.medium += 1,
            RiskTier::High => self.high += 1,
            RiskTier::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

/// Which clauses to show; the summary is never filtered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClauseFilter {
    /// Only this exact tier
    pub tier: Option<RiskTier>,
    /// Only tiers at or above this one
    pub min_risk: Option<RiskTier>,
}

impl ClauseFilter {
    pub fn matches(&self, risk: RiskTier) -> bool {
        self.tier.map_or(true, |t| t == risk) && self.min_risk.map_or(true, |m| risk >= m)
    }
}

/// Output of one analysis pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub clauses: Vec<Clause>,
}

impl AnalysisResult {
    /// Per-tier counts, recomputed from the clauses
    pub fn summary(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for clause in &self.clauses {
            counts.increment(clause.risk);
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clause(&self, id: usize) -> Option<&Clause> {
        self.clauses.get(id)
    }

    pub fn select<'a>(&'a self, filter: &'a ClauseFilter) -> impl Iterator<Item = &'a Clause> + 'a {
        self.clauses.iter().filter(move |c| filter.matches(c.risk))
    }
}

/// Segment and classify `text`
pub fn analyze(text: &str) -> AnalysisResult {
    let clauses = segment(text)
        .into_iter()
        .enumerate()
        .map(|(id, segment)| {
            let (risk, trigger) = classify_with_trigger(segment);
            Clause {
                id,
                text: segment.to_string(),
                risk,
                impact: risk.impact().to_string(),
                trigger: trigger.map(str::to_string),
            }
        })
        .collect();

    AnalysisResult { clauses }
}
