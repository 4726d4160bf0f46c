//! Canned answers to questions about one clause
//!
//! Rules are tested in order; the first rule with any trigger contained in
//! the lowercased question answers. Matching is the same substring test the
//! classifier uses, so short triggers like "hi" also fire inside longer words.
//! This phrase list is separate from the risk lexicon.

use crate::extract::truncate_chars;
use crate::lexicon::find_phrase;

pub const OPENING_LINE: &str = "Hello! I'm here to help you understand and navigate this clause. Ask me anything about risk, meaning, or your options.";

/// Chars of the clause quoted back when explaining it
const QUOTE_CHARS: usize = 120;

/// What a matched rule answers with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Fixed(&'static str),
    QuoteClause,
    LegalInsight,
}

struct Rule {
    triggers: &'static [&'static str],
    reply: Reply,
}

const RULES: &[Rule] = &[
    Rule {
        triggers: &["hi", "hello", "hey", "how are you", "thanks", "thank you"],
        reply: Reply::Fixed("Hello! I'm here to help you understand this clause. You can ask about its meaning, risks, or how to handle it."),
    },
    Rule {
        triggers: &["meaning", "explain", "interpret", "understand"],
        reply: Reply::QuoteClause,
    },
    Rule {
        triggers: &["live insight", "api", "legal expert", "real advice", "lawyer"],
        reply: Reply::LegalInsight,
    },
    Rule {
        triggers: &["risk", "harm", "liability", "exploit", "danger"],
        reply: Reply::Fixed("Risks may include misuse of your data, legal obligations you can't revoke, or being subject to third-party data brokers."),
    },
    Rule {
        triggers: &["fight", "challenge", "opt-out", "avoid", "save", "protect"],
        reply: Reply::Fixed("To protect yourself, search for opt-out options, contact support to clarify terms, or use tools like https://tosdr.org/ to compare platforms with better terms."),
    },
    Rule {
        triggers: &["who can help", "who will help", "where to get help", "how to get help"],
        reply: Reply::Fixed("You can consult legal aid services, privacy watchdogs, or organizations like EFF.org or ToS;DR for free analysis and community feedback."),
    },
    Rule {
        triggers: &["advice", "help me", "guide me"],
        reply: Reply::Fixed("Here's one suggestion: Always read for keywords like 'share', 'track', 'opt-out', or 'arbitration'. If any are unclear, ask or avoid agreeing."),
    },
    Rule {
        triggers: &["bye", "thank you", "thanks"],
        reply: Reply::Fixed("You're welcome! Stay safe and informed."),
    },
];

/// Known legal issue patterns looked up in the clause itself
const LEGAL_ISSUES: &[&str] = &[
    "arbitration",
    "data collection",
    "tracking",
    "liability",
    "sell data",
    "third party",
    "binding agreement",
    "forced consent",
    "indemnification",
    "user responsibility",
    "share with government",
    "no opt-out",
    "personal rights waiver",
    "class action waiver",
    "unilateral change",
    "bypass consent",
];

/// Answers questions about a single clause
#[derive(Debug, Clone)]
pub struct ClauseChat<'a> {
    clause: &'a str,
}

impl<'a> ClauseChat<'a> {
    pub fn new(clause: &'a str) -> Self {
        ClauseChat { clause }
    }

    pub fn opening_line(&self) -> &'static str {
        OPENING_LINE
    }

    /// Answer a question; blank questions get no reply
    pub fn reply(&self, question: &str) -> Option<String> {
        if question.trim().is_empty() {
            return None;
        }
        let lowered = question.to_lowercase();
        let reply = RULES
            .iter()
            .find(|rule| find_phrase(&lowered, rule.triggers).is_some())
            .map_or(Reply::LegalInsight, |rule| rule.reply);

        Some(match reply {
            Reply::Fixed(text) => text.to_string(),
            Reply::QuoteClause => format!(
                "This clause likely means: '{}...'. Need more help? Try asking about risk or action.",
                truncate_chars(self.clause, QUOTE_CHARS)
            ),
            Reply::LegalInsight => self.legal_insight(),
        })
    }

    /// Name the first known legal issue the clause mentions
    pub fn legal_insight(&self) -> String {
        match find_phrase(&self.clause.to_lowercase(), LEGAL_ISSUES) {
            Some(issue) => format!(
                "Based on known legal issues, the clause may be related to '{}', which may affect your privacy or rights.",
                issue
            ),
            None => "No legal red flags matched from known patterns. Still, use caution.".to_string(),
        }
    }
}
