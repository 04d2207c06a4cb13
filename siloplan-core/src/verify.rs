// Silo validity checks

use crate::model::{LinkPlan, LinkRelation, Post};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TOO_FEW_POSTS_MESSAGE: &str = "Add at least two supporting posts to form a silo.";
pub const SUCCESS_MESSAGE: &str = "🎉 Great job! Your silo plan looks correct!";
pub const PENDING_MESSAGE: &str = "Fill in the details above to check your silo.";

/// Checklist shown alongside the verification result
pub const SILO_RULES: [&str; 3] = [
    "Does each supporting post link to only one Target Page?",
    "Does each supporting post link out to only one or two other silo pages?",
    "Are there no other outbound links in the body of the supporting content?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    None,
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub classification: Classification,
    pub message: Option<String>,
}

impl VerificationResult {
    /// Result before anything has been checked
    pub fn pending() -> Self {
        Self {
            classification: Classification::None,
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.classification == Classification::Success
    }

    pub fn display_message(&self) -> &str {
        self.message.as_deref().unwrap_or(PENDING_MESSAGE)
    }
}

impl Default for VerificationResult {
    fn default() -> Self {
        Self::pending()
    }
}

/// Size gate on the supporting posts. Does not look at URLs or the plan.
pub fn check_validity(posts: &[Post]) -> VerificationResult {
    if posts.len() < 2 {
        VerificationResult {
            classification: Classification::Warning,
            message: Some(TOO_FEW_POSTS_MESSAGE.to_string()),
        }
    } else {
        VerificationResult {
            classification: Classification::Success,
            message: Some(SUCCESS_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleViolation {
    MultipleTargetLinks { source: String, count: usize },
    TooManySiloLinks { source: String, count: usize },
    ForeignLink { source: String, url: String },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::MultipleTargetLinks { source, count } => {
                write!(f, "{} links to the target page {} times", source, count)
            }
            RuleViolation::TooManySiloLinks { source, count } => {
                write!(f, "{} links to {} other silo pages", source, count)
            }
            RuleViolation::ForeignLink { source, url } => {
                write!(f, "{} has an outbound link outside the silo: {}", source, url)
            }
        }
    }
}

/// Check a generated plan against the three silo rules.
///
/// Chain entries may only carry target, next and previous links; the
/// target page entry is exempt.
pub fn audit_plan(plan: &LinkPlan) -> Vec<RuleViolation> {
    let mut violations = Vec::new();

    for entry in plan.entries.iter().filter(|e| !e.is_target_page()) {
        let targets = entry
            .target_links
            .iter()
            .filter(|l| l.relation == LinkRelation::Target)
            .count();
        if targets > 1 {
            violations.push(RuleViolation::MultipleTargetLinks {
                source: entry.source_label.clone(),
                count: targets,
            });
        }

        let chain_links = entry
            .target_links
            .iter()
            .filter(|l| l.relation.is_chain())
            .count();
        if chain_links > 2 {
            violations.push(RuleViolation::TooManySiloLinks {
                source: entry.source_label.clone(),
                count: chain_links,
            });
        }

        for link in entry
            .target_links
            .iter()
            .filter(|l| l.relation != LinkRelation::Target && !l.relation.is_chain())
        {
            violations.push(RuleViolation::ForeignLink {
                source: entry.source_label.clone(),
                url: link.url.clone(),
            });
        }
    }

    violations
}
