// Tests for the silo validity checks

use siloplan_core::model::{LinkPlan, LinkPlanEntry, LinkRelation, PlannedLink, Post, SiloType};
use siloplan_core::verify::{
    Classification, PENDING_MESSAGE, RuleViolation, SILO_RULES, VerificationResult, audit_plan,
    check_validity,
};

fn posts(n: usize) -> Vec<Post> {
    (0..n)
        .map(|i| Post::new(format!("https://example.com/post-{}", i)))
        .collect()
}

fn link(url: &str, relation: LinkRelation) -> PlannedLink {
    PlannedLink {
        url: url.to_string(),
        anchor_text: String::new(),
        relation,
    }
}

fn plan_with(entries: Vec<LinkPlanEntry>) -> LinkPlan {
    LinkPlan {
        entries,
        silo_type: SiloType::Simple,
        chain: Vec::new(),
    }
}

// ============================================================================
// Validity Check Tests
// ============================================================================

#[test]
fn test_fewer_than_two_posts_warns() {
    for n in 0..2 {
        let result = check_validity(&posts(n));
        assert_eq!(result.classification, Classification::Warning);
        assert_eq!(
            result.message.as_deref(),
            Some("Add at least two supporting posts to form a silo.")
        );
    }
}

#[test]
fn test_two_or_more_posts_succeeds() {
    for n in 2..6 {
        let result = check_validity(&posts(n));
        assert!(result.is_success());
        assert_eq!(
            result.message.as_deref(),
            Some("🎉 Great job! Your silo plan looks correct!")
        );
    }
}

#[test]
fn test_validity_ignores_post_contents() {
    let blank = vec![Post::new(""), Post::new("")];
    assert!(check_validity(&blank).is_success());
}

#[test]
fn test_pending_result_message() {
    let pending = VerificationResult::pending();
    assert_eq!(pending.classification, Classification::None);
    assert_eq!(pending.display_message(), PENDING_MESSAGE);
    assert_eq!(VerificationResult::default(), pending);
}

#[test]
fn test_three_rules() {
    assert_eq!(SILO_RULES.len(), 3);
    assert!(SILO_RULES[2].contains("no other outbound links"));
}

// ============================================================================
// Plan Audit Tests
// ============================================================================

#[test]
fn test_audit_accepts_chain_links() {
    let plan = plan_with(vec![LinkPlanEntry {
        id: "a".to_string(),
        source_url: "https://example.com/a".to_string(),
        source_label: "Article 1".to_string(),
        target_links: vec![
            link("https://example.com/t", LinkRelation::Target),
            link("https://example.com/b", LinkRelation::Next),
            link("https://example.com/z", LinkRelation::Previous),
        ],
    }]);
    assert!(audit_plan(&plan).is_empty());
}

#[test]
fn test_audit_flags_foreign_and_duplicate_links() {
    let plan = plan_with(vec![LinkPlanEntry {
        id: "a".to_string(),
        source_url: "https://example.com/a".to_string(),
        source_label: "Article 1".to_string(),
        target_links: vec![
            link("https://example.com/t", LinkRelation::Target),
            link("https://example.com/t2", LinkRelation::Target),
            link("https://example.com/", LinkRelation::Home),
        ],
    }]);

    let violations = audit_plan(&plan);
    assert_eq!(violations.len(), 2);
    assert!(matches!(
        violations[0],
        RuleViolation::MultipleTargetLinks { count: 2, .. }
    ));
    assert!(matches!(violations[1], RuleViolation::ForeignLink { .. }));
    assert!(violations[1].to_string().contains("outside the silo"));
}

#[test]
fn test_audit_flags_too_many_silo_links() {
    let plan = plan_with(vec![LinkPlanEntry {
        id: "a".to_string(),
        source_url: "https://example.com/a".to_string(),
        source_label: "Article 1".to_string(),
        target_links: vec![
            link("https://example.com/b", LinkRelation::Next),
            link("https://example.com/c", LinkRelation::Next),
            link("https://example.com/d", LinkRelation::Previous),
        ],
    }]);

    let violations = audit_plan(&plan);
    assert_eq!(
        violations,
        vec![RuleViolation::TooManySiloLinks {
            source: "Article 1".to_string(),
            count: 3
        }]
    );
}

#[test]
fn test_audit_skips_target_page_entry() {
    let plan = plan_with(vec![LinkPlanEntry {
        id: "target-page".to_string(),
        source_url: "https://example.com/t".to_string(),
        source_label: "Target Page".to_string(),
        target_links: vec![
            link("https://example.com/", LinkRelation::Home),
            link("https://example.com/a", LinkRelation::First),
            link("https://example.com/z", LinkRelation::Last),
        ],
    }]);
    assert!(audit_plan(&plan).is_empty());
}
