// Data model shared by the generator, the checker and the reports

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier used for the entry synthesized for the target page
pub const TARGET_PAGE_ID: &str = "target-page";

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A supporting post entered by the user. Order in the form defines the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPost")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// Post as written in a form file; id and title may be left out
#[derive(Deserialize)]
struct StoredPost {
    #[serde(default = "new_id")]
    id: String,
    title: Option<String>,
    #[serde(default)]
    url: String,
}

impl From<StoredPost> for Post {
    fn from(stored: StoredPost) -> Self {
        Self {
            title: stored.title.unwrap_or_else(|| stored.url.clone()),
            id: stored.id,
            url: stored.url,
        }
    }
}

impl Post {
    /// New post whose title starts out as the raw URL
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: new_id(),
            title: url.clone(),
            url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalSource {
    Reddit,
    Perplexity,
}

impl ExternalSource {
    pub fn title(&self) -> &'static str {
        match self {
            ExternalSource::Reddit => "Reddit URL",
            ExternalSource::Perplexity => "Perplexity URL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatSlot {
    First,
    Second,
}

impl StatSlot {
    pub fn title(&self) -> &'static str {
        match self {
            StatSlot::First => "Stat Page 1",
            StatSlot::Second => "Stat Page 2",
        }
    }
}

/// Where a page in the working chain came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageKind {
    /// Position is the 0-based index in the user's post list
    Supporting { position: usize },
    External { source: ExternalSource },
    StatPage { slot: StatSlot },
    TargetPage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(flatten)]
    pub kind: PageKind,
    pub id: String,
    pub title: String,
    pub url: String,
}

impl Page {
    pub fn supporting(post: &Post, position: usize) -> Self {
        Self {
            kind: PageKind::Supporting { position },
            id: post.id.clone(),
            title: post.title.clone(),
            url: post.url.clone(),
        }
    }

    pub fn external(source: ExternalSource, url: &str) -> Self {
        Self {
            kind: PageKind::External { source },
            id: new_id(),
            title: source.title().to_string(),
            url: url.to_string(),
        }
    }

    pub fn stat_page(slot: StatSlot, url: &str) -> Self {
        Self {
            kind: PageKind::StatPage { slot },
            id: new_id(),
            title: slot.title().to_string(),
            url: url.to_string(),
        }
    }

    pub fn target(url: &str) -> Self {
        Self {
            kind: PageKind::TargetPage,
            id: TARGET_PAGE_ID.to_string(),
            title: "Target Page".to_string(),
            url: url.to_string(),
        }
    }

    /// Label shown next to the source URL of a plan entry
    pub fn label(&self) -> String {
        match self.kind {
            PageKind::Supporting { position } => format!("Article {}", position + 1),
            PageKind::TargetPage => "Target Page".to_string(),
            _ => self.title.clone(),
        }
    }
}

/// Why a link was generated. Nothing else may appear in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRelation {
    /// Chain page to the target page
    Target,
    /// Chain page to the next page in the chain
    Next,
    /// Chain page to the previous page in the chain
    Previous,
    /// Target page to the home page
    Home,
    /// Target page to the first page of the chain
    First,
    /// Target page to the last page of the chain
    Last,
}

impl LinkRelation {
    pub fn is_chain(&self) -> bool {
        matches!(self, LinkRelation::Next | LinkRelation::Previous)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedLink {
    pub url: String,
    pub anchor_text: String,
    pub relation: LinkRelation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPlanEntry {
    pub id: String,
    pub source_url: String,
    pub source_label: String,
    pub target_links: Vec<PlannedLink>,
}

impl LinkPlanEntry {
    pub fn is_target_page(&self) -> bool {
        self.id == TARGET_PAGE_ID
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiloType {
    Simple,
    OutsideIn,
}

impl SiloType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiloType::Simple => "Simple Reverse Silo",
            SiloType::OutsideIn => "Outside-In Reverse Silo",
        }
    }
}

impl fmt::Display for SiloType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPlan {
    pub entries: Vec<LinkPlanEntry>,
    pub silo_type: SiloType,
    /// Final working sequence the entries were derived from
    pub chain: Vec<Page>,
}

impl LinkPlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_links(&self) -> usize {
        self.entries.iter().map(|e| e.target_links.len()).sum()
    }

    /// Look up an entry by 1-based position or by id
    pub fn find_entry(&self, selector: &str) -> Option<&LinkPlanEntry> {
        if let Ok(n) = selector.parse::<usize>() {
            return n.checked_sub(1).and_then(|idx| self.entries.get(idx));
        }
        self.entries.iter().find(|e| e.id == selector)
    }
}
