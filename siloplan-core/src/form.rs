// In-memory form state for a planning session

use crate::clipboard::CopyOutcome;
use crate::error::{Result, SiloError};
use crate::model::{LinkPlan, Post, new_id};
use crate::plan::generate_link_plan;
use crate::verify::{VerificationResult, check_validity};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a "copied" confirmation stays visible
pub const DEFAULT_COPY_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Immutable view of the form consumed by the generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSnapshot {
    pub home_page_url: String,
    pub target_page_url: String,
    pub target_keyword: String,
    pub stat_page_1_url: String,
    pub stat_page_2_url: String,
    pub reddit_url: String,
    pub perplexity_url: String,
    pub posts: Vec<Post>,
}

impl FormSnapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    HomePage,
    TargetPage,
    TargetKeyword,
    StatPage1,
    StatPage2,
    Reddit,
    Perplexity,
}

impl FormField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "home" => Some(FormField::HomePage),
            "target" => Some(FormField::TargetPage),
            "keyword" => Some(FormField::TargetKeyword),
            "stat1" => Some(FormField::StatPage1),
            "stat2" => Some(FormField::StatPage2),
            "reddit" => Some(FormField::Reddit),
            "perplexity" => Some(FormField::Perplexity),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::HomePage => "Home Page URL",
            FormField::TargetPage => "Target Page URL",
            FormField::TargetKeyword => "Primary Keyword",
            FormField::StatPage1 => "Stat Page 1 URL",
            FormField::StatPage2 => "Stat Page 2 URL",
            FormField::Reddit => "Reddit URL",
            FormField::Perplexity => "Perplexity URL",
        }
    }
}

#[derive(Debug, Clone)]
struct CopyNotice {
    key: String,
    set_at: Instant,
}

/// The single mutable form instance owned by the session
#[derive(Debug, Clone)]
pub struct FormState {
    fields: FormSnapshot,
    verification: VerificationResult,
    copied: Option<CopyNotice>,
    copy_reset_delay: Duration,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            fields: FormSnapshot::default(),
            verification: VerificationResult::pending(),
            copied: None,
            copy_reset_delay: DEFAULT_COPY_RESET_DELAY,
        }
    }

    /// Start from previously entered values. Verification runs immediately.
    pub fn from_snapshot(mut snapshot: FormSnapshot) -> Self {
        let mut seen = HashSet::new();
        for post in &mut snapshot.posts {
            if post.id.trim().is_empty() || !seen.insert(post.id.clone()) {
                let id = new_id();
                debug!("Assigning fresh id {} to post with id '{}'", id, post.id);
                post.id = id;
                seen.insert(post.id.clone());
            }
        }

        let mut state = Self::new();
        state.fields = snapshot;
        state.refresh_verification();
        state
    }

    pub fn with_copy_reset_delay(mut self, delay: Duration) -> Self {
        self.copy_reset_delay = delay;
        self
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.fields.clone()
    }

    pub fn plan(&self) -> LinkPlan {
        generate_link_plan(&self.fields)
    }

    pub fn posts(&self) -> &[Post] {
        &self.fields.posts
    }

    pub fn verification(&self) -> &VerificationResult {
        &self.verification
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::HomePage => &self.fields.home_page_url,
            FormField::TargetPage => &self.fields.target_page_url,
            FormField::TargetKeyword => &self.fields.target_keyword,
            FormField::StatPage1 => &self.fields.stat_page_1_url,
            FormField::StatPage2 => &self.fields.stat_page_2_url,
            FormField::Reddit => &self.fields.reddit_url,
            FormField::Perplexity => &self.fields.perplexity_url,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        debug!("Setting {} to '{}'", field.label(), value);
        let slot = match field {
            FormField::HomePage => &mut self.fields.home_page_url,
            FormField::TargetPage => &mut self.fields.target_page_url,
            FormField::TargetKeyword => &mut self.fields.target_keyword,
            FormField::StatPage1 => &mut self.fields.stat_page_1_url,
            FormField::StatPage2 => &mut self.fields.stat_page_2_url,
            FormField::Reddit => &mut self.fields.reddit_url,
            FormField::Perplexity => &mut self.fields.perplexity_url,
        };
        *slot = value;
        self.refresh_verification();
    }

    /// Add one supporting post; an empty URL gives a blank post to fill in
    pub fn add_post(&mut self, url: impl Into<String>) -> &Post {
        self.fields.posts.push(Post::new(url));
        self.refresh_verification();
        let idx = self.fields.posts.len() - 1;
        &self.fields.posts[idx]
    }

    /// Add one post per non-blank line; returns how many were added
    pub fn add_posts_from_bulk(&mut self, text: &str) -> usize {
        let new_posts: Vec<Post> = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Post::new)
            .collect();

        let added = new_posts.len();
        if added > 0 {
            self.fields.posts.extend(new_posts);
            self.refresh_verification();
        }
        debug!("Bulk added {} posts", added);
        added
    }

    pub fn remove_post(&mut self, id: &str) -> bool {
        let before = self.fields.posts.len();
        self.fields.posts.retain(|post| post.id != id);
        let removed = self.fields.posts.len() != before;
        self.refresh_verification();
        removed
    }

    pub fn set_post_title(&mut self, id: &str, title: impl Into<String>) -> bool {
        let updated = match self.fields.posts.iter_mut().find(|post| post.id == id) {
            Some(post) => {
                post.title = title.into();
                true
            }
            None => false,
        };
        self.refresh_verification();
        updated
    }

    pub fn set_post_url(&mut self, id: &str, url: impl Into<String>) -> bool {
        let updated = match self.fields.posts.iter_mut().find(|post| post.id == id) {
            Some(post) => {
                post.url = url.into();
                true
            }
            None => false,
        };
        self.refresh_verification();
        updated
    }

    /// Resolve a 1-based position or a post id to the post's id
    pub fn resolve_post(&self, selector: &str) -> Result<String> {
        let post = match selector.parse::<usize>() {
            Ok(n) => n.checked_sub(1).and_then(|idx| self.fields.posts.get(idx)),
            Err(_) => self.fields.posts.iter().find(|post| post.id == selector),
        };
        post.map(|post| post.id.clone())
            .ok_or_else(|| SiloError::UnknownPost(selector.to_string()))
    }

    /// Remember a successful copy under `key` until the reset delay passes
    pub fn record_copy(&mut self, key: impl Into<String>, outcome: CopyOutcome, now: Instant) {
        if outcome.is_copied() {
            self.copied = Some(CopyNotice {
                key: key.into(),
                set_at: now,
            });
        }
    }

    pub fn copied_key(&self, now: Instant) -> Option<&str> {
        self.copied
            .as_ref()
            .filter(|notice| now.saturating_duration_since(notice.set_at) < self.copy_reset_delay)
            .map(|notice| notice.key.as_str())
    }

    fn refresh_verification(&mut self) {
        self.verification = check_validity(&self.fields.posts);
    }
}

pub fn copy_url_key(entry_id: &str) -> String {
    format!("url-{}", entry_id)
}

pub fn copy_link_key(entry_id: &str, link_index: usize) -> String {
    format!("link-{}-{}", entry_id, link_index)
}

pub fn copy_all_key(entry_id: &str) -> String {
    format!("all-{}", entry_id)
}
