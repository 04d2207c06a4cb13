// Silo link plan generation

use crate::form::FormSnapshot;
use crate::model::{
    ExternalSource, LinkPlan, LinkPlanEntry, LinkRelation, Page, PlannedLink, SiloType, StatSlot,
};
use crate::slug::page_slug;
use tracing::debug;

pub const HOME_ANCHOR: &str = "Return to our Home Page";
pub const NEXT_ANCHOR_PREFIX: &str = "Learn more about ";
pub const PREVIOUS_ANCHOR_PREFIX: &str = "Go back to our article on ";
pub const FIRST_ANCHOR_PREFIX: &str = "Explore our first guide on ";
pub const LAST_ANCHOR_PREFIX: &str = "Find out more from our last article on ";

fn is_set(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Build the ordered chain of pages and classify the silo.
///
/// External links are spliced in at the midpoint (rounded up) of the
/// supporting posts; stat pages then bound the whole sequence.
pub fn working_chain(form: &FormSnapshot) -> (Vec<Page>, SiloType) {
    let mut pages: Vec<Page> = form
        .posts
        .iter()
        .enumerate()
        .map(|(position, post)| Page::supporting(post, position))
        .collect();

    let has_stat_pages = is_set(&form.stat_page_1_url) && is_set(&form.stat_page_2_url);
    let has_external = is_set(&form.reddit_url) || is_set(&form.perplexity_url);

    let silo_type = if has_stat_pages || has_external {
        SiloType::OutsideIn
    } else {
        SiloType::Simple
    };

    if has_external {
        let mut external = Vec::new();
        if is_set(&form.reddit_url) {
            external.push(Page::external(ExternalSource::Reddit, &form.reddit_url));
        }
        if is_set(&form.perplexity_url) {
            external.push(Page::external(ExternalSource::Perplexity, &form.perplexity_url));
        }
        let midpoint = pages.len().div_ceil(2);
        pages.splice(midpoint..midpoint, external);
    }

    if has_stat_pages {
        pages.insert(0, Page::stat_page(StatSlot::First, &form.stat_page_1_url));
        pages.push(Page::stat_page(StatSlot::Second, &form.stat_page_2_url));
    }

    (pages, silo_type)
}

/// Generate the full internal linking plan for the current form contents
pub fn generate_link_plan(form: &FormSnapshot) -> LinkPlan {
    let (chain, silo_type) = working_chain(form);
    let has_target = is_set(&form.target_page_url);
    let mut entries = Vec::with_capacity(chain.len() + 1);

    for (index, page) in chain.iter().enumerate() {
        let mut target_links = Vec::new();

        if has_target {
            target_links.push(PlannedLink {
                url: form.target_page_url.clone(),
                anchor_text: form.target_keyword.clone(),
                relation: LinkRelation::Target,
            });
        }

        if let Some(next) = chain.get(index + 1) {
            target_links.push(PlannedLink {
                url: next.url.clone(),
                anchor_text: format!("{}{}", NEXT_ANCHOR_PREFIX, page_slug(next)),
                relation: LinkRelation::Next,
            });
        }

        if let Some(previous) = index.checked_sub(1).and_then(|i| chain.get(i)) {
            target_links.push(PlannedLink {
                url: previous.url.clone(),
                anchor_text: format!("{}{}", PREVIOUS_ANCHOR_PREFIX, page_slug(previous)),
                relation: LinkRelation::Previous,
            });
        }

        if !target_links.is_empty() {
            entries.push(LinkPlanEntry {
                id: page.id.clone(),
                source_url: page.url.clone(),
                source_label: page.label(),
                target_links,
            });
        }
    }

    if has_target && let Some(entry) = target_page_entry(form, &chain) {
        entries.insert(0, entry);
    }

    debug!(
        "Generated {} with {} entries over {} chain pages",
        silo_type,
        entries.len(),
        chain.len()
    );

    LinkPlan {
        entries,
        silo_type,
        chain,
    }
}

fn target_page_entry(form: &FormSnapshot, chain: &[Page]) -> Option<LinkPlanEntry> {
    let target = Page::target(&form.target_page_url);
    let mut target_links = Vec::new();

    if is_set(&form.home_page_url) {
        target_links.push(PlannedLink {
            url: form.home_page_url.clone(),
            anchor_text: HOME_ANCHOR.to_string(),
            relation: LinkRelation::Home,
        });
    }

    if let Some(first) = chain.first() {
        target_links.push(PlannedLink {
            url: first.url.clone(),
            anchor_text: format!("{}{}", FIRST_ANCHOR_PREFIX, page_slug(first)),
            relation: LinkRelation::First,
        });
    }

    if chain.len() > 1
        && let Some(last) = chain.last()
    {
        target_links.push(PlannedLink {
            url: last.url.clone(),
            anchor_text: format!("{}{}", LAST_ANCHOR_PREFIX, page_slug(last)),
            relation: LinkRelation::Last,
        });
    }

    if target_links.is_empty() {
        return None;
    }

    Some(LinkPlanEntry {
        id: target.id.clone(),
        source_url: target.url.clone(),
        source_label: target.label(),
        target_links,
    })
}
