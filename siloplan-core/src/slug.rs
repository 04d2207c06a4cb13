use crate::model::Page;
use url::Url;

/// Derive human-readable anchor text from a URL or a free-form title.
///
/// Absolute URLs yield their last non-empty path segment; anything that
/// fails to parse is used verbatim. Hyphens become spaces in both cases.
pub fn url_slug(text: &str) -> String {
    match Url::parse(text.trim()) {
        Ok(parsed) => parsed
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .last()
            .map(|segment| segment.replace('-', " "))
            .unwrap_or_default(),
        Err(_) => text.replace('-', " ").trim().to_string(),
    }
}

/// Slug of a chain page: its title when set, otherwise its URL
pub fn page_slug(page: &Page) -> String {
    if page.title.is_empty() {
        url_slug(&page.url)
    } else {
        url_slug(&page.title)
    }
}
