//! HTML content extraction
//!
//! Filter-then-traverse: noise elements are detached from the parsed tree
//! first, then title, description, keyword-matching text blocks and image
//! references are read from what remains, in document order.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::archive::ImageCandidate;

/// Elements removed before any text or image is read
pub const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "svg", "nav", "header", "footer",
    "aside", "form",
];

/// Text-bearing block elements that are candidates for keyword matches
pub const TEXT_BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "dt", "dd", "blockquote",
];

/// Maximum keyword-matching blocks returned per page
pub const MAX_MATCHES: usize = 20;

/// Maximum image candidates collected per page
pub const MAX_IMAGE_CANDIDATES: usize = 10;

/// Optional length filter applied to matching blocks (in characters)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockLengthBounds {
    pub min_chars: Option<usize>,
    pub max_chars: Option<usize>,
}

impl BlockLengthBounds {
    fn admits(&self, text: &str) -> bool {
        let len = text.chars().count();
        self.min_chars.map_or(true, |min| len >= min)
            && self.max_chars.map_or(true, |max| len <= max)
    }
}

/// Everything scrape mode reads out of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub description: String,
    pub matches: Vec<String>,
    pub image_candidates: Vec<ImageCandidate>,
}

/// Parse `html` and extract title, description, keyword matches and images.
///
/// # Arguments
/// * `html` - Raw HTML string
/// * `page_url` - URL the page was served from, used to resolve relative `src`
/// * `keyword` - Matched case-insensitively as a substring of block text
/// * `bounds` - Optional block length filter
pub fn extract_page(
    html: &str,
    page_url: &Url,
    keyword: &str,
    bounds: &BlockLengthBounds,
) -> ExtractedPage {
    let mut document = Html::parse_document(html);
    strip_noise(&mut document);

    let base_url = document_base_url(&document, page_url);

    ExtractedPage {
        title: extract_title(&document),
        description: extract_description(&document),
        matches: extract_matches(&document, keyword, bounds),
        image_candidates: extract_image_candidates(&document, &base_url),
    }
}

/// Detach every `NOISE_TAGS` element (and its subtree) from the document
fn strip_noise(document: &mut Html) {
    let Ok(selector) = Selector::parse(&NOISE_TAGS.join(", ")) else {
        return;
    };

    let noise: Vec<_> = select_attached(document, &selector).map(|el| el.id()).collect();
    for id in noise {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Elements matching `selector` that are still reachable from the document root.
///
/// `Html::select` walks every node in the tree arena, so the descendants of
/// subtrees detached by `strip_noise` would otherwise still be visited.
fn select_attached<'a, 'b>(
    document: &'a Html,
    selector: &'b Selector,
) -> impl Iterator<Item = ElementRef<'a>> + 'b
where
    'a: 'b,
{
    let root = document.tree.root().id();
    document
        .select(selector)
        .filter(move |el| el.ancestors().last().map(|top| top.id()) == Some(root))
}

fn extract_title(document: &Html) -> String {
    if let Ok(selector) = Selector::parse("title") {
        if let Some(title) = select_attached(document, &selector).next() {
            let text = element_text(&title);
            if !text.is_empty() {
                return text;
            }
        }
    }

    meta_content(document, "property", "og:title").unwrap_or_default()
}

fn extract_description(document: &Html) -> String {
    meta_content(document, "name", "description")
        .or_else(|| meta_content(document, "property", "og:description"))
        .unwrap_or_default()
}

/// `content` of the first `<meta>` whose `attr` equals `value` (ASCII case-insensitive)
fn meta_content(document: &Html, attr: &str, value: &str) -> Option<String> {
    let selector = Selector::parse("meta").ok()?;

    let found = select_attached(document, &selector)
        .filter(|meta| {
            meta.value()
                .attr(attr)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
        })
        .find_map(|meta| {
            meta.value()
                .attr("content")
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
        });
    found
}

fn extract_matches(document: &Html, keyword: &str, bounds: &BlockLengthBounds) -> Vec<String> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let Ok(selector) = Selector::parse(&TEXT_BLOCK_TAGS.join(", ")) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for block in select_attached(document, &selector) {
        let text = element_text(&block);
        if text.is_empty() || !bounds.admits(&text) {
            continue;
        }

        // Inline markup splits words across text nodes ("Py<b>thon</b>"),
        // so also test the text joined without separators.
        let contains = text.to_lowercase().contains(&needle)
            || clean_text(&block.text().collect::<String>())
                .to_lowercase()
                .contains(&needle);
        if !contains {
            continue;
        }

        if seen.insert(text.clone()) {
            matches.push(text);
            if matches.len() >= MAX_MATCHES {
                break;
            }
        }
    }

    matches
}

/// `<base href>` resolved against the page URL, or the page URL itself
fn document_base_url(document: &Html, page_url: &Url) -> Url {
    Selector::parse("base[href]")
        .ok()
        .and_then(|selector| {
            select_attached(document, &selector)
                .next()
                .and_then(|base| base.value().attr("href"))
                .and_then(|href| page_url.join(href.trim()).ok())
        })
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or_else(|| page_url.clone())
}

fn extract_image_candidates(document: &Html, base_url: &Url) -> Vec<ImageCandidate> {
    let Ok(selector) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for img in select_attached(document, &selector) {
        if candidates.len() >= MAX_IMAGE_CANDIDATES {
            break;
        }

        let src = img.value().attr("src").unwrap_or_default().trim();
        if src.is_empty() {
            continue;
        }

        let Some(resolved) = resolve_image_url(base_url, src) else {
            continue;
        };

        if seen.insert(resolved.clone()) {
            let alt = img.value().attr("alt").map(clean_text).unwrap_or_default();
            candidates.push(ImageCandidate::new(resolved, alt));
        }
    }

    candidates
}

/// Resolve an `src` value to an absolute http(s) URL.
///
/// `data:` and `javascript:` sources, and anything that resolves to another
/// scheme, yield `None`.
pub fn resolve_image_url(base_url: &Url, src: &str) -> Option<String> {
    let lower = src.trim_start().to_ascii_lowercase();
    if lower.starts_with("data:") || lower.starts_with("javascript:") {
        return None;
    }

    let resolved = base_url.join(src).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Text of an element with whitespace normalized
fn element_text(element: &ElementRef) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// Clean text: collapse all whitespace runs to single spaces and trim
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
