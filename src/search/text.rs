//! Plain-text, snippet, and title extraction from stored content
//!
//! Stored pages carry raw HTML or Markdown. Extraction never fails:
//! malformed markup degrades through fallback strategies rather than
//! raising an error.

use scraper::{Html, Selector};
use url::Url;

/// Snippet window length, in characters
const SNIPPET_LEN: usize = 200;

/// Characters of context shown before the matched term
const SNIPPET_LEAD: usize = 80;

/// Reduces content to single-spaced plain text
///
/// Markup tags are stripped and all whitespace runs collapse to single
/// spaces. Markdown passes through with its punctuation intact.
pub fn plain_text(content: &str) -> String {
    let document = Html::parse_document(content);
    let text = document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts a short plain-text excerpt around the first query term
///
/// The window is [`SNIPPET_LEN`] characters long and starts
/// [`SNIPPET_LEAD`] characters before the first case-insensitive
/// occurrence of the query's first term, clamped to the start of the text.
/// A leading ellipsis marks windows that do not start at position zero. If
/// the term is absent the excerpt is simply the text's prefix.
pub fn snippet(content: &str, query: &str) -> String {
    let plain = plain_text(content);
    let chars: Vec<char> = plain.chars().collect();

    let match_pos = query
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .and_then(|term| {
            let lowered = plain.to_lowercase();
            lowered
                .find(&term)
                .map(|byte_pos| lowered[..byte_pos].chars().count())
        });

    match match_pos {
        Some(pos) => {
            let start = pos.min(chars.len()).saturating_sub(SNIPPET_LEAD);
            let end = (start + SNIPPET_LEN).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            if start > 0 {
                format!("...{}...", window)
            } else {
                format!("{}...", window)
            }
        }
        None => {
            let end = SNIPPET_LEN.min(chars.len());
            let prefix: String = chars[..end].iter().collect();
            format!("{}...", prefix)
        }
    }
}

/// Extracts a display title for a page
///
/// Tries, in order: the content of an HTML `<title>` tag, the text of the
/// first Markdown level-1 heading, and finally the URL's path component
/// (the full URL when the path is bare). Absence of a match at any step is
/// the normal fall-through, not an error.
pub fn title(content: &str, url: &str) -> String {
    if let Some(title) = html_title(content) {
        return title;
    }

    if let Some(heading) = markdown_heading(content) {
        return heading;
    }

    url_fallback(url)
}

fn html_title(content: &str) -> Option<String> {
    let document = Html::parse_document(content);
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn markdown_heading(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.trim_start().strip_prefix("# "))
        .map(|heading| heading.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn url_fallback(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let path = parsed.path();
            if path.is_empty() || path == "/" {
                url.to_string()
            } else {
                path.to_string()
            }
        }
        Err(_) => url.to_string(),
    }
}
