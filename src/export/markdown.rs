//! Document (Markdown) export
//!
//! One section per page: a title heading, the source URL, and a bounded
//! plain-text body, separated by horizontal rules.

use crate::search::{plain_text, title};
use crate::store::StoredPage;

/// Maximum characters of body text per section
const BODY_LIMIT: usize = 2000;

/// Renders pages as a Markdown document, in input order
pub fn render(pages: &[StoredPage]) -> String {
    let mut out = String::new();

    for page in pages {
        out.push_str(&format!("# {}\n\n", title(&page.content, &page.url)));
        out.push_str(&format!("{}\n\n", page.url));

        let body = plain_text(&page.content);
        let chars: Vec<char> = body.chars().collect();
        if chars.len() > BODY_LIMIT {
            let truncated: String = chars[..BODY_LIMIT].iter().collect();
            out.push_str(&truncated);
            out.push_str("...");
        } else {
            out.push_str(&body);
        }

        out.push_str("\n\n---\n\n");
    }

    out
}
