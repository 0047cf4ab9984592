//! Utility functions and helpers.

pub mod http;

use scraper::ElementRef;
use url::Url;

use crate::error::Result;

/// Resolve a potentially relative href against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> Result<String> {
    Ok(base.join(href.trim())?.to_string())
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-normalized text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://sw.wikipedia.org/wiki/Maalum:AllEvents").unwrap();
        assert_eq!(
            resolve_url(&base, "/wiki/Event:Foo").unwrap(),
            "https://sw.wikipedia.org/wiki/Event:Foo"
        );
        assert_eq!(
            resolve_url(&base, "https://meta.wikimedia.org/wiki/Event:Bar").unwrap(),
            "https://meta.wikimedia.org/wiki/Event:Bar"
        );
        assert!(resolve_url(&base, "http://[oops/wiki/Event:X").is_err());
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Edit-a-thon,\n   Conference "), "Edit-a-thon, Conference");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_element_text_joins_children() {
        let html = Html::parse_fragment("<p> Nairobi <b>Kenya</b>\n</p>");
        let sel = Selector::parse("p").unwrap();
        let p = html.select(&sel).next().unwrap();
        assert_eq!(element_text(p), "Nairobi Kenya");
    }
}
