// src/services/parser.rs

//! Listing page parser.
//!
//! Primary strategy: every `<li>` holding an event-namespace link is a
//! fragment for the [`EventExtractor`]. When that finds nothing, the event
//! links inside the body content container become bare events.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{Config, Event, SourceConfig};
use crate::services::extractor::{EventExtractor, anchor_title, parse_selector};
use crate::utils::resolve_url;

/// Parses a listing document into events, in document order.
#[derive(Debug, Clone)]
pub struct PageParser {
    extractor: EventExtractor,
    event_link: Regex,
    item_sel: Selector,
    content_sels: Vec<Selector>,
}

impl PageParser {
    /// Create a parser from the full configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let extractor = EventExtractor::new(&config.source.url, &config.labels)?;
        Self::with_extractor(extractor, &config.source)
    }

    /// Create a parser around an existing extractor.
    pub fn with_extractor(extractor: EventExtractor, source: &SourceConfig) -> Result<Self> {
        let event_link = Regex::new(&source.event_link_pattern)
            .map_err(|e| AppError::pattern(&source.event_link_pattern, e))?;

        let content_sels = source
            .content_ids
            .iter()
            .map(|id| format!("div[id=\"{id}\"]"))
            .chain(
                source
                    .content_classes
                    .iter()
                    .map(|class| format!("div[class~=\"{class}\"]")),
            )
            .map(|s| parse_selector(&s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extractor,
            event_link,
            item_sel: parse_selector("li")?,
            content_sels,
        })
    }

    /// The fragment extractor.
    pub fn extractor(&self) -> &EventExtractor {
        &self.extractor
    }

    /// Parse raw HTML into events.
    pub fn parse(&self, html: &str) -> Vec<Event> {
        let document = Html::parse_document(html);
        self.parse_document(&document)
    }

    /// Parse an already built document.
    pub fn parse_document(&self, document: &Html) -> Vec<Event> {
        let events = self.parse_list_items(document);
        if !events.is_empty() {
            return events;
        }

        log::warn!("No events found with primary method, trying alternative parsing...");
        self.parse_content_links(document)
    }

    /// Primary strategy: extract each list item holding an event link.
    fn parse_list_items(&self, document: &Html) -> Vec<Event> {
        document
            .select(&self.item_sel)
            .filter(|item| self.event_links(*item).next().is_some())
            .filter_map(|item| self.extractor.extract(item))
            .filter(|event| {
                if event.has_unknown_title() {
                    log::debug!("Discarding fragment without a title");
                    false
                } else {
                    true
                }
            })
            .collect()
    }

    /// Fallback strategy: one bare event per event link in the content area.
    fn parse_content_links(&self, document: &Html) -> Vec<Event> {
        let Some(content) = self.content_container(document) else {
            log::warn!("No body content container found");
            return Vec::new();
        };

        self.event_links(content)
            .filter_map(|anchor| {
                let href = anchor.value().attr("href").unwrap_or_default();
                match resolve_url(self.extractor.base_url(), href) {
                    Ok(link) => Some(Event::new(anchor_title(anchor), link)),
                    Err(e) => {
                        log::warn!("Skipping event link '{}': {}", href, e);
                        None
                    }
                }
            })
            .collect()
    }

    fn content_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        self.content_sels
            .iter()
            .find_map(|sel| document.select(sel).next())
    }

    fn event_links<'a>(&'a self, scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        scope.select(self.extractor.anchor_selector()).filter(|anchor| {
            anchor
                .value()
                .attr("href")
                .is_some_and(|href| self.event_link.is_match(href))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UNKNOWN, UNKNOWN_TITLE, event_id};

    fn parser() -> PageParser {
        PageParser::new(&Config::default()).unwrap()
    }

    const LISTING: &str = r#"
        <html><body>
        <div id="bodyContent">
          <ul class="nav"><li><a href="/wiki/Mwanzo">Mwanzo</a></li></ul>
          <ul>
            <li>
              <a href="/wiki/Event:Foo">Foo Bar</a>
              <strong>12 May 2024 – 15 May 2024</strong>
              <div><span>Event types</span><span>Edit-a-thon, Conference</span></div>
            </li>
            <li>
              <a href="/wiki/Event:Baz">Baz</a>
              <div><span>Country</span><span>Uganda</span></div>
            </li>
            <li>
              <a href="/wiki/Event:Foo">Foo Bar</a>
            </li>
          </ul>
        </div>
        </body></html>"#;

    #[test]
    fn test_primary_strategy_in_document_order() {
        let events = parser().parse(LISTING);
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Foo Bar", "Baz", "Foo Bar"]);

        let foo = &events[0];
        assert_eq!(foo.link, "https://sw.wikipedia.org/wiki/Event:Foo");
        assert_eq!(foo.start_date, "12 May 2024");
        assert_eq!(foo.end_date, "15 May 2024");
        assert_eq!(foo.event_types, vec!["Edit-a-thon", "Conference"]);
        assert_eq!(events[1].country, "Uganda");
    }

    #[test]
    fn test_duplicate_titles_are_kept_with_same_id() {
        let events = parser().parse(LISTING);
        assert_eq!(events[0].id, events[2].id);
        assert_eq!(events[0].id, event_id("Foo Bar"));
    }

    #[test]
    fn test_untitled_candidates_are_discarded() {
        let html = r#"
            <ul>
              <li><a href="/wiki/Event:Empty"> </a></li>
              <li><a href="/wiki/Event:Real">Real</a></li>
            </ul>"#;
        let events = parser().parse(html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Real");
    }

    #[test]
    fn test_fallback_synthesizes_bare_events() {
        let html = r#"
            <html><body>
            <div class="mw-body-content extra">
              <p>Matukio: <a href="/wiki/Event:One">One</a> na
                 <a href="/wiki/Event:Two">Two</a>
                 <a href="/wiki/Other">Other</a></p>
            </div>
            </body></html>"#;
        let events = parser().parse(html);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "One");
        assert_eq!(events[0].link, "https://sw.wikipedia.org/wiki/Event:One");
        assert_eq!(events[1].title, "Two");
        for event in &events {
            assert_eq!(event.start_date, UNKNOWN);
            assert_eq!(event.end_date, UNKNOWN);
            assert_eq!(event.date_range, UNKNOWN);
            assert_eq!(event.participation_option, UNKNOWN);
            assert_eq!(event.country, UNKNOWN);
            assert_eq!(event.wiki, UNKNOWN);
            assert!(event.event_types.is_empty());
            assert!(event.topics.is_empty());
            assert!(event.organizers.is_empty());
        }
    }

    #[test]
    fn test_fallback_image_link_gets_unknown_title() {
        let html = r#"
            <div id="bodyContent">
              <a href="/wiki/Event:Picha"><img src="/banner.png" alt=""></a>
            </div>"#;
        let events = parser().parse(html);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, UNKNOWN_TITLE);
        assert_eq!(events[0].link, "https://sw.wikipedia.org/wiki/Event:Picha");
        assert_eq!(events[0].id, event_id(UNKNOWN_TITLE));
    }

    #[test]
    fn test_fallback_prefers_id_container() {
        let html = r#"
            <div class="mw-body-content"><a href="/wiki/Event:ByClass">ByClass</a></div>
            <div id="bodyContent"><a href="/wiki/Event:ById">ById</a></div>"#;
        let events = parser().parse(html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "ById");
    }

    #[test]
    fn test_no_container_no_events() {
        let html = r#"<p><a href="/wiki/Event:Loose">Loose</a></p>"#;
        assert!(parser().parse(html).is_empty());
    }

    #[test]
    fn test_malformed_fragment_does_not_abort_page() {
        let html = r#"
            <ul>
              <li><a href="http://[oops/wiki/Event:Bad">Bad</a></li>
              <li><a href="/wiki/Event:Good">Good</a></li>
            </ul>"#;
        let events = parser().parse(html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Good");
    }

    #[test]
    fn test_custom_link_pattern() {
        let mut config = Config::default();
        config.source.event_link_pattern = r"/wiki/Tukio:".to_string();
        let parser = PageParser::new(&config).unwrap();

        let html = r#"<ul><li><a href="/wiki/Tukio:X">X</a></li><li><a href="/wiki/Event:Y">Y</a></li></ul>"#;
        let events = parser.parse(html);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "X");
    }
}
