// tests/end_to_end.rs
//
// Drives the public API from raw page bytes to a filtered listing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wiki_events::error::Result;
use wiki_events::models::{Config, UNKNOWN, event_id};
use wiki_events::services::{EventFilter, EventStore, load_listing};
use wiki_events::utils::http::Fetcher;

const LISTING: &str = r#"<!DOCTYPE html>
<html lang="sw">
<head><title>Matukio yote</title></head>
<body>
<div id="content">
  <div id="bodyContent" class="vector-body">
    <ul class="ext-campaignevents-allevents-list">
      <li class="ext-campaignevents-allevents-event">
        <a href="/wiki/Event:Foo">Foo Bar</a>
        <strong>12 May 2024 – 15 May 2024</strong>
        <div class="meta">
          <div><span>Participation options</span><span>Mtandaoni na ana kwa ana</span></div>
          <div><span>Country</span><span>Kenya</span></div>
          <div><span>Event types</span><span>Edit-a-thon, Conference</span></div>
          <div><span>Wiki</span><span>Wikipedia ya Kiswahili</span></div>
          <div><span>Mada</span><span>Afya, Elimu</span></div>
          <div><span>Waandaaji</span><span><a href="/wiki/User:Amina">Amina</a> <a href="/wiki/User:Baraka">Baraka</a></span></div>
        </div>
      </li>
      <li class="ext-campaignevents-allevents-event">
        <a href="/wiki/Event:Warsha_Dodoma">Warsha Dodoma</a>
        <strong>3 June 2024</strong>
        <div class="meta">
          <div><span>Participation options</span><span>Ana kwa ana</span></div>
          <div><span>Event types</span><span>Workshop</span></div>
        </div>
      </li>
    </ul>
  </div>
</div>
</body>
</html>"#;

struct PageFetcher {
    page: &'static str,
    calls: AtomicUsize,
}

impl Fetcher for PageFetcher {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.page.as_bytes().to_vec())
    }
}

fn store(page: &'static str) -> (Arc<PageFetcher>, EventStore<Arc<PageFetcher>>) {
    let fetcher = Arc::new(PageFetcher {
        page,
        calls: AtomicUsize::new(0),
    });
    let store = EventStore::with_fetcher(Arc::clone(&fetcher), &Config::default()).unwrap();
    (fetcher, store)
}

#[test]
fn scrapes_full_listing() {
    let (fetcher, store) = store(LISTING);
    let events = store.get_all_events().unwrap();

    assert_eq!(events.len(), 2);
    let foo = &events[0];
    assert_eq!(foo.title, "Foo Bar");
    assert_eq!(foo.link, "https://sw.wikipedia.org/wiki/Event:Foo");
    assert_eq!(foo.start_date, "12 May 2024");
    assert_eq!(foo.end_date, "15 May 2024");
    assert_eq!(foo.event_types, vec!["Edit-a-thon", "Conference"]);
    assert_eq!(foo.wiki, "Wikipedia ya Kiswahili");
    assert_eq!(foo.organizers, vec!["Amina", "Baraka"]);
    assert_eq!(foo.id, event_id("Foo Bar"));

    let warsha = &events[1];
    assert_eq!(warsha.start_date, "3 June 2024");
    assert_eq!(warsha.end_date, "3 June 2024");
    assert_eq!(warsha.country, UNKNOWN);
    assert_eq!(warsha.event_types, vec!["Workshop"]);

    store.get_all_events().unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn lookup_by_id_and_filter() {
    let (_, store) = store(LISTING);

    let warsha = store.get_event_by_id(event_id("Warsha Dodoma")).unwrap();
    assert_eq!(warsha.participation_option, "Ana kwa ana");

    let config = Config::default();
    let hybrid = EventFilter::from_params(None, None, Some("hybrid"), None);
    let listing = load_listing(&store, &hybrid, &config.filter);
    assert_eq!(listing.total, 1);
    assert_eq!(listing.events[0].title, "Foo Bar");
    assert_eq!(listing.facets.event_types, vec!["Conference", "Edit-a-thon", "Workshop"]);
}

#[test]
fn falls_back_to_content_links() {
    const BARE: &str = r#"<html><body>
        <div id="bodyContent">
          <p>Tazama <a href="/wiki/Event:Alpha">Alpha</a> na <a href="/wiki/Event:Beta">Beta</a>.</p>
        </div></body></html>"#;
    let (_, store) = store(BARE);

    let events = store.get_all_events().unwrap();
    let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
    assert!(events.iter().all(|e| e.country == UNKNOWN && e.topics.is_empty()));
}
