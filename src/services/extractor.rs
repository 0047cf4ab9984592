// src/services/extractor.rs

//! Single-event extraction.
//!
//! A fragment is one list item of the listing page. Title, link and date
//! come from the first anchor and the first `<strong>`. The labelled fields
//! are found by a label text node: its parent element is the label, and the
//! parent's next sibling element holds the value.
//!
//! ```text
//! <li>
//!   <a href="/wiki/Event:Foo">Foo Bar</a>
//!   <strong>12 May 2024 – 15 May 2024</strong>
//!   <div><span>Event types</span><span>Edit-a-thon, Conference</span></div>
//! </li>
//! ```
//!
//! The labelled fields are a table of [`FieldRule`]s applied in order by one
//! interpreter, so a new field is one more table row.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Event, LabelConfig, UNKNOWN_TITLE};
use crate::utils::{element_text, resolve_url};

/// Event field filled by a labelled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ParticipationOption,
    Country,
    EventTypes,
    Wiki,
    Topics,
    Organizers,
}

impl Field {
    /// Store `value` on `event`.
    ///
    /// Empty values leave the placeholder in place.
    pub fn set(self, event: &mut Event, value: FieldValue) {
        match (self, value) {
            (Self::ParticipationOption, FieldValue::Text(text)) if !text.is_empty() => {
                event.participation_option = text
            }
            (Self::Country, FieldValue::Text(text)) if !text.is_empty() => event.country = text,
            (Self::Wiki, FieldValue::Text(text)) if !text.is_empty() => event.wiki = text,
            (Self::EventTypes, value) => event.event_types = value.into_list(),
            (Self::Topics, value) => event.topics = value.into_list(),
            (Self::Organizers, value) => event.organizers = value.into_list(),
            (field, FieldValue::List(items)) if !items.is_empty() => {
                field.set(event, FieldValue::Text(items.join(", ")))
            }
            _ => {}
        }
    }
}

/// How a value container is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Whole trimmed text
    Text,
    /// Text split on commas, each part trimmed
    CommaList,
    /// Text of every anchor inside the container
    AnchorTexts,
}

impl SplitStrategy {
    fn read(self, container: ElementRef<'_>, anchor_sel: &Selector) -> FieldValue {
        match self {
            Self::Text => FieldValue::Text(element_text(container)),
            Self::CommaList => FieldValue::List(
                element_text(container)
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            Self::AnchorTexts => FieldValue::List(
                container
                    .select(anchor_sel)
                    .map(element_text)
                    .filter(|text| !text.is_empty())
                    .collect(),
            ),
        }
    }
}

/// Value read from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    fn into_list(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Text(text) if text.is_empty() => Vec::new(),
            Self::Text(text) => vec![text],
        }
    }
}

/// One row of the labelled-field table.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: Field,
    pub label: Regex,
    pub split: SplitStrategy,
}

impl FieldRule {
    /// Compile a rule from a label regex.
    pub fn new(field: Field, label: &str, split: SplitStrategy) -> Result<Self> {
        let label = Regex::new(label).map_err(|e| AppError::pattern(label, e))?;
        Ok(Self {
            field,
            label,
            split,
        })
    }

    /// Read this rule's value from a fragment, if its label is present.
    pub fn read(&self, fragment: ElementRef<'_>, anchor_sel: &Selector) -> Option<FieldValue> {
        let container = value_container(fragment, &self.label)?;
        Some(self.split.read(container, anchor_sel))
    }

    /// The standard table, in page order.
    pub fn table(labels: &LabelConfig) -> Result<Vec<Self>> {
        Ok(vec![
            Self::new(
                Field::ParticipationOption,
                &labels.participation,
                SplitStrategy::Text,
            )?,
            Self::new(Field::Country, &labels.country, SplitStrategy::Text)?,
            Self::new(
                Field::EventTypes,
                &labels.event_types,
                SplitStrategy::CommaList,
            )?,
            Self::new(Field::Wiki, &labels.wiki, SplitStrategy::Text)?,
            Self::new(Field::Topics, &labels.topics, SplitStrategy::CommaList)?,
            Self::new(
                Field::Organizers,
                &labels.organizers,
                SplitStrategy::AnchorTexts,
            )?,
        ])
    }
}

/// Find the element holding the value for `label` inside `fragment`.
///
/// First text node matching the label, then its parent, then the parent's
/// next sibling element. A label sitting directly in the fragment root has
/// no value inside the fragment.
fn value_container<'a>(fragment: ElementRef<'a>, label: &Regex) -> Option<ElementRef<'a>> {
    let text_node = fragment
        .descendants()
        .find(|node| node.value().as_text().is_some_and(|t| label.is_match(t)))?;
    let parent = text_node.parent().and_then(ElementRef::wrap)?;
    if parent == fragment {
        return None;
    }
    parent.next_siblings().find_map(ElementRef::wrap)
}

/// Turns one list-item fragment into an [`Event`].
#[derive(Debug, Clone)]
pub struct EventExtractor {
    base_url: Url,
    rules: Vec<FieldRule>,
    anchor_sel: Selector,
    date_sel: Selector,
}

impl EventExtractor {
    /// Create an extractor resolving links against `base_url`.
    pub fn new(base_url: &str, labels: &LabelConfig) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            rules: FieldRule::table(labels)?,
            anchor_sel: parse_selector("a")?,
            date_sel: parse_selector("strong")?,
        })
    }

    /// The labelled-field table in use.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Base URL for relative links.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Extract an event, or `None` if the fragment is malformed.
    ///
    /// Malformed fragments are logged and skipped by callers.
    pub fn extract(&self, fragment: ElementRef<'_>) -> Option<Event> {
        match self.try_extract(fragment) {
            Ok(event) => Some(event),
            Err(e) => {
                log::warn!("Skipping event fragment: {}", e);
                None
            }
        }
    }

    /// Extract from a standalone HTML snippet holding one fragment element.
    pub fn extract_html(&self, html: &str) -> Option<Event> {
        let document = Html::parse_fragment(html);
        match document.root_element().children().find_map(ElementRef::wrap) {
            Some(fragment) => self.extract(fragment),
            None => {
                log::warn!("Skipping event fragment: no element in snippet");
                None
            }
        }
    }

    /// Extract an event, reporting malformed markup as
    /// [`AppError::Extraction`].
    pub fn try_extract(&self, fragment: ElementRef<'_>) -> Result<Event> {
        let mut event = match fragment.select(&self.anchor_sel).next() {
            Some(anchor) => {
                let title = anchor_title(anchor);
                let link = match anchor.value().attr("href") {
                    Some(href) => resolve_url(&self.base_url, href).map_err(|e| {
                        AppError::extraction(format!("unresolvable link '{href}': {e}"))
                    })?,
                    None => String::new(),
                };
                Event::new(title, link)
            }
            None => Event::new(UNKNOWN_TITLE, ""),
        };

        if let Some(date) = fragment.select(&self.date_sel).next() {
            let text = element_text(date);
            if !text.is_empty() {
                event.set_date_range(&text);
            }
        }

        for rule in &self.rules {
            if let Some(value) = rule.read(fragment, &self.anchor_sel) {
                rule.field.set(&mut event, value);
            }
        }

        Ok(event)
    }

    /// Anchor selector shared with the page parser.
    pub(crate) fn anchor_selector(&self) -> &Selector {
        &self.anchor_sel
    }
}

/// Anchor text as an event title, `Unknown Event` when empty.
pub(crate) fn anchor_title(anchor: ElementRef) -> String {
    let title = element_text(anchor);
    if title.is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        title
    }
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::pattern(s, format!("{e:?}")))
}
