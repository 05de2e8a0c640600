// src/extractors/locator.rs
//! Finds the part of a character page that belongs to one move.
//!
//! Pages are hand-edited, so every step has fallbacks. Each fallback is a
//! plain function in an ordered table; the first one that produces something
//! wins. Scoped matches (inside the requested section) are always tried
//! before the page-wide search.
//!
//! Known imprecision: when a section has no `<section>` wrapper its body is
//! the heading's parent `div`, and a move without an `attack-container` is
//! resolved to its heading's parent or next element. Both can pull in a
//! neighbouring move's content.

// --- Imports ---
use crate::extractors::dom::{element_text, following_elements};
use crate::extractors::notation::Notation;
use crate::utils::error::LocateError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// The subtree attributed to one move. Borrows from the parsed page.
pub type Fragment<'a> = ElementRef<'a>;

// --- CSS Selectors (Lazy Static) ---
static SECTION_HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h2").expect("Failed to compile SECTION_HEADING_SELECTOR")
});

static MOVE_HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h3, h4, h5").expect("Failed to compile MOVE_HEADING_SELECTOR")
});

static ATTACK_CONTAINER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.attack-container").expect("Failed to compile ATTACK_CONTAINER_SELECTOR")
});

/// Section names that are spelled differently across character pages, keyed
/// by normalized label. Alternates are tried in order.
const SECTION_ALTERNATES: &[(&str, &[&str])] = &[(
    "dashnormals",
    &["Dash Attacks", "Dash Moves", "Normal Moves", "Normals", "Command Normals"],
)];

/// Structural fallback: from one element to the element it stands for.
type ElementFallback = for<'a> fn(ElementRef<'a>) -> Option<ElementRef<'a>>;

const BODY_STRATEGIES: &[(&str, ElementFallback)] = &[
    ("sibling <section>", section_sibling),
    ("parent <div>", parent_div),
];

const CONTAINER_STRATEGIES: &[(&str, ElementFallback)] = &[
    ("following attack-container", following_attack_container),
    ("parent <div>", parent_div),
    ("next element", next_element),
];

/// One heading test, given the raw heading text and what we are looking for.
type HeadingTest = fn(&HeadingQuery<'_>, &str) -> bool;

const SCOPED_HEADING_TESTS: &[(&str, HeadingTest)] = &[
    ("exact text", exact_text),
    ("normalized key", normalized_key),
    ("special notation", special_notation_in_heading),
    ("special move name", special_name_in_heading),
];

const GLOBAL_HEADING_TESTS: &[(&str, HeadingTest)] = &[
    ("exact text", exact_text),
    ("normalized key", normalized_key),
    ("substring", raw_substring),
];

/// What a heading is being compared against.
struct HeadingQuery<'n> {
    raw: String,
    key: String,
    notation: &'n Notation,
}

impl<'n> HeadingQuery<'n> {
    fn new(raw: &str, notation: &'n Notation) -> Self {
        Self {
            raw: raw.trim().to_string(),
            key: notation.normalize(raw),
            notation,
        }
    }
}

enum Attempt<'s> {
    Section(&'s str),
    Global,
}

// --- Main Locator Structure ---
pub struct Locator<'n> {
    notation: &'n Notation,
}

impl<'n> Locator<'n> {
    pub fn new(notation: &'n Notation) -> Self {
        Self { notation }
    }

    /// Finds the fragment for `subsection` within `section`, falling back to
    /// alternate section names and finally to a page-wide heading search.
    pub fn locate<'a>(
        &self,
        document: &'a Html,
        section: &str,
        subsection: &str,
    ) -> Result<Fragment<'a>, LocateError> {
        tracing::debug!("Looking for section '{}' and subsection '{}'", section, subsection);

        let query = HeadingQuery::new(subsection, self.notation);
        tracing::debug!("Normalized subsection name: {}", query.key);

        let section_key = self.notation.normalize(section);
        let alternates = SECTION_ALTERNATES
            .iter()
            .find(|(key, _)| *key == section_key)
            .map(|(_, names)| *names)
            .unwrap_or(&[]);

        let attempts = std::iter::once(Attempt::Section(section))
            .chain(alternates.iter().map(|name| Attempt::Section(*name)))
            .chain(std::iter::once(Attempt::Global));

        for attempt in attempts {
            let found = match attempt {
                Attempt::Section(name) => match self.locate_in_section(document, name, &query) {
                    Ok(fragment) => Some(fragment),
                    Err(e) => {
                        tracing::debug!("Scoped lookup failed: {}", e);
                        None
                    }
                },
                Attempt::Global => {
                    tracing::debug!("Trying to find subsection '{}' anywhere on the page", subsection);
                    self.locate_anywhere(document, &query)
                }
            };
            if let Some(fragment) = found {
                return Ok(fragment);
            }
        }

        tracing::error!("Could not find '{}' in '{}' or anywhere else", subsection, section);
        Err(LocateError::NotFound {
            section: section.to_string(),
            subsection: subsection.to_string(),
        })
    }

    /// Section heading, then its body, then the move heading, then its container.
    fn locate_in_section<'a>(
        &self,
        document: &'a Html,
        section: &str,
        query: &HeadingQuery,
    ) -> Result<Fragment<'a>, LocateError> {
        let section_key = self.notation.normalize(section);
        let header = document
            .select(&SECTION_HEADING_SELECTOR)
            .find(|h2| self.notation.normalize(&element_text(*h2)) == section_key)
            .ok_or_else(|| LocateError::SectionNotFound(section.to_string()))?;

        let subsection_missing = || LocateError::SubsectionNotFound {
            section: section.to_string(),
            subsection: query.raw.clone(),
        };

        let body = first_success(header, BODY_STRATEGIES, "section body").ok_or_else(subsection_missing)?;

        let headings: Vec<ElementRef<'a>> = body.select(&MOVE_HEADING_SELECTOR).collect();
        tracing::debug!("Found {} possible move headers in '{}'", headings.len(), section);

        let target = headings
            .into_iter()
            .find(|heading| matches_heading(*heading, query, SCOPED_HEADING_TESTS))
            .ok_or_else(subsection_missing)?;

        first_success(target, CONTAINER_STRATEGIES, "move container").ok_or_else(subsection_missing)
    }

    /// Last resort: any move heading on the page, regardless of section. A
    /// matching heading whose container can't be resolved is skipped.
    fn locate_anywhere<'a>(&self, document: &'a Html, query: &HeadingQuery) -> Option<Fragment<'a>> {
        document
            .select(&MOVE_HEADING_SELECTOR)
            .filter(|heading| matches_heading(*heading, query, GLOBAL_HEADING_TESTS))
            .find_map(|heading| first_success(heading, CONTAINER_STRATEGIES, "move container"))
    }
}

fn first_success<'a>(
    start: ElementRef<'a>,
    strategies: &[(&str, ElementFallback)],
    what: &str,
) -> Option<ElementRef<'a>> {
    strategies.iter().find_map(|(name, strategy)| {
        let found = strategy(start);
        if found.is_some() {
            tracing::debug!("Resolved {} via {}", what, name);
        }
        found
    })
}

fn matches_heading(heading: ElementRef, query: &HeadingQuery, tests: &[(&str, HeadingTest)]) -> bool {
    let text = element_text(heading);
    tracing::trace!("Checking header: '{}'", text);
    match tests.iter().find(|(_, test)| test(query, &text)) {
        Some((name, _)) => {
            tracing::debug!("Found match ({}): {}", name, text);
            true
        }
        None => false,
    }
}

// --- Heading tests ---

fn exact_text(query: &HeadingQuery, heading: &str) -> bool {
    heading == query.raw
}

fn normalized_key(query: &HeadingQuery, heading: &str) -> bool {
    query.notation.normalize(heading) == query.key
}

fn special_notation_in_heading(query: &HeadingQuery, heading: &str) -> bool {
    query.notation.special_phrases(&query.key).is_some()
        && query.notation.normalize(heading).contains(query.key.as_str())
}

fn special_name_in_heading(query: &HeadingQuery, heading: &str) -> bool {
    let heading = heading.to_lowercase();
    query
        .notation
        .special_phrases(&query.key)
        .is_some_and(|phrases| phrases.iter().any(|phrase| heading.contains(phrase)))
}

fn raw_substring(query: &HeadingQuery, heading: &str) -> bool {
    !query.raw.is_empty() && heading.to_lowercase().contains(&query.raw.to_lowercase())
}

// --- Structural fallbacks ---

fn section_sibling(header: ElementRef) -> Option<ElementRef> {
    header
        .next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "section")
}

fn parent_div(element: ElementRef) -> Option<ElementRef> {
    element
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|el| el.value().name() == "div")
}

fn following_attack_container(header: ElementRef) -> Option<ElementRef> {
    following_elements(header).find(|el| ATTACK_CONTAINER_SELECTOR.matches(el))
}

fn next_element(header: ElementRef) -> Option<ElementRef> {
    following_elements(header).next()
}
