// src/extractors/outline.rs
use crate::extractors::dom::element_text;
use crate::wiki::models::PageOutline;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static SECTION_HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h2").expect("Failed to compile SECTION_HEADING_SELECTOR")
});

static MOVE_HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h3, h4, h5").expect("Failed to compile MOVE_HEADING_SELECTOR")
});

// Numbered headings ("1", "2.1") are page structure, not moves.
static NUMERIC_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9.]+$").expect("Failed to compile NUMERIC_HEADING_RE")
});

const SKIPPED_SECTIONS: [&str; 2] = ["Navigation", "Contents"];

/// Every section on the page with the move headings listed under it.
pub fn outline(document: &Html) -> PageOutline {
    let mut sections = PageOutline::new();

    for header in document.select(&SECTION_HEADING_SELECTOR) {
        let name = element_text(header);
        if name.is_empty() || SKIPPED_SECTIONS.contains(&name.as_str()) {
            continue;
        }

        let moves: Vec<String> = section_move_headings(header)
            .into_iter()
            .map(element_text)
            .filter(|text| !text.is_empty() && !NUMERIC_HEADING_RE.is_match(text))
            .collect();

        tracing::debug!("Section '{}' lists {} moves", name, moves.len());
        sections.insert(name, moves);
    }

    sections
}

/// Move headings under a section heading: inside its `<section>` sibling when
/// there is one, else among the siblings up to the next `h2`.
fn section_move_headings(header: ElementRef) -> Vec<ElementRef> {
    let mut siblings = header.next_siblings().filter_map(ElementRef::wrap).peekable();

    if let Some(section) = siblings.peek().filter(|el| el.value().name() == "section") {
        return section.select(&MOVE_HEADING_SELECTOR).collect();
    }

    let mut headings = Vec::new();
    for sibling in siblings.take_while(|el| el.value().name() != "h2") {
        if MOVE_HEADING_SELECTOR.matches(&sibling) {
            headings.push(sibling);
        }
        headings.extend(sibling.select(&MOVE_HEADING_SELECTOR));
    }
    headings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_with_and_without_section_wrappers() {
        let html = r#"<html><body>
            <h2>Contents</h2>
            <ul><li>1 Normal Moves</li></ul>
            <h2>Normal Moves</h2>
            <section>
                <h3>5L</h3><div class="attack-container"></div>
                <h4>2.1</h4>
                <h3>c.M</h3>
            </section>
            <h2>Special Moves</h2>
            <h3>Dream Attraction</h3>
            <div><h4>Ring the Dormouse</h4></div>
            <h2>Universal Mechanics</h2>
            <p>No moves here.</p>
        </body></html>"#;
        let document = Html::parse_document(html);
        let outline = outline(&document);

        assert_eq!(
            outline.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Normal Moves", "Special Moves", "Universal Mechanics"]
        );
        assert_eq!(outline.get("Normal Moves").unwrap(), &vec!["5L".to_string(), "c.M".to_string()]);
        assert_eq!(
            outline.get("Special Moves").unwrap(),
            &vec!["Dream Attraction".to_string(), "Ring the Dormouse".to_string()]
        );
        assert!(outline.get("Universal Mechanics").unwrap().is_empty());
    }

    #[test]
    fn test_outline_serializes_as_ordered_object() {
        let document = Html::parse_document("<h2>Throws</h2><section><h3>Throw</h3></section>");
        let json = serde_json::to_string(&outline(&document)).unwrap();
        assert_eq!(json, r#"{"Throws":["Throw"]}"#);
    }
}
