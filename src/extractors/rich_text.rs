// src/extractors/rich_text.rs
//! Turns a prose element into ordered text / move / tooltip segments.

use crate::extractors::dom::has_class;
use crate::wiki::models::RichTextSegment;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Node;
use scraper::ElementRef;

/// Colour classes the wiki uses for inline move notation.
const NOTATION_COLOR_CLASSES: [&str; 5] = [
    "colorful-text-1",
    "colorful-text-2",
    "colorful-text-3",
    "colorful-text-4",
    "colorful-text-7",
];

// Template styles leak into `.text()` as raw CSS rules.
static CSS_LEAK_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\.mw-parser-output[^}]+\}",
        r"\.input-container[^}]+\}",
        r"\.delimiter-[^}]+\}",
        r"\.notation-color[^}]+\}",
        r"\.quantifier[^}]+\}",
        r"\.[a-zA-Z-]+\{[^}]+\}",
    ]
    .iter()
    .map(|pat| Regex::new(pat).expect("Failed to compile CSS_LEAK_RE"))
    .collect()
});

// Words the wiki markup splits in two.
static WORD_SPLIT_FIXES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\bfor\s+ced\b", "forced"),
        (r"\bperfor\s+med\b", "performed"),
        (r"\bU\s+niversal\b", "Universal"),
        (r"\bU\s+ses\b", "Uses"),
    ]
    .into_iter()
    .map(|(pat, fix)| (Regex::new(pat).expect("Failed to compile WORD_SPLIT_FIXES"), fix))
    .collect()
});

/// Strips leaked CSS, repairs split words, trims.
pub fn clean_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for re in CSS_LEAK_RE.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }
    for (re, fix) in WORD_SPLIT_FIXES.iter() {
        cleaned = re.replace_all(&cleaned, *fix).into_owned();
    }
    cleaned.trim().to_string()
}

/// Segments for the direct children of `element`, in document order.
pub fn extract_segments(element: ElementRef) -> Vec<RichTextSegment> {
    let mut segments = Vec::new();

    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(&mut segments, &text.text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    push_element(&mut segments, child_el);
                }
            }
            _ => {} // Ignore comments, etc.
        }
    }

    segments
}

fn push_element(segments: &mut Vec<RichTextSegment>, element: ElementRef) {
    let tag = element.value().name();

    if tag == "br" {
        return;
    }

    if tag == "span" && has_class(element, "tooltip") {
        if let Some(segment) = tooltip_segment(element) {
            segments.push(segment);
        }
        return;
    }

    let is_notation = tag == "a"
        || (tag == "span" && NOTATION_COLOR_CLASSES.iter().any(|class| has_class(element, class)));
    if is_notation {
        let cleaned = clean_text(&element.text().collect::<String>());
        if !cleaned.is_empty() {
            segments.push(RichTextSegment::Move(cleaned));
        }
        return;
    }

    push_text(segments, &element.text().collect::<String>());
}

fn push_text(segments: &mut Vec<RichTextSegment>, raw: &str) {
    let cleaned = clean_text(raw);
    if !cleaned.is_empty() {
        segments.push(RichTextSegment::Text(cleaned));
    }
}

/// Visible label plus the nested `tooltiptext` explanation.
fn tooltip_segment(tooltip: ElementRef) -> Option<RichTextSegment> {
    let mut display = String::new();
    for child in tooltip.children() {
        match child.value() {
            Node::Text(text) => display.push_str(&text.text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !is_explanation(child_el) {
                        display.extend(child_el.text());
                    }
                }
            }
            _ => {}
        }
    }
    let display = clean_text(&display);

    let explanation = tooltip
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| is_explanation(*el))
        .map(|el| clean_text(&el.text().collect::<String>()));

    match (display.is_empty(), explanation) {
        (true, _) => None,
        (false, Some(explanation)) => Some(RichTextSegment::Tooltip { display, explanation }),
        (false, None) => Some(RichTextSegment::Text(display)),
    }
}

fn is_explanation(element: ElementRef) -> bool {
    element.value().name() == "span" && has_class(element, "tooltiptext")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn segments_of(inner: &str) -> Vec<RichTextSegment> {
        let html = format!("<div id=\"target\">{}</div>", inner);
        let fragment = Html::parse_fragment(&html);
        let selector = Selector::parse("#target").unwrap();
        let target = fragment.select(&selector).next().unwrap();
        extract_segments(target)
    }

    #[test]
    fn test_tooltip_yields_single_segment() {
        let segments = segments_of(
            r#"<span class="tooltip">RC<span class="tooltiptext">Rapid Cancel</span></span>"#,
        );
        assert_eq!(
            segments,
            vec![RichTextSegment::Tooltip {
                display: "RC".to_string(),
                explanation: "Rapid Cancel".to_string(),
            }]
        );
    }

    #[test]
    fn test_line_break_and_whitespace_yield_nothing() {
        assert!(segments_of("<br>   \n  ").is_empty());
    }

    #[test]
    fn test_mixed_content_keeps_order() {
        let segments = segments_of(
            r#"Links into <span class="colorful-text-2">2M</span> or <a href="/w/x">Dream Attraction</a>.<br><b>Very</b> safe"#,
        );
        assert_eq!(
            segments,
            vec![
                RichTextSegment::Text("Links into".to_string()),
                RichTextSegment::Move("2M".to_string()),
                RichTextSegment::Text("or".to_string()),
                RichTextSegment::Move("Dream Attraction".to_string()),
                RichTextSegment::Text(".".to_string()),
                RichTextSegment::Text("Very".to_string()),
                RichTextSegment::Text("safe".to_string()),
            ]
        );
    }

    #[test]
    fn test_tooltip_without_explanation_degrades_to_text() {
        let segments = segments_of(r#"<span class="tooltip">Raw</span>"#);
        assert_eq!(segments, vec![RichTextSegment::Text("Raw".to_string())]);
    }

    #[test]
    fn test_tooltip_with_empty_display_is_dropped() {
        let segments = segments_of(r#"<span class="tooltip"> <span class="tooltiptext">Orphan</span></span>"#);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_unknown_colour_span_is_plain_text() {
        let segments = segments_of(r#"<span class="colorful-text-5">Guard</span>"#);
        assert_eq!(segments, vec![RichTextSegment::Text("Guard".to_string())]);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(
            clean_text(".mw-parser-output .input{color:red} Jump for ced"),
            "Jump forced"
        );
        assert_eq!(clean_text("  U niversal Overdrive "), "Universal Overdrive");
        assert_eq!(clean_text(".notation-color{color:#fff}5L"), "5L");
        assert_eq!(clean_text("U ses meter"), "Uses meter");
    }
}
