// src/extractors/dom.rs
//! Small traversal helpers over `scraper` element trees.

use scraper::{ElementRef, Selector};

/// Concatenated, trimmed text of an element.
pub fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn has_class(element: ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// First descendant matching `selector`.
pub fn select_first<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Elements after `element` in document order, excluding its own descendants.
pub fn following_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let node = *element;
    std::iter::once(node)
        .chain(node.ancestors())
        .flat_map(|n| n.next_siblings())
        .flat_map(|sibling| sibling.descendants())
        .filter_map(ElementRef::wrap)
}

/// Every element after the opening tag of `element`: its descendants, then what follows it.
pub fn elements_after<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .chain(following_elements(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn names<'a>(iter: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
        iter.map(|el| el.value().attr("id").unwrap_or(el.value().name()).to_string())
            .collect()
    }

    #[test]
    fn test_following_and_after() {
        let html = r#"<div id="root"><div id="a"><span id="a1"></span></div><p id="b"></p></div><div id="c"></div>"#;
        let fragment = Html::parse_fragment(html);
        let selector = Selector::parse("#a").unwrap();
        let a = fragment.select(&selector).next().unwrap();

        assert_eq!(names(following_elements(a)), vec!["b", "c"]);
        assert_eq!(names(elements_after(a)), vec!["a1", "b", "c"]);
    }

    #[test]
    fn test_has_class_and_text() {
        let fragment = Html::parse_fragment(r#"<span class="tooltip big"> RC </span>"#);
        let selector = Selector::parse("span").unwrap();
        let span = fragment.select(&selector).next().unwrap();
        assert!(has_class(span, "tooltip"));
        assert!(!has_class(span, "tooltiptext"));
        assert_eq!(element_text(span), "RC");
    }
}
