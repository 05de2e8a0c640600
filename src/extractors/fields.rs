// src/extractors/fields.rs
//! Per-field extraction from a located move fragment.
//!
//! None of these fail: a missing element just leaves the field empty.

use crate::extractors::dom::{element_text, elements_after, select_first};
use crate::extractors::rich_text::extract_segments;
use crate::wiki::models::{FieldMap, RichTextSegment, UsageEntry, UsageKind};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// Column order of the frame data grid's first data row.
pub const FRAME_DATA_FIELDS: [&str; 8] = [
    "Damage", "Guard", "Startup", "Active", "Recovery", "On-Block", "On-Hit", "Invuln",
];

pub const TOTAL_FRAMES_KEY: &str = "total_frames";
pub const COUNTER_HIT_KEY: &str = "On-Counter Hit";

// --- CSS Selectors (Lazy Static) ---
static GRID_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.frameDataGrid").expect("Failed to compile GRID_SELECTOR")
});

static GRID_HEADER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.frameDataGridHeader").expect("Failed to compile GRID_HEADER_SELECTOR")
});

static GRID_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.frameDataGridRow").expect("Failed to compile GRID_ROW_SELECTOR")
});

static DIV_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div").expect("Failed to compile DIV_SELECTOR")
});

static ATTACK_INFO_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.attack-info").expect("Failed to compile ATTACK_INFO_SELECTOR")
});

static INFO_BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.attack-info-body").expect("Failed to compile INFO_BODY_SELECTOR")
});

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr").expect("Failed to compile ROW_SELECTOR")
});

static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td").expect("Failed to compile CELL_SELECTOR")
});

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p").expect("Failed to compile PARAGRAPH_SELECTOR")
});

static LIST_ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("li").expect("Failed to compile LIST_ITEM_SELECTOR")
});

static TOTAL_VALUE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.frame-data-total-value").expect("Failed to compile TOTAL_VALUE_SELECTOR")
});

static TOTAL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.frame-data-total").expect("Failed to compile TOTAL_SELECTOR")
});

static CHART_SECTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.frameChartSection").expect("Failed to compile CHART_SECTION_SELECTOR")
});

static CHART_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.frameChart").expect("Failed to compile CHART_SELECTOR")
});

static CHART_BARS: Lazy<[(&'static str, Selector); 3]> = Lazy::new(|| {
    [
        ("startup_width", Selector::parse("div.frameChart-startup").expect("Failed to compile CHART_BARS")),
        ("active_width", Selector::parse("div.frameChart-active").expect("Failed to compile CHART_BARS")),
        ("recovery_width", Selector::parse("div.frameChart-recovery").expect("Failed to compile CHART_BARS")),
    ]
});

// --- Regex Patterns (Lazy Static) ---
static SIGNED_INT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[+-]\d+").expect("Failed to compile SIGNED_INT_RE")
});

static FRAME_DATA_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)frame data").expect("Failed to compile FRAME_DATA_LABEL_RE")
});

/// The eight standard stats from the frame data grid, or a free-form
/// label/value table when the page has no grid.
pub fn extract_frame_data(fragment: ElementRef) -> FieldMap {
    let mut frame_data = FieldMap::new();

    if let Some(grid) = select_first(fragment, &GRID_SELECTOR) {
        if let Some(header_row) = select_first(grid, &GRID_HEADER_SELECTOR) {
            let headers: Vec<String> = header_row.select(&DIV_SELECTOR).map(element_text).collect();
            tracing::debug!("Frame data headers: {:?}", headers);
        }

        if let Some(row) = select_first(grid, &GRID_ROW_SELECTOR) {
            let cells: Vec<String> = row.select(&DIV_SELECTOR).map(element_text).collect();
            if cells.len() >= FRAME_DATA_FIELDS.len() {
                for (name, value) in FRAME_DATA_FIELDS.iter().zip(cells) {
                    frame_data.insert(name.to_string(), value);
                }
            } else {
                tracing::warn!("Frame data row has {} cells, expected {}", cells.len(), FRAME_DATA_FIELDS.len());
            }
        }
    }

    if frame_data.is_empty() {
        frame_data = extract_frame_data_table(fragment);
    }

    frame_data
}

/// Fallback layout: a "Frame Data" label followed by a two-column table.
fn extract_frame_data_table(fragment: ElementRef) -> FieldMap {
    let mut frame_data = FieldMap::new();

    let Some(attack_info) = select_first(fragment, &ATTACK_INFO_SELECTOR) else {
        return frame_data;
    };
    let Some(label) = attack_info
        .select(&DIV_SELECTOR)
        .find(|div| FRAME_DATA_LABEL_RE.is_match(&own_text(*div)))
    else {
        return frame_data;
    };
    let Some(table) = elements_after(label).find(|el| el.value().name() == "table") else {
        return frame_data;
    };

    tracing::debug!("Using labelled frame data table");
    for row in table.select(&ROW_SELECTOR) {
        let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
        if let [key, value, ..] = cells.as_slice() {
            frame_data.insert(element_text(*key), element_text(*value));
        }
    }

    frame_data
}

/// Text of an element's direct text children only.
fn own_text(element: ElementRef) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| t.to_string()))
        .collect()
}

/// Total frames plus the three bar widths of the frame chart.
pub fn extract_frame_chart(fragment: ElementRef) -> FieldMap {
    let mut chart = FieldMap::new();

    if let Some(total) = select_first(fragment, &TOTAL_VALUE_SELECTOR) {
        chart.insert(TOTAL_FRAMES_KEY.to_string(), element_text(total));
    }

    let Some(chart_section) = select_first(fragment, &CHART_SECTION_SELECTOR) else {
        return chart;
    };
    let Some(frame_chart) = select_first(chart_section, &CHART_SELECTOR) else {
        return chart;
    };

    for (key, bar_selector) in CHART_BARS.iter() {
        if let Some(bar) = select_first(frame_chart, bar_selector) {
            let width = bar.value().attr("style").and_then(style_width).unwrap_or_default();
            chart.insert(key.to_string(), width);
        }
    }

    if !chart.contains_key(TOTAL_FRAMES_KEY) {
        if let Some(total) = select_first(chart_section, &TOTAL_SELECTOR)
            .and_then(|total_div| select_first(total_div, &TOTAL_VALUE_SELECTOR))
        {
            chart.insert(TOTAL_FRAMES_KEY.to_string(), element_text(total));
        }
    }

    chart
}

/// The value between `width:` and the next `;` of an inline style.
pub fn style_width(style: &str) -> Option<String> {
    let (_, rest) = style.split_once("width:")?;
    let value = rest.split(';').next().unwrap_or(rest);
    Some(value.trim().to_string())
}

/// Counter-hit advantage, read from the text after a "Counter Hit" label or
/// from the last "Counter" row of the frame data grid.
pub fn extract_additional_data(fragment: ElementRef) -> FieldMap {
    let mut additional = FieldMap::new();

    let Some(attack_info) = select_first(fragment, &ATTACK_INFO_SELECTOR) else {
        return additional;
    };

    let labelled = attack_info
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| el.text().collect::<String>().contains("Counter Hit"))
        .find_map(|label| {
            let value = elements_after(label).find(|el| el.value().name() == "div")?;
            signed_int(&element_text(value))
        });
    if let Some(value) = labelled {
        additional.insert(COUNTER_HIT_KEY.to_string(), value);
        return additional;
    }

    if let Some(grid) = select_first(attack_info, &GRID_SELECTOR) {
        for row in grid.select(&GRID_ROW_SELECTOR) {
            let cells: Vec<ElementRef> = row.select(&DIV_SELECTOR).collect();
            if let [label, value, ..] = cells.as_slice() {
                if element_text(*label).contains("Counter") {
                    let raw = element_text(*value);
                    additional.insert(COUNTER_HIT_KEY.to_string(), signed_int(&raw).unwrap_or(raw));
                }
            }
        }
    }

    additional
}

fn signed_int(text: &str) -> Option<String> {
    SIGNED_INT_RE.find(text).map(|m| m.as_str().to_string())
}

/// The first paragraph of the move description.
pub fn extract_overview(fragment: ElementRef) -> Vec<Vec<RichTextSegment>> {
    select_first(fragment, &INFO_BODY_SELECTOR)
        .and_then(|body| select_first(body, &PARAGRAPH_SELECTOR))
        .map(|first| vec![extract_segments(first)])
        .unwrap_or_default()
}

/// Every other paragraph and list item of the description, in order.
pub fn extract_usage(fragment: ElementRef) -> Vec<UsageEntry> {
    let mut usage = Vec::new();

    let Some(body) = select_first(fragment, &INFO_BODY_SELECTOR) else {
        return usage;
    };
    // Already used as the overview
    let overview_id = select_first(body, &PARAGRAPH_SELECTOR).map(|p| p.id());

    for child in body.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "p" if Some(child.id()) != overview_id => usage.push(UsageEntry {
                kind: UsageKind::Paragraph,
                segments: extract_segments(child),
            }),
            "ul" | "ol" => {
                for item in child.select(&LIST_ITEM_SELECTOR) {
                    usage.push(UsageEntry {
                        kind: UsageKind::ListItem,
                        segments: extract_segments(item),
                    });
                }
            }
            _ => {}
        }
    }

    usage
}
