// src/scrape.rs
//! Fetch -> locate -> extract -> assemble, with every failure mapped to a `ScrapeError`.

use crate::extractors::fields::{
    extract_additional_data, extract_frame_chart, extract_frame_data, extract_overview, extract_usage,
};
use crate::extractors::images::extract_images;
use crate::extractors::locator::{Fragment, Locator};
use crate::extractors::notation::Notation;
use crate::extractors::outline::outline;
use crate::utils::error::ScrapeError;
use crate::wiki::client::PageSource;
use crate::wiki::config::ScrapeConfig;
use crate::wiki::models::{MoveRecord, PageOutline};
use scraper::Html;
use serde::Serialize;

pub struct MoveScraper<S> {
    source: S,
    notation: &'static Notation,
    base_url: String,
}

impl<S: PageSource> MoveScraper<S> {
    pub fn new(source: S, config: &ScrapeConfig) -> Self {
        Self {
            source,
            notation: Notation::standard(),
            base_url: config.base_url.clone(),
        }
    }

    /// Scrapes one move of one character.
    pub async fn scrape(
        &self,
        character: &str,
        section: &str,
        subsection: &str,
    ) -> Result<MoveRecord, ScrapeError> {
        tracing::info!("Scraping data for {} - {} {}", character, section, subsection);

        let html = self.source.fetch_page(character).await?;
        tracing::info!("Fetched character page ({} bytes)", html.len());

        self.scrape_html(character, &html, section, subsection)
    }

    /// Locate and extract on an already-fetched page.
    pub fn scrape_html(
        &self,
        character: &str,
        html: &str,
        section: &str,
        subsection: &str,
    ) -> Result<MoveRecord, ScrapeError> {
        let document = Html::parse_document(html);

        let fragment = Locator::new(self.notation)
            .locate(&document, section, subsection)
            .map_err(|e| {
                tracing::error!("Could not find content for {}'s {} {}: {}", character, section, subsection, e);
                ScrapeError::NotFound {
                    character: character.to_string(),
                    section: section.to_string(),
                    subsection: subsection.to_string(),
                }
            })?;

        let record = extract_record(fragment, &self.base_url);
        tracing::debug!("Frame data fields: {:?}", record.frame_data.keys().collect::<Vec<_>>());

        if record.has_no_primary_data() {
            tracing::warn!("No data extracted for {}'s {}", character, subsection);
            return Err(ScrapeError::NoData {
                character: character.to_string(),
                subsection: subsection.to_string(),
            });
        }

        tracing::info!(
            "Extracted {} frame data fields, {} overview and {} usage entries for {}'s {}",
            record.frame_data.len(),
            record.overview.len(),
            record.usage.len(),
            character,
            subsection
        );
        Ok(record)
    }

    /// Sections and move headings of a character page.
    pub async fn outline(&self, character: &str) -> Result<PageOutline, ScrapeError> {
        tracing::info!("Building page outline for {}", character);
        let html = self.source.fetch_page(character).await?;
        Ok(outline(&Html::parse_document(&html)))
    }
}

/// Runs every field extractor over the fragment.
pub fn extract_record(fragment: Fragment, base_url: &str) -> MoveRecord {
    let images = extract_images(fragment, base_url);
    MoveRecord {
        frame_data: extract_frame_data(fragment),
        frame_chart: extract_frame_chart(fragment),
        additional_data: extract_additional_data(fragment),
        overview: extract_overview(fragment),
        usage: extract_usage(fragment),
        image_url: images.standard,
        hitbox_url: images.hitbox,
    }
}

/// The single JSON object printed for a result: the value itself, or `{"error": ...}`.
pub fn render_result<T: Serialize>(result: Result<T, ScrapeError>) -> serde_json::Value {
    let result = result.and_then(|value| {
        serde_json::to_value(value).map_err(|e| ScrapeError::Extraction(e.to_string()))
    });
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("{}", e);
            serde_json::json!({ "error": e.user_message() })
        }
    }
}
