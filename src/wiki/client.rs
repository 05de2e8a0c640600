// src/wiki/client.rs
use crate::utils::error::FetchError;
use crate::wiki::config::ScrapeConfig;
use reqwest::header;

const WIKI_USER_AGENT: &str = concat!("dustloop_scraper/", env!("CARGO_PKG_VERSION"));

/// Shown by MediaWiki on pages that exist as a title but have no body.
pub const EMPTY_PAGE_MARKER: &str = "There is currently no text in this page";

/// Anything that can hand over a character page's HTML.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, character: &str) -> Result<String, FetchError>;
}

/// Fetches character pages from the live wiki.
pub struct WikiClient {
    client: reqwest::Client,
    config: ScrapeConfig,
}

impl WikiClient {
    pub fn new(config: ScrapeConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(WIKI_USER_AGENT)
            .timeout(config.timeout)
            .build()?; // Propagate client build error if any
        Ok(Self { client, config })
    }
}

impl PageSource for WikiClient {
    /// Downloads the character page and rejects empty ones.
    async fn fetch_page(&self, character: &str) -> Result<String, FetchError> {
        let url = self.config.character_url(character);
        tracing::debug!("URL: {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "text/html,*/*")
            .send()
            .await?; // Propagates reqwest::Error as FetchError::Network

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error status: {} for URL: {}", status, url);
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(FetchError::CharacterNotFound(character.to_string()));
            }
            return Err(FetchError::Http(status));
        }

        let body = response.text().await?;
        tracing::debug!("Downloaded {} bytes from {}", body.len(), url);

        check_not_empty(character, body)
    }
}

/// Fails with `EmptyPage` when the wiki reports the page has no text.
pub fn check_not_empty(character: &str, body: String) -> Result<String, FetchError> {
    if body.contains(EMPTY_PAGE_MARKER) {
        tracing::error!("Empty wiki page for character: {}", character);
        return Err(FetchError::EmptyPage(character.to_string()));
    }
    Ok(body)
}
