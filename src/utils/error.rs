// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Connect failures, timeouts, body read errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // Any other non-2xx status

    #[error("Character page not found: {0}")]
    CharacterNotFound(String), // 404 on the character page

    #[error("Wiki page has no content: {0}")]
    EmptyPage(String), // Page exists but carries the "no text in this page" marker
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Subsection '{subsection}' not found in section '{section}'")]
    SubsectionNotFound { section: String, subsection: String },

    #[error("Could not locate '{subsection}' in '{section}' after all fallbacks")]
    NotFound { section: String, subsection: String },
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Page fetch failed: {0}")]
    Network(FetchError),

    #[error("Empty wiki page for character: {0}")]
    EmptyPage(String),

    #[error("Move '{subsection}' not found in section '{section}' for {character}")]
    NotFound {
        character: String,
        section: String,
        subsection: String,
    },

    #[error("No frame data or move information found for {character}'s {subsection}")]
    NoData { character: String, subsection: String },

    #[error("Error processing move data: {0}")]
    Extraction(String),
}

impl ScrapeError {
    /// The message placed in the `{"error": ...}` object on stdout.
    pub fn user_message(&self) -> String {
        match self {
            ScrapeError::Config(msg) => msg.clone(),
            ScrapeError::Network(FetchError::CharacterNotFound(character)) => {
                format!("Character '{}' not found on Dustloop Wiki", character)
            }
            ScrapeError::Network(_) => {
                "Failed to connect to Dustloop Wiki. Please try again later.".to_string()
            }
            ScrapeError::EmptyPage(character) => {
                format!("No data available for character '{}'", character)
            }
            // The Display text already reads as a user-facing sentence for the rest
            other => other.to_string(),
        }
    }
}

impl From<FetchError> for ScrapeError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::EmptyPage(character) => ScrapeError::EmptyPage(character),
            other => ScrapeError::Network(other),
        }
    }
}
