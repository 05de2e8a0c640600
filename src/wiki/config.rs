// src/wiki/config.rs
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.dustloop.com";
pub const DEFAULT_GAME: &str = "GBVSR";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const BASE_URL_ENV: &str = "DUSTLOOP_BASE_URL";
const GAME_ENV: &str = "DUSTLOOP_GAME";
const TIMEOUT_ENV: &str = "DUSTLOOP_TIMEOUT_SECS";

/// Where character pages live and how long a fetch may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Site root without a trailing slash; also the prefix for image `src` paths.
    pub base_url: String,
    /// Wiki namespace for the game, e.g. `GBVSR`.
    pub game: String,
    pub timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            game: DEFAULT_GAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ScrapeConfig {
    /// Defaults, overridden by any `DUSTLOOP_*` environment variables that are set.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            tracing::debug!("Using {} from environment: {}", BASE_URL_ENV, base_url);
            config.base_url = base_url;
        }
        if let Ok(game) = std::env::var(GAME_ENV) {
            tracing::debug!("Using {} from environment: {}", GAME_ENV, game);
            config.game = game;
        }
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid {}='{}', keeping {:?}", TIMEOUT_ENV, raw, config.timeout),
            }
        }

        config.normalized()
    }

    /// Applies command-line overrides on top of the current values.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        game: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(game) = game {
            self.game = game;
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self.normalized()
    }

    /// `GET <site-base>/w/<game>/<character>`
    pub fn character_url(&self, character: &str) -> String {
        format!("{}/w/{}/{}", self.base_url, self.game, character)
    }

    fn normalized(mut self) -> Self {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_url() {
        let config = ScrapeConfig::default();
        assert_eq!(config.character_url("Vira"), "https://www.dustloop.com/w/GBVSR/Vira");
    }

    #[test]
    fn test_overrides_take_precedence_and_strip_trailing_slash() {
        let config = ScrapeConfig::default().with_overrides(
            Some("http://localhost:8080/".to_string()),
            Some("GGST".to_string()),
            Some(3),
        );
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.character_url("Sol_Badguy"), "http://localhost:8080/w/GGST/Sol_Badguy");
    }

    #[test]
    fn test_no_overrides_keeps_values() {
        let config = ScrapeConfig::default().with_overrides(None, None, None);
        assert_eq!(config, ScrapeConfig::default());
    }
}
