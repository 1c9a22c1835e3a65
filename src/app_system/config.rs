use std::env;
use tracing::{info, warn};
use url::Url;
use crate::app_system::ConfigError;

pub const SNEAKERS_API: &str = "SNEAKERS_API";
pub const FAVORITE_API: &str = "FAVORITE_API";
pub const STORE_CHANNEL_BUFFER: &str = "STORE_CHANNEL_BUFFER";

const DEFAULT_CHANNEL_BUFFER: usize = 32;

/// Startup settings for the synchronizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the items/cart backend.
    pub sneakers_api: Url,
    /// Base URL of the favorites backend.
    pub favorite_api: Url,
    pub channel_buffer: usize,
}

impl Config {
    /// Reads settings from the environment, after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            info!("Loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            sneakers_api: required_url(&lookup, SNEAKERS_API)?,
            favorite_api: required_url(&lookup, FAVORITE_API)?,
            channel_buffer: channel_buffer(&lookup),
        })
    }
}

fn required_url(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Url, ConfigError> {
    let raw = lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing(key.to_string()))?;

    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            key: key.to_string(),
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url)
}

fn channel_buffer(lookup: &impl Fn(&str) -> Option<String>) -> usize {
    match lookup(STORE_CHANNEL_BUFFER) {
        None => DEFAULT_CHANNEL_BUFFER,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(size) if size > 0 => size,
            _ => {
                warn!("Invalid {STORE_CHANNEL_BUFFER} value {raw:?}, using default: {DEFAULT_CHANNEL_BUFFER}");
                DEFAULT_CHANNEL_BUFFER
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_loads_both_base_urls() {
        let config = Config::from_lookup(lookup_from(&[
            (SNEAKERS_API, "https://abc.mockapi.io"),
            (FAVORITE_API, "https://def.mockapi.io/api"),
        ]))
        .unwrap();

        assert_eq!(config.sneakers_api.as_str(), "https://abc.mockapi.io/");
        assert_eq!(config.favorite_api.as_str(), "https://def.mockapi.io/api");
        assert_eq!(config.channel_buffer, 32);
    }

    #[test]
    fn test_both_urls_are_required() {
        let missing_favorite = Config::from_lookup(lookup_from(&[(SNEAKERS_API, "https://abc.mockapi.io")]));
        assert_eq!(missing_favorite, Err(ConfigError::Missing(FAVORITE_API.to_string())));

        let blank_sneakers = Config::from_lookup(lookup_from(&[
            (SNEAKERS_API, "  "),
            (FAVORITE_API, "https://def.mockapi.io"),
        ]));
        assert_eq!(blank_sneakers, Err(ConfigError::Missing(SNEAKERS_API.to_string())));
    }

    #[test]
    fn test_rejects_unusable_urls() {
        let result = Config::from_lookup(lookup_from(&[
            (SNEAKERS_API, "not a url"),
            (FAVORITE_API, "https://def.mockapi.io"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidUrl { ref key, .. }) if key == SNEAKERS_API));

        let result = Config::from_lookup(lookup_from(&[
            (SNEAKERS_API, "https://abc.mockapi.io"),
            (FAVORITE_API, "mailto:shop@example.com"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidUrl { ref key, .. }) if key == FAVORITE_API));
    }

    #[test]
    fn test_bad_buffer_size_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[
            (SNEAKERS_API, "https://abc.mockapi.io"),
            (FAVORITE_API, "https://def.mockapi.io"),
            (STORE_CHANNEL_BUFFER, "zero"),
        ]))
        .unwrap();
        assert_eq!(config.channel_buffer, 32);

        let config = Config::from_lookup(lookup_from(&[
            (SNEAKERS_API, "https://abc.mockapi.io"),
            (FAVORITE_API, "https://def.mockapi.io"),
            (STORE_CHANNEL_BUFFER, "8"),
        ]))
        .unwrap();
        assert_eq!(config.channel_buffer, 8);
    }
}
