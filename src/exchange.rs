use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// The fixed source currency for every conversion request.
pub const BASE_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Deserialize)]
pub struct Currency {
    #[serde(rename = "ID")]
    pub id: String,
    pub price: Price,
}

// The feed is inconsistent about the price field, some entries carry a
// number and some a quoted string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteFeed {
    data: Vec<Currency>,
}

#[async_trait]
pub trait ProvideRates: Send + Sync {
    async fn quotes(&self) -> Vec<Currency>;
}

pub struct ExchangeApi {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl ExchangeApi {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ProvideRates for ExchangeApi {
    // A failed fetch is not an error the caller can act on, it just means
    // "no price available right now".
    async fn quotes(&self) -> Vec<Currency> {
        log::info!("request to get all currencies");
        let resp = match self
            .http
            .get(self.base_url.clone())
            .header("Authorization", self.api_key.as_str())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("request to get all currencies failed: {e}");
                return Vec::new();
            }
        };

        if !resp.status().is_success() {
            log::error!(
                "status code for request to get all currencies is {}",
                resp.status()
            );
            return Vec::new();
        }

        match resp.json::<QuoteFeed>().await {
            Ok(feed) => feed.data,
            Err(e) => {
                log::error!("response for get all currencies has no usable data: {e}");
                Vec::new()
            }
        }
    }
}

pub fn price_of(quotes: &[Currency], code: &str) -> Option<String> {
    quotes
        .iter()
        .find(|currency| currency.id.eq_ignore_ascii_case(code))
        .map(|currency| currency.price.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_feed() -> Vec<Currency> {
        let body = r#"{
            "data": [
                {"ID": "USD", "price": 42500.5},
                {"ID": "EUR", "price": "48100"},
                {"ID": "GBP", "price": 55000}
            ]
        }"#;
        serde_json::from_str::<QuoteFeed>(body).expect("sample feed should parse").data
    }

    #[test]
    fn lookup_matches_case_insensitively() {
        let quotes = sample_feed();
        assert_eq!(price_of(&quotes, "usd").as_deref(), Some("42500.5"));
        assert_eq!(price_of(&quotes, "USD").as_deref(), Some("42500.5"));
        assert_eq!(price_of(&quotes, "Eur").as_deref(), Some("48100"));
    }

    #[test]
    fn lookup_misses_unknown_codes() {
        let quotes = sample_feed();
        assert_eq!(price_of(&quotes, "JPY"), None);
        assert_eq!(price_of(&quotes, ""), None);
    }

    #[test]
    fn integral_prices_render_without_a_fraction() {
        let quotes = sample_feed();
        assert_eq!(price_of(&quotes, "GBP").as_deref(), Some("55000"));
    }

    #[test]
    fn feed_without_data_key_does_not_parse() {
        let body = r#"{"currencies": []}"#;
        assert!(serde_json::from_str::<QuoteFeed>(body).is_err());
    }

    #[test]
    fn empty_feed_yields_no_price() {
        assert_eq!(price_of(&[], BASE_CURRENCY), None);
    }
}
