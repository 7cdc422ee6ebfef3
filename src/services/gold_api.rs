//! GoldAPI.io client
//!
//! Fetches the spot price of one troy ounce of gold in CAD. The response
//! is decoded into a typed struct; any shape mismatch is an error, so a
//! changed or degraded upstream payload fails closed instead of feeding
//! garbage into the calculator.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::constants::FETCH_TIMEOUT_SECS;
use crate::error::{AppError, Result};

/// Anything that can produce a raw spot price. The provider validates
/// plausibility itself, so sources only need to fetch and decode.
#[async_trait]
pub trait SpotPriceSource: Send + Sync {
    async fn fetch_spot(&self) -> Result<f64>;
}

/// Expected response shape; `price` is the spot bid/mid price.
/// Extra fields are ignored, a missing or non-numeric `price` is a
/// decode failure.
#[derive(Debug, Deserialize)]
struct GoldApiResponse {
    price: f64,
}

pub struct GoldApiClient {
    url: String,
    access_token: Option<String>,
    client: Client,
}

impl GoldApiClient {
    pub fn new(url: String, access_token: Option<String>) -> Result<Self> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Invalid gold API URL: must start with http:// or https://, got: '{}'",
                url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Created GoldApiClient: url='{}'", url);

        Ok(Self { url, access_token, client })
    }

    fn decode(body: &str) -> Result<f64> {
        let response: GoldApiResponse = serde_json::from_str(body)
            .map_err(|e| AppError::InvalidResponse(format!("unexpected payload shape: {}", e)))?;
        Ok(response.price)
    }
}

#[async_trait]
impl SpotPriceSource for GoldApiClient {
    async fn fetch_spot(&self) -> Result<f64> {
        debug!("Fetching spot price from {}", self.url);

        let mut request = self.client.get(&self.url).header("Content-Type", "application/json");
        if let Some(token) = &self.access_token {
            request = request.header("x-access-token", token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network(format!("API error: {}", status.as_u16())));
        }

        let body = response.text().await?;
        let price = Self::decode(&body)?;
        debug!(price, "Decoded spot price");
        Ok(price)
    }
}
