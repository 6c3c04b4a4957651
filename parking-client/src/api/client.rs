//! HTTP client for the parking backend.
use async_trait::async_trait;
use parking_common::{BookingRequest, NewSlot, Report, Slot, Transaction};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::ApiError;
use crate::config::ApiConfig;

/// Every endpoint the booking and admin consoles depend on.
///
/// Mutating calls return the response body verbatim on success; for
/// `book_slot` that body is the payment redirect URL.
#[async_trait]
pub trait ParkingApi: Send + Sync {
    async fn fetch_status(&self) -> Result<Vec<Slot>, ApiError>;
    async fn fetch_report(&self) -> Result<Report, ApiError>;
    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, ApiError>;
    async fn create_slot(&self, slot: &NewSlot) -> Result<String, ApiError>;
    async fn remove_slot(&self, slot_id: &str) -> Result<String, ApiError>;
    async fn release_slot(&self, slot_id: &str) -> Result<String, ApiError>;
    async fn book_slot(&self, slot_id: &str, request: &BookingRequest) -> Result<String, ApiError>;
}

/// `ParkingApi` over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpParkingApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpParkingApi {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid API base url '{}': {}", config.base_url, e))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base url '{}' cannot carry a path", config.base_url);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        tracing::debug!("Parking API client targeting {}", base_url);
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base url, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder, endpoint: &str) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        tracing::debug!("{} responded {}: {}", endpoint, status, body);
        Err(ApiError::Application {
            endpoint: endpoint.to_string(),
            status,
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let endpoint = segments.join("/");
        let url = self.endpoint(segments)?;
        let response = self.send(self.client.get(url), &endpoint).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })
    }

    async fn text(&self, request: reqwest::RequestBuilder, endpoint: String) -> Result<String, ApiError> {
        let response = self.send(request, &endpoint).await?;
        response
            .text()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })
    }

    async fn mutate(&self, method: Method, segments: &[&str]) -> Result<String, ApiError> {
        let url = self.endpoint(segments)?;
        self.text(self.client.request(method, url), segments.join("/")).await
    }
}

#[async_trait]
impl ParkingApi for HttpParkingApi {
    async fn fetch_status(&self) -> Result<Vec<Slot>, ApiError> {
        self.get_json(&["status"]).await
    }

    async fn fetch_report(&self) -> Result<Report, ApiError> {
        self.get_json(&["admin", "report"]).await
    }

    async fn fetch_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_json(&["admin", "transactions"]).await
    }

    async fn create_slot(&self, slot: &NewSlot) -> Result<String, ApiError> {
        let url = self.endpoint(&["admin", "slots"])?;
        self.text(self.client.post(url).json(slot), "admin/slots".to_string()).await
    }

    async fn remove_slot(&self, slot_id: &str) -> Result<String, ApiError> {
        self.mutate(Method::DELETE, &["admin", "slots", slot_id]).await
    }

    async fn release_slot(&self, slot_id: &str) -> Result<String, ApiError> {
        self.mutate(Method::PUT, &["admin", "release", slot_id]).await
    }

    async fn book_slot(&self, slot_id: &str, request: &BookingRequest) -> Result<String, ApiError> {
        let url = self.endpoint(&["book", slot_id])?;
        let endpoint = format!("book/{}", slot_id);
        let redirect = self.text(self.client.post(url).json(request), endpoint).await?;
        Ok(redirect.trim().to_string())
    }
}
