use crate::model::{ApiError, ApiPage, ListingImage, RawListing, Shop};
use crate::scraper::traits::MarketplaceApi;

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Listings requested per shop; the API caps a single page at 100.
pub const LISTINGS_LIMIT: u32 = 100;

pub struct EtsyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl EtsyClient {
    pub fn new(api_key: &str, base_url: &str, timeout_seconds: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) ShopSpy/0.1")
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .header("x-api-key", &self.api_key)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("API responded [{}] for {}", status, url);
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl MarketplaceApi for EtsyClient {
    async fn find_shop(&self, shop_name: &str) -> Result<Shop, ApiError> {
        let page: ApiPage<Shop> = self
            .get_json(&self.url("shops"), &[("shop_name", shop_name.to_string())])
            .await?;

        page.results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::ShopNotFound(shop_name.to_string()))
    }

    async fn active_listings(&self, shop_id: u64) -> Result<Vec<RawListing>, ApiError> {
        let url = self.url(&format!("shops/{}/listings/active", shop_id));
        let page: ApiPage<RawListing> = self
            .get_json(&url, &[("limit", LISTINGS_LIMIT.to_string())])
            .await?;
        Ok(page.results)
    }

    async fn first_image(&self, listing_id: u64) -> Result<Option<ListingImage>, ApiError> {
        let url = self.url(&format!("listings/{}/images", listing_id));
        let page: ApiPage<ListingImage> = self.get_json(&url, &[("limit", "1".to_string())]).await?;
        Ok(page.results.into_iter().next())
    }
}
