use crate::model::{ApiError, ListingImage, RawListing, Shop};

/// Read-only view of the marketplace used to assemble a catalog.
#[async_trait::async_trait]
pub trait MarketplaceApi: Send + Sync {
    async fn find_shop(&self, shop_name: &str) -> Result<Shop, ApiError>;
    async fn active_listings(&self, shop_id: u64) -> Result<Vec<RawListing>, ApiError>;
    /// First image of a listing, `None` when the listing has none.
    async fn first_image(&self, listing_id: u64) -> Result<Option<ListingImage>, ApiError>;
}
