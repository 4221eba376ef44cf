// Marketplace access: API client and catalog assembly.

pub mod fetcher;
pub mod traits;

pub use fetcher::EtsyClient;
pub use traits::MarketplaceApi;

use crate::model::{ApiError, RawListing, Shop};
use futures::future::join_all;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Everything fetched for one shop.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub shop: Shop,
    pub listings: Vec<RawListing>,
    pub thumbnails: HashMap<u64, String>,
}

/// Best-effort thumbnail lookup for the first `limit` listings.
/// Failed or empty lookups are skipped.
pub async fn fetch_thumbnails<A>(api: &A, listings: &[RawListing], limit: usize) -> HashMap<u64, String>
where
    A: MarketplaceApi + ?Sized,
{
    let lookups = listings
        .iter()
        .take(limit)
        .filter_map(|l| l.listing_id)
        .map(|id| async move { (id, api.first_image(id).await) });

    let mut thumbnails = HashMap::new();
    for (id, result) in join_all(lookups).await {
        match result {
            Ok(Some(image)) => {
                if let Some(url) = image.thumbnail() {
                    thumbnails.insert(id, url.to_string());
                }
            }
            Ok(None) => debug!("Listing {} has no images", id),
            Err(e) => debug!("Image lookup failed for listing {}: {}", id, e),
        }
    }
    thumbnails
}

/// Looks up the shop, its active listings and their thumbnails.
/// Only a failed shop lookup is an error; a failed listing fetch yields an empty catalog.
pub async fn fetch_catalog<A>(api: &A, shop_name: &str, thumbnail_limit: usize) -> Result<Catalog, ApiError>
where
    A: MarketplaceApi + ?Sized,
{
    info!("Looking up shop '{}'...", shop_name);
    let mut shop = api.find_shop(shop_name).await?;
    if shop.shop_name.is_none() {
        shop.shop_name = Some(shop_name.to_string());
    }

    info!("Fetching active listings for shop {}...", shop.shop_id);
    let listings = match api.active_listings(shop.shop_id).await {
        Ok(listings) => listings,
        Err(e) => {
            warn!("Listing fetch failed for shop {}: {}", shop.shop_id, e);
            Vec::new()
        }
    };
    info!("Fetched {} listings", listings.len());

    let thumbnails = fetch_thumbnails(api, &listings, thumbnail_limit).await;
    info!("Resolved {} thumbnails", thumbnails.len());

    Ok(Catalog {
        shop,
        listings,
        thumbnails,
    })
}
