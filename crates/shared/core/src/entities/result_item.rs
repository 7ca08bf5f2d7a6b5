use serde::{Deserialize, Serialize};

/// A single listing in the unified shape.
///
/// This is the only listing representation that ever reaches a client,
/// regardless of which provider produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    /// Display name of the listing, e.g. "Vabriku tn 47, Kalamaja"
    pub title: String,
    /// Representative image (the first one when a provider sends several)
    pub image_url: String,
    /// Monthly rent or sale price, as reported by the provider
    pub price: f64,
    pub area_square_meters: f64,
    pub rooms: u32,
    pub address: String,
    /// Link back to the listing. Not every provider has a permanent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_url: Option<String>,
}
