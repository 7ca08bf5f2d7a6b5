//! Kinnisvara24 adapter
//!
//! POST protocol with a JSON search body. Absent price/room bounds are
//! omitted from the body. Whole-number prices are sent as JSON integers,
//! fractional ones as floats. Every search is scoped to Tallinn, Harju county,
//! apartments only, sorted by relevance.
//!
//! Listings carry a ready-made display address, so `title` is taken from
//! `address.short_address` and `address` from `address.city_country`. The
//! small variant of the first image is used as the representative image.

use realty_core::{PropertyType, ProviderId, ResultItem, SearchRequest};
use realty_ports::{HttpMethod, MalformedResponse, ProviderAdapter, ProviderRequest};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{insert_present, price_value};

/// Address prefix every search is scoped to
const BASE_ADDRESSES: [&str; 2] = ["Tallinn", "Harju maakond"];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<Listing>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    hind: f64,
    permalink: String,
    address: Address,
    images: Vec<Image>,
    rooms: u32,
    area: f64,
}

#[derive(Debug, Deserialize)]
struct Address {
    short_address: String,
    city_country: String,
}

#[derive(Debug, Deserialize)]
struct Image {
    url_small: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Kinnisvara24Adapter;

impl Kinnisvara24Adapter {
    pub fn new() -> Self {
        Kinnisvara24Adapter
    }

    fn deal_types(property_type: Option<PropertyType>) -> Vec<&'static str> {
        match property_type {
            Some(kind) => vec![kind.as_str()],
            None => vec![PropertyType::Rent.as_str(), PropertyType::Sale.as_str()],
        }
    }
}

impl ProviderAdapter for Kinnisvara24Adapter {
    fn provider(&self) -> ProviderId {
        ProviderId::kinnisvara24()
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn build_request(&self, request: &SearchRequest) -> ProviderRequest {
        let addresses: Vec<&str> = BASE_ADDRESSES
            .iter()
            .copied()
            .chain(request.districts.iter().map(String::as_str))
            .collect();

        let mut body = Map::new();
        body.insert("addresses".to_string(), json!(addresses));
        body.insert(
            "deal_types".to_string(),
            json!(Self::deal_types(request.property_type)),
        );
        body.insert("from_owner".to_string(), Value::Bool(request.from_owner));
        body.insert("object_types".to_string(), json!(["apartment"]));
        insert_present(&mut body, "price_max", request.max_price.map(price_value));
        insert_present(&mut body, "price_min", request.min_price.map(price_value));
        insert_present(&mut body, "rooms_max", request.max_rooms);
        insert_present(&mut body, "rooms_min", request.min_rooms);
        body.insert("sort_by".to_string(), json!("relevance"));
        body.insert("sort_order".to_string(), json!("desc"));

        ProviderRequest::JsonBody(Value::Object(body))
    }

    fn parse_response(&self, raw: &Value) -> Result<Vec<ResultItem>, MalformedResponse> {
        let response = SearchResponse::deserialize(raw)?;

        Ok(response
            .data
            .into_iter()
            .map(|listing| ResultItem {
                title: listing.address.short_address,
                image_url: listing
                    .images
                    .into_iter()
                    .next()
                    .map(|image| image.url_small)
                    .unwrap_or_default(),
                price: listing.hind,
                area_square_meters: listing.area,
                rooms: listing.rooms,
                address: listing.address.city_country,
                listing_url: Some(listing.permalink),
            })
            .collect())
    }
}
