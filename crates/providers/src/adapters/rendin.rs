//! Rendin adapter
//!
//! POST protocol, body wrapped in a `data` envelope. Rendin only accepts
//! Tallinn's city districts, so neighbourhood names are translated to the
//! district containing them; names missing from the table pass through
//! unchanged. Absent price/room bounds are omitted; whole-number prices are
//! sent as JSON integers.
//!
//! Rendin sends street address and city separately. `title` is
//! `"{address}, {city}"` and `address` is the city alone. The first entry of
//! `images` is the main image; `image` is the fallback when the list is empty.

use realty_core::{ProviderId, ResultItem, SearchRequest};
use realty_ports::{HttpMethod, MalformedResponse, ProviderAdapter, ProviderRequest};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{insert_present, price_value};

/// Neighbourhoods outside Rendin's vocabulary, mapped to an accepted district
const DISTRICT_ALIASES: &[(&str, &str)] = &[
    ("Kalamaja", "Põhja-Tallinn"),
    ("Vanalinn", "Kesklinn"),
    ("Kadriorg", "Põhja-Tallinn"),
];

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: SearchResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    found_apartments: Vec<Apartment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Apartment {
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    price: f64,
    object_area: f64,
    #[serde(default)]
    link: Option<String>,
    rooms: u32,
    city: String,
    address: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RendinAdapter;

impl RendinAdapter {
    pub fn new() -> Self {
        RendinAdapter
    }

    /// Translate a client district into Rendin's vocabulary
    pub fn district(name: &str) -> &str {
        DISTRICT_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, district)| *district)
            .unwrap_or(name)
    }

    fn districts(request: &SearchRequest) -> Vec<&str> {
        let mut districts: Vec<&str> = Vec::with_capacity(request.districts.len());
        for name in &request.districts {
            let district = Self::district(name);
            if !districts.contains(&district) {
                districts.push(district);
            }
        }
        districts
    }
}

impl ProviderAdapter for RendinAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::rendin()
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn build_request(&self, request: &SearchRequest) -> ProviderRequest {
        let mut data = Map::new();
        data.insert("city".to_string(), json!("Tallinn"));
        data.insert("country".to_string(), json!("EE"));
        data.insert("districts".to_string(), json!(Self::districts(request)));
        insert_present(&mut data, "priceMax", request.max_price.map(price_value));
        insert_present(&mut data, "priceMin", request.min_price.map(price_value));
        insert_present(&mut data, "roomsMax", request.max_rooms);
        insert_present(&mut data, "roomsMin", request.min_rooms);

        ProviderRequest::JsonBody(json!({ "data": Value::Object(data) }))
    }

    fn parse_response(&self, raw: &Value) -> Result<Vec<ResultItem>, MalformedResponse> {
        let response = SearchResponse::deserialize(raw)?;

        Ok(response
            .result
            .found_apartments
            .into_iter()
            .map(|apartment| {
                let image_url = apartment
                    .images
                    .into_iter()
                    .next()
                    .or(apartment.image)
                    .unwrap_or_default();

                ResultItem {
                    title: format!("{}, {}", apartment.address, apartment.city),
                    image_url,
                    price: apartment.price,
                    area_square_meters: apartment.object_area,
                    rooms: apartment.rooms,
                    address: apartment.city,
                    listing_url: apartment.link,
                }
            })
            .collect())
    }
}
