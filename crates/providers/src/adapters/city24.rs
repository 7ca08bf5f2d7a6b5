//! City24 adapter
//!
//! GET protocol: the search is encoded entirely in the query string.
//! Districts are sent as City24 city codes (`address[city][]`, once per
//! district); names without a known code pass through as-is. Absent
//! `propertyType` omits `tsType` (both deal types). Price and room bounds
//! become `[gte]`/`[lte]` parameters and are omitted when absent. The unit
//! type is always `Apartment`, and paging is fixed to the first page.
//!
//! City24 returns a bare array of listings with the address split into
//! street and house number. `title` is `"{street} {house_number}"` and
//! `address` appends `", {city}"` when the city is present.

use realty_core::{ProviderId, ResultItem, SearchRequest};
use realty_ports::{HttpMethod, MalformedResponse, ProviderAdapter, ProviderRequest};
use serde::Deserialize;
use serde_json::Value;

use super::push_present;

/// City24 codes for Tallinn's districts, plus common neighbourhood aliases
const DISTRICT_CODES: &[(&str, u32)] = &[
    ("Haabersti", 540),
    ("Kesklinn", 1240),
    ("Lasnamäe", 1897),
    ("Mustamäe", 2413),
    ("Nõmme", 2670),
    ("Pirita", 3039),
    ("Põhja-Tallinn", 3166),
    ("Kalamaja", 3166),
    ("Vanalinn", 1240),
    ("Kadriorg", 1240),
];

const COUNTRY_CODE: &str = "1";
const UNIT_TYPE: &str = "Apartment";
const ITEMS_PER_PAGE: u32 = 50;
const LISTING_BASE_URL: &str = "https://www.city24.ee/real-estate";

#[derive(Debug, Deserialize)]
struct Realty {
    main_image: MainImage,
    price: f64,
    room_count: u32,
    property_size: f64,
    address: Address,
    #[serde(default)]
    friendly_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainImage {
    url: String,
}

#[derive(Debug, Deserialize)]
struct Address {
    house_number: String,
    street: Named,
    #[serde(default)]
    city: Option<Named>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct City24Adapter;

impl City24Adapter {
    pub fn new() -> Self {
        City24Adapter
    }

    /// City code for a district, or the name itself when it has none
    pub fn district_code(name: &str) -> String {
        DISTRICT_CODES
            .iter()
            .find(|(district, _)| *district == name)
            .map(|(_, code)| code.to_string())
            .unwrap_or_else(|| name.to_string())
    }
}

impl ProviderAdapter for City24Adapter {
    fn provider(&self) -> ProviderId {
        ProviderId::city24()
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn build_request(&self, request: &SearchRequest) -> ProviderRequest {
        let mut params = vec![("address[cc]".to_string(), COUNTRY_CODE.to_string())];

        let mut codes: Vec<String> = Vec::with_capacity(request.districts.len());
        for district in &request.districts {
            let code = Self::district_code(district);
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        params.extend(
            codes
                .into_iter()
                .map(|code| ("address[city][]".to_string(), code)),
        );

        push_present(
            &mut params,
            "tsType",
            request.property_type.map(|kind| kind.as_str()),
        );
        params.push(("unitType".to_string(), UNIT_TYPE.to_string()));
        push_present(&mut params, "price[gte]", request.min_price);
        push_present(&mut params, "price[lte]", request.max_price);
        push_present(&mut params, "roomCount[gte]", request.min_rooms);
        push_present(&mut params, "roomCount[lte]", request.max_rooms);
        params.push(("itemsPerPage".to_string(), ITEMS_PER_PAGE.to_string()));
        params.push(("page".to_string(), "1".to_string()));

        ProviderRequest::Query(params)
    }

    fn parse_response(&self, raw: &Value) -> Result<Vec<ResultItem>, MalformedResponse> {
        let realties = Vec::<Realty>::deserialize(raw)?;

        Ok(realties
            .into_iter()
            .map(|realty| {
                let title = format!(
                    "{} {}",
                    realty.address.street.name, realty.address.house_number
                );
                let address = match realty.address.city {
                    Some(city) => format!("{}, {}", title, city.name),
                    None => title.clone(),
                };

                ResultItem {
                    title,
                    image_url: realty.main_image.url,
                    price: realty.price,
                    area_square_meters: realty.property_size,
                    rooms: realty.room_count,
                    address,
                    listing_url: realty
                        .friendly_id
                        .map(|id| format!("{}/{}", LISTING_BASE_URL, id)),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty_core::PropertyType;
    use serde_json::json;

    fn realty() -> Value {
        json!({
            "main_image": { "url": "https://c24.ee/img/1.jpg" },
            "price": 480,
            "room_count": 2,
            "property_size": 45.5,
            "address": {
                "house_number": "12",
                "street": { "name": "Tööstuse" },
                "city": { "name": "Tallinn" }
            },
            "friendly_id": "abc123"
        })
    }

    #[test]
    fn test_build_request_full() {
        let request = SearchRequest::for_districts(["Kalamaja", "Pirita"])
            .with_price(Some(200.0), Some(600.0))
            .with_rooms(Some(1), Some(3))
            .with_property_type(PropertyType::Rent);

        let built = City24Adapter.build_request(&request);
        let ProviderRequest::Query(params) = &built else {
            panic!("expected query request");
        };

        let cities: Vec<&str> = params
            .iter()
            .filter(|(k, _)| k == "address[city][]")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(cities, vec!["3166", "3039"]);

        assert_eq!(built.query_value("address[cc]"), Some("1"));
        assert_eq!(built.query_value("tsType"), Some("rent"));
        assert_eq!(built.query_value("unitType"), Some("Apartment"));
        assert_eq!(built.query_value("price[gte]"), Some("200"));
        assert_eq!(built.query_value("price[lte]"), Some("600"));
        assert_eq!(built.query_value("roomCount[gte]"), Some("1"));
        assert_eq!(built.query_value("roomCount[lte]"), Some("3"));
        assert_eq!(built.query_value("page"), Some("1"));
    }

    #[test]
    fn test_absent_fields_omitted() {
        let built = City24Adapter.build_request(&SearchRequest::for_districts(["Kristiine"]));

        assert_eq!(built.query_value("address[city][]"), Some("Kristiine"));
        assert_eq!(built.query_value("tsType"), None);
        assert_eq!(built.query_value("price[gte]"), None);
        assert_eq!(built.query_value("roomCount[lte]"), None);
        assert_eq!(built.query_value("unitType"), Some("Apartment"));
    }

    #[test]
    fn test_shared_codes_are_deduplicated() {
        let request = SearchRequest::for_districts(["Kadriorg", "Kesklinn", "Vanalinn"]);
        let built = City24Adapter.build_request(&request);
        let ProviderRequest::Query(params) = built else {
            panic!("expected query request");
        };
        let count = params.iter().filter(|(k, _)| k == "address[city][]").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_parse_response() {
        let items = City24Adapter.parse_response(&json!([realty()])).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.title, "Tööstuse 12");
        assert_eq!(item.address, "Tööstuse 12, Tallinn");
        assert_eq!(item.image_url, "https://c24.ee/img/1.jpg");
        assert_eq!(item.price, 480.0);
        assert_eq!(item.area_square_meters, 45.5);
        assert_eq!(item.rooms, 2);
        assert_eq!(
            item.listing_url.as_deref(),
            Some("https://www.city24.ee/real-estate/abc123")
        );
    }

    #[test]
    fn test_parse_without_city_or_link() {
        let mut entry = realty();
        entry["address"].as_object_mut().unwrap().remove("city");
        entry.as_object_mut().unwrap().remove("friendly_id");

        let items = City24Adapter.parse_response(&json!([entry])).unwrap();
        assert_eq!(items[0].address, "Tööstuse 12");
        assert_eq!(items[0].listing_url, None);
    }

    #[test]
    fn test_missing_main_image_is_malformed() {
        let mut entry = realty();
        entry.as_object_mut().unwrap().remove("main_image");
        let err = City24Adapter.parse_response(&json!([entry])).unwrap_err();
        assert!(err.0.contains("main_image"));
    }

    #[test]
    fn test_object_instead_of_array_is_malformed() {
        assert!(City24Adapter.parse_response(&json!({ "items": [] })).is_err());
    }
}
