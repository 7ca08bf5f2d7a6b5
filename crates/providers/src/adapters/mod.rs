//! Provider adapters
//!
//! Adapters translate the unified search request into each provider's
//! request shape (Gateway Out) and normalize each provider's listings into
//! `ResultItem`s (Gateway In). One adapter per provider, no shared state.

pub mod city24;
pub mod kinnisvara24;
pub mod rendin;

pub use city24::City24Adapter;
pub use kinnisvara24::Kinnisvara24Adapter;
pub use rendin::RendinAdapter;

use serde_json::{Map, Value};

/// Insert `key` only when the unified field is set; absent fields stay
/// absent so the provider applies no constraint.
pub(crate) fn insert_present<T: Into<Value>>(
    target: &mut Map<String, Value>,
    key: &str,
    value: Option<T>,
) {
    if let Some(value) = value {
        target.insert(key.to_string(), value.into());
    }
}

/// JSON form of a price bound. Whole amounts go out as integers (`200`, not
/// `200.0`), matching what clients send.
pub(crate) fn price_value(price: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if price.fract() == 0.0 && price.abs() <= MAX_EXACT {
        Value::from(price as i64)
    } else {
        Value::from(price)
    }
}

/// Append a query parameter only when the unified field is set
pub(crate) fn push_present<T: ToString>(
    params: &mut Vec<(String, String)>,
    key: &str,
    value: Option<T>,
) {
    if let Some(value) = value {
        params.push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whole_prices_serialize_as_integers() {
        assert_eq!(price_value(200.0), json!(200));
        assert_eq!(price_value(200.0).to_string(), "200");
        assert_eq!(price_value(450.5), json!(450.5));
    }

    #[test]
    fn test_insert_present_skips_absent() {
        let mut body = Map::new();
        insert_present(&mut body, "price_min", Some(200.0).map(price_value));
        insert_present::<Value>(&mut body, "price_max", None);

        assert_eq!(Value::Object(body), json!({ "price_min": 200 }));
    }
}
