use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::PropertyType;
use crate::error::ProtocolError;

/// Unified search request sent by a client.
///
/// Districts are human-readable neighbourhood names. They are kept in an
/// ordered set so every adapter sees them in the same, stable order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub districts: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rooms: Option<u32>,
    /// `None` searches both rentals and sales
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub from_owner: bool,
}

impl SearchRequest {
    /// Create a request for the given districts with no other constraints
    pub fn for_districts<I, S>(districts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchRequest {
            districts: districts.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_rooms(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_rooms = min;
        self.max_rooms = max;
        self
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    pub fn from_owner(mut self, from_owner: bool) -> Self {
        self.from_owner = from_owner;
        self
    }

    /// Check the field contract. Rooms are unsigned, so only their ordering
    /// needs checking here.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.districts.is_empty() {
            return Err(ProtocolError::MissingDistricts);
        }
        if self.districts.iter().any(|d| d.trim().is_empty()) {
            return Err(ProtocolError::BlankDistrict);
        }

        for (field, value) in [("minPrice", self.min_price), ("maxPrice", self.max_price)] {
            if let Some(value) = value
                && !(value.is_finite() && value > 0.0)
            {
                return Err(ProtocolError::InvalidPrice { field, value });
            }
        }

        if let (Some(min), Some(max)) = (self.min_price, self.max_price)
            && min > max
        {
            return Err(ProtocolError::InvertedPriceRange { min, max });
        }

        if let (Some(min), Some(max)) = (self.min_rooms, self.max_rooms)
            && min > max
        {
            return Err(ProtocolError::InvertedRoomRange { min, max });
        }

        Ok(())
    }
}
