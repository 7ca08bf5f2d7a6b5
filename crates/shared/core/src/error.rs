//! Error types for inbound client requests

use thiserror::Error;

/// An inbound request that failed shape validation.
///
/// Terminal for the session: the round never starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("districts must contain at least one district")]
    MissingDistricts,

    #[error("district names must not be blank")]
    BlankDistrict,

    #[error("{field} must be a positive number, got {value}")]
    InvalidPrice { field: &'static str, value: f64 },

    #[error("minPrice ({min}) is greater than maxPrice ({max})")]
    InvertedPriceRange { min: f64, max: f64 },

    #[error("minRooms ({min}) is greater than maxRooms ({max})")]
    InvertedRoomRange { min: u32, max: u32 },

    #[error("malformed request payload: {0}")]
    Decode(String),

    #[error("unexpected event '{0}', expected 'real-estate'")]
    UnexpectedEvent(String),
}
