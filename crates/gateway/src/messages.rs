//! WebSocket envelopes
//!
//! Every frame in either direction is `{"event": ..., "data": ...}`. The
//! client sends one `real-estate` request; the server answers with any number
//! of `real-estate-json-data-response` frames, each carrying either a listing
//! or an error string.

use realty_core::{ProtocolError, ProviderFailure, ResultItem, SearchRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const REQUEST_EVENT: &str = "real-estate";
pub const RESPONSE_EVENT: &str = "real-estate-json-data-response";

/// WebSocket incoming message
#[derive(Debug, Clone, Deserialize)]
pub struct ClientMessage {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl ClientMessage {
    /// Decode and validate one inbound text frame
    pub fn parse(text: &str) -> Result<SearchRequest, ProtocolError> {
        let message: ClientMessage =
            serde_json::from_str(text).map_err(|e| ProtocolError::Decode(e.to_string()))?;
        message.into_request()
    }

    pub fn into_request(self) -> Result<SearchRequest, ProtocolError> {
        if self.event != REQUEST_EVENT {
            return Err(ProtocolError::UnexpectedEvent(self.event));
        }

        let request: SearchRequest =
            serde_json::from_value(self.data).map_err(|e| ProtocolError::Decode(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }
}

/// Payload of an outbound frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    Item(ResultItem),
    Error(String),
}

/// WebSocket outgoing message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerMessage {
    pub event: String,
    pub data: ResponseData,
}

impl ServerMessage {
    pub fn item(item: ResultItem) -> Self {
        ServerMessage {
            event: RESPONSE_EVENT.to_string(),
            data: ResponseData::Item(item),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage {
            event: RESPONSE_EVENT.to_string(),
            data: ResponseData::Error(message.into()),
        }
    }

    pub fn failure(failure: &ProviderFailure) -> Self {
        Self::error(failure.to_string())
    }

    pub fn protocol_error(error: &ProtocolError) -> Self {
        Self::error(error.to_string())
    }
}
