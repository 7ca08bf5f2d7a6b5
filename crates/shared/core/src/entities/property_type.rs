use serde::{Deserialize, Serialize};

/// Deal type a client is searching for. Absent on the request means both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Rent,
    Sale,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Rent => "rent",
            PropertyType::Sale => "sale",
        }
    }
}
