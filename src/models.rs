use serde::{Deserialize, Serialize};
use std::fmt;

// Inbound extraction request from the landing page
#[derive(Deserialize, Serialize, Clone)]
pub struct ExtractRequest {
    pub handle: String,
    pub country: String,
    pub currency: String,
    pub symbol: String,
    pub price: Price,
}

// The page sends price as a number or a numeric string depending on the
// form state; accept both.
#[derive(Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum Price {
    Number(f64),
    Text(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Number(n) => write!(f, "{n}"),
            Price::Text(s) => write!(f, "{s}"),
        }
    }
}

// Successful extraction response
#[derive(Deserialize, Serialize, Clone)]
pub struct ExtractResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_number_or_string() {
        let req: ExtractRequest = serde_json::from_value(serde_json::json!({
            "handle": "maker", "country": "US", "currency": "USD",
            "symbol": "$", "price": 25
        }))
        .unwrap();
        assert_eq!(req.price.to_string(), "25");

        let req: ExtractRequest = serde_json::from_value(serde_json::json!({
            "handle": "maker", "country": "US", "currency": "USD",
            "symbol": "$", "price": "19.99"
        }))
        .unwrap();
        assert_eq!(req.price.to_string(), "19.99");
    }
}
