//! Справочная рыночная цена (CoinGecko simple/price)
//! Ответ вида {"monero": {"btc": 0.0027}}

use log::debug;
use serde_json::Value;

use super::client::APIClient;
use super::errors::ClientError;
use super::query::QueryParams;

pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3/";

#[derive(Debug, Clone)]
pub struct PriceReference {
    client: APIClient,
    base_url: String,
}

impl Default for PriceReference {
    fn default() -> Self {
        Self::new(COINGECKO_API_URL.to_string())
    }
}

impl PriceReference {
    pub fn new(base_url: String) -> Self {
        Self {
            client: APIClient::new(),
            base_url,
        }
    }

    pub fn with_client(mut self, client: APIClient) -> Self {
        self.client = client;
        self
    }

    /// Price of one `id` coin expressed in `vs_currency`.
    pub async fn simple_price(&self, id: &str, vs_currency: &str) -> Result<f64, ClientError> {
        let url = format!("{}/simple/price", self.base_url.trim_end_matches('/'));
        let query = QueryParams::new()
            .with("ids", Some(id))
            .with("vs_currencies", Some(vs_currency));

        let body = self.client.get_json(&url, &query).await?;
        let price = extract_price(&body, id, vs_currency)?;
        debug!("💱 {} in {}: {}", id, vs_currency, price);
        Ok(price)
    }
}

fn extract_price(body: &Value, id: &str, vs_currency: &str) -> Result<f64, ClientError> {
    body.get(id)
        .and_then(|prices| prices.get(vs_currency))
        .and_then(Value::as_f64)
        .ok_or_else(|| ClientError::MissingField(format!("{}.{}", id, vs_currency)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_price() {
        let body = json!({"monero": {"btc": 0.00271}});
        assert_eq!(extract_price(&body, "monero", "btc").unwrap(), 0.00271);
    }

    #[test]
    fn test_extract_price_missing() {
        let body = json!({"monero": {"usd": 150.0}});
        let err = extract_price(&body, "monero", "btc").unwrap_err();
        assert!(matches!(err, ClientError::MissingField(ref f) if f == "monero.btc"));
    }
}
