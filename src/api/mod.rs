pub mod client;
pub mod errors;
pub mod gateway;
pub mod operation;
pub mod params;
pub mod price;
pub mod query;

pub use client::APIClient;
pub use errors::{ApiError, ClientError};
pub use gateway::{APIGateway, Endpoint};
pub use operation::Operation;
pub use params::Params;
pub use price::PriceReference;
pub use query::QueryParams;

use async_trait::async_trait;

/// Source of exchange quotes for the round-trip analytics.
#[async_trait]
pub trait ExchangeAPI: Send + Sync {
    /// Estimated output of `to` for `amount` of `from`.
    async fn estimate(&self, amount: f64, from: &str, to: &str, fixed_rate: bool) -> Result<f64, ClientError>;

    /// Reference market price of `coin_id` in `vs_currency`.
    async fn reference_price(&self, coin_id: &str, vs_currency: &str) -> Result<f64, ClientError>;
}

/// ChangeNOW for quotes, CoinGecko for the reference price.
#[derive(Debug, Clone, Default)]
pub struct ExchangeClients {
    pub exchange: APIGateway,
    pub price: PriceReference,
}

impl ExchangeClients {
    pub fn new(exchange: APIGateway, price: PriceReference) -> Self {
        Self { exchange, price }
    }
}

#[async_trait]
impl ExchangeAPI for ExchangeClients {
    async fn estimate(&self, amount: f64, from: &str, to: &str, fixed_rate: bool) -> Result<f64, ClientError> {
        self.exchange.estimated_amount(amount, from, to, fixed_rate).await
    }

    async fn reference_price(&self, coin_id: &str, vs_currency: &str) -> Result<f64, ClientError> {
        self.price.simple_price(coin_id, vs_currency).await
    }
}
