pub mod api;
pub mod utils;

// Round-trip loss analytics
pub mod analytics;

pub use api::{APIGateway, ApiError, ClientError, Operation, Params, PriceReference};
pub use utils::config::{AppConfig, ConfigError, load_config};
