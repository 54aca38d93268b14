// API Gateway implementation
// Каталог операций ChangeNOW: имя операции + параметры -> конкретный запрос

use log::debug;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::client::APIClient;
use super::errors::ClientError;
use super::operation::Operation;
use super::params::Params;
use super::query::QueryParams;

pub const CHANGENOW_API_URL: &str = "https://changenow.io/api/v1/";

const DEFAULT_TX_LIMIT: u32 = 10;
const DEFAULT_TX_OFFSET: u32 = 0;

/// A request resolved from an operation, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub url: String,
    pub query: QueryParams,
    pub body: Option<Value>,
}

impl Endpoint {
    fn get(url: String, query: QueryParams) -> Self {
        Self {
            method: Method::GET,
            url,
            query,
            body: None,
        }
    }

    /// URL including the query string, as it goes on the wire.
    pub fn full_url(&self) -> String {
        self.query.append_to(&self.url)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTransactionBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<f64>,
    extra_id: &'a str,
    refund_address: &'a str,
    refund_extra_id: &'a str,
    user_id: &'a str,
    payload: &'a str,
    contact_email: &'a str,
}

impl<'a> CreateTransactionBody<'a> {
    fn from_params(params: &'a Params) -> Self {
        let or_empty = |field: &'a Option<String>| field.as_deref().unwrap_or_default();

        Self {
            from: params.from.as_deref(),
            to: params.to.as_deref(),
            address: params.address.as_deref(),
            amount: params.amount,
            extra_id: or_empty(&params.extra_id),
            refund_address: or_empty(&params.refund_address),
            refund_extra_id: or_empty(&params.refund_extra_id),
            user_id: or_empty(&params.user_id),
            payload: or_empty(&params.payload),
            contact_email: or_empty(&params.contact_email),
        }
    }
}

#[derive(Debug, Clone)]
pub struct APIGateway {
    client: APIClient,
    base_url: String,
    api_key: Option<String>,
}

impl Default for APIGateway {
    fn default() -> Self {
        Self::new(CHANGENOW_API_URL.to_string())
    }
}

impl APIGateway {
    pub fn new(base_url: String) -> Self {
        APIGateway {
            client: APIClient::new(),
            base_url,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_client(mut self, client: APIClient) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append path segments to the base URL, each one percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<String, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    /// Key from the params, then the configured one, then empty.
    fn api_key<'a>(&'a self, params: &'a Params) -> &'a str {
        params
            .api_key
            .as_deref()
            .or(self.api_key.as_deref())
            .unwrap_or_default()
    }

    /// Resolve an operation into its request without touching the network.
    pub fn endpoint(&self, op: Operation, params: &Params) -> Result<Endpoint, ClientError> {
        let endpoint = match op {
            Operation::Currencies => Endpoint::get(
                self.url(&["currencies"])?,
                QueryParams::new()
                    .with("active", params.active)
                    .with("fixedRate", params.fixed_rate),
            ),
            Operation::CurrenciesTo => {
                let ticker = lowercase(&params.ticker, "ticker")?;
                Endpoint::get(
                    self.url(&["currencies-to", ticker.as_str()])?,
                    QueryParams::new().with("fixedRate", params.fixed_rate),
                )
            }
            Operation::CurrencyInfo => {
                let ticker = lowercase(&params.ticker, "ticker")?;
                Endpoint::get(self.url(&["currencies", ticker.as_str()])?, QueryParams::new())
            }
            Operation::ListOfTransactions => Endpoint::get(
                self.url(&["transactions", self.api_key(params)])?,
                QueryParams::new()
                    .with("from", params.from.as_deref())
                    .with("to", params.to.as_deref())
                    .with("status", params.status.as_deref())
                    .with("limit", Some(params.limit.unwrap_or(DEFAULT_TX_LIMIT)))
                    .with("offset", Some(params.offset.unwrap_or(DEFAULT_TX_OFFSET)))
                    .with("dateFrom", Some(params.date_from.as_deref().unwrap_or_default()))
                    .with("dateTo", Some(params.date_to.as_deref().unwrap_or_default())),
            ),
            Operation::TxStatus => {
                let id = params.id.as_deref().ok_or(ClientError::MissingParam("id"))?;
                Endpoint::get(
                    self.url(&["transactions", id, self.api_key(params)])?,
                    QueryParams::new(),
                )
            }
            Operation::Estimated => {
                let amount = params.amount.ok_or(ClientError::MissingParam("amount"))?;
                let pair = pair_segment(params)?;
                let amount = amount.to_string();

                let mut segments = vec!["exchange-amount"];
                if params.fixed_rate == Some(true) {
                    segments.push("fixed-rate");
                }
                segments.push(amount.as_str());
                segments.push(pair.as_str());

                Endpoint::get(
                    self.url(&segments)?,
                    QueryParams::new().with("api_key", Some(self.api_key(params))),
                )
            }
            Operation::CreateTx => {
                let mut segments = vec!["transactions"];
                if params.fixed_rate == Some(true) {
                    segments.push("fixed-rate");
                }
                segments.push(self.api_key(params));

                let body = serde_json::to_value(CreateTransactionBody::from_params(params))?;
                Endpoint {
                    method: Method::POST,
                    url: self.url(&segments)?,
                    query: QueryParams::new(),
                    body: Some(body),
                }
            }
            Operation::Pairs => Endpoint::get(
                self.url(&["market-info", "available-pairs"])?,
                QueryParams::new().with("includePartners", params.include_partners),
            ),
            Operation::FixedRatePairs => Endpoint::get(
                self.url(&["market-info", "fixed-rate", self.api_key(params)])?,
                QueryParams::new(),
            ),
            Operation::MinAmount => {
                let pair = pair_segment(params)?;
                Endpoint::get(self.url(&["min-amount", pair.as_str()])?, QueryParams::new())
            }
        };

        Ok(endpoint)
    }

    /// Execute an operation and return the upstream JSON unchanged.
    pub async fn dispatch(&self, op: Operation, params: &Params) -> Result<Value, ClientError> {
        let endpoint = self.endpoint(op, params)?;
        debug!("📡 {} -> {} {}", op, endpoint.method, endpoint.url);

        match endpoint.body {
            Some(body) => self.client.post_json(&endpoint.url, &body).await,
            None => self.client.get_json(&endpoint.url, &endpoint.query).await,
        }
    }

    /// Look an operation up by its symbolic name, then dispatch it.
    /// Unknown names fail before any request is made.
    pub async fn call(&self, name: &str, params: &Params) -> Result<Value, ClientError> {
        let op: Operation = name.parse()?;
        self.dispatch(op, params).await
    }

    /// Dispatch and hand the result to `observer` as well.
    ///
    /// The observer runs exactly once, on success only, with the same value
    /// that is returned.
    pub async fn dispatch_observed<F>(
        &self,
        op: Operation,
        params: &Params,
        observer: F,
    ) -> Result<Value, ClientError>
    where
        F: FnOnce(&Value),
    {
        let value = self.dispatch(op, params).await?;
        observer(&value);
        Ok(value)
    }

    // =================================================================
    // Typed entry points
    // =================================================================

    pub async fn currencies(&self, active: Option<bool>, fixed_rate: Option<bool>) -> Result<Value, ClientError> {
        let params = Params {
            active,
            fixed_rate,
            ..Params::default()
        };
        self.dispatch(Operation::Currencies, &params).await
    }

    pub async fn currencies_to(&self, ticker: &str, fixed_rate: Option<bool>) -> Result<Value, ClientError> {
        let params = Params {
            fixed_rate,
            ..Params::new().with_ticker(ticker)
        };
        self.dispatch(Operation::CurrenciesTo, &params).await
    }

    pub async fn currency_info(&self, ticker: &str) -> Result<Value, ClientError> {
        self.dispatch(Operation::CurrencyInfo, &Params::new().with_ticker(ticker))
            .await
    }

    pub async fn list_transactions(&self, params: &Params) -> Result<Value, ClientError> {
        self.dispatch(Operation::ListOfTransactions, params).await
    }

    pub async fn tx_status(&self, id: &str) -> Result<Value, ClientError> {
        self.dispatch(Operation::TxStatus, &Params::new().with_id(id)).await
    }

    pub async fn estimated(&self, amount: f64, from: &str, to: &str, fixed_rate: bool) -> Result<Value, ClientError> {
        let params = Params::pair(from, to)
            .with_amount(amount)
            .with_fixed_rate(fixed_rate);
        self.dispatch(Operation::Estimated, &params).await
    }

    /// `estimatedAmount` field of the estimate response.
    pub async fn estimated_amount(&self, amount: f64, from: &str, to: &str, fixed_rate: bool) -> Result<f64, ClientError> {
        let response = self.estimated(amount, from, to, fixed_rate).await?;
        response
            .get("estimatedAmount")
            .and_then(Value::as_f64)
            .ok_or_else(|| ClientError::MissingField("estimatedAmount".to_string()))
    }

    pub async fn create_transaction(&self, params: &Params) -> Result<Value, ClientError> {
        self.dispatch(Operation::CreateTx, params).await
    }

    pub async fn pairs(&self, include_partners: Option<bool>) -> Result<Value, ClientError> {
        let params = Params {
            include_partners,
            ..Params::default()
        };
        self.dispatch(Operation::Pairs, &params).await
    }

    pub async fn fixed_rate_pairs(&self) -> Result<Value, ClientError> {
        self.dispatch(Operation::FixedRatePairs, &Params::new()).await
    }

    pub async fn min_amount(&self, from: &str, to: &str) -> Result<Value, ClientError> {
        self.dispatch(Operation::MinAmount, &Params::pair(from, to)).await
    }
}

fn lowercase(value: &Option<String>, name: &'static str) -> Result<String, ClientError> {
    value
        .as_deref()
        .map(str::to_lowercase)
        .ok_or(ClientError::MissingParam(name))
}

/// `{from}_{to}`, both lowercased.
fn pair_segment(params: &Params) -> Result<String, ClientError> {
    let from = lowercase(&params.from, "from")?;
    let to = lowercase(&params.to, "to")?;
    Ok(format!("{}_{}", from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gateway() -> APIGateway {
        APIGateway::new("https://cn.test/api/v1/".to_string())
    }

    #[test]
    fn test_estimate_path_is_lowercased() {
        let params = Params::pair("BTC", "XMR").with_amount(0.1).with_api_key("k");
        let endpoint = gateway().endpoint(Operation::Estimated, &params).unwrap();

        assert_eq!(endpoint.method, Method::GET);
        assert_eq!(
            endpoint.full_url(),
            "https://cn.test/api/v1/exchange-amount/0.1/btc_xmr?api_key=k"
        );
    }

    #[test]
    fn test_estimate_fixed_rate() {
        let params = Params::pair("Eth", "bTc").with_amount(2.0).with_fixed_rate(true);
        let endpoint = gateway().endpoint(Operation::Estimated, &params).unwrap();

        assert_eq!(
            endpoint.full_url(),
            "https://cn.test/api/v1/exchange-amount/fixed-rate/2/eth_btc?api_key="
        );
    }

    #[test]
    fn test_estimate_requires_amount() {
        let err = gateway()
            .endpoint(Operation::Estimated, &Params::pair("btc", "xmr"))
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingParam("amount")));
    }

    #[test]
    fn test_ticker_paths() {
        let gw = gateway();
        let params = Params::new().with_ticker("XMR").with_fixed_rate(true);

        let to = gw.endpoint(Operation::CurrenciesTo, &params).unwrap();
        assert_eq!(to.full_url(), "https://cn.test/api/v1/currencies-to/xmr?fixedRate=true");

        let info = gw.endpoint(Operation::CurrencyInfo, &params).unwrap();
        assert_eq!(info.full_url(), "https://cn.test/api/v1/currencies/xmr");
    }

    #[test]
    fn test_currencies_omits_absent_flags() {
        let gw = gateway();
        let bare = gw.endpoint(Operation::Currencies, &Params::new()).unwrap();
        assert_eq!(bare.full_url(), "https://cn.test/api/v1/currencies");

        let active = gw
            .endpoint(Operation::Currencies, &Params::new().with_active(false))
            .unwrap();
        assert_eq!(active.full_url(), "https://cn.test/api/v1/currencies?active=false");
    }

    #[test]
    fn test_list_transactions_defaults() {
        let gw = gateway().with_api_key("cfg-key".to_string());
        let endpoint = gw
            .endpoint(Operation::ListOfTransactions, &Params::new().with_status("finished"))
            .unwrap();

        assert_eq!(endpoint.url, "https://cn.test/api/v1/transactions/cfg-key");
        assert_eq!(
            endpoint.query.to_query_string(),
            "status=finished&limit=10&offset=0&dateFrom=&dateTo="
        );
    }

    #[test]
    fn test_params_key_overrides_configured_key() {
        let gw = gateway().with_api_key("cfg-key".to_string());
        let endpoint = gw
            .endpoint(Operation::TxStatus, &Params::new().with_id("abc").with_api_key("own"))
            .unwrap();
        assert_eq!(endpoint.url, "https://cn.test/api/v1/transactions/abc/own");
    }

    #[test]
    fn test_create_tx_body_defaults() {
        let params = Params::pair("btc", "xmr")
            .with_address("4Addr")
            .with_amount(0.5)
            .with_fixed_rate(true)
            .with_api_key("k");
        let endpoint = gateway().endpoint(Operation::CreateTx, &params).unwrap();

        assert_eq!(endpoint.method, Method::POST);
        assert_eq!(endpoint.url, "https://cn.test/api/v1/transactions/fixed-rate/k");
        assert_eq!(
            endpoint.body,
            Some(json!({
                "from": "btc",
                "to": "xmr",
                "address": "4Addr",
                "amount": 0.5,
                "extraId": "",
                "refundAddress": "",
                "refundExtraId": "",
                "userId": "",
                "payload": "",
                "contactEmail": ""
            }))
        );
    }

    #[test]
    fn test_path_segments_are_percent_encoded() {
        let endpoint = gateway()
            .endpoint(Operation::CurrencyInfo, &Params::new().with_ticker("X?y#z/w"))
            .unwrap();
        assert_eq!(endpoint.url, "https://cn.test/api/v1/currencies/x%3Fy%23z%2Fw");

        let status = gateway()
            .endpoint(Operation::TxStatus, &Params::new().with_id("a b").with_api_key("k/1"))
            .unwrap();
        assert_eq!(status.url, "https://cn.test/api/v1/transactions/a%20b/k%2F1");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = APIGateway::new("not a url".to_string())
            .endpoint(Operation::Currencies, &Params::new())
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_with_client_keeps_base_url() {
        let gw = gateway().with_client(APIClient::new());
        assert_eq!(gw.base_url(), "https://cn.test/api/v1/");
    }

    #[test]
    fn test_market_info_paths_have_single_slashes() {
        let gw = APIGateway::new("https://cn.test/api/v1".to_string()).with_api_key("k".to_string());

        let fixed = gw.endpoint(Operation::FixedRatePairs, &Params::new()).unwrap();
        assert_eq!(fixed.full_url(), "https://cn.test/api/v1/market-info/fixed-rate/k");

        let min = gw.endpoint(Operation::MinAmount, &Params::pair("BTC", "XMR")).unwrap();
        assert_eq!(min.full_url(), "https://cn.test/api/v1/min-amount/btc_xmr");

        let pairs = gw
            .endpoint(Operation::Pairs, &Params::new().with_include_partners(true))
            .unwrap();
        assert_eq!(
            pairs.full_url(),
            "https://cn.test/api/v1/market-info/available-pairs?includePartners=true"
        );
    }
}
