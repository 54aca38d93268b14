//! Запись параметров для операций каталога
//! Все поля опциональны, каждая операция берет только свои

use std::str::FromStr;

use super::errors::ClientError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pub active: Option<bool>,
    pub fixed_rate: Option<bool>,
    pub include_partners: Option<bool>,

    pub ticker: Option<String>,
    pub api_key: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<f64>,

    // transactions list
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,

    pub id: Option<String>,

    // create transaction
    pub address: Option<String>,
    pub extra_id: Option<String>,
    pub refund_address: Option<String>,
    pub refund_extra_id: Option<String>,
    pub user_id: Option<String>,
    pub payload: Option<String>,
    pub contact_email: Option<String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the estimate / min-amount shape.
    pub fn pair(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new().with_from(from).with_to(to)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_fixed_rate(mut self, fixed_rate: bool) -> Self {
        self.fixed_rate = Some(fixed_rate);
        self
    }

    pub fn with_include_partners(mut self, include_partners: bool) -> Self {
        self.include_partners = Some(include_partners);
        self
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_date_range(mut self, date_from: impl Into<String>, date_to: impl Into<String>) -> Self {
        self.date_from = Some(date_from.into());
        self.date_to = Some(date_to.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_extra_id(mut self, extra_id: impl Into<String>) -> Self {
        self.extra_id = Some(extra_id.into());
        self
    }

    pub fn with_refund_address(mut self, refund_address: impl Into<String>) -> Self {
        self.refund_address = Some(refund_address.into());
        self
    }

    pub fn with_refund_extra_id(mut self, refund_extra_id: impl Into<String>) -> Self {
        self.refund_extra_id = Some(refund_extra_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_contact_email(mut self, contact_email: impl Into<String>) -> Self {
        self.contact_email = Some(contact_email.into());
        self
    }

    /// Assign a field by its wire name (`fixedRate`, `apiKey`, `extraId`, ...).
    ///
    /// Used by the command line caller, where parameters arrive as `key=value` text.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        let text = || Some(value.to_string());

        match key {
            "active" => self.active = Some(parse_value(key, value)?),
            "fixedRate" => self.fixed_rate = Some(parse_value(key, value)?),
            "includePartners" => self.include_partners = Some(parse_value(key, value)?),
            "ticker" => self.ticker = text(),
            "apiKey" => self.api_key = text(),
            "from" => self.from = text(),
            "to" => self.to = text(),
            "amount" => self.amount = Some(parse_value(key, value)?),
            "status" => self.status = text(),
            "limit" => self.limit = Some(parse_value(key, value)?),
            "offset" => self.offset = Some(parse_value(key, value)?),
            "dateFrom" => self.date_from = text(),
            "dateTo" => self.date_to = text(),
            "id" => self.id = text(),
            "address" => self.address = text(),
            "extraId" => self.extra_id = text(),
            "refundAddress" => self.refund_address = text(),
            "refundExtraId" => self.refund_extra_id = text(),
            "userId" => self.user_id = text(),
            "payload" => self.payload = text(),
            "contactEmail" => self.contact_email = text(),
            _ => {
                return Err(ClientError::InvalidParam {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Parse `key=value` pairs into a record.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut params = Params::new();
        for pair in pairs {
            let (key, value) = pair.split_once('=').ok_or_else(|| ClientError::InvalidParam {
                key: pair.to_string(),
                value: String::new(),
            })?;
            params.set(key.trim(), value.trim())?;
        }
        Ok(params)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ClientError> {
    value.parse().map_err(|_| ClientError::InvalidParam {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_by_wire_name() {
        let mut params = Params::new();
        params.set("fixedRate", "true").unwrap();
        params.set("amount", "0.5").unwrap();
        params.set("refundAddress", "addr").unwrap();
        params.set("limit", "25").unwrap();

        assert_eq!(params.fixed_rate, Some(true));
        assert_eq!(params.amount, Some(0.5));
        assert_eq!(params.refund_address.as_deref(), Some("addr"));
        assert_eq!(params.limit, Some(25));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut params = Params::new();
        assert!(params.set("limit", "-1").is_err());
        assert!(params.set("active", "yes").is_err());
        assert!(params.set("nonsense", "1").is_err());
    }

    #[test]
    fn test_from_pairs() {
        let params = Params::from_pairs(["from=BTC", "to = XMR", "amount=0.1"]).unwrap();
        assert_eq!(params, Params::pair("BTC", "XMR").with_amount(0.1));

        assert!(Params::from_pairs(["from"]).is_err());
    }
}
