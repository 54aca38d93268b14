// Query string builder.
// None plays the role of the "absent" value: such keys are never serialized.

use std::fmt::Display;

use url::form_urlencoded;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to the string form of `value`, replacing an earlier entry.
    /// `None` leaves the key out entirely.
    pub fn set<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        let Some(value) = value else {
            return self;
        };
        let value = value.to_string();

        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    pub fn with<V: Display>(mut self, key: &str, value: Option<V>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `application/x-www-form-urlencoded` serialization, insertion order.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Append `?<query>` to `base_url`; an empty query leaves the URL as is.
    pub fn append_to(&self, base_url: &str) -> String {
        if self.is_empty() {
            base_url.to_string()
        } else {
            format!("{}?{}", base_url, self.to_query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_are_skipped() {
        let query = QueryParams::new()
            .with("active", Some(true))
            .with("fixedRate", None::<bool>)
            .with("limit", Some(10));

        assert_eq!(query.to_query_string(), "active=true&limit=10");
        assert!(query.get("fixedRate").is_none());
    }

    #[test]
    fn test_set_replaces_existing_key() {
        let mut query = QueryParams::new();
        query.set("offset", Some(0)).set("offset", Some(20));

        assert_eq!(query.len(), 1);
        assert_eq!(query.to_query_string(), "offset=20");
    }

    #[test]
    fn test_empty_string_is_kept() {
        let query = QueryParams::new().with("dateFrom", Some(""));
        assert_eq!(query.to_query_string(), "dateFrom=");
    }

    #[test]
    fn test_values_are_encoded() {
        let query = QueryParams::new().with("contactEmail", Some("a b@c.d"));
        assert_eq!(query.to_query_string(), "contactEmail=a+b%40c.d");
    }

    #[test]
    fn test_append_to() {
        let empty = QueryParams::new();
        assert_eq!(empty.append_to("https://x/api/v1/currencies"), "https://x/api/v1/currencies");

        let query = QueryParams::new().with("api_key", Some("k"));
        assert_eq!(
            query.append_to("https://x/api/v1/exchange-amount/1/btc_xmr"),
            "https://x/api/v1/exchange-amount/1/btc_xmr?api_key=k"
        );
    }
}
