use std::fmt;
use std::str::FromStr;

use super::errors::ClientError;

/// Catalog entries of the exchange API, addressed by their symbolic names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Currencies,
    CurrenciesTo,
    CurrencyInfo,
    ListOfTransactions,
    TxStatus,
    Estimated,
    CreateTx,
    Pairs,
    FixedRatePairs,
    MinAmount,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::Currencies,
        Operation::CurrenciesTo,
        Operation::CurrencyInfo,
        Operation::ListOfTransactions,
        Operation::TxStatus,
        Operation::Estimated,
        Operation::CreateTx,
        Operation::Pairs,
        Operation::FixedRatePairs,
        Operation::MinAmount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Currencies => "CURRENCIES",
            Operation::CurrenciesTo => "CURRENCIES_TO",
            Operation::CurrencyInfo => "CURRENCY_INFO",
            Operation::ListOfTransactions => "LIST_OF_TRANSACTIONS",
            Operation::TxStatus => "TX_STATUS",
            Operation::Estimated => "ESTIMATED",
            Operation::CreateTx => "CREATE_TX",
            Operation::Pairs => "PAIRS",
            Operation::FixedRatePairs => "FIXED_RATE_PAIRS",
            Operation::MinAmount => "MIN_AMOUNT",
        }
    }

    /// Only CREATE_TX changes state upstream.
    pub fn is_idempotent(self) -> bool {
        !matches!(self, Operation::CreateTx)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ClientError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == name)
            .ok_or_else(|| ClientError::UnknownOperation(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "SWAP_EVERYTHING".parse::<Operation>().unwrap_err();
        assert!(matches!(err, ClientError::UnknownOperation(ref name) if name == "SWAP_EVERYTHING"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!("estimated".parse::<Operation>().is_err());
    }
}
