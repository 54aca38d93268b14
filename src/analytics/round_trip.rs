//! Расчет потерь при обмене туда и обратно (from -> to -> from)
//! Сравнивает котировки обменника со справочной рыночной ценой

use std::fmt;

use serde::Serialize;

use crate::utils::format::{to_fixed, to_precision};

/// One row of the sweep: a single amount converted there and back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundTrip {
    /// Input amount of the `from` currency.
    pub amount: f64,
    /// Forward quote: units of `to` received for `amount`.
    pub intermediate: f64,
    /// Reverse quote: units of `from` received back for `intermediate`.
    pub returned: f64,
    /// Reference price of one `to` unit in `from`.
    pub best_rate: f64,
}

impl RoundTrip {
    pub fn new(amount: f64, intermediate: f64, returned: f64, best_rate: f64) -> Self {
        Self {
            amount,
            intermediate,
            returned,
            best_rate,
        }
    }

    /// Share of the input that comes back, in percent.
    pub fn retention_percent(&self) -> f64 {
        100.0 * self.returned / self.amount
    }

    pub fn loss_percent(&self) -> f64 {
        100.0 - self.retention_percent()
    }

    /// Effective forward rate, `to` per `from`.
    pub fn forward_rate(&self) -> f64 {
        self.intermediate / self.amount
    }

    /// Effective reverse rate, `from` per `to`.
    pub fn reverse_rate(&self) -> f64 {
        self.returned / self.intermediate
    }

    /// Forward leg value against the reference price, in percent.
    pub fn forward_efficiency(&self) -> f64 {
        100.0 * self.best_rate * self.forward_rate()
    }

    /// Reverse leg rate against the reference price, in percent.
    pub fn reverse_efficiency(&self) -> f64 {
        100.0 * self.reverse_rate() / self.best_rate
    }

    pub fn display<'a>(&'a self, to_ticker: &'a str) -> RoundTripLine<'a> {
        RoundTripLine {
            trip: self,
            to_ticker,
        }
    }
}

/// Console rendering of a [`RoundTrip`].
pub struct RoundTripLine<'a> {
    trip: &'a RoundTrip,
    to_ticker: &'a str,
}

impl fmt::Display for RoundTripLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.trip;
        write!(
            f,
            "{}: {} {}%  rate1: {} rate2: {}  {}: {} loss1: {}% loss2: {}%",
            to_precision(t.amount, 3),
            to_precision(t.returned, 6),
            to_fixed(t.retention_percent(), 3),
            to_precision(t.forward_rate(), 6),
            to_precision(t.reverse_rate(), 6),
            self.to_ticker.to_lowercase(),
            to_precision(t.intermediate, 4),
            to_precision(t.forward_efficiency(), 4),
            to_precision(t.reverse_efficiency(), 4),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoundTrip {
        // 0.1 BTC -> 0.2 XMR -> 0.09 BTC, market 0.5 BTC per XMR
        let amount = 0.1;
        let intermediate = amount * 2.0;
        let returned = intermediate * 0.45;
        RoundTrip::new(amount, intermediate, returned, 0.5)
    }

    #[test]
    fn test_retention() {
        let trip = sample();
        assert!((trip.returned - 0.09).abs() < 1e-12);
        assert!((trip.retention_percent() - 90.0).abs() < 1e-9);
        assert!((trip.loss_percent() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates() {
        let trip = sample();
        assert!((trip.forward_rate() - 2.0).abs() < 1e-12);
        assert!((trip.reverse_rate() - 0.45).abs() < 1e-12);
        assert!((trip.forward_efficiency() - 100.0).abs() < 1e-9);
        assert!((trip.reverse_efficiency() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_console_line() {
        let line = sample().display("XMR").to_string();
        assert_eq!(
            line,
            "0.100: 0.0900000 90.000%  rate1: 2.00000 rate2: 0.450000  xmr: 0.2000 loss1: 100.0% loss2: 90.00%"
        );
    }
}
