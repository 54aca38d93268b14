pub mod round_trip;
pub mod sweep;

pub use round_trip::{RoundTrip, RoundTripLine};
pub use sweep::{default_amounts, quote_round_trip, run_sweep};
