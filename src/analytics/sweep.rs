//! Прогон по списку сумм: строго последовательно, одна пара запросов за раз

use log::info;

use crate::api::{ClientError, ExchangeAPI};
use crate::utils::config::SweepConfig;

use super::round_trip::RoundTrip;

/// Amounts swept when nothing else is configured: 0.05, then 0.1 through 1.5.
pub fn default_amounts() -> Vec<f64> {
    let mut amounts = vec![0.05];
    amounts.extend((1..=15).map(|step| step as f64 / 10.0));
    amounts
}

/// Quote `amount` there and back and measure it against `best_rate`.
pub async fn quote_round_trip<E: ExchangeAPI + ?Sized>(
    api: &E,
    amount: f64,
    config: &SweepConfig,
    best_rate: f64,
) -> Result<RoundTrip, ClientError> {
    let intermediate = api
        .estimate(amount, &config.from, &config.to, config.fixed_rate)
        .await?;
    let returned = api
        .estimate(intermediate, &config.to, &config.from, config.fixed_rate)
        .await?;

    Ok(RoundTrip::new(amount, intermediate, returned, best_rate))
}

/// Fetch the reference price once, then run every amount in order.
///
/// `on_row` sees each result as soon as it is computed. The first error
/// stops the sweep and is returned.
pub async fn run_sweep<E, F>(
    api: &E,
    config: &SweepConfig,
    mut on_row: F,
) -> Result<Vec<RoundTrip>, ClientError>
where
    E: ExchangeAPI + ?Sized,
    F: FnMut(&RoundTrip),
{
    let best_rate = api
        .reference_price(&config.coin_id, &config.vs_currency)
        .await?;
    info!(
        "📊 Reference price {} in {}: {}",
        config.coin_id, config.vs_currency, best_rate
    );

    let mut rows = Vec::with_capacity(config.amounts.len());
    for &amount in &config.amounts {
        let row = quote_round_trip(api, amount, config, best_rate).await?;
        on_row(&row);
        rows.push(row);
    }

    info!("✅ Sweep finished: {} amounts", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_amounts() {
        let amounts = default_amounts();
        assert_eq!(amounts.len(), 16);
        assert_eq!(amounts[0], 0.05);
        assert_eq!(amounts[1], 0.1);
        assert_eq!(amounts[15], 1.5);
    }
}
