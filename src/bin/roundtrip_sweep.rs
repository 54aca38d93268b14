//! Оценка потерь при обмене туда и обратно через ChangeNOW
//! Для каждой суммы: from -> to -> from, сравнение с ценой CoinGecko

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;

use cn_roundtrip::analytics::run_sweep;
use cn_roundtrip::utils::config::{AppConfig, load_config};
use cn_roundtrip::utils::logging::init_logging;

#[derive(Parser)]
#[command(name = "roundtrip-sweep", about = "Estimate round-trip exchange loss across a sweep of amounts")]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Source currency ticker
    #[arg(long)]
    from: Option<String>,

    /// Intermediate currency ticker
    #[arg(long)]
    to: Option<String>,

    /// Amount to sweep (repeatable, replaces the configured list)
    #[arg(short, long = "amount")]
    amounts: Vec<f64>,

    /// Quote fixed-rate exchanges
    #[arg(long)]
    fixed_rate: bool,

    /// CoinGecko id of the intermediate currency
    #[arg(long)]
    coin_id: Option<String>,

    /// CoinGecko code of the source currency
    #[arg(long)]
    vs_currency: Option<String>,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        let sweep = &mut config.sweep;
        if let Some(from) = self.from {
            sweep.from = from;
        }
        if let Some(to) = self.to {
            sweep.to = to;
        }
        if !self.amounts.is_empty() {
            sweep.amounts = self.amounts;
        }
        if self.fixed_rate {
            sweep.fixed_rate = true;
        }
        if let Some(coin_id) = self.coin_id {
            sweep.coin_id = coin_id;
        }
        if let Some(vs_currency) = self.vs_currency {
            sweep.vs_currency = vs_currency;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_logging();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path))?,
        None => AppConfig::from_env()?,
    };
    args.apply(&mut config);
    config.validate()?;

    if config.exchange.api_key.is_none() {
        log::warn!("⚠️ CHANGENOW_API_KEY не установлен, запросы пойдут без ключа");
    }

    log::info!(
        "🔄 Round trip {} -> {} -> {} over {} amounts",
        config.sweep.from,
        config.sweep.to,
        config.sweep.from,
        config.sweep.amounts.len()
    );

    let clients = config.clients();
    let to_ticker = config.sweep.to.clone();

    run_sweep(&clients, &config.sweep, |row| {
        println!("{}", row.display(&to_ticker));
    })
    .await
    .context("round-trip sweep failed")?;

    Ok(())
}
