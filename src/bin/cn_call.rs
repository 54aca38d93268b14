//! Вызов любой операции ChangeNOW по имени
//! cn_call ESTIMATED -p amount=0.1 -p from=BTC -p to=XMR

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;

use cn_roundtrip::api::{Operation, Params};
use cn_roundtrip::utils::config::{AppConfig, load_config};
use cn_roundtrip::utils::logging::init_logging;

#[derive(Parser)]
#[command(name = "cn-call", about = "Call a ChangeNOW API operation by its symbolic name")]
struct Args {
    /// Operation name, e.g. CURRENCIES, ESTIMATED, MIN_AMOUNT
    operation: Option<String>,

    /// Parameter as key=value, wire names (fixedRate, apiKey, ...)
    #[arg(short, long = "param")]
    params: Vec<String>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Print the resolved request instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// List known operations
    #[arg(short, long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_logging();

    let args = Args::parse();

    if args.list {
        for op in Operation::ALL {
            println!("{}", op);
        }
        return Ok(());
    }

    let name = args
        .operation
        .context("operation name is required (see --list)")?;
    let op: Operation = name.parse()?;
    let params = Params::from_pairs(args.params.iter().map(String::as_str))?;

    let config = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path))?,
        None => AppConfig::from_env()?,
    };
    let gateway = config.gateway();
    log::debug!("🔗 {} via {}", op, gateway.base_url());

    if args.dry_run {
        let endpoint = gateway.endpoint(op, &params)?;
        println!("{} {}", endpoint.method, endpoint.full_url());
        if let Some(body) = endpoint.body {
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        return Ok(());
    }

    if !op.is_idempotent() {
        log::info!("📝 {} creates a transaction upstream, sending once", op);
    }

    let response = gateway
        .dispatch(op, &params)
        .await
        .with_context(|| format!("{} failed", op))?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
