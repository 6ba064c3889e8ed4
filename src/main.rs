use std::path::Path;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use ratewatch::{AcquisitionRequest, Orchestrator, load_config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ratewatch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [hotel, city, check_in, check_out, rest @ ..] = args.as_slice() else {
        bail!("usage: ratewatch <hotel> <city> <check-in> <check-out> [listing-url]");
    };

    let check_in: NaiveDate = check_in
        .parse()
        .with_context(|| format!("invalid check-in date {check_in:?}, expected YYYY-MM-DD"))?;
    let check_out: NaiveDate = check_out
        .parse()
        .with_context(|| format!("invalid check-out date {check_out:?}, expected YYYY-MM-DD"))?;

    let mut request = AcquisitionRequest::new(hotel.as_str(), city.as_str(), check_in, check_out)?;
    if let [listing_url] = rest {
        request = request.with_listing_url(listing_url.as_str());
    }

    let config_path =
        std::env::var("RATEWATCH_CONFIG").unwrap_or_else(|_| "ratewatch.yaml".to_string());
    let config = load_config(Path::new(&config_path))?;

    let orchestrator = Orchestrator::from_config(&config)?;
    let result = orchestrator.acquire(&request).await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
