//! Demo pipeline binary.
//!
//! Reproduces the toy extract -> transform -> load job with a deliberate
//! division-by-zero in the transform step, wired to the failure sentinel.
//! The sentinel alert fires, and the pipeline failure then propagates as the
//! process exit status.

use anyhow::{anyhow, Result};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sentinel::{FailureSentinel, Pipeline, SentinelConfig};

fn extract_data(_input: Value) -> Result<Value> {
    info!("Loading mock market data (no network request)");
    Ok(json!({
        "time": {
            "updatedISO": "2025-11-07T08:00:00.000Z",
            "updated": "Nov 7, 2025 08:00:00 UTC"
        },
        "bpi": {
            "USD": {
                "code": "USD",
                "rate": "50,000.00",
                "description": "United States Dollar",
                "rate_float": 50000.0
            }
        }
    }))
}

fn transform_data(data: Value) -> Result<Value> {
    let usd_rate = data["bpi"]["USD"]["rate_float"].as_f64().unwrap_or(0.0);
    info!(usd_rate, "Running the critical computation");

    // The demo's deliberate bug.
    let divisor = 0_u64;
    let _ = 1_u64
        .checked_div(divisor)
        .ok_or_else(|| anyhow!("attempt to divide by zero"))?;

    Ok(json!({
        "timestamp": data["time"]["updatedISO"],
        "usd_rate": usd_rate,
    }))
}

fn load_data(data: Value) -> Result<Value> {
    info!(record = %data, "Loaded processed record");
    Ok(data)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("sentinel=info".parse()?))
        .init();

    let config = SentinelConfig::default();
    if config.webhook_url.is_none() {
        info!("SLACK_WEBHOOK_URL not set; alerts will be logged but not delivered");
    }

    let sentinel = FailureSentinel::new(&config)?;

    let pipeline = Pipeline::new("aio_pipeline")
        .step("extract_data", extract_data)
        .step("transform_data", transform_data)
        .step("load_data", load_data);

    pipeline.run(&sentinel).await?;
    Ok(())
}
