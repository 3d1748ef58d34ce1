use anyhow::{anyhow, Result};
use kube::Client;
use tracing::info;

use observability_addon::{evaluate, fetch_work_feedback, load_config, ProbeRegistry, ReadinessReport};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = load_config()?;
    info!("checking addon health in namespace {}", cfg.cluster_namespace);

    let client = Client::try_default().await?;
    let registry = ProbeRegistry::from_config(&cfg);

    let fields = fetch_work_feedback(&client, &cfg.cluster_namespace, &cfg.work_name).await?;
    let verdict = evaluate(&fields, &registry);
    let report = ReadinessReport::new(&cfg.cluster_namespace, &verdict);

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.healthy {
        info!("addon is available");
    } else {
        info!("addon is not yet available: {}", report.message);
        if cfg.fail_on_unhealthy {
            return Err(anyhow!("addon unhealthy: {}", report.message));
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
