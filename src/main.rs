use anyhow::Context;
use lead_relay::config::get_configuration;
use lead_relay::startup::AppServer;
use lead_relay::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber(get_subscriber(
        "lead-relay".into(),
        "info".into(),
        std::io::stdout,
    ));

    let configuration = get_configuration().context("Failed to load configuration")?;
    let server = AppServer::build(configuration).await?;

    server.run_until_stopped().await?;

    Ok(())
}
