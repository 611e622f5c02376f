use std::net::TcpListener;

use actix_web::dev::Server;
use anyhow::Context;

use crate::config::Configuration;
use crate::relay::LeadRelay;
use crate::run::run;

pub struct AppServer {
    port: u16,
    address: String,
    server: Server,
}

impl AppServer {
    pub async fn build(configuration: Configuration) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.app.host, configuration.app.port
        ))
        .with_context(|| {
            format!(
                "Failed to bind to {}:{}",
                configuration.app.host, configuration.app.port
            )
        })?;

        let address = configuration.app.host.clone();
        let port = listener.local_addr()?.port();

        tracing::info!("Starting lead relay on address: {}:{}", address, port);

        let relay = LeadRelay::from_configuration(&configuration)?;
        let allowed_origins = configuration
            .app
            .allowed_origins()
            .map_err(anyhow::Error::msg)
            .context("Invalid CORS configuration")?;
        tracing::info!(?allowed_origins, "Configured CORS origins");

        let server = run(listener, relay, allowed_origins)?;

        Ok(Self {
            port,
            address,
            server,
        })
    }

    pub fn to_server_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
