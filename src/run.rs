use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::relay::LeadRelay;
use crate::routes::health::health_check;
use crate::routes::webhook::{json_error_handler, receive_lead};

/// Browsers may only read responses from the allowed origins, with
/// credentials; preflights accept any method and header.
fn cors_policy(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

pub fn run(
    listener: TcpListener,
    relay: LeadRelay,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    let relay = web::Data::new(relay);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(cors_policy(&allowed_origins))
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/webhook", web::post().to(receive_lead))
            .app_data(
                web::JsonConfig::default()
                    .content_type_required(false)
                    .error_handler(json_error_handler),
            )
            .app_data(relay.clone())
    })
    .listen(listener)?
    .run())
}
