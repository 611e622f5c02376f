pub mod clients;
pub mod config;
pub mod domain;
pub mod relay;
pub mod routes;
pub mod run;
pub mod startup;
pub mod telemetry;
pub mod utils;
