// src/main.rs
use crate::config::AppConfig;
use crate::logging::init_logger;
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use anyhow::Context;
use astra::Server;
use dotenv::dotenv;
use std::net::SocketAddr;
use tracing::{error, info};

mod calculators;
mod config;
mod domain;
mod errors;
mod extractor;
mod forms;
mod logging;
mod responses;
mod router;
mod session;
mod spreadsheets;
mod templates;
mod valuation;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cfg = AppConfig::load().context("Failed to load configuration")?;
    init_logger(&cfg.log_level);

    let addr: SocketAddr = cfg
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", cfg.bind_addr))?;
    let max_workers = cfg.max_workers;

    let state = AppState::new(cfg).context("Failed to compile listing patterns")?;

    info!(%addr, max_workers, "Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "Server ended with error");
        return Err(e).context("Server ended with error");
    }

    info!("Server shut down cleanly.");
    Ok(())
}
