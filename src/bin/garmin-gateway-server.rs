// ABOUTME: Server binary for the Garmin gateway
// ABOUTME: Loads configuration from the environment, initializes logging and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Garmin Gateway Server Binary

use anyhow::Result;
use clap::Parser;
use garmin_gateway::{config::ServerConfig, logging, server::GatewayServer};
use tracing::info;

#[derive(Parser)]
#[command(name = "garmin-gateway-server")]
#[command(about = "Garmin Connect gateway - health, activity and workout data over HTTP")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }

    logging::init_from_env()?;
    info!("Starting Garmin gateway");
    info!("{}", config.summary());

    GatewayServer::from_config(config).run().await
}
