// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monitoring Daemon (monitord)
//!
//! Background process that owns the scheduler loop: runs active checks,
//! accepts passive results over NRDP, and serves operator commands over
//! a Unix socket.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::net::SocketAddr;
use std::sync::Arc;

use monitor_daemon::command_channel::CommandChannel;
use monitor_daemon::config::Config;
use monitor_daemon::ingest::{self, IngestState};
use monitor_daemon::lifecycle::{self, Startup};
use monitor_daemon::logging::{rotate_log_if_needed, setup_logging, write_startup_marker};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("monitord {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: monitord [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;
    rotate_log_if_needed(&config.log_path);
    write_startup_marker(&config)?;
    let log_guard = setup_logging(&config)?;

    info!("starting monitord");

    let startup = match lifecycle::startup(&config).await {
        Ok(s) => s,
        Err(error) => {
            error!(%error, "failed to start monitord");
            drop(log_guard);
            return Err(error.into());
        }
    };

    let Startup { graph, scheduler, results_tx, command_tx, stop, .. } = startup;

    let command_channel = CommandChannel::new(Arc::clone(&graph), command_tx);
    let socket_path = config.socket_path.clone();
    tokio::spawn(async move {
        if let Err(error) = command_channel.run(&socket_path).await {
            error!(%error, "command channel stopped");
        }
    });

    if config.engine.nrdp_enabled {
        let addr: SocketAddr = config.engine.nrdp_listen_addr.parse().map_err(|error| {
            format!("invalid NRDP bind address {:?}: {error}", config.engine.nrdp_listen_addr)
        })?;
        let ingest_state = Arc::new(IngestState {
            results_tx: results_tx.clone(),
            dynamic_register: config.engine.nrdp_dynamic_register,
            token_hash: config.nrdp_token_hash.clone(),
            loopback_bypass: config.engine.nrdp_loopback_bypass,
        });
        let router = ingest::router(&config.engine.nrdp_path, ingest_state);
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => {
                    info!(%addr, "NRDP ingestion endpoint listening");
                    if let Err(error) =
                        axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>()).await
                    {
                        error!(%error, "NRDP ingestion endpoint stopped");
                    }
                }
                Err(error) => error!(%error, %addr, "failed to bind NRDP ingestion endpoint"),
            }
        });
    }

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let scheduler_stop = Arc::clone(&stop);
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM"),
            _ = sigint.recv() => info!("received SIGINT"),
        }
        scheduler_stop.notify_one();
    });

    info!(socket = %config.socket_path.display(), "monitord ready");
    scheduler.run().await;
    info!("monitord shut down");
    Ok(())
}

fn print_help() {
    println!("monitord {}", env!("CARGO_PKG_VERSION"));
    println!("Monitoring daemon - runs the scheduler loop and serves operator/NRDP endpoints");
    println!();
    println!("USAGE:");
    println!("    monitord");
    println!();
    println!("Configuration is read from $MONITOR_CONFIG (default: <state dir>/config.toml)");
    println!("and layered with MONITOR_* environment overrides.");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -v, --version    Print version information");
}
