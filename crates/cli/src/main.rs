// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! monitorctl - operator CLI for the monitoring daemon

mod client;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::DaemonClient;
use monitor_daemon::command_channel::{Request, Response};
use monitor_daemon::config::Config;

#[derive(Parser)]
#[command(name = "monitorctl", version, about = "Operator CLI for monitord")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report object counts and protocol version
    Status,
    /// Acknowledge the current problem on a host (or a service on it)
    Acknowledge {
        host: String,
        #[arg(long)]
        service: Option<String>,
    },
    /// Clear an acknowledgement
    UnAcknowledge {
        host: String,
        #[arg(long)]
        service: Option<String>,
    },
    /// Schedule downtime on a host (or a service on it)
    Downtime {
        host: String,
        #[arg(long)]
        service: Option<String>,
    },
    /// Cancel one layer of scheduled downtime
    CancelDowntime {
        host: String,
        #[arg(long)]
        service: Option<String>,
    },
    /// Enable active checks on a host
    EnableHost { host: String },
    /// Disable active checks on a host
    DisableHost { host: String },
    /// Enable active checks on a service
    EnableService { host: String, service: String },
    /// Disable active checks on a service
    DisableService { host: String, service: String },
    /// Force an immediate check of a host
    ForceHostCheck { host: String },
    /// Force an immediate check of a service
    ForceServiceCheck { host: String, service: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("loading monitord configuration")?;
    let client = DaemonClient::connect(&config.socket_path)
        .context("connecting to monitord's command socket")?;

    let request = match cli.command {
        Commands::Status => Request::Status,
        Commands::Acknowledge { host, service } => Request::AcknowledgeProblem { host, service },
        Commands::UnAcknowledge { host, service } => Request::CancelAcknowledgement { host, service },
        Commands::Downtime { host, service } => Request::ScheduleDowntime { host, service },
        Commands::CancelDowntime { host, service } => Request::CancelDowntime { host, service },
        Commands::EnableHost { host } => Request::EnableHostChecks { host },
        Commands::DisableHost { host } => Request::DisableHostChecks { host },
        Commands::EnableService { host, service } => Request::EnableServiceChecks { host, service },
        Commands::DisableService { host, service } => Request::DisableServiceChecks { host, service },
        Commands::ForceHostCheck { host } => Request::ForceHostCheck { host },
        Commands::ForceServiceCheck { host, service } => Request::ForceServiceCheck { host, service },
    };

    match client.send(&request).await? {
        Response::Ok => println!("ok"),
        Response::Status { host_count, service_count, protocol_version } => {
            println!("protocol version: {protocol_version}");
            println!("hosts: {host_count}");
            println!("services: {service_count}");
        }
        Response::Error { message } => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    }

    Ok(())
}
