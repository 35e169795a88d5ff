// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Internal operator command surface (spec §4.2 step 5, §10.2): a
//! Unix-domain-socket, newline-delimited JSON request/response protocol,
//! grounded in the teacher's `daemon::protocol`/`daemon::listener` pair —
//! same shape (length-bounded line-delimited JSON over `UnixListener`,
//! one task per connection), narrowed to the toggles the core state
//! machines actually expose: acknowledge/downtime/disable/enable/status.

use monitor_core::AcknowledgementType;
use monitor_engine::SchedulerCommand;
use monitor_objects::ObjectGraph;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

pub const PROTOCOL_VERSION: u32 = 1;

/// Longest accepted request line, guarding against a misbehaving client
/// wedging a connection task on an unbounded read.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Request {
    AcknowledgeProblem { host: String, service: Option<String> },
    CancelAcknowledgement { host: String, service: Option<String> },
    ScheduleDowntime { host: String, service: Option<String> },
    CancelDowntime { host: String, service: Option<String> },
    DisableHostChecks { host: String },
    EnableHostChecks { host: String },
    DisableServiceChecks { host: String, service: String },
    EnableServiceChecks { host: String, service: String },
    ForceHostCheck { host: String },
    ForceServiceCheck { host: String, service: String },
    Status,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Status { host_count: usize, service_count: usize, protocol_version: u32 },
    Error { message: String },
}

pub struct CommandChannel {
    graph: Arc<ObjectGraph>,
    command_tx: mpsc::Sender<SchedulerCommand>,
}

impl CommandChannel {
    pub fn new(graph: Arc<ObjectGraph>, command_tx: mpsc::Sender<SchedulerCommand>) -> Self {
        Self { graph, command_tx }
    }

    /// Bind the socket and serve connections until the listener errors.
    /// Grounded in the teacher's `Listener::run` accept loop, minus the
    /// richer per-connection context object the job-queue daemon needs.
    pub async fn run(self, socket_path: &std::path::Path) -> std::io::Result<()> {
        let _ = std::fs::remove_file(socket_path);
        let listener = UnixListener::bind(socket_path)?;
        let this = Arc::new(self);
        loop {
            let (stream, _) = listener.accept().await?;
            let this = Arc::clone(&this);
            tokio::spawn(async move {
                if let Err(error) = this.serve_connection(stream).await {
                    tracing::debug!(%error, "command channel connection ended");
                }
            });
        }
    }

    async fn serve_connection(&self, stream: UnixStream) -> std::io::Result<()> {
        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();
        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                return Ok(());
            }
            if line.len() > MAX_MESSAGE_SIZE {
                let response = Response::Error { message: "request too large".to_string() };
                write_response(&mut write_half, &response).await?;
                continue;
            }

            let response = match serde_json::from_str::<Request>(line.trim_end()) {
                Ok(request) => self.handle(request).await,
                Err(error) => Response::Error { message: error.to_string() },
            };
            write_response(&mut write_half, &response).await?;
        }
    }

    async fn handle(&self, request: Request) -> Response {
        match request {
            Request::AcknowledgeProblem { host, service } => {
                self.set_acknowledged(&host, service.as_deref(), true);
                Response::Ok
            }
            Request::CancelAcknowledgement { host, service } => {
                self.set_acknowledged(&host, service.as_deref(), false);
                Response::Ok
            }
            Request::ScheduleDowntime { host, service } => {
                self.adjust_downtime(&host, service.as_deref(), 1);
                Response::Ok
            }
            Request::CancelDowntime { host, service } => {
                self.adjust_downtime(&host, service.as_deref(), -1);
                Response::Ok
            }
            Request::DisableHostChecks { host } => {
                self.send(SchedulerCommand::EnableHostActiveChecks { host_name: host, enabled: false }).await
            }
            Request::EnableHostChecks { host } => {
                self.send(SchedulerCommand::EnableHostActiveChecks { host_name: host, enabled: true }).await
            }
            Request::DisableServiceChecks { host, service } => {
                self.send(SchedulerCommand::EnableServiceActiveChecks {
                    host_name: host,
                    description: service,
                    enabled: false,
                })
                .await
            }
            Request::EnableServiceChecks { host, service } => {
                self.send(SchedulerCommand::EnableServiceActiveChecks {
                    host_name: host,
                    description: service,
                    enabled: true,
                })
                .await
            }
            Request::ForceHostCheck { host } => {
                self.send(SchedulerCommand::ForceHostCheck { host_name: host }).await
            }
            Request::ForceServiceCheck { host, service } => {
                self.send(SchedulerCommand::ForceServiceCheck { host_name: host, description: service }).await
            }
            Request::Status => {
                let graph = self.graph.read();
                Response::Status {
                    host_count: graph.host_count(),
                    service_count: graph.service_count(),
                    protocol_version: PROTOCOL_VERSION,
                }
            }
        }
    }

    async fn send(&self, command: SchedulerCommand) -> Response {
        match self.command_tx.send(command).await {
            Ok(()) => Response::Ok,
            Err(_) => Response::Error { message: "scheduler is shutting down".to_string() },
        }
    }

    fn set_acknowledged(&self, host: &str, service: Option<&str>, acknowledged: bool) {
        let mut graph = self.graph.write();
        match service {
            Some(description) => {
                if let Some(s) = graph.service_mut(host, description) {
                    s.problem_acknowledged = acknowledged;
                    s.acknowledgement_type = if acknowledged { AcknowledgementType::Normal } else { AcknowledgementType::None };
                }
            }
            None => {
                if let Some(h) = graph.host_mut(host) {
                    h.problem_acknowledged = acknowledged;
                    h.acknowledgement_type = if acknowledged { AcknowledgementType::Normal } else { AcknowledgementType::None };
                }
            }
        }
    }

    fn adjust_downtime(&self, host: &str, service: Option<&str>, delta: i64) {
        let mut graph = self.graph.write();
        let target: Option<&mut u32> = match service {
            Some(description) => graph.service_mut(host, description).map(|s| &mut s.scheduled_downtime_depth),
            None => graph.host_mut(host).map(|h| &mut h.scheduled_downtime_depth),
        };
        if let Some(depth) = target {
            *depth = depth.saturating_add_signed(delta as i32);
        }
    }
}

async fn write_response(
    write_half: &mut tokio::net::unix::OwnedWriteHalf,
    response: &Response,
) -> std::io::Result<()> {
    let mut payload = serde_json::to_vec(response).unwrap_or_else(|_| b"{\"result\":\"error\"}".to_vec());
    payload.push(b'\n');
    write_half.write_all(&payload).await
}

#[cfg(test)]
#[path = "command_channel_tests.rs"]
mod tests;
