// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon client: connects to `monitord`'s command socket and exchanges
//! one newline-delimited JSON request/response pair per call.

use monitor_daemon::command_channel::{Request, Response};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("monitord is not running (no socket at {0})")]
    DaemonNotRunning(PathBuf),
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed response from daemon: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("daemon rejected the request: {0}")]
    Rejected(String),
}

pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    pub fn connect(socket_path: &Path) -> Result<Self, ClientError> {
        if !socket_path.exists() {
            return Err(ClientError::DaemonNotRunning(socket_path.to_path_buf()));
        }
        Ok(Self { socket_path: socket_path.to_path_buf() })
    }

    pub async fn send(&self, request: &Request) -> Result<Response, ClientError> {
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (read_half, mut write_half) = stream.into_split();

        let mut line = serde_json::to_vec(request)?;
        line.push(b'\n');
        write_half.write_all(&line).await?;

        let mut reader = BufReader::new(read_half);
        let mut response_line = String::new();
        reader.read_line(&mut response_line).await?;
        Ok(serde_json::from_str(response_line.trim_end())?)
    }

    /// Send a request that only expects `Response::Ok`/`Response::Error`.
    pub async fn send_simple(&self, request: &Request) -> Result<(), ClientError> {
        match self.send(request).await? {
            Response::Ok => Ok(()),
            Response::Error { message } => Err(ClientError::Rejected(message)),
            Response::Status { .. } => Err(ClientError::Rejected("unexpected status response".to_string())),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
