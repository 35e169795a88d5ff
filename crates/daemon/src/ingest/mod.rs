// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! NRDP-compatible passive check-result ingestion (spec §4.10): an HTTP
//! endpoint submitters POST `checkresults` payloads to. The endpoint only
//! ever builds [`CheckResult`]s and pushes them onto the scheduler's
//! result channel — it never touches the object graph itself. Dynamic
//! registration for unknown hosts/services is deferred to the scheduler,
//! which already holds the write lock during result processing and is
//! the sole writer of the dynamic registry.

mod nrdp;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::any;
use axum::Router;
use monitor_core::{CheckResultBuilder, CheckSubject, CheckType};
use rand::Rng;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

use nrdp::{detect_format, form_field, parse_json, parse_xml, BodyFormat, RawRecord};

pub struct IngestState {
    pub results_tx: mpsc::Sender<monitor_core::CheckResult>,
    pub dynamic_register: bool,
    pub token_hash: String,
    pub loopback_bypass: bool,
}

/// Build the axum router for the configured NRDP path.
pub fn router(path: &str, state: Arc<IngestState>) -> Router {
    Router::new()
        .route(path, any(handle_nrdp))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_nrdp(
    State(state): State<Arc<IngestState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    method: Method,
    uri: axum::http::Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body = String::from_utf8_lossy(&body).into_owned();
    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let format = detect_format(content_type);
    let query = uri.query().unwrap_or("");

    if method != Method::POST {
        let status = StatusCode::METHOD_NOT_ALLOWED;
        return match format {
            Some(format) => envelope_response(format, status, status.as_u16() as i32, "only POST is accepted"),
            None => plain_response(status, "only POST is accepted"),
        };
    }

    let Some(format) = format else {
        return plain_response(StatusCode::BAD_REQUEST, "unsupported content type");
    };

    if !is_authorized(&state, addr, &body, query, &format) {
        return plain_response(StatusCode::UNAUTHORIZED, "unauthorized");
    }

    let (format, records) = match extract_records(&body, format) {
        Ok(pair) => pair,
        Err(error) => {
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            return envelope_response(format, status, status.as_u16() as i32, &error);
        }
    };

    let source = format!("{}://{}:{}", format.scheme(), addr.ip(), addr.port());
    let mut accepted = 0usize;
    for record in &records {
        if inject(&state, record, &source) {
            accepted += 1;
        }
    }

    let status = StatusCode::OK;
    envelope_response(format, status, status.as_u16() as i32, &format!("Processing {accepted} Results"))
}

/// Accepts the submitter token from the query string (any format) or the
/// form body (form-encoded submissions only), per spec §4.10's "form body
/// or query" wording.
fn is_authorized(state: &IngestState, addr: SocketAddr, body: &str, query: &str, format: &BodyFormat) -> bool {
    if state.loopback_bypass && addr.ip().is_loopback() {
        return true;
    }
    if state.token_hash.is_empty() {
        return false;
    }
    let token = form_field(query, "token").or_else(|| match format {
        BodyFormat::Form => form_field(body, "token"),
        _ => None,
    });
    match token {
        Some(token) => bcrypt::verify(token, &state.token_hash).unwrap_or(false),
        None => false,
    }
}

/// Pulls the submitted XML/JSON payload out of its transport (a raw body,
/// or a form field) and parses it, refining the coarse content-type-based
/// [`BodyFormat`] guess into the precise variant used for the `source` tag.
fn extract_records(body: &str, format: BodyFormat) -> Result<(BodyFormat, Vec<RawRecord>), String> {
    match format {
        BodyFormat::Form => {
            if let Some(xml) = form_field(body, "XMLDATA") {
                return Ok((BodyFormat::XmlForm, parse_xml(&xml)?));
            }
            if let Some(json) = form_field(body, "JSONDATA") {
                return Ok((BodyFormat::JsonForm, parse_json(&json)?));
            }
            Err("form body carried neither XMLDATA nor JSONDATA".to_string())
        }
        BodyFormat::RawXml => Ok((BodyFormat::RawXml, parse_xml(body)?)),
        BodyFormat::RawJson => Ok((BodyFormat::RawJson, parse_json(body)?)),
        BodyFormat::XmlForm | BodyFormat::JsonForm => {
            unreachable!("detect_format only ever returns Form for form bodies")
        }
    }
}

fn inject(state: &IngestState, record: &RawRecord, source: &str) -> bool {
    if record.hostname.is_empty() {
        return false;
    }
    let now = SystemTime::now();
    let subject = match &record.servicename {
        Some(description) => CheckSubject::service(record.hostname.clone(), description.clone()),
        None => CheckSubject::host(record.hostname.clone()),
    };

    let result = CheckResultBuilder::new(subject, CheckType::Passive)
        .return_code(record.status)
        .output(record.output.clone())
        .times(record.timestamp, now)
        .exited_ok(true)
        .dynamic_register(state.dynamic_register)
        .build();

    match state.results_tx.try_send(result) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(%error, source, host = record.hostname.as_str(), "dropping NRDP result, result channel is full");
            false
        }
    }
}

fn random_id() -> String {
    let mut rng = rand::thread_rng();
    (0..3).map(|_| rng.gen_range(b'A'..=b'Z') as char).collect()
}

fn plain_response(status: StatusCode, message: &str) -> axum::response::Response {
    (status, message.to_string()).into_response()
}

fn envelope_response(format: BodyFormat, status: StatusCode, status_code: i32, message: &str) -> axum::response::Response {
    let id = random_id();
    if format.is_xml() {
        let body = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<response><id>{id}</id><status>{status_code}</status><message>{}</message></response>",
            xml_escape(message)
        );
        (status, [(axum::http::header::CONTENT_TYPE, "text/xml")], body).into_response()
    } else {
        let body = serde_json::json!({ "id": id, "status": status_code, "message": message });
        (status, axum::Json(body)).into_response()
    }
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
