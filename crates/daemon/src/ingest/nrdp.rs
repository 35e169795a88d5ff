// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure parsing/normalization logic for the NRDP passive-ingestion
//! envelope (spec §4.10): format detection, XML/JSON record extraction,
//! and per-record normalization. Kept free of axum/tokio types so it is
//! testable without spinning up an HTTP server.

use chrono::{NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::time::{Duration, SystemTime};

/// One submitter-supplied check result, before it is turned into a
/// [`monitor_core::CheckResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub hostname: String,
    pub servicename: Option<String>,
    pub status: i32,
    pub output: String,
    pub timestamp: SystemTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// `application/x-www-form-urlencoded`; refined into `XmlForm`/`JsonForm`
    /// once the caller sees which of `XMLDATA`/`JSONDATA` is present.
    Form,
    XmlForm,
    JsonForm,
    RawXml,
    RawJson,
}

impl BodyFormat {
    pub fn is_xml(self) -> bool {
        matches!(self, BodyFormat::XmlForm | BodyFormat::RawXml)
    }

    /// The `"<format>://"` scheme used to build a record's `source` field.
    pub fn scheme(self) -> &'static str {
        match self {
            BodyFormat::Form => "form",
            BodyFormat::XmlForm => "xml-form",
            BodyFormat::JsonForm => "json-form",
            BodyFormat::RawXml => "raw-xml",
            BodyFormat::RawJson => "raw-json",
        }
    }
}

/// Content-Type (already trimmed of `;charset=...` parameters) to body
/// shape (spec §4.10 "Format detection"). Returns `None` for anything
/// unsupported.
pub fn detect_format(content_type: &str) -> Option<BodyFormat> {
    let base = content_type.split(';').next().unwrap_or("").trim();
    match base {
        "application/x-www-form-urlencoded" => Some(BodyFormat::Form),
        "text/xml" | "application/xml" => Some(BodyFormat::RawXml),
        "application/json" => Some(BodyFormat::RawJson),
        _ => None,
    }
}

/// Minimal `application/x-www-form-urlencoded` field lookup: splits on
/// `&`/`=` and percent-decodes, treating `+` as a literal space the way
/// form bodies (not query strings) encode it.
pub fn form_field(body: &str, key: &str) -> Option<String> {
    body.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if percent_decode(k) == key {
            Some(percent_decode(v))
        } else {
            None
        }
    })
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                if let Some(value) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    out.push(value);
                    i += 3;
                } else {
                    out.push(bytes[i]);
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Strip control characters from plugin output, keeping `\n` (spec §4.10).
pub fn sanitize_output(raw: &str) -> String {
    raw.chars().filter(|c| *c == '\n' || !c.is_control()).collect()
}

/// Clamp a raw status value to `[0, 3]`; anything unparsable or
/// out-of-range normalizes to `3` (Unknown).
pub fn clamp_status(raw: &str) -> i32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if (0..=3).contains(&n) => n as i32,
        _ => 3,
    }
}

/// Parse a timestamp against the formats NRDP submitters commonly send
/// (spec §4.10): RFC3339, `YYYY-MM-DDTHH:MM:SS` with/without a trailing
/// `Z`, `YYYY-MM-DD HH:MM:SS`, or a bare Unix-epoch integer. Anything
/// unparsable falls back to `now`.
pub fn parse_timestamp(raw: &str, now: SystemTime) -> SystemTime {
    let raw = raw.trim();
    if let Ok(epoch) = raw.parse::<u64>() {
        return SystemTime::UNIX_EPOCH + Duration::from_secs(epoch);
    }
    if let Some(t) = parse_civil_datetime(raw) {
        return t;
    }
    now
}

/// Parses `YYYY-MM-DD[T ]HH:MM:SS[Z|+HH:MM]`. RFC3339 stamps carrying a
/// non-UTC offset are resolved against that offset rather than assumed UTC;
/// the space-separated and offset-less `T` forms have no zone information
/// and are treated as UTC.
fn parse_civil_datetime(raw: &str) -> Option<SystemTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(SystemTime::from(dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            let dt = chrono::DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc);
            return Some(SystemTime::from(dt));
        }
    }
    None
}

/// Parse the NRDP XML envelope:
/// `<checkresults><checkresult type="service"><hostname/>...</checkresult>...</checkresults>`.
pub fn parse_xml(body: &str) -> Result<Vec<RawRecord>, String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut current_tag = String::new();
    let mut hostname: Option<String> = None;
    let mut servicename: Option<String> = None;
    let mut state: Option<String> = None;
    let mut output: Option<String> = None;
    let mut timestamp: Option<String> = None;
    let mut in_checkresult = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Eof => break,
            Event::Start(tag) => {
                let name = String::from_utf8_lossy(tag.name().as_ref()).to_string();
                if name == "checkresult" {
                    in_checkresult = true;
                    hostname = None;
                    servicename = None;
                    state = None;
                    output = None;
                    timestamp = None;
                }
                current_tag = name;
            }
            Event::Text(text) if in_checkresult => {
                let value = text.unescape().map_err(|e| e.to_string())?.into_owned();
                match current_tag.as_str() {
                    "hostname" => hostname = Some(value),
                    "servicename" => servicename = Some(value),
                    "state" => state = Some(value),
                    "output" => output = Some(value),
                    "timestamp" => timestamp = Some(value),
                    _ => {}
                }
            }
            Event::End(tag) => {
                if String::from_utf8_lossy(tag.name().as_ref()) == "checkresult" {
                    if let Some(host) = hostname.take() {
                        records.push((host, servicename.take(), state.take(), output.take(), timestamp.take()));
                    }
                    in_checkresult = false;
                }
                current_tag.clear();
            }
            _ => {}
        }
    }

    let now = SystemTime::now();
    Ok(records
        .into_iter()
        .map(|(hostname, servicename, state, output, timestamp)| RawRecord {
            hostname,
            servicename,
            status: clamp_status(state.as_deref().unwrap_or("3")),
            output: sanitize_output(output.as_deref().unwrap_or("")),
            timestamp: timestamp.map(|t| parse_timestamp(&t, now)).unwrap_or(now),
        })
        .collect())
}

/// Parse the NRDP JSON envelope: `{"checkresults":[{"hostname":..., ...}]}`.
pub fn parse_json(body: &str) -> Result<Vec<RawRecord>, String> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let results = value
        .get("checkresults")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "missing checkresults array".to_string())?;

    let now = SystemTime::now();
    let mut records = Vec::with_capacity(results.len());
    for entry in results {
        let Some(hostname) = entry.get("hostname").and_then(|v| v.as_str()) else {
            continue;
        };
        let servicename = entry.get("servicename").and_then(|v| v.as_str()).map(str::to_string);
        let status_raw = match entry.get("status") {
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => "3".to_string(),
        };
        let output = entry.get("output").and_then(|v| v.as_str()).unwrap_or("");
        let timestamp_raw = match entry.get("timestamp") {
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        records.push(RawRecord {
            hostname: hostname.to_string(),
            servicename,
            status: clamp_status(&status_raw),
            output: sanitize_output(output),
            timestamp: if timestamp_raw.is_empty() { now } else { parse_timestamp(&timestamp_raw, now) },
        });
    }
    Ok(records)
}

#[cfg(test)]
#[path = "nrdp_tests.rs"]
mod tests;
