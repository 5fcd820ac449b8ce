//! Error translation for management API responses.
//!
//! Every remote call goes through [`translate`]: transport failures become
//! [`GatecertError::Transport`], statuses >= 400 become
//! [`GatecertError::Remote`] with the service's error code parsed from the
//! body, and everything else is passed through as a [`RemoteResponse`].
//!
//! Error codes are read from the JSON body, either the top-level `code`
//! field or an Apigee fault's `fault.detail.errorcode`. A body without a
//! parsable code still yields a `Remote` error, with `code: None`, and an
//! unknown code is kept as [`RemoteErrorCode::Other`]; callers only special
//! case the enumerated codes.

use gatecert_types::{GatecertError, RemoteErrorCode, RemoteResponse, Result};
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    fault: Option<Fault>,
}

#[derive(Deserialize)]
struct Fault {
    detail: Option<FaultDetail>,
}

#[derive(Deserialize)]
struct FaultDetail {
    errorcode: Option<String>,
}

/// Extract the structured error code from a response body.
pub fn parse_error_code(body: &str) -> Option<RemoteErrorCode> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    parsed
        .code
        .or_else(|| parsed.fault.and_then(|f| f.detail).and_then(|d| d.errorcode))
        .filter(|code| !code.is_empty())
        .map(|code| RemoteErrorCode::from_code(&code))
}

/// Classify a completed exchange by status.
pub fn translate_status(method: &str, url: &str, status: u16, body: String) -> Result<RemoteResponse> {
    if status >= 400 {
        let code = parse_error_code(&body);
        tracing::debug!(%method, %url, status, code = ?code, "remote call failed");
        return Err(GatecertError::remote(method, url, status, body, code));
    }

    Ok(RemoteResponse {
        method: method.to_string(),
        url: url.to_string(),
        status,
        body,
    })
}

/// Translate the outcome of a sent request.
pub async fn translate(
    method: &reqwest::Method,
    url: &str,
    outcome: reqwest::Result<reqwest::Response>,
) -> Result<RemoteResponse> {
    let resp = outcome.map_err(|e| transport_error(method, url, e))?;
    let status = resp.status().as_u16();
    let body = resp
        .text()
        .await
        .map_err(|e| transport_error(method, url, e))?;

    translate_status(method.as_str(), url, status, body)
}

fn transport_error(method: &reqwest::Method, url: &str, err: reqwest::Error) -> GatecertError {
    let kind = if err.is_timeout() { "timed out" } else { "failed" };
    GatecertError::Transport(format!("{} {} {}: {}", method, url, kind, err))
}
