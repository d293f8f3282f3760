use cartotrace_core::{
    comparison::ComparisonResult,
    point::{Point, PointEntry},
    trace::Algorithm,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::client_error::ClientError;

#[derive(Debug, Serialize)]
pub struct SolveRequestBody {
    pub algorithm: Algorithm,
}

#[derive(Debug, Serialize)]
pub struct AddPointRequestBody<'a> {
    pub name: &'a str,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
pub struct CompareResponse {
    pub results: ComparisonResult,
}

#[derive(Deserialize)]
pub struct ScenarioResponse {
    pub cities: Vec<PointEntry>,
}

/// The city listing is a bare `[[name, [lat, lng]], ...]` array.
pub fn parse_points(bytes: &[u8]) -> Result<Vec<Point>, ClientError> {
    let entries: Vec<PointEntry> = serde_json::from_slice(bytes)?;
    Ok(entries.into_iter().map(Point::from).collect())
}

/// Checks the `success` flag of an envelope, then reads the payload fields out of it.
pub fn parse_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    let value: Value = serde_json::from_slice(bytes)?;
    ensure_success(&value)?;
    Ok(serde_json::from_value(value)?)
}

pub fn ensure_success(value: &Value) -> Result<(), ClientError> {
    if value.get("success").and_then(Value::as_bool) == Some(true) {
        Ok(())
    } else {
        Err(ClientError::Rejected(error_message(value)))
    }
}

pub fn error_message(value: &Value) -> Option<String> {
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Error for a non-2xx response: the body's `error` field when it has one.
pub fn rejection(status: u16, bytes: &[u8]) -> ClientError {
    match serde_json::from_slice::<Value>(bytes)
        .ok()
        .as_ref()
        .and_then(error_message)
    {
        Some(message) => ClientError::Rejected(Some(message)),
        None => ClientError::Api {
            status,
            message: String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}
