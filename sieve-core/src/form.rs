//! URL-encoded form and query string parsing

use crate::Error;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;

/// Parse URL-encoded form data into a typed value
pub fn parse_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_urlencoded::from_bytes(body)
        .map_err(|e| Error::BadRequest(format!("Failed to parse form data: {}", e)))
}

/// Parse URL-encoded pairs into an ordered map.
///
/// Repeated keys keep their first position and the last value.
pub fn parse_form_map(body: &[u8]) -> Result<IndexMap<String, String>, Error> {
    let pairs: Vec<(String, String)> = parse_form(body)?;
    Ok(pairs.into_iter().collect())
}

/// Parse a raw query string (with or without the leading `?`)
pub fn parse_query(query: &str) -> Result<IndexMap<String, String>, Error> {
    parse_form_map(query.trim_start_matches('?').as_bytes())
}
