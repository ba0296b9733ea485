use crate::error::{Error, Result};
use uuid::Uuid;

/// Parse an identifier arriving as loose text (multipart form fields).
/// Fails before any I/O with a 400-mapped error.
pub fn parse_uuid(raw: Option<&str>, field: &str) -> Result<Uuid> {
    let raw = raw.ok_or_else(|| Error::BadRequest(format!("{} required", field)))?;
    Uuid::parse_str(raw.trim())
        .map_err(|_| Error::BadRequest(format!("{} must be a valid UUID", field)))
}
