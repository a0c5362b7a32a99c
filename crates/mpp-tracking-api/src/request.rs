//! Request body validation
//!
//! Bodies are checked field by field instead of through a derived struct so
//! a 400 can name every missing field at once.

use mpp_tracking_core::{Credentials, DEFAULT_LOCATION_ID};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const SEARCH_FIELDS: [&str; 4] = ["base_url", "username", "password", "nama_pemohon"];
pub const DETAIL_FIELDS: [&str; 4] = ["base_url", "username", "password", "detail_link"];

const LOCATION_FIELD: &str = "lokasi";

/// A validated JSON object body
#[derive(Debug)]
pub struct TrackingRequest {
    fields: Map<String, Value>,
}

impl TrackingRequest {
    /// Parses `body` and checks that every `required` key is present
    pub fn parse(body: &[u8], required: &[&str]) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidBody(format!("Request body must be valid JSON: {}", e)))?;

        let Value::Object(fields) = value else {
            return Err(ApiError::InvalidBody(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let missing: Vec<String> = required
            .iter()
            .filter(|field| !fields.contains_key(**field))
            .map(|field| field.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ApiError::MissingFields(missing));
        }

        Ok(Self { fields })
    }

    /// A field that must hold a JSON string
    pub fn text(&self, field: &str) -> Result<&str, ApiError> {
        match self.fields.get(field) {
            Some(Value::String(value)) => Ok(value),
            Some(_) => Err(ApiError::InvalidBody(format!(
                "Field '{}' must be a string",
                field
            ))),
            None => Err(ApiError::MissingFields(vec![field.to_string()])),
        }
    }

    /// Portal credentials; `lokasi` defaults to "1" and may be a number
    pub fn credentials(&self) -> Result<Credentials, ApiError> {
        let location = match self.fields.get(LOCATION_FIELD) {
            None | Some(Value::Null) => DEFAULT_LOCATION_ID.to_string(),
            Some(Value::String(value)) => value.clone(),
            Some(Value::Number(value)) => value.to_string(),
            Some(_) => {
                return Err(ApiError::InvalidBody(format!(
                    "Field '{}' must be a string or number",
                    LOCATION_FIELD
                )));
            }
        };

        let credentials = Credentials::new(
            self.text("base_url")?,
            self.text("username")?,
            self.text("password")?,
            location,
        )?;

        Ok(credentials)
    }
}
