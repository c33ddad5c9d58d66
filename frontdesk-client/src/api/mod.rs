//! Typed bindings for every booking API endpoint
//!
//! `BookingApi` is generic over the transport so controllers can be driven by
//! the network client in production and by an in-memory fake in tests.

mod guest;
mod reception;

use crate::{ClientError, ClientResult, HttpClient};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::response::{Ack, ErrorBody};
use std::sync::Arc;

/// Booking API bound to a transport
pub struct BookingApi<H> {
    http: Arc<H>,
}

impl<H> Clone for BookingApi<H> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
        }
    }
}

impl<H: HttpClient> BookingApi<H> {
    pub fn new(http: H) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    pub fn from_arc(http: Arc<H>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }
}

/// Decode a mutation response, treating `{"success": false}` as a domain error
///
/// Some endpoints report rejections with a 200 status and a `success` flag.
pub(crate) fn accept<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let ack: Ack = serde_json::from_value(value)?;
        let body = ErrorBody::from(ack);
        let code = body.error_code();
        tracing::warn!(%code, "request rejected in acknowledgement body");
        return Err(ClientError::Api {
            status: StatusCode::OK,
            code,
            message: body.message,
        });
    }
    if value.is_null() {
        return serde_json::from_value(Value::Object(Default::default()))
            .map_err(|_| ClientError::InvalidResponse("empty response body".into()));
    }
    Ok(serde_json::from_value(value)?)
}
