//! HTTP helpers for Lambda functions.

use lambda_http::http::response::Builder;
use lambda_http::{Body, Response};
use serde::Serialize;
use serde_json::Value;

pub const ALLOW_METHODS: &str = "GET,POST,OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type,Authorization";

/// CORS policy applied to every response.
#[derive(Debug, Clone)]
pub struct Cors {
    pub allow_origin: String,
}

impl Cors {
    pub fn new(allow_origin: impl Into<String>) -> Self {
        Self {
            allow_origin: allow_origin.into(),
        }
    }

    fn builder(&self, status: u16) -> Builder {
        Response::builder()
            .status(status)
            .header("Access-Control-Allow-Origin", self.allow_origin.as_str())
            .header("Access-Control-Allow-Methods", ALLOW_METHODS)
            .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
    }

    /// Create a JSON response with the given status code and data.
    pub fn json_response<T: Serialize>(
        &self,
        status: u16,
        data: &T,
    ) -> Result<Response<Body>, lambda_http::Error> {
        Ok(self
            .builder(status)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(data)?))?)
    }

    /// Create a `{"error": message}` response.
    pub fn error_response(
        &self,
        status: u16,
        message: impl Into<String>,
    ) -> Result<Response<Body>, lambda_http::Error> {
        self.json_response(status, &serde_json::json!({ "error": message.into() }))
    }

    /// Create a response with CORS headers and no body, e.g. for preflight.
    pub fn empty_response(&self, status: u16) -> Result<Response<Body>, lambda_http::Error> {
        Ok(self.builder(status).body(Body::Empty)?)
    }
}

impl Default for Cors {
    fn default() -> Self {
        Self::new("*")
    }
}

/// Parse a request body as JSON. An empty body parses as `{}`.
pub fn parse_json_body(body: &Body) -> Result<Value, serde_json::Error> {
    let bytes: &[u8] = body.as_ref();
    if bytes.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(bytes)
}
