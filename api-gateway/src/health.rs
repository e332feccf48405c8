//! Liveness check.

use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, Response};
use serde_json::json;
use shared::Cors;

/// Handle `GET /health`.
pub fn check(cors: &Cors, event: &Request) -> Result<Response<Body>, Error> {
    if *event.method() == Method::OPTIONS {
        return cors.empty_response(200);
    }
    cors.json_response(200, &json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, request};

    #[test]
    fn test_health() {
        let cors = Cors::new("https://thecarbath.example");

        let response = check(&cors, &request("GET", "/health", None)).unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response), json!({ "status": "ok" }));
        assert_eq!(
            response.headers()["Access-Control-Allow-Origin"],
            "https://thecarbath.example"
        );

        let response = check(&cors, &request("OPTIONS", "/health", None)).unwrap();
        assert_eq!(response.status(), 200);
        assert!(response.body().as_ref().is_empty());
    }
}
