//! Remote transform client for the webhook pipeline.
//!
//! Submits one chunk of text per request to the configured endpoint and
//! normalizes the response. The remote service's response schema is not
//! controlled by this system and varies by deployment, so the client is
//! permissive: it tries a closed set of known shapes in a documented
//! precedence order rather than rejecting unknown-but-reasonable payloads.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use textrelay_shared::{PipelineError, Result};

/// User-Agent string for webhook requests.
const USER_AGENT: &str = concat!("TextRelay/", env!("CARGO_PKG_VERSION"));

/// Object fields probed for the transformed text, in precedence order.
const TEXT_FIELDS: [&str; 5] = ["paraphrased", "text", "result", "output", "processed"];

// ---------------------------------------------------------------------------
// WebhookClient
// ---------------------------------------------------------------------------

/// HTTP client bound to one webhook endpoint.
pub struct WebhookClient {
    client: Client,
    endpoint: String,
}

impl WebhookClient {
    /// Create a client for `endpoint`.
    ///
    /// Fails with [`PipelineError::MissingEndpoint`] for an empty endpoint
    /// before any network activity. No request timeout is applied unless
    /// `timeout` is given; by default a call waits for the transport's own
    /// behavior.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        if endpoint.is_empty() {
            return Err(PipelineError::MissingEndpoint);
        }

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| PipelineError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Submit one chunk and return the transformed text.
    ///
    /// Issues `POST {"text": <chunk>}` with a JSON content type. A non-2xx
    /// status fails with [`PipelineError::RemoteCallFailed`] carrying the
    /// status; the body of a failed response is not interpreted. No retry is
    /// attempted here: a failed call fails the whole run.
    #[instrument(skip_all, fields(endpoint = %self.endpoint, chunk_len = text.len()))]
    pub async fn transform(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| PipelineError::transport(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::RemoteCallFailed {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PipelineError::transport(format!("malformed response body: {e}")))?;

        let transformed = extract_text(&body).ok_or(PipelineError::InvalidResponseFormat)?;

        debug!(response_len = transformed.len(), "chunk transformed");
        Ok(transformed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

/// Extract the transformed text from a webhook response body.
///
/// Shapes are tried in order, stopping at the first match:
/// 1. the body itself is a string;
/// 2. a string-valued field from [`TEXT_FIELDS`], probed in that order;
/// 3. the first string among the object's values in enumeration order.
///
/// Returns `None` when no rule yields a string.
fn extract_text(body: &Value) -> Option<&str> {
    if let Value::String(s) = body {
        return Some(s);
    }

    let object = body.as_object()?;

    for field in TEXT_FIELDS {
        if let Some(Value::String(s)) = object.get(field) {
            return Some(s);
        }
    }

    object.values().find_map(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn empty_endpoint_is_rejected_before_any_request() {
        let result = WebhookClient::new("", None);
        assert!(matches!(result, Err(PipelineError::MissingEndpoint)));
    }

    #[test]
    fn extract_prefers_bare_string_body() {
        assert_eq!(extract_text(&json!("verbatim")), Some("verbatim"));
    }

    #[test]
    fn extract_probes_known_fields_in_order() {
        let body = json!({ "status": 200, "text": "second", "paraphrased": "first" });
        assert_eq!(extract_text(&body), Some("first"));

        let body = json!({ "output": "later", "result": "earlier" });
        assert_eq!(extract_text(&body), Some("earlier"));

        for field in TEXT_FIELDS {
            let body = json!({ field: "value" });
            assert_eq!(extract_text(&body), Some("value"), "field {field}");
        }
    }

    #[test]
    fn extract_ignores_non_string_known_fields() {
        // A non-string `text` must not shadow a string value further down
        // the precedence list.
        let body = json!({ "text": 42, "result": "fallback" });
        assert_eq!(extract_text(&body), Some("fallback"));
    }

    #[test]
    fn extract_falls_back_to_first_string_value() {
        let body = json!({ "code": 0, "payload": "anything goes", "extra": true });
        assert_eq!(extract_text(&body), Some("anything goes"));
    }

    #[test]
    fn extract_fails_without_any_string() {
        assert_eq!(extract_text(&json!({ "code": 0, "ok": true })), None);
        assert_eq!(extract_text(&json!(42)), None);
        assert_eq!(extract_text(&json!(["a", "b"])), None);
    }

    #[tokio::test]
    async fn transform_posts_json_and_reads_object_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/webhook/formal"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "text": "chunk text" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "result": "formal text" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = format!("{}/webhook/formal", server.uri());
        let client = WebhookClient::new(&endpoint, None).unwrap();
        let out = client.transform("chunk text").await.unwrap();
        assert_eq!(out, "formal text");
    }

    #[tokio::test]
    async fn transform_accepts_bare_string_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("Hello world")))
            .mount(&server)
            .await;

        let client = WebhookClient::new(&server.uri(), None).unwrap();
        assert_eq!(client.transform("hi").await.unwrap(), "Hello world");
    }

    #[tokio::test]
    async fn non_success_status_carries_the_code() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("ignored body"))
            .mount(&server)
            .await;

        let client = WebhookClient::new(&server.uri(), None).unwrap();
        let err = client.transform("hi").await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::RemoteCallFailed { status: 503 }
        ));
    }

    #[tokio::test]
    async fn stringless_object_is_invalid_response_format() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let client = WebhookClient::new(&server.uri(), None).unwrap();
        let err = client.transform("hi").await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidResponseFormat));
    }

    #[tokio::test]
    async fn malformed_json_body_is_a_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = WebhookClient::new(&server.uri(), None).unwrap();
        let err = client.transform("hi").await.unwrap_err();
        assert!(matches!(err, PipelineError::Transport(_)));
    }
}
