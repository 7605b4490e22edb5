//! Delivery strategy chain
//!
//! The path to the SMS gateway traverses environments with inconsistent
//! CORS/network policies (public relay, same-origin dev proxy, direct), so
//! delivery is modeled as an ordered list of [`Strategy`] descriptors
//! evaluated by a single attempt-and-classify function. The chain
//! short-circuits on unambiguous outcomes (success, credential rejection,
//! relay lockout) and falls through to the next strategy otherwise.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::Serialize;
use thiserror::Error;

/// Substring in a 403 body that identifies the public relay's access lock.
/// Clearing it requires a human visiting the relay's unlock page; the chain
/// cannot recover programmatically.
pub const LOCKOUT_MARKER: &str = "corsdemo";

/// One concrete network path to the SMS gateway.
#[derive(Debug, Clone)]
pub struct Strategy {
    pub name: &'static str,
    pub url: String,
    /// Extra headers beyond Authorization / Content-Type / Accept.
    pub extra_headers: Vec<(&'static str, &'static str)>,
    /// Wall-clock bound for the whole attempt; elapsing counts as strategy
    /// failure and the chain proceeds.
    pub timeout: Duration,
}

/// Wire payload for the gateway campaign endpoint.
///
/// Field names are part of the wire format, bit-exact:
/// `{"Message", "Originator", "Destinations": [phone], "Action": "create"}`.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignPayload {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Originator")]
    pub originator: String,
    #[serde(rename = "Destinations")]
    pub destinations: Vec<String>,
    #[serde(rename = "Action")]
    pub action: String,
}

impl CampaignPayload {
    pub fn new(message: &str, originator: &str, destination: &str) -> Self {
        Self {
            message: message.to_string(),
            originator: originator.to_string(),
            destinations: vec![destination.to_string()],
            action: "create".to_string(),
        }
    }
}

/// Encode the gateway bearer credential: base64 of `username:password`.
pub fn basic_credential(username: &str, password: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{username}:{}", password.trim()))
}

/// Raw HTTP response as seen by the chain.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Network-level failure of a single strategy attempt.
///
/// Never escapes the chain boundary; every variant means "try the next
/// strategy".
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

/// Transport seam for the chain.
///
/// Timeout enforcement is the chain's job; implementations should not apply
/// their own.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    async fn post(
        &self,
        strategy: &Strategy,
        auth: &str,
        payload: &CampaignPayload,
    ) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GatewayTransport for HttpTransport {
    async fn post(
        &self,
        strategy: &Strategy,
        auth: &str,
        payload: &CampaignPayload,
    ) -> Result<RawResponse, TransportError> {
        let mut request = self
            .client
            .post(&strategy.url)
            .header("Authorization", format!("Basic {auth}"))
            .header("Accept", "application/json")
            .json(payload);
        for (name, value) in &strategy.extra_headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

/// Outcome of one delivery attempt to one destination.
///
/// Ephemeral: created per recipient, discarded after aggregation into run
/// totals.
#[derive(Debug, Clone)]
pub struct SendResult {
    pub destination: String,
    pub success: bool,
    pub status: u16,
    pub text: String,
}

impl SendResult {
    /// Synthetic result returned when every strategy threw.
    fn none_attempted(destination: &str) -> Self {
        Self {
            destination: destination.to_string(),
            success: false,
            status: 0,
            text: "No strategies tried".to_string(),
        }
    }

    /// Relay access lock: terminal, requires manual unlock by the user.
    pub fn is_proxy_locked(&self) -> bool {
        self.status == 403 && self.text.contains(LOCKOUT_MARKER)
    }

    /// Credential rejection: terminal, further strategies cannot succeed.
    pub fn is_auth_rejected(&self) -> bool {
        self.status == 401
    }
}

/// Classification of one raw response. `Done` ends the chain (success or
/// terminal failure); `Recorded` becomes the "last result" and the chain
/// proceeds.
enum Classified {
    Done(SendResult),
    Recorded(SendResult),
}

/// The one piece of business logic that must stay correct across transports:
/// map a raw gateway/relay response to an attempt outcome.
fn classify(destination: &str, raw: RawResponse) -> Classified {
    let RawResponse { status, body } = raw;
    let result = |success, text: String| SendResult {
        destination: destination.to_string(),
        success,
        status,
        text,
    };

    // Relay access lock: surface immediately so the caller can show the
    // unlock affordance.
    if status == 403 && body.contains(LOCKOUT_MARKER) {
        return Classified::Done(result(false, body));
    }

    // Credential rejection: no point trying other transports.
    if status == 401 {
        return Classified::Done(result(false, body));
    }

    if (200..300).contains(&status) {
        return match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => {
                if json.get("Code").and_then(|c| c.as_i64()) == Some(0) {
                    Classified::Done(result(true, body))
                } else {
                    // Provider application error (e.g. -111, -117, -202)
                    let message = json
                        .get("Message")
                        .and_then(|m| m.as_str())
                        .map(String::from)
                        .unwrap_or_else(|| body.clone());
                    Classified::Done(result(false, message))
                }
            }
            // Non-JSON but HTTP-successful acknowledgment counts as success.
            Err(_) => Classified::Done(result(true, body)),
        };
    }

    Classified::Recorded(result(false, body))
}

/// Ordered-fallback delivery over a fixed strategy list.
pub struct StrategyChain<T> {
    pub(crate) transport: T,
    strategies: Vec<Strategy>,
    originator: String,
}

impl<T: GatewayTransport> StrategyChain<T> {
    pub fn new(transport: T, strategies: Vec<Strategy>, originator: impl Into<String>) -> Self {
        Self {
            transport,
            strategies,
            originator: originator.into(),
        }
    }

    /// Deliver one message to one normalized destination.
    ///
    /// Tries strategies in order, exactly once each. Network errors and
    /// timeouts are contained here and treated as "continue"; the returned
    /// result is the first unambiguous outcome, the last recorded
    /// non-exceptional result, or a synthetic status-0 result if every
    /// strategy threw.
    pub async fn send(&self, destination: &str, message: &str, auth: &str) -> SendResult {
        let payload = CampaignPayload::new(message, &self.originator, destination);
        let mut last = SendResult::none_attempted(destination);

        for strategy in &self.strategies {
            let attempt = tokio::time::timeout(
                strategy.timeout,
                self.transport.post(strategy, auth, &payload),
            )
            .await;

            let raw = match attempt {
                Ok(Ok(raw)) => raw,
                Ok(Err(err)) => {
                    tracing::debug!(strategy = strategy.name, error = %err, "strategy failed");
                    continue;
                }
                Err(_) => {
                    tracing::debug!(strategy = strategy.name, "strategy timed out");
                    continue;
                }
            };

            match classify(destination, raw) {
                Classified::Done(result) => return result,
                Classified::Recorded(result) => last = result,
            }
        }

        last
    }
}

/// Default strategy order: the public relay first (fails fast with a 403
/// when locked instead of hanging), then the short-timeout dev proxy, then
/// direct as a fail-safe.
pub fn default_strategies(
    relay_prefix: &str,
    proxy_path: &str,
    gateway_url: &str,
) -> Vec<Strategy> {
    vec![
        Strategy {
            name: "cors-relay",
            url: format!("{relay_prefix}{gateway_url}"),
            extra_headers: vec![("X-Requested-With", "XMLHttpRequest")],
            timeout: Duration::from_secs(10),
        },
        Strategy {
            name: "local-proxy",
            url: proxy_path.to_string(),
            extra_headers: vec![],
            timeout: Duration::from_secs(3),
        },
        Strategy {
            name: "direct",
            url: gateway_url.to_string(),
            extra_headers: vec![],
            timeout: Duration::from_secs(3),
        },
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted behavior for one strategy attempt.
    pub(crate) enum Script {
        Respond(u16, &'static str),
        Fail,
        Hang,
    }

    /// Mock transport that plays back a script, one entry per attempt.
    pub(crate) struct MockTransport {
        script: Mutex<Vec<Script>>,
        pub(crate) calls: AtomicUsize,
    }

    impl MockTransport {
        pub(crate) fn new(script: Vec<Script>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GatewayTransport for MockTransport {
        async fn post(
            &self,
            _strategy: &Strategy,
            _auth: &str,
            _payload: &CampaignPayload,
        ) -> Result<RawResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let step = self.script.lock().unwrap().remove(0);
            match step {
                Script::Respond(status, body) => Ok(RawResponse {
                    status,
                    body: body.to_string(),
                }),
                Script::Fail => Err(TransportError::Network("connection refused".into())),
                Script::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    pub(crate) fn test_strategies(n: usize) -> Vec<Strategy> {
        (0..n)
            .map(|i| Strategy {
                name: ["first", "second", "third"][i],
                url: format!("http://gateway.test/{i}"),
                extra_headers: vec![],
                timeout: Duration::from_secs(3),
            })
            .collect()
    }

    pub(crate) fn chain_with(script: Vec<Script>) -> StrategyChain<MockTransport> {
        let n = script.len().min(3).max(1);
        StrategyChain::new(MockTransport::new(script), test_strategies(n), "3247")
    }

    #[tokio::test]
    async fn test_auth_rejection_short_circuits() {
        let chain = chain_with(vec![
            Script::Respond(401, "unauthorized"),
            Script::Respond(200, r#"{"Code":0}"#),
            Script::Respond(200, r#"{"Code":0}"#),
        ]);
        let result = chain.send("64211234567", "hello", "auth").await;
        assert!(!result.success);
        assert_eq!(result.status, 401);
        assert!(result.is_auth_rejected());
        assert_eq!(chain.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_lockout_short_circuits() {
        let chain = chain_with(vec![
            Script::Respond(403, "See /corsdemo for access"),
            Script::Respond(200, r#"{"Code":0}"#),
            Script::Respond(200, r#"{"Code":0}"#),
        ]);
        let result = chain.send("64211234567", "hello", "auth").await;
        assert!(!result.success);
        assert_eq!(result.status, 403);
        assert!(result.is_proxy_locked());
        assert_eq!(chain.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_plain_403_is_not_lockout() {
        let chain = chain_with(vec![
            Script::Respond(403, "forbidden"),
            Script::Respond(200, r#"{"Code":0}"#),
        ]);
        let result = chain.send("64211234567", "hello", "auth").await;
        assert!(result.success);
        assert_eq!(chain.transport.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_through_to_next_strategy() {
        let chain = chain_with(vec![
            Script::Hang,
            Script::Respond(200, r#"{"Code":0,"Id":1}"#),
        ]);
        let result = chain.send("64211234567", "hello", "auth").await;
        assert!(result.success);
        assert_eq!(result.status, 200);
        assert_eq!(chain.transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_provider_error_code_is_failure_with_message() {
        let chain = chain_with(vec![Script::Respond(
            200,
            r#"{"Code":-111,"Message":"Insufficient credit"}"#,
        )]);
        let result = chain.send("64211234567", "hello", "auth").await;
        assert!(!result.success);
        assert_eq!(result.status, 200);
        assert_eq!(result.text, "Insufficient credit");
    }

    #[tokio::test]
    async fn test_non_json_ok_body_is_success() {
        let chain = chain_with(vec![Script::Respond(200, "OK: queued")]);
        let result = chain.send("64211234567", "hello", "auth").await;
        assert!(result.success);
        assert_eq!(result.text, "OK: queued");
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_recorded_result() {
        let chain = chain_with(vec![
            Script::Respond(502, "bad gateway"),
            Script::Fail,
            Script::Respond(500, "boom"),
        ]);
        let result = chain.send("64211234567", "hello", "auth").await;
        assert!(!result.success);
        assert_eq!(result.status, 500);
        assert_eq!(result.text, "boom");
    }

    #[tokio::test]
    async fn test_all_strategies_throwing_yields_synthetic_result() {
        let chain = chain_with(vec![Script::Fail, Script::Fail, Script::Fail]);
        let result = chain.send("64211234567", "hello", "auth").await;
        assert!(!result.success);
        assert_eq!(result.status, 0);
        assert_eq!(result.text, "No strategies tried");
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = CampaignPayload::new("Ping Test", "3247", "64000000000");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Message": "Ping Test",
                "Originator": "3247",
                "Destinations": ["64000000000"],
                "Action": "create"
            })
        );
    }

    #[test]
    fn test_basic_credential_trims_password() {
        assert_eq!(
            basic_credential("pingscribe", " secret "),
            base64::engine::general_purpose::STANDARD.encode("pingscribe:secret")
        );
    }
}
