//! Connection tester
//!
//! A one-shot, degenerate case of the delivery strategy chain used to
//! validate gateway credentials before a bulk run. The chain invocation is
//! wrapped in its own hard wall-clock timeout, independent of per-strategy
//! timeouts, so the caller is never blocked indefinitely even if timeout
//! propagation inside the chain misbehaves.

use std::time::Duration;

use super::strategy::{GatewayTransport, StrategyChain};

/// Synthetic destination for the verification send.
pub const TEST_DESTINATION: &str = "64000000000";
/// Fixed test message body.
pub const TEST_MESSAGE: &str = "Ping Test";

const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Human-readable diagnostic for a connection test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub success: bool,
    pub message: String,
    /// The public relay is locked; a human must visit the unlock page.
    pub needs_unlock: bool,
}

impl TestOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            needs_unlock: false,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            needs_unlock: false,
        }
    }
}

/// Run one verification send and map the chain outcome to a diagnostic.
///
/// Idempotent: no state is mutated between calls, so re-running with an
/// unchanged valid credential yields the same verdict.
pub async fn test_connection<T: GatewayTransport>(
    chain: &StrategyChain<T>,
    auth: &str,
) -> TestOutcome {
    let result = match tokio::time::timeout(
        TEST_TIMEOUT,
        chain.send(TEST_DESTINATION, TEST_MESSAGE, auth),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => return TestOutcome::fail("Connection timed out"),
    };

    if result.is_proxy_locked() {
        return TestOutcome {
            success: false,
            message: "Proxy Locked".to_string(),
            needs_unlock: true,
        };
    }

    if result.is_auth_rejected() {
        return TestOutcome::fail("Incorrect Password (401)");
    }

    // Every strategy threw: nothing reached the network.
    if result.status == 0 {
        return TestOutcome::fail("Network Blocked - Check internet connection");
    }

    if result.success {
        return TestOutcome::ok("Connection Verified!");
    }

    // 2xx with a provider error code; the chain already extracted the message.
    if (200..300).contains(&result.status) {
        return TestOutcome::fail(result.text);
    }

    // A 400 still means the gateway was reached; only the request shape is off.
    if result.status == 400 {
        return TestOutcome::ok("Connection Verified (400 - check request format)");
    }

    if result.status == 500 {
        let detail = extract_error_message(&result.text)
            .map(|m| format!("Server Error: {m}"))
            .unwrap_or_else(|| "Server Error (500)".to_string());
        return TestOutcome::fail(detail);
    }

    let message = match extract_error_message(&result.text) {
        Some(m) => format!("{m} ({})", result.status),
        None => format!("Error {}", result.status),
    };
    TestOutcome::fail(message)
}

/// Best-effort message extraction: JSON `error`/`message` fields, falling
/// back to short raw text.
fn extract_error_message(text: &str) -> Option<String> {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
        for key in ["error", "message", "Message"] {
            if let Some(msg) = json.get(key).and_then(|v| v.as_str()) {
                return Some(msg.to_string());
            }
        }
        return None;
    }
    if !text.is_empty() && text.len() < 100 {
        return Some(text.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::strategy::StrategyChain;
    use crate::sms::strategy::tests::{MockTransport, Script, test_strategies};

    fn single_strategy_chain(script: Vec<Script>) -> StrategyChain<MockTransport> {
        StrategyChain::new(MockTransport::new(script), test_strategies(1), "3247")
    }

    #[tokio::test]
    async fn test_verified_on_code_zero() {
        let chain = single_strategy_chain(vec![Script::Respond(200, r#"{"Code":0}"#)]);
        let outcome = test_connection(&chain, "auth").await;
        assert!(outcome.success);
        assert_eq!(outcome.message, "Connection Verified!");
        assert!(!outcome.needs_unlock);
    }

    #[tokio::test]
    async fn test_locked_proxy_needs_unlock() {
        let chain = single_strategy_chain(vec![Script::Respond(403, "visit /corsdemo first")]);
        let outcome = test_connection(&chain, "auth").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Proxy Locked");
        assert!(outcome.needs_unlock);
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let chain = single_strategy_chain(vec![Script::Respond(401, "unauthorized")]);
        let outcome = test_connection(&chain, "auth").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Incorrect Password (401)");
    }

    #[tokio::test]
    async fn test_network_blocked_when_nothing_reached() {
        let chain = single_strategy_chain(vec![Script::Fail]);
        let outcome = test_connection(&chain, "auth").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Network Blocked - Check internet connection");
    }

    #[tokio::test]
    async fn test_provider_error_surfaces_message() {
        let chain = single_strategy_chain(vec![Script::Respond(
            200,
            r#"{"Code":-117,"Message":"Originator not provisioned"}"#,
        )]);
        let outcome = test_connection(&chain, "auth").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Originator not provisioned");
    }

    #[tokio::test]
    async fn test_server_error_extracts_json_detail() {
        let chain = single_strategy_chain(vec![Script::Respond(
            500,
            r#"{"error":"upstream exploded"}"#,
        )]);
        let outcome = test_connection(&chain, "auth").await;
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Server Error: upstream exploded");
    }

    #[tokio::test]
    async fn test_repeat_runs_are_idempotent() {
        for _ in 0..2 {
            let chain = single_strategy_chain(vec![Script::Respond(200, r#"{"Code":0}"#)]);
            let outcome = test_connection(&chain, "auth").await;
            assert!(outcome.success);
        }
    }
}
