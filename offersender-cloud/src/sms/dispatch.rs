//! Bulk dispatch engine
//!
//! Sends one message to every customer of a tenant, sequentially and in list
//! order, with live progress reporting. Recipients are processed one at a
//! time; there is no batching, parallel dispatch, or rate limiting.

use async_trait::async_trait;

use shared::models::Customer;

use super::phone;
use super::strategy::{GatewayTransport, StrategyChain};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Marker surfaced through `last_error` when the run aborts on a relay lock.
pub const PROXY_LOCK_REQUIRED: &str = "PROXY_LOCK_REQUIRED";
/// Marker surfaced through `last_error` when the run aborts on a 401.
pub const AUTH_FAILED: &str = "AUTH_FAILED";

/// Live counters, emitted after every attempt.
#[derive(Debug, Clone)]
pub struct DispatchProgress {
    pub processed: usize,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub last_error: Option<String>,
}

/// Final totals for one run. Held only in memory; the quota delta is the
/// only part persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub last_error: Option<String>,
}

/// Persistence seam for the post-run quota write (`sms_used += sent`).
///
/// The write is not transactional with the send loop: a crash between the
/// last send and this update loses the usage increment.
#[async_trait]
pub trait UsageRecorder: Send + Sync {
    async fn add_usage(&self, business_id: &str, sent: i64) -> Result<(), BoxError>;
}

/// Run one bulk dispatch over `customers`.
///
/// Per recipient: normalize the phone, invoke the strategy chain, update
/// counters, emit a log line and a progress event. A lockout or credential
/// rejection aborts the run: the triggering attempt counts as failed and
/// every un-attempted recipient is folded into the failure total; no
/// progress events are emitted past the abort point. All other failures are
/// per-message and iteration continues.
pub async fn run<T, R>(
    chain: &StrategyChain<T>,
    customers: &[Customer],
    message: &str,
    auth: &str,
    business_id: &str,
    usage: &R,
    mut on_progress: impl FnMut(&DispatchProgress),
    mut on_log: impl FnMut(String),
) -> DispatchReport
where
    T: GatewayTransport,
    R: UsageRecorder + ?Sized,
{
    let total = customers.len();
    let mut success = 0usize;
    let mut failed = 0usize;
    let mut report = DispatchReport {
        total,
        success: 0,
        failed: 0,
        last_error: None,
    };

    on_log("Initializing sender (prioritized relay)...".to_string());

    for (i, customer) in customers.iter().enumerate() {
        let destination = phone::normalize(&customer.phone);
        on_log(format!("[{}/{total}] Sending to {destination}...", i + 1));

        let result = chain.send(&destination, message, auth).await;

        if result.success {
            success += 1;
            on_log("-> SUCCESS".to_string());
        } else {
            failed += 1;

            if result.is_proxy_locked() {
                on_log("!! PROXY LOCKED !! Unlock required.".to_string());
                let last_error = Some(PROXY_LOCK_REQUIRED.to_string());
                on_progress(&DispatchProgress {
                    processed: i + 1,
                    total,
                    success,
                    failed,
                    last_error: last_error.clone(),
                });
                report.success = success;
                report.failed = failed + (total - i - 1);
                report.last_error = last_error;
                return finalize(report, business_id, usage).await;
            }

            if result.is_auth_rejected() {
                on_log("!! AUTH FAILED !! Check password.".to_string());
                let last_error = Some(AUTH_FAILED.to_string());
                on_progress(&DispatchProgress {
                    processed: i + 1,
                    total,
                    success,
                    failed,
                    last_error: last_error.clone(),
                });
                report.success = success;
                report.failed = failed + (total - i - 1);
                report.last_error = last_error;
                return finalize(report, business_id, usage).await;
            }

            on_log(format!("-> FAILED ({})", result.status));
        }

        on_progress(&DispatchProgress {
            processed: i + 1,
            total,
            success,
            failed,
            last_error: None,
        });
    }

    report.success = success;
    report.failed = failed;
    finalize(report, business_id, usage).await
}

/// Persist the quota delta when anything was sent. Accounting is best-effort
/// and non-critical: a failed write is logged, not surfaced.
async fn finalize<R>(report: DispatchReport, business_id: &str, usage: &R) -> DispatchReport
where
    R: UsageRecorder + ?Sized,
{
    if report.success > 0 {
        if let Err(e) = usage.add_usage(business_id, report.success as i64).await {
            tracing::error!(business_id, error = %e, "Failed to record SMS usage");
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::strategy::tests::{MockTransport, Script, test_strategies};
    use std::sync::Mutex;

    struct MemUsage {
        recorded: Mutex<Vec<(String, i64)>>,
    }

    impl MemUsage {
        fn new() -> Self {
            Self {
                recorded: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UsageRecorder for MemUsage {
        async fn add_usage(&self, business_id: &str, sent: i64) -> Result<(), BoxError> {
            self.recorded
                .lock()
                .unwrap()
                .push((business_id.to_string(), sent));
            Ok(())
        }
    }

    fn customer(n: usize) -> Customer {
        Customer {
            id: format!("c{n}"),
            business_id: "biz-1".to_string(),
            name: format!("Customer {n}"),
            phone: format!("02123456{n}"),
            created_at: 0,
        }
    }

    /// One strategy per chain so each recipient consumes exactly one script entry.
    fn single_strategy_chain(script: Vec<Script>) -> StrategyChain<MockTransport> {
        StrategyChain::new(MockTransport::new(script), test_strategies(1), "3247")
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_and_folds_remainder() {
        let chain = single_strategy_chain(vec![
            Script::Respond(200, r#"{"Code":0}"#),
            Script::Respond(401, "unauthorized"),
            // Never reached
            Script::Respond(200, r#"{"Code":0}"#),
            Script::Respond(200, r#"{"Code":0}"#),
        ]);
        let customers: Vec<_> = (0..4).map(customer).collect();
        let usage = MemUsage::new();
        let mut progress_events = Vec::new();

        let report = run(
            &chain,
            &customers,
            "hello",
            "auth",
            "biz-1",
            &usage,
            |p| progress_events.push(p.clone()),
            |_| {},
        )
        .await;

        assert_eq!(report.success, 1);
        // Triggering attempt plus the two un-attempted recipients
        assert_eq!(report.failed, 3);
        assert_eq!(report.last_error.as_deref(), Some(AUTH_FAILED));
        // Only the two attempted recipients produced progress events
        assert_eq!(progress_events.len(), 2);
        assert_eq!(progress_events[1].processed, 2);
        assert_eq!(
            progress_events[1].last_error.as_deref(),
            Some(AUTH_FAILED)
        );
        assert_eq!(chain.transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_lockout_aborts_and_folds_remainder() {
        let chain = single_strategy_chain(vec![
            Script::Respond(403, "corsdemo lock page"),
            Script::Respond(200, r#"{"Code":0}"#),
            Script::Respond(200, r#"{"Code":0}"#),
        ]);
        let customers: Vec<_> = (0..3).map(customer).collect();
        let usage = MemUsage::new();
        let mut log = Vec::new();

        let report = run(
            &chain,
            &customers,
            "hello",
            "auth",
            "biz-1",
            &usage,
            |_| {},
            |line| log.push(line),
        )
        .await;

        assert_eq!(report.success, 0);
        assert_eq!(report.failed, 3);
        assert_eq!(report.last_error.as_deref(), Some(PROXY_LOCK_REQUIRED));
        assert!(log.iter().any(|l| l.contains("PROXY LOCKED")));
        // No usage write when nothing was sent
        assert!(usage.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_per_message_failures_do_not_halt_the_run() {
        let chain = single_strategy_chain(vec![
            Script::Respond(200, r#"{"Code":0}"#),
            Script::Respond(500, "boom"),
            Script::Respond(200, r#"{"Code":0}"#),
        ]);
        let customers: Vec<_> = (0..3).map(customer).collect();
        let usage = MemUsage::new();

        let report = run(
            &chain, &customers, "hello", "auth", "biz-1", &usage, |_| {}, |_| {},
        )
        .await;

        assert_eq!(report.success, 2);
        assert_eq!(report.failed, 1);
        assert!(report.last_error.is_none());
        assert_eq!(chain.transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_usage_recorded_exactly_once_with_success_total() {
        let chain = single_strategy_chain(vec![
            Script::Respond(200, r#"{"Code":0}"#),
            Script::Respond(200, r#"{"Code":0}"#),
        ]);
        let customers: Vec<_> = (0..2).map(customer).collect();
        let usage = MemUsage::new();

        run(
            &chain, &customers, "hello", "auth", "biz-1", &usage, |_| {}, |_| {},
        )
        .await;

        let recorded = usage.recorded.lock().unwrap();
        assert_eq!(recorded.as_slice(), &[("biz-1".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_empty_list_is_a_noop_run() {
        let chain = single_strategy_chain(vec![]);
        let usage = MemUsage::new();

        let report = run(&chain, &[], "hello", "auth", "biz-1", &usage, |_| {}, |_| {}).await;

        assert_eq!(
            report,
            DispatchReport {
                total: 0,
                success: 0,
                failed: 0,
                last_error: None,
            }
        );
        assert!(usage.recorded.lock().unwrap().is_empty());
    }
}
