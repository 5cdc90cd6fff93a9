// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bounded polling with a fixed interval

use crate::error::{HarnessError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Poll `ready` until it yields `true`, an error, or `timeout` elapses.
///
/// `ready` always runs at least once. Errors returned by `ready` end the
/// loop immediately.
pub async fn wait_for<F, Fut>(
    description: &str,
    poll_interval: Duration,
    timeout: Duration,
    mut ready: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    wait_for_value(description, poll_interval, timeout, || {
        let attempt = ready();
        async move { Ok::<_, HarnessError>(attempt.await?.then_some(())) }
    })
    .await
}

/// Poll `observe` until it yields a value, then return that value.
///
/// Same timing and error rules as [`wait_for`].
pub async fn wait_for_value<T, F, Fut>(
    description: &str,
    poll_interval: Duration,
    timeout: Duration,
    mut observe: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>>>,
{
    debug!("Waiting for {}", description);
    let deadline = Instant::now() + timeout;

    loop {
        if let Some(value) = observe().await? {
            debug!("{} is ready", description);
            return Ok(value);
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(HarnessError::Timeout {
                operation: description.to_string(),
                timeout,
            });
        }

        sleep(poll_interval.min(deadline - now)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_first_attempt_does_not_sleep() {
        let start = Instant::now();

        wait_for("instant", Duration::from_secs(3), Duration::from_secs(30), || async {
            Ok::<_, HarnessError>(true)
        })
        .await
        .unwrap();

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_ready() {
        let attempts = Cell::new(0);

        wait_for("third time", Duration::from_secs(3), Duration::from_secs(30), || {
            attempts.set(attempts.get() + 1);
            let n = attempts.get();
            async move { Ok::<_, HarnessError>(n == 3) }
        })
        .await
        .unwrap();

        assert_eq!(attempts.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_with_description() {
        let start = Instant::now();

        let err = wait_for("never", Duration::from_secs(3), Duration::from_secs(10), || async {
            Ok::<_, HarnessError>(false)
        })
        .await
        .unwrap_err();

        match err {
            HarnessError::Timeout { operation, timeout } => {
                assert_eq!(operation, "never");
                assert_eq!(timeout, Duration::from_secs(10));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_stops_polling() {
        let attempts = Cell::new(0);

        let err = wait_for("broken", Duration::from_secs(3), Duration::from_secs(30), || {
            attempts.set(attempts.get() + 1);
            async {
                Err::<bool, _>(HarnessError::NotFound {
                    kind: "KafkaRebalance".to_string(),
                    name: "gone".to_string(),
                })
            }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, HarnessError::NotFound { .. }));
        assert_eq!(attempts.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_value_returns_first_observed_value() {
        let attempts = Cell::new(0);

        let value = wait_for_value("value", Duration::from_secs(1), Duration::from_secs(10), || {
            attempts.set(attempts.get() + 1);
            let n = attempts.get();
            async move { Ok::<_, HarnessError>((n >= 2).then_some(n)) }
        })
        .await
        .unwrap();

        assert_eq!(value, 2);
        assert_eq!(attempts.get(), 2);
    }
}
