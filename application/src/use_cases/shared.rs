//! Shared utilities for use cases.
//!
//! Cancellation checking and timeout wrapping for external calls.

use crate::use_cases::run_pipeline::PipelineError;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Check if cancellation has been requested.
///
/// Returns `Err(PipelineError::Cancelled)` if the token exists and is cancelled.
pub(crate) fn check_cancelled(token: &Option<CancellationToken>) -> Result<(), PipelineError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(PipelineError::Cancelled);
    }
    Ok(())
}

/// Await `future`, giving up after `timeout` if one is set.
///
/// Returns `Err(elapsed)` when the deadline passes first.
pub(crate) async fn with_timeout<F>(timeout: Option<Duration>, future: F) -> Result<F::Output, Duration>
where
    F: Future,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, future).await.map_err(|_| limit),
        None => Ok(future.await),
    }
}

/// Format an elapsed timeout for error messages.
pub(crate) fn timed_out(limit: Duration) -> String {
    format!("timed out after {}ms", limit.as_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_cancelled() {
        assert!(check_cancelled(&None).is_ok());

        let token = CancellationToken::new();
        assert!(check_cancelled(&Some(token.clone())).is_ok());

        token.cancel();
        assert!(check_cancelled(&Some(token)).unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Some(Duration::from_millis(10)),
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await;
        assert_eq!(result, Err(Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_through() {
        assert_eq!(with_timeout(None, async { 7 }).await, Ok(7));
        assert_eq!(
            with_timeout(Some(Duration::from_secs(5)), async { 7 }).await,
            Ok(7)
        );
    }

    #[test]
    fn test_timed_out_message() {
        assert_eq!(timed_out(Duration::from_secs(2)), "timed out after 2000ms");
    }
}
