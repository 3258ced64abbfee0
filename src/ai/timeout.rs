//! Timeout wrapper for AI calls

use std::future::Future;
use std::time::Duration;

use crate::types::{HrError, Result};

/// Execute an async operation with a timeout
///
/// Returns `HrError::Timeout` naming `operation_name` if the operation
/// doesn't complete within `timeout`.
pub async fn with_timeout<T, F>(timeout: Duration, future: F, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(HrError::timeout(operation_name, timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, HrError>(42) },
            "test operation",
        )
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, HrError>(42)
            },
            "slow operation",
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            HrError::Timeout { operation, .. } if operation == "slow operation"
        ));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_inner_error() {
        let result: Result<()> = with_timeout(
            Duration::from_secs(1),
            async { Err(HrError::LlmApi("boom".to_string())) },
            "failing operation",
        )
        .await;
        assert!(matches!(result, Err(HrError::LlmApi(_))));
    }
}
