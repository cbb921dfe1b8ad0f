use crate::core::errors::ExchangeError;
use std::future::Future;
use std::time::Duration;
use tokio::time::{timeout, timeout_at, Instant};

/// Run a client call, aborting it once `deadline` passes
///
/// The in-flight request is dropped on expiry and the call fails with
/// `ExchangeError::Cancelled`, never `NetworkError`.
pub async fn with_deadline<F, T>(deadline: Instant, call: F) -> Result<T, ExchangeError>
where
    F: Future<Output = Result<T, ExchangeError>>,
{
    timeout_at(deadline, call).await.unwrap_or_else(|_| {
        Err(ExchangeError::Cancelled(
            "deadline expired before the response arrived".to_string(),
        ))
    })
}

/// Run a client call, aborting it after `limit`
pub async fn with_timeout<F, T>(limit: Duration, call: F) -> Result<T, ExchangeError>
where
    F: Future<Output = Result<T, ExchangeError>>,
{
    timeout(limit, call).await.unwrap_or_else(|_| {
        Err(ExchangeError::Cancelled(format!(
            "no response within {} ms",
            limit.as_millis()
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_before_deadline() {
        let result = with_timeout(Duration::from_secs(1), async { Ok::<_, ExchangeError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_expired_deadline_is_cancellation() {
        let deadline = Instant::now() + Duration::from_millis(10);
        let result = with_deadline(deadline, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, ExchangeError>(())
        })
        .await;

        assert!(matches!(result, Err(ExchangeError::Cancelled(_))));
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> = with_timeout(Duration::from_secs(1), async {
            Err(ExchangeError::NetworkError("refused".to_string()))
        })
        .await;

        assert!(matches!(result, Err(ExchangeError::NetworkError(_))));
    }
}
