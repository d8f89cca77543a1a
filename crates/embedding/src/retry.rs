use funcsearch_common::{FuncSearchError, Result};
use std::future::Future;
use std::time::Duration;

/// Attempts per embedding request
pub(crate) const MAX_RETRIES: u32 = 3;

/// Run `op` up to `max_retries` times with exponential backoff (1s, 2s, 4s, ...)
pub(crate) async fn with_retry<T, F, Fut>(label: &str, max_retries: u32, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for attempt in 1..=max_retries {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt < max_retries {
                    let delay = Duration::from_secs(2u64.pow(attempt - 1));
                    tracing::warn!(
                        "{} failed (attempt {}/{}): {}. Retrying in {:?}...",
                        label,
                        attempt,
                        max_retries,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| FuncSearchError::embedding("All retries failed")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_retry_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = with_retry("test", 3, move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(FuncSearchError::network("down"))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_returns_last_error() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<()> = with_retry("test", 2, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(FuncSearchError::network("still down"))
        })
        .await;

        assert!(matches!(result, Err(FuncSearchError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
