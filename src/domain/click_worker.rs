//! Background worker applying click increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Retries after the first failed increment.
const MAX_RETRIES: usize = 3;

/// Base delay of the exponential backoff in milliseconds.
const RETRY_BASE_MS: u64 = 10;

/// Upper bound for a single backoff delay.
const RETRY_MAX_DELAY: Duration = Duration::from_secs(1);

/// Consumes click events until every sender is dropped.
///
/// Up to `concurrency` increments run at the same time. Once the channel
/// closes the worker waits for in-flight increments before returning, which
/// lets the server drain clicks on shutdown.
pub async fn run_click_worker<R>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<R>,
    concurrency: usize,
) where
    R: LinkRepository + ?Sized + 'static,
{
    let limit = concurrency.clamp(1, Semaphore::MAX_PERMITS);
    let concurrency = u32::try_from(limit).unwrap_or_else(|_| {
        warn!(concurrency, "Click worker concurrency too large, clamping");
        u32::MAX
    });
    let permits = Arc::new(Semaphore::new(concurrency as usize));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        tokio::spawn(async move {
            record_click(repository.as_ref(), &event).await;
            drop(permit);
        });
    }

    // Every permit back means no increment is still running. The semaphore
    // is never closed, so acquiring can only fail if that changes.
    if let Err(e) = permits.acquire_many(concurrency).await {
        warn!(error = %e, "Click worker stopped without draining increments");
        return;
    }
    info!("Click worker stopped");
}

/// Applies one increment with retry. Failures end here: they are logged and
/// counted, never returned.
async fn record_click<R>(repository: &R, event: &ClickEvent)
where
    R: LinkRepository + ?Sized,
{
    let code = event.code.as_str();
    let strategy = ExponentialBackoff::from_millis(RETRY_BASE_MS)
        .max_delay(RETRY_MAX_DELAY)
        .map(jitter)
        .take(MAX_RETRIES);

    let result = RetryIf::start(
        strategy,
        move || repository.increment_click(code),
        |e: &AppError| !matches!(e, AppError::NotFound { .. }),
    )
    .await;

    match result {
        Ok(()) => debug!(code, platform = %event.platform, "Click recorded"),
        Err(AppError::NotFound { .. }) => {
            warn!(code, "Click for a link that no longer exists");
        }
        Err(e) => {
            metrics::counter!("click_increments_failed_total").increment(1);
            error!(code, error = %e, "Failed to record click");
        }
    }
}
