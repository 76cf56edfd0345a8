//! Background worker that persists visit events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, error, info, warn};

use crate::domain::entities::NewVisit;
use crate::domain::repositories::VisitRepository;
use crate::domain::visit_event::VisitEvent;

/// Number of retries after the first failed write.
const MAX_RETRIES: usize = 3;

/// Drains the visit channel until every sender is dropped.
///
/// Each event is written on its own task, with at most `concurrency` writes in
/// flight. Failed writes are retried with exponential backoff; a visit that
/// still cannot be stored is logged at error level. On shutdown the worker
/// waits for in-flight writes before returning.
pub async fn run_visit_worker(
    mut rx: mpsc::Receiver<VisitEvent>,
    repository: Arc<dyn VisitRepository>,
    concurrency: usize,
) {
    let concurrency = concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        tokio::spawn(async move {
            persist_visit(repository.as_ref(), event).await;
            drop(repository);
            drop(permit);
        });
    }

    let _ = permits.acquire_many(concurrency as u32).await;
    info!("Visit worker stopped");
}

async fn persist_visit(repository: &dyn VisitRepository, event: VisitEvent) {
    let short_code = event.short_code.clone();
    let new_visit: NewVisit = event.into();

    // 10ms, 20ms, 40ms
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(5)
        .max_delay(Duration::from_secs(1))
        .take(MAX_RETRIES);

    let result = Retry::start(strategy, || {
        let new_visit = new_visit.clone();
        let short_code = short_code.as_str();
        async move {
            repository.record(new_visit).await.inspect_err(|e| {
                warn!(short_code, error = %e, "Visit write failed");
            })
        }
    })
    .await;

    match result {
        Ok(visit) => debug!(short_code = %visit.short_code, visit_id = visit.id, "Visit recorded"),
        Err(e) => error!(
            short_code = %short_code,
            error = %e,
            retries = MAX_RETRIES,
            "Dropping visit after exhausting retries"
        ),
    }
}
