//! Cron wiring for the morning weather broadcast.
//!
//! The job runs as an independent scheduled task alongside the request
//! loop; the notifier owns its own recipient list and needs no request
//! context.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::state::ConcreteNotifier;

/// 06:00 every day (seconds-resolution cron), evaluated in Asia/Tokyo.
pub const WEATHER_BROADCAST_CRON: &str = "0 0 6 * * *";

/// Start a scheduler with the daily broadcast job registered.
pub async fn start_weather_schedule(
    notifier: Arc<ConcreteNotifier>,
) -> anyhow::Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async_tz(
        WEATHER_BROADCAST_CRON,
        chrono_tz::Asia::Tokyo,
        move |_id, _lock| {
            let notifier = notifier.clone();
            Box::pin(async move {
                tracing::debug!("weather broadcast trigger fired");
                notifier.broadcast().await;
            })
        },
    )?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        schedule = WEATHER_BROADCAST_CRON,
        timezone = "Asia/Tokyo",
        "weather broadcast scheduled"
    );
    Ok(scheduler)
}
