use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::repositories::session::SessionRepository;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Deletes expired sessions once an hour for as long as the process runs.
pub async fn start_session_purge_task<R>(sessions: Arc<R>)
where
    R: SessionRepository + ?Sized,
{
    let mut ticker = interval(SESSION_PURGE_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match sessions.purge_expired_sessions().await {
            Ok(0) => tracing::debug!("No expired sessions to purge"),
            Ok(count) => tracing::info!("Purged {} expired sessions", count),
            Err(e) => tracing::error!("Session purge failed: {}", e),
        }
    }
}
