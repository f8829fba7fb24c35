//! Operational monitor for the admin dashboard
//!
//! Fetches job counters, scraper status and the latest scraper logs
//! together, and keeps refreshing them on a fixed cadence while the scraper
//! is running. Polling parks as soon as the server reports the scraper idle
//! and resumes when a later snapshot (typically the one taken right after a
//! trigger) reports it running again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use jobscout_core::domain::job::JobStats;
use jobscout_core::domain::scraper::{ScraperLogPage, ScraperStatus};
use jobscout_core::dto::scraper::TriggerScraperResponse;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::ApiClient;
use crate::error::{PreconditionError, Result};

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// How often to refresh while the scraper is running
    pub poll_interval: Duration,

    /// Scraper log page shown on the dashboard
    pub log_page: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            log_page: 1,
        }
    }
}

/// Everything the admin dashboard shows, fetched in one go
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: JobStats,
    pub status: ScraperStatus,
    pub logs: ScraperLogPage,
    pub fetched_at: DateTime<Utc>,
}

struct MonitorState {
    client: ApiClient,
    config: MonitorConfig,
    snapshot: watch::Sender<Option<DashboardSnapshot>>,
    triggering: AtomicBool,
}

/// Admin dashboard data source with a guarded scraper trigger
///
/// Clones share the same snapshot and trigger guard.
#[derive(Clone)]
pub struct OperationalMonitor {
    state: Arc<MonitorState>,
}

impl OperationalMonitor {
    pub fn new(client: ApiClient, config: MonitorConfig) -> Self {
        let (snapshot, _) = watch::channel(None);
        Self {
            state: Arc::new(MonitorState {
                client,
                config,
                snapshot,
                triggering: AtomicBool::new(false),
            }),
        }
    }

    /// Receive every snapshot as it is published
    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardSnapshot>> {
        self.state.snapshot.subscribe()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        self.state.snapshot.borrow().clone()
    }

    /// Whether the latest snapshot reports a running scraper
    pub fn is_running(&self) -> bool {
        self.state
            .snapshot
            .borrow()
            .as_ref()
            .is_some_and(|snapshot| snapshot.status.is_running)
    }

    /// Whether a trigger request has not settled yet
    pub fn is_triggering(&self) -> bool {
        self.state.triggering.load(Ordering::Acquire)
    }

    /// Whether `trigger` would currently be accepted
    pub fn can_trigger(&self) -> bool {
        !self.is_triggering() && !self.is_running()
    }

    /// Fetch stats, status and logs concurrently and publish the result
    pub async fn refresh(&self) -> Result<DashboardSnapshot> {
        let client = &self.state.client;
        let (stats, status, logs) = tokio::try_join!(
            client.job_stats(),
            client.scraper_status(),
            client.scraper_logs(self.state.config.log_page),
        )?;

        let snapshot = DashboardSnapshot {
            stats,
            status,
            logs,
            fetched_at: Utc::now(),
        };
        debug!(
            "Dashboard refreshed (running: {}, logs: {})",
            snapshot.status.is_running,
            snapshot.logs.logs.len()
        );

        self.state.snapshot.send_replace(Some(snapshot.clone()));
        Ok(snapshot)
    }

    /// Start polling in the background
    ///
    /// The returned handle owns the task: stopping or dropping it ends the
    /// polling immediately and for good.
    pub fn activate(&self) -> MonitorHandle {
        info!(
            "Activating dashboard monitor (interval: {:?})",
            self.state.config.poll_interval
        );
        let monitor = self.clone();
        MonitorHandle {
            task: tokio::spawn(async move { monitor.run().await }),
        }
    }

    /// Ask the server to start a scraper run
    ///
    /// Rejected without any request if a trigger is still in flight or the
    /// latest snapshot shows the scraper running. A successful trigger
    /// refreshes the snapshot, which resumes polling in an active monitor.
    pub async fn trigger(&self) -> Result<TriggerScraperResponse> {
        let _in_flight = TriggerGuard::acquire(&self.state.triggering)
            .ok_or(PreconditionError::TriggerInFlight)?;
        if self.is_running() {
            return Err(PreconditionError::ScraperAlreadyRunning.into());
        }

        info!("Triggering scraper");
        let response = match self.state.client.trigger_scraper().await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to trigger scraper: {}", e);
                return Err(e);
            }
        };
        info!(
            "Scraper triggered: {}",
            response.message.as_deref().unwrap_or("no message")
        );

        if let Err(e) = self.refresh().await {
            warn!("Failed to refresh dashboard after trigger: {}", e);
        }

        Ok(response)
    }

    async fn run(self) {
        let mut updates = self.subscribe();

        loop {
            let running = match self.refresh().await {
                Ok(snapshot) => snapshot.status.is_running,
                Err(e) if e.is_authorization() => {
                    warn!("Session expired, stopping dashboard monitor");
                    return;
                }
                Err(e) => {
                    warn!("Dashboard refresh failed: {}", e);
                    self.is_running()
                }
            };

            if !running {
                debug!("Scraper idle, pausing dashboard polling");
                let resumed = updates
                    .wait_for(|snapshot| {
                        snapshot
                            .as_ref()
                            .is_some_and(|snapshot| snapshot.status.is_running)
                    })
                    .await
                    .is_ok();
                if !resumed {
                    return;
                }
                debug!("Scraper running, resuming dashboard polling");
            }

            time::sleep(self.state.config.poll_interval).await;
        }
    }
}

/// Owner of an active monitor's polling task
#[derive(Debug)]
pub struct MonitorHandle {
    task: JoinHandle<()>,
}

impl MonitorHandle {
    /// Stop polling
    pub fn stop(self) {
        self.task.abort();
    }

    /// True once the task has ended (stopped, or the session expired)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Holds the in-flight flag for the duration of one trigger
struct TriggerGuard<'a>(&'a AtomicBool);

impl<'a> TriggerGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.log_page, 1);
    }

    #[test]
    fn test_trigger_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        let first = TriggerGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(TriggerGuard::acquire(&flag).is_none());

        drop(first);
        assert!(TriggerGuard::acquire(&flag).is_some());
    }
}
