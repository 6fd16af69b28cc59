//! Device poller — re-runs the device pipeline on a user-adjustable timer.
//!
//! The poller owns the latest [`Snapshot`]. Each pass replaces it wholesale;
//! a failed pass leaves the previous one in place, unless Zabbix rejected the
//! session, in which case that session's snapshot is dropped. Passes are serialised on
//! a lock, whether they come from the timer or from a request handler, so a
//! later result always overwrites an earlier one.
//!
//! The interval and the session token reach the background loop through
//! `watch` channels: a new interval restarts the timer, a new session token
//! triggers an immediate pass.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, watch};
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use zabdash_domain::auth::AuthToken;
use zabdash_domain::error::DashError;
use zabdash_domain::settings::RefreshInterval;

use crate::ports::{IconLibrary, MonitoringApi};
use crate::services::device_service::DeviceService;
use crate::snapshot::Snapshot;

/// Background poller holding the most recent snapshot.
pub struct Poller<M, I> {
    devices: Arc<DeviceService<M, I>>,
    latest: RwLock<Option<Arc<Snapshot>>>,
    polling: Mutex<()>,
    interval: watch::Sender<RefreshInterval>,
    session: watch::Sender<Option<AuthToken>>,
}

impl<M, I> Poller<M, I>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    #[must_use]
    pub fn new(devices: Arc<DeviceService<M, I>>, interval: RefreshInterval) -> Self {
        let (interval, _) = watch::channel(interval);
        let (session, _) = watch::channel(None);
        Self {
            devices,
            latest: RwLock::new(None),
            polling: Mutex::new(()),
            interval,
            session,
        }
    }

    /// Current polling interval.
    #[must_use]
    pub fn interval(&self) -> RefreshInterval {
        *self.interval.borrow()
    }

    /// Change the polling interval; the running loop restarts its timer.
    pub fn set_interval(&self, interval: RefreshInterval) {
        let changed = self.interval.send_if_modified(|current| {
            if *current == interval {
                return false;
            }
            *current = interval;
            true
        });
        if changed {
            tracing::info!(seconds = interval.seconds(), "refresh interval changed");
        }
    }

    /// Make the background loop poll with `token` from now on.
    pub fn follow_session(&self, token: &AuthToken) {
        self.session.send_if_modified(|current| {
            if current.as_ref() == Some(token) {
                return false;
            }
            *current = Some(token.clone());
            true
        });
    }

    /// Most recent snapshot if it was taken with `token`.
    pub async fn snapshot_for(&self, token: &AuthToken) -> Option<Arc<Snapshot>> {
        self.latest
            .read()
            .await
            .as_ref()
            .filter(|snapshot| snapshot.is_for(token))
            .map(Arc::clone)
    }

    /// Run one pass now and store its result.
    ///
    /// # Errors
    ///
    /// Returns the device-list error. The stored snapshot survives anything
    /// but [`DashError::Unauthorized`].
    pub async fn poll_once(&self, token: &AuthToken) -> Result<Arc<Snapshot>, DashError> {
        let _pass = self.polling.lock().await;
        self.pass(token).await
    }

    /// Snapshot for `token`, running a pass first if there is none yet.
    ///
    /// # Errors
    ///
    /// Returns the device-list error of the pass, if one had to run.
    pub async fn ensure_snapshot(&self, token: &AuthToken) -> Result<Arc<Snapshot>, DashError> {
        let _pass = self.polling.lock().await;
        if let Some(snapshot) = self.snapshot_for(token).await {
            return Ok(snapshot);
        }
        self.pass(token).await
    }

    async fn pass(&self, token: &AuthToken) -> Result<Arc<Snapshot>, DashError> {
        match self.devices.snapshot(token).await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *self.latest.write().await = Some(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(DashError::Unauthorized) => {
                let mut latest = self.latest.write().await;
                if latest.as_ref().is_some_and(|snapshot| snapshot.is_for(token)) {
                    *latest = None;
                }
                tracing::info!("session rejected by Zabbix, dropping its snapshot");
                Err(DashError::Unauthorized)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to poll devices, keeping previous snapshot");
                Err(err)
            }
        }
    }

    /// Poll until `shutdown` resolves.
    pub async fn run(self: Arc<Self>, shutdown: impl Future<Output = ()>) {
        let mut interval_rx = self.interval.subscribe();
        let mut session_rx = self.session.subscribe();
        let period = interval_rx.borrow_and_update().as_duration();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(seconds = period.as_secs(), "device poller started");
        loop {
            let new_session = tokio::select! {
                () = &mut shutdown => break,
                _ = ticker.tick() => false,
                changed = interval_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let period = interval_rx.borrow_and_update().as_duration();
                    ticker = interval_at(Instant::now() + period, period);
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    continue;
                }
                changed = session_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    true
                }
            };

            let token = session_rx.borrow_and_update().clone();
            let Some(token) = token else {
                tracing::debug!("no session yet, skipping poll");
                continue;
            };
            // Errors are logged by the pass and retried on the next tick.
            let pass = async {
                let _ = if new_session {
                    self.ensure_snapshot(&token).await
                } else {
                    self.poll_once(&token).await
                };
            };
            tokio::select! {
                () = &mut shutdown => break,
                () = pass => {}
            }
        }
        tracing::info!("device poller stopped");
    }
}
