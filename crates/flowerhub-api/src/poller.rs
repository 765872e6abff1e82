// Periodic asset status fetch
//
// One background task per client, driven by a cancellation token. Each
// cycle resolves the asset id if needed, fetches the asset, and hands the
// fresh snapshot to the registered callback and/or channel. Failures are
// logged and the loop carries on; only `stop` (or dropping the client)
// ends it.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::{ClientInner, FlowerhubClient};
use crate::error::Error;
use crate::session::StatusSnapshot;

/// Shortest accepted polling interval.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default polling interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Observer invoked with every successfully fetched snapshot.
pub type StatusCallback = Arc<dyn Fn(&StatusSnapshot) + Send + Sync>;

/// Settings for [`FlowerhubClient::start_periodic_asset_fetch`].
#[derive(Clone)]
pub struct PollConfig {
    pub interval: Duration,
    /// Run one cycle before the first wait.
    pub run_immediately: bool,
    pub on_update: Option<StatusCallback>,
    /// Snapshots are offered with `try_send`; a full or closed channel is
    /// logged and skipped.
    pub sink: Option<mpsc::Sender<Arc<StatusSnapshot>>>,
}

impl PollConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    pub fn run_immediately(mut self, run_immediately: bool) -> Self {
        self.run_immediately = run_immediately;
        self
    }

    pub fn on_update(mut self, callback: impl Fn(&StatusSnapshot) + Send + Sync + 'static) -> Self {
        self.on_update = Some(Arc::new(callback));
        self
    }

    pub fn sink(mut self, tx: mpsc::Sender<Arc<StatusSnapshot>>) -> Self {
        self.sink = Some(tx);
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.interval < MIN_POLL_INTERVAL {
            return Err(Error::config(format!(
                "poll interval {:?} is below the minimum of {:?}",
                self.interval, MIN_POLL_INTERVAL
            )));
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            run_immediately: false,
            on_update: None,
            sink: None,
        }
    }
}

impl fmt::Debug for PollConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollConfig")
            .field("interval", &self.interval)
            .field("run_immediately", &self.run_immediately)
            .field("on_update", &self.on_update.is_some())
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

/// Live poll task. Dropping it cancels the loop.
pub(crate) struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl FlowerhubClient {
    /// Start polling the asset status in the background.
    ///
    /// Fails with [`Error::Configuration`] when the interval is below
    /// [`MIN_POLL_INTERVAL`] or no Tokio runtime is available, and with
    /// [`Error::AlreadyRunning`] (leaving the current loop untouched) when a
    /// loop is already active.
    pub fn start_periodic_asset_fetch(&self, config: PollConfig) -> Result<(), Error> {
        config.validate()?;

        let mut slot = self
            .inner
            .poller
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return Err(Error::AlreadyRunning);
        }

        let runtime = Handle::try_current()
            .map_err(|e| Error::config(format!("periodic fetch needs a Tokio runtime: {e}")))?;

        info!(
            interval_secs = config.interval.as_secs(),
            run_immediately = config.run_immediately,
            "starting periodic asset fetch"
        );
        let cancel = CancellationToken::new();
        let task = runtime.spawn(poll_task(
            Arc::downgrade(&self.inner),
            config,
            cancel.clone(),
        ));
        *slot = Some(PollHandle { cancel, task });
        Ok(())
    }

    /// Stop the background loop. No-op when it is not running.
    pub fn stop_periodic_asset_fetch(&self) {
        let handle = self
            .inner
            .poller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.cancel.cancel();
            info!("periodic asset fetch stopped");
        }
    }

    /// `true` while a poll task exists and has not completed.
    pub fn is_asset_fetch_running(&self) -> bool {
        self.inner
            .poller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// One resolve-and-fetch cycle, in raising mode.
    ///
    /// Discovers the asset id if the session has none, then fetches the
    /// asset. Returns the snapshot stored by this cycle, or `None` when no
    /// asset id could be resolved or the payload had no status object.
    pub async fn poll_once(&self) -> Result<Option<Arc<StatusSnapshot>>, Error> {
        if self.asset_id().is_none() {
            self.fetch_asset_id(None, true).await?;
        }
        if self.asset_id().is_none() {
            debug!("no asset id resolved, skipping status fetch");
            return Ok(None);
        }
        let (_, snapshot) = self.fetch_asset_snapshot(None, true).await?;
        Ok(snapshot)
    }
}

/// Background loop. Holds only a weak reference so a dropped client ends it.
async fn poll_task(client: Weak<ClientInner>, config: PollConfig, cancel: CancellationToken) {
    let mut skip_wait = config.run_immediately;

    loop {
        if !skip_wait {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(config.interval) => {}
            }
        }
        skip_wait = false;

        let Some(inner) = client.upgrade() else {
            debug!("client dropped, ending periodic asset fetch");
            break;
        };
        let client = FlowerhubClient { inner };

        let outcome = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            outcome = client.poll_once() => outcome,
        };

        match outcome {
            Ok(Some(snapshot)) if !cancel.is_cancelled() => notify(&config, &snapshot),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "periodic asset fetch failed"),
        }
    }
    debug!("periodic asset fetch task exited");
}

/// Deliver a snapshot to the observers. Never panics or fails.
fn notify(config: &PollConfig, snapshot: &Arc<StatusSnapshot>) {
    if let Some(callback) = &config.on_update {
        if catch_unwind(AssertUnwindSafe(|| callback(snapshot))).is_err() {
            warn!("status update callback panicked");
        }
    }
    if let Some(sink) = &config.sink {
        if let Err(e) = sink.try_send(Arc::clone(snapshot)) {
            warn!(error = %e, "could not deliver status update");
        }
    }
}
