// ── Adapter ──
//
// One adapter per soundbar. Owns the connection state machine, the session
// (client + dialect strategy + catalog), the periodic poll task and the
// host-visible control store.
//
// Every device interaction runs under the session lock, so a poll tick, a
// host command and a reconnect never interleave. The settle delay after an
// input switch is taken while holding it.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::{ArcSwap, ArcSwapOption};
use serde::Serialize;
use strum::Display;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use ambeo_api::SoundbarClient;

use crate::catalog::{Catalog, CatalogList, CatalogOption};
use crate::command::{Command, CommandOutcome};
use crate::config::AdapterConfig;
use crate::control::ControlValue;
use crate::dialect::{self, DeviceIdentity, DialectStrategy};
use crate::error::CoreError;
use crate::mapper;
use crate::store::{ControlState, ControlStore};
use crate::sync::{self, PollReport};

// ── AdapterState ─────────────────────────────────────────────────

/// Connection state observable by hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum AdapterState {
    /// No endpoint configured.
    Unconfigured,
    /// Detection read in flight.
    Connecting,
    /// Detected, catalog built, poll loop running.
    Active,
    /// Detection failed. Stays here until `reconfigure` or `resync`.
    ConnectionFailed,
}

// ── Session ──────────────────────────────────────────────────────

/// Everything bound to one successful detection.
pub(crate) struct Session {
    pub(crate) client: SoundbarClient,
    pub(crate) strategy: &'static dyn DialectStrategy,
    pub(crate) catalog: Arc<Catalog>,
}

// ── Adapter ──────────────────────────────────────────────────────

/// The host-facing handle. Cheaply cloneable.
#[derive(Clone)]
pub struct Adapter {
    inner: Arc<AdapterInner>,
}

struct AdapterInner {
    config: ArcSwap<AdapterConfig>,
    state: watch::Sender<AdapterState>,
    identity: ArcSwapOption<DeviceIdentity>,
    /// Published copy of the session catalog for lock-free readers.
    catalog: ArcSwap<Catalog>,
    store: ControlStore,
    session: Mutex<Option<Session>>,
    /// Serializes connect/shutdown so two reconfigures cannot race.
    lifecycle: Mutex<()>,
    cancel: CancellationToken,
    /// Child token for the current session's poll task.
    cancel_child: Mutex<CancellationToken>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Adapter {
    /// Create an adapter. Does NOT connect; call [`connect()`](Self::connect).
    pub fn new(config: AdapterConfig) -> Self {
        let (state, _) = watch::channel(AdapterState::Unconfigured);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(AdapterInner {
                config: ArcSwap::from_pointee(config),
                state,
                identity: ArcSwapOption::empty(),
                catalog: ArcSwap::from_pointee(Catalog::empty()),
                store: ControlStore::new(),
                session: Mutex::new(None),
                lifecycle: Mutex::new(()),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Detect the dialect, build the catalog, poll once and start the
    /// periodic loop.
    ///
    /// Any previous session is torn down first. A failed detection read
    /// leaves the adapter in `ConnectionFailed` with no poll loop; there is
    /// no automatic retry.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _lifecycle = self.inner.lifecycle.lock().await;
        self.teardown(AdapterState::Connecting).await;

        let config = self.inner.config.load_full();
        if !config.is_configured() {
            self.set_state(AdapterState::Unconfigured);
            return Err(CoreError::NotConfigured);
        }

        let client = match SoundbarClient::new(config.endpoint(), &config.transport()) {
            Ok(client) => client,
            Err(e) => {
                self.set_state(AdapterState::ConnectionFailed);
                return Err(e.into());
            }
        };

        let identity = match dialect::detect(&client).await {
            Ok(identity) => identity,
            Err(e) => {
                self.set_state(AdapterState::ConnectionFailed);
                return Err(e);
            }
        };

        let strategy = identity.dialect.strategy();
        let catalog = Arc::new(strategy.build_catalog(&client, &config).await);
        self.inner.catalog.store(Arc::clone(&catalog));
        self.inner.identity.store(Some(Arc::new(identity)));

        {
            let mut guard = self.inner.session.lock().await;
            let session = guard.insert(Session {
                client,
                strategy,
                catalog,
            });
            let report = sync::poll_all(session, &self.inner.store).await;
            debug!(skipped = report.skipped.len(), "initial poll done");
        }

        self.set_state(AdapterState::Active);

        if !config.update_interval.is_zero() {
            let child = self.inner.cancel.child_token();
            *self.inner.cancel_child.lock().await = child.clone();
            let handle = tokio::spawn(poll_task(self.clone(), config.update_interval, child));
            self.inner.task_handles.lock().await.push(handle);
        }

        Ok(())
    }

    /// Replace the configuration and reconnect.
    pub async fn reconfigure(&self, config: AdapterConfig) -> Result<(), CoreError> {
        self.inner.config.store(Arc::new(config));
        self.connect().await
    }

    /// Reconnect with the current configuration. The way out of
    /// `ConnectionFailed` without changing anything.
    pub async fn resync(&self) -> Result<(), CoreError> {
        self.connect().await
    }

    /// Stop the poll task and drop the session. The adapter ends up
    /// `Unconfigured`.
    ///
    /// Cancels the root token, so the adapter must not be reconnected
    /// afterwards.
    pub async fn shutdown(&self) {
        let _lifecycle = self.inner.lifecycle.lock().await;
        self.inner.cancel.cancel();
        self.teardown(AdapterState::Unconfigured).await;
        debug!("adapter shut down");
    }

    /// Cancel and join the poll task, clear session-scoped state and move
    /// to `next`.
    ///
    /// The join must happen before taking the session lock: the poll task
    /// takes that lock on every tick.
    async fn teardown(&self, next: AdapterState) {
        self.inner.cancel_child.lock().await.cancel();
        let handles: Vec<_> = self.inner.task_handles.lock().await.drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }

        {
            // Under the lock: a command that finds no session reports `next`.
            let mut session = self.inner.session.lock().await;
            *session = None;
            self.set_state(next);
        }
        self.inner.identity.store(None);
        self.inner.catalog.store(Arc::new(Catalog::empty()));
        self.inner.store.clear();
    }

    fn set_state(&self, state: AdapterState) {
        let previous = self.inner.state.send_replace(state);
        if previous != state {
            info!(from = %previous, to = %state, "adapter state changed");
        }
    }

    // ── Host entry points ────────────────────────────────────────

    /// Run one sync pass now.
    pub async fn poll_now(&self) -> Result<PollReport, CoreError> {
        let guard = self.inner.session.lock().await;
        let session = guard.as_ref().ok_or_else(|| self.not_active())?;
        Ok(sync::poll_all(session, &self.inner.store).await)
    }

    /// Execute a command. Unresolvable indices and failed writes come
    /// back as `CommandOutcome::Skipped`, not as errors.
    pub async fn execute(&self, command: Command) -> Result<CommandOutcome, CoreError> {
        command.validate()?;
        let settle = self.inner.config.load().settle_delay;

        let guard = self.inner.session.lock().await;
        let session = guard.as_ref().ok_or_else(|| self.not_active())?;
        Ok(mapper::apply(session, &self.inner.store, settle, command).await)
    }

    /// Apply a host command by control name.
    pub async fn apply(&self, control: &str, value: ControlValue) -> Result<CommandOutcome, CoreError> {
        let command = Command::from_host_name(control, value)?;
        self.execute(command).await
    }

    fn not_active(&self) -> CoreError {
        CoreError::NotActive {
            state: self.state(),
        }
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// Connect without a poll loop, run `f`, shut down.
    pub async fn oneshot<F, Fut, T>(config: AdapterConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Adapter) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.update_interval = Duration::ZERO;

        let adapter = Adapter::new(cfg);
        adapter.connect().await?;
        let result = f(adapter.clone()).await;
        adapter.shutdown().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    pub fn config(&self) -> Arc<AdapterConfig> {
        self.inner.config.load_full()
    }

    pub fn state(&self) -> AdapterState {
        *self.inner.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<AdapterState> {
        self.inner.state.subscribe()
    }

    /// Detected model and dialect, while a session exists.
    pub fn identity(&self) -> Option<Arc<DeviceIdentity>> {
        self.inner.identity.load_full()
    }

    /// The current session's catalog. Indices are only meaningful against
    /// the instance returned here.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.inner.catalog.load_full()
    }

    pub fn options(&self, list: CatalogList) -> Vec<CatalogOption> {
        self.inner.catalog.load().options(list)
    }

    pub fn controls(&self) -> ControlState {
        self.inner.store.snapshot()
    }

    pub fn subscribe_controls(&self) -> watch::Receiver<ControlState> {
        self.inner.store.subscribe()
    }
}

// ── Background task ──────────────────────────────────────────────

async fn poll_task(adapter: Adapter, interval: Duration, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(interval);
    interval.tick().await; // connect already polled once

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                match adapter.poll_now().await {
                    Ok(report) if !report.is_complete() => {
                        debug!(skipped = ?report.skipped, "periodic poll incomplete");
                    }
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "periodic poll failed"),
                }
            }
        }
    }
}
