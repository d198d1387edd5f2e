use std::fmt;
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ctxgen_logging::{ctx_debug, ctx_info, ctx_trace, ctx_warn};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use url::Url;

use crate::analytics::{deliver, TrackingEvent, TrackingSink};
use crate::client::{build_client, ClientSettings, ContextGenerator, ReqwestGenerator};
use crate::{EngineError, EngineEvent, FailureKind, GenerateError, RequestId};

const TRACKING_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct EngineConfig {
    /// Service base endpoint without a trailing slash.
    pub api_base: String,
    pub client: ClientSettings,
    /// Collector URL for tracking events; `None` disables remote tracking.
    pub tracking_endpoint: Option<String>,
    /// Timestamp stamped on tracking payloads.
    pub sent_utc: Arc<dyn Fn() -> String + Send + Sync>,
}

impl EngineConfig {
    pub fn new(
        api_base: impl Into<String>,
        sent_utc: Arc<dyn Fn() -> String + Send + Sync>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            client: ClientSettings::default(),
            tracking_endpoint: None,
            sent_utc,
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("api_base", &self.api_base)
            .field("client", &self.client)
            .field("tracking_endpoint", &self.tracking_endpoint)
            .finish_non_exhaustive()
    }
}

enum EngineCommand {
    Generate {
        request_id: RequestId,
        repo_url: String,
    },
    Track(TrackingEvent),
    Shutdown {
        grace: Duration,
    },
}

/// Handle to the engine thread. Clones share the same command and event channels.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
    tracking_enabled: bool,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let generator =
            ReqwestGenerator::new(&config.api_base, config.client.clone()).map_err(|err| {
                match err.kind {
                    FailureKind::InvalidEndpoint => EngineError::InvalidEndpoint {
                        what: "api",
                        url: config.api_base.clone(),
                        message: err.message,
                    },
                    _ => EngineError::Client(err),
                }
            })?;
        ctx_info!("generation endpoint {}", generator.endpoint());
        Self::with_generator(Arc::new(generator), &config)
    }

    /// Runs `generator` on the engine thread; `config.api_base` is not used.
    pub fn with_generator(
        generator: Arc<dyn ContextGenerator>,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        let tracking = match &config.tracking_endpoint {
            Some(raw) => Some(Url::parse(raw).map_err(|err| EngineError::InvalidEndpoint {
                what: "tracking",
                url: raw.clone(),
                message: err.to_string(),
            })?),
            None => None,
        };
        let tracking_client = build_client(&ClientSettings {
            request_timeout: Some(TRACKING_TIMEOUT),
            ..config.client.clone()
        })?;
        let runtime = tokio::runtime::Runtime::new()?;
        let sent_utc = config.sent_utc.clone();
        let tracking_enabled = tracking.is_some();

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let worker = thread::spawn(move || {
            let mut current: Option<CancellationToken> = None;
            let deliveries = TaskTracker::new();
            let mut grace = Duration::ZERO;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Generate {
                        request_id,
                        repo_url,
                    } => {
                        let token = CancellationToken::new();
                        if let Some(previous) = current.replace(token.clone()) {
                            previous.cancel();
                        }
                        let generator = generator.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            run_generation(generator.as_ref(), request_id, repo_url, token, event_tx)
                                .await;
                        });
                    }
                    EngineCommand::Track(event) => {
                        let Some(endpoint) = tracking.clone() else {
                            continue;
                        };
                        ctx_trace!("tracking {} ({})", event.action, event.category);
                        let client = tracking_client.clone();
                        let payload = event.into_payload(sent_utc());
                        runtime.spawn(deliveries.track_future(async move {
                            deliver(&client, &endpoint, payload).await;
                        }));
                    }
                    EngineCommand::Shutdown { grace: requested } => {
                        grace = requested;
                        break;
                    }
                }
            }

            if let Some(token) = current.take() {
                token.cancel();
            }
            deliveries.close();
            let pending = deliveries.len();
            let drained = runtime
                .block_on(async { tokio::time::timeout(grace, deliveries.wait()).await })
                .is_ok();
            if !drained {
                ctx_warn!("dropping {} undelivered tracking event(s) at shutdown", pending);
            }
            runtime.shutdown_timeout(grace);
            ctx_debug!("engine stopped");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            worker: Arc::new(Mutex::new(Some(worker))),
            tracking_enabled,
        })
    }

    /// Stops the engine thread, giving queued tracking deliveries up to `grace`
    /// to reach the collector. Requests still in flight are cancelled. Later
    /// calls on any clone are no-ops.
    pub fn shutdown(&self, grace: Duration) {
        let Some(worker) = self.worker.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        let _ = self.cmd_tx.send(EngineCommand::Shutdown { grace });
        if worker.join().is_err() {
            ctx_warn!("engine thread panicked during shutdown");
        }
    }

    /// Starts a request and cancels the one still in flight, if any.
    pub fn generate(&self, request_id: RequestId, repo_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            request_id,
            repo_url: repo_url.into(),
        });
    }

    /// Whether [`EngineHandle::shutdown`] has run on this handle or a clone.
    pub fn is_stopped(&self) -> bool {
        self.worker.lock().map(|slot| slot.is_none()).unwrap_or(true)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    /// Sink delivering to the configured collector, or `None` when tracking is off.
    pub fn tracking_sink(&self) -> Option<Arc<dyn TrackingSink>> {
        if !self.tracking_enabled {
            return None;
        }
        Some(Arc::new(ChannelTrackingSink {
            cmd_tx: self.cmd_tx.clone(),
        }))
    }
}

async fn run_generation(
    generator: &dyn ContextGenerator,
    request_id: RequestId,
    repo_url: String,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let result = tokio::select! {
        _ = token.cancelled() => Err(GenerateError::new(
            FailureKind::Cancelled,
            "superseded by a newer request",
        )),
        result = generator.generate(&repo_url) => result,
    };
    if let Err(err) = &result {
        ctx_debug!("request {} ended with {}", request_id, err);
    }
    let _ = event_tx.send(EngineEvent::GenerationCompleted { request_id, result });
}

struct ChannelTrackingSink {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl TrackingSink for ChannelTrackingSink {
    fn report(&self, event: TrackingEvent) {
        let _ = self.cmd_tx.send(EngineCommand::Track(event));
    }
}
