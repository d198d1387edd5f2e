use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use ctxgen_core::{Effect, Msg, RequestFailure, ServiceReply};
use ctxgen_engine::{
    AnalyticsEmitter, EngineConfig, EngineError, EngineEvent, EngineHandle, FailureKind,
    GenerateError, GenerateOutput, LogTrackingSink, TrackingSink,
};
use ctxgen_logging::{ctx_debug, ctx_info};

use super::app::{EffectExecutor, LoopEvent};
use super::config::ResolvedConfig;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

pub struct EffectRunner {
    engine: EngineHandle,
    analytics: AnalyticsEmitter,
}

impl EffectRunner {
    pub fn new(config: &ResolvedConfig, tx: mpsc::Sender<LoopEvent>) -> Result<Self, EngineError> {
        let mut engine_config = EngineConfig::new(
            config.api_base.clone(),
            Arc::new(|| Utc::now().to_rfc3339()),
        );
        engine_config.tracking_endpoint = config.tracking_endpoint.clone();

        let engine = EngineHandle::new(engine_config)?;
        let sink = engine.tracking_sink().or_else(|| {
            config
                .log_tracking
                .then(|| Arc::new(LogTrackingSink) as Arc<dyn TrackingSink>)
        });
        let analytics = AnalyticsEmitter::new(sink);
        ctx_info!("tracking enabled={}", analytics.is_enabled());

        let runner = Self { engine, analytics };
        runner.spawn_event_loop(tx);
        Ok(runner)
    }

    fn spawn_event_loop(&self, tx: mpsc::Sender<LoopEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(250)) else {
                if engine.is_stopped() {
                    break;
                }
                continue;
            };
            let EngineEvent::GenerationCompleted { request_id, result } = event;
            let msg = Msg::GenerationFinished {
                request_id,
                result: map_completion(result),
            };
            if tx.send(LoopEvent::Dispatch(msg)).is_err() {
                ctx_debug!("event loop receiver gone; stopping engine forwarding");
                break;
            }
        });
    }

    /// Flushes pending tracking deliveries and stops the engine.
    pub fn shutdown(&self) {
        ctx_debug!("stopping engine");
        self.engine.shutdown(SHUTDOWN_GRACE);
    }
}

impl EffectExecutor for EffectRunner {
    fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::GenerateContext {
                    request_id,
                    repo_url,
                } => {
                    ctx_info!(
                        "GenerateContext request_id={} url_len={} url={}",
                        request_id,
                        repo_url.len(),
                        repo_url
                    );
                    self.engine.generate(request_id, repo_url);
                }
                Effect::Track(event) => {
                    self.analytics
                        .emit(&event.action, &event.category, &event.label, event.value);
                }
            }
        }
    }
}

pub(crate) fn map_completion(
    result: Result<GenerateOutput, GenerateError>,
) -> Result<ServiceReply, RequestFailure> {
    match result {
        Ok(output) => Ok(ServiceReply {
            file_path: output.file_path,
        }),
        Err(err) => Err(match err.kind {
            FailureKind::HttpStatus(status) => RequestFailure::Service { status },
            FailureKind::InvalidBody | FailureKind::TooLarge { .. } => {
                RequestFailure::Malformed {
                    detail: err.message,
                }
            }
            FailureKind::Cancelled => RequestFailure::Cancelled,
            FailureKind::InvalidEndpoint | FailureKind::Timeout | FailureKind::Network => {
                RequestFailure::Transport {
                    detail: err.message,
                }
            }
        }),
    }
}
