use std::fmt;
use std::sync::Arc;

use ctxgen_logging::{ctx_debug, ctx_info};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::wire::TrackingPayload;

/// One `(action, category, label, value?)` occurrence handed to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingEvent {
    pub action: String,
    pub category: String,
    pub label: String,
    pub value: Option<i64>,
}

impl TrackingEvent {
    pub(crate) fn into_payload(self, sent_utc: String) -> TrackingPayload {
        TrackingPayload {
            event: self.action,
            event_category: self.category,
            event_label: self.label,
            value: self.value,
            sent_utc,
        }
    }
}

/// Reporting capability of the tracking collaborator.
///
/// Implementations must return promptly and swallow their own delivery failures.
pub trait TrackingSink: Send + Sync {
    fn report(&self, event: TrackingEvent);
}

/// Fire-and-forget front for an optional [`TrackingSink`].
#[derive(Clone, Default)]
pub struct AnalyticsEmitter {
    sink: Option<Arc<dyn TrackingSink>>,
}

impl AnalyticsEmitter {
    pub fn new(sink: Option<Arc<dyn TrackingSink>>) -> Self {
        Self { sink }
    }

    /// Emitter without a collaborator; every emission is dropped.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn emit(&self, action: &str, category: &str, label: &str, value: Option<i64>) {
        let Some(sink) = &self.sink else {
            return;
        };
        sink.report(TrackingEvent {
            action: action.to_string(),
            category: category.to_string(),
            label: label.to_string(),
            value,
        });
    }
}

impl fmt::Debug for AnalyticsEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticsEmitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// Writes every event to the log instead of a remote collector.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrackingSink;

impl TrackingSink for LogTrackingSink {
    fn report(&self, event: TrackingEvent) {
        ctx_info!(
            "track action={} category={} label={} value={:?}",
            event.action,
            event.category,
            event.label,
            event.value
        );
    }
}

/// POSTs one payload to the collector. Failures only reach the debug log.
pub(crate) async fn deliver(client: &reqwest::Client, endpoint: &Url, payload: TrackingPayload) {
    let body = match serde_json::to_vec(&payload) {
        Ok(body) => body,
        Err(err) => {
            ctx_debug!("tracking payload not serializable: {}", err);
            return;
        }
    };
    let result = client
        .post(endpoint.clone())
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await;
    match result {
        Ok(response) if response.status().is_success() => {}
        Ok(response) => {
            ctx_debug!("tracking collector answered {}", response.status());
        }
        Err(err) => {
            ctx_debug!("tracking delivery failed: {}", err);
        }
    }
}
