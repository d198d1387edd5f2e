//! Context generator engine: HTTP generation requests, tracking delivery and effect execution.
mod analytics;
mod client;
mod engine;
mod types;
mod wire;

pub use analytics::{AnalyticsEmitter, LogTrackingSink, TrackingEvent, TrackingSink};
pub use client::{ClientSettings, ContextGenerator, ReqwestGenerator, GENERATE_PATH};
pub use engine::{EngineConfig, EngineHandle};
pub use types::{EngineError, EngineEvent, FailureKind, GenerateError, GenerateOutput, RequestId};
pub use wire::{GenerateRequestBody, GenerateResponseBody, TrackingPayload};
