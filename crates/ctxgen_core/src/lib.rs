//! Context generator core: pure request lifecycle state machine and view-model helpers.
mod download;
mod effect;
mod failure;
mod input;
mod msg;
mod state;
mod update;
mod view_model;

pub use download::{download_location, final_segment};
pub use effect::{AnalyticsEvent, Effect};
pub use failure::{RequestFailure, MISSING_FILE_PATH_MESSAGE};
pub use input::InputCapture;
pub use msg::{Msg, ServiceReply};
pub use state::{AppState, RequestId, RequestState};
pub use update::update;
pub use view_model::{AppViewModel, ResultView, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
