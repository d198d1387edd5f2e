use crate::view_model::{AppViewModel, ResultView, SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
use crate::InputCapture;

pub type RequestId = u64;

/// Lifecycle of the latest submission. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Success { download_location: String },
    Failure { message: String },
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Success { .. } | RequestState::Failure { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    repo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    api_base: String,
    input: InputCapture,
    request: RequestState,
    in_flight: Option<InFlight>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    /// `api_base` is the service base endpoint without a trailing slash.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            input: InputCapture::default(),
            request: RequestState::Idle,
            in_flight: None,
            last_request_id: 0,
            dirty: false,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn input(&self) -> &InputCapture {
        &self.input
    }

    /// Id of the request whose completion will be accepted, if any.
    pub fn current_request_id(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|f| f.request_id)
    }

    pub fn view(&self) -> AppViewModel {
        let result = match &self.request {
            RequestState::Idle => ResultView::Empty,
            RequestState::Pending => ResultView::Busy,
            RequestState::Success { download_location } => ResultView::Download {
                location: download_location.clone(),
            },
            RequestState::Failure { message } => ResultView::Error {
                message: message.clone(),
            },
        };
        AppViewModel {
            input: self.input.value(),
            submit_label: if self.request.is_pending() {
                SUBMIT_LABEL_BUSY
            } else {
                SUBMIT_LABEL_IDLE
            },
            result,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input.as_str() != text {
            self.input.set(text);
            self.dirty = true;
        }
    }

    /// Enters `Pending` for a fresh request, superseding any in-flight one.
    pub(crate) fn begin_request(&mut self) -> (RequestId, String) {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        let repo_url = self.input.value();
        self.in_flight = Some(InFlight {
            request_id,
            repo_url: repo_url.clone(),
        });
        self.request = RequestState::Pending;
        self.dirty = true;
        (request_id, repo_url)
    }

    /// Takes the submitted URL when `request_id` is the current request.
    pub(crate) fn settle(&mut self, request_id: RequestId) -> Option<String> {
        match &self.in_flight {
            Some(in_flight) if in_flight.request_id == request_id => {
                self.in_flight.take().map(|f| f.repo_url)
            }
            _ => None,
        }
    }

    pub(crate) fn succeed(&mut self, download_location: String) {
        self.request = RequestState::Success { download_location };
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.request = RequestState::Failure { message };
        self.dirty = true;
    }
}
