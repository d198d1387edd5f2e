pub const SUBMIT_LABEL_IDLE: &str = "Generate";
pub const SUBMIT_LABEL_BUSY: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub input: String,
    pub submit_label: &'static str,
    pub result: ResultView,
    pub dirty: bool,
}

/// What the result region shows. A full projection of the request state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultView {
    #[default]
    Empty,
    Busy,
    Error { message: String },
    Download { location: String },
}

impl ResultView {
    pub fn is_busy(&self) -> bool {
        matches!(self, ResultView::Busy)
    }
}

#[cfg(test)]
mod tests {
    use crate::{update, AppState, Msg, ResultView, ServiceReply, SUBMIT_LABEL_BUSY};

    #[test]
    fn idle_view_is_empty() {
        let view = AppState::new("https://api.example.com").view();
        assert_eq!(view.result, ResultView::Empty);
        assert_eq!(view.submit_label, "Generate");
        assert!(!view.dirty);
    }

    #[test]
    fn pending_view_shows_busy_label() {
        let (state, _) = update(AppState::new("https://api.example.com"), Msg::SubmitClicked);
        let view = state.view();
        assert!(view.result.is_busy());
        assert_eq!(view.submit_label, SUBMIT_LABEL_BUSY);
    }

    #[test]
    fn view_is_recomputed_from_current_state() {
        let (state, _) = update(AppState::new("https://api.example.com"), Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::GenerationFinished {
                request_id: 1,
                result: Ok(ServiceReply::with_file_path("x/y.md")),
            },
        );
        assert_eq!(
            state.view().result,
            ResultView::Download {
                location: "https://api.example.com/download/y.md".to_string()
            }
        );

        let (state, _) = update(state, Msg::SubmitClicked);
        assert_eq!(state.view().result, ResultView::Busy);
    }
}
