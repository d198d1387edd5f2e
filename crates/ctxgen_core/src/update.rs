use ctxgen_logging::{ctx_debug, ctx_info, ctx_warn};

use crate::{
    download_location, AnalyticsEvent, AppState, Effect, Msg, RequestFailure, ServiceReply,
    MISSING_FILE_PATH_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if let Some(previous) = state.current_request_id() {
                ctx_debug!("request {} superseded by a new submission", previous);
            }
            let (request_id, repo_url) = state.begin_request();
            ctx_info!("submitting request {} url_len={}", request_id, repo_url.len());
            vec![Effect::GenerateContext {
                request_id,
                repo_url,
            }]
        }
        Msg::GenerationFinished { request_id, result } => {
            let Some(repo_url) = state.settle(request_id) else {
                ctx_debug!("ignoring completion of stale request {}", request_id);
                return (state, Vec::new());
            };
            let event = match interpret(state.api_base(), result) {
                Ok(location) => {
                    ctx_info!("request {} succeeded: {}", request_id, location);
                    state.succeed(location);
                    AnalyticsEvent::generated(repo_url)
                }
                Err(message) => {
                    ctx_warn!("request {} failed: {}", request_id, message);
                    state.fail(message.clone());
                    AnalyticsEvent::failed(message)
                }
            };
            vec![Effect::Track(event)]
        }
    };

    (state, effects)
}

/// Download location on success, failure message otherwise.
fn interpret(
    api_base: &str,
    result: Result<ServiceReply, RequestFailure>,
) -> Result<String, String> {
    let reply = result.map_err(|failure| failure.to_string())?;
    reply
        .usable_file_path()
        .map(|path| download_location(api_base, path))
        .ok_or_else(|| MISSING_FILE_PATH_MESSAGE.to_string())
}
