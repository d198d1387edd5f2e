use ctxgen_core::{update, AppState, Effect, Msg, RequestFailure, RequestState, ServiceReply};
use pretty_assertions::assert_eq;

const BASE: &str = "https://api.example.com";

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::SubmitClicked)
}

#[test]
fn resubmit_while_pending_issues_a_second_request() {
    let (state, _) = submit(AppState::new(BASE), "https://github.com/org/a");
    let (state, effects) = submit(state, "https://github.com/org/b");

    assert_eq!(state.request(), &RequestState::Pending);
    assert_eq!(state.current_request_id(), Some(2));
    assert_eq!(
        effects,
        vec![Effect::GenerateContext {
            request_id: 2,
            repo_url: "https://github.com/org/b".to_string(),
        }]
    );
}

#[test]
fn stale_completion_is_ignored() {
    let (state, _) = submit(AppState::new(BASE), "https://github.com/org/a");
    let (state, _) = submit(state, "https://github.com/org/b");

    let (mut state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: Ok(ServiceReply::with_file_path("old/a.md")),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.request(), &RequestState::Pending);
    state.consume_dirty();

    let (mut state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id: 2,
            result: Ok(ServiceReply::with_file_path("new/b.md")),
        },
    );
    assert_eq!(effects.len(), 1);
    assert!(state.consume_dirty());
    assert_eq!(
        state.request(),
        &RequestState::Success {
            download_location: format!("{BASE}/download/b.md"),
        }
    );
}

#[test]
fn stale_completion_after_settle_does_not_override() {
    let (state, _) = submit(AppState::new(BASE), "https://github.com/org/a");
    let (state, _) = submit(state, "https://github.com/org/b");
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            request_id: 2,
            result: Err(RequestFailure::Service { status: 500 }),
        },
    );
    let settled = state.request().clone();

    let (mut state, effects) = update(
        state,
        Msg::GenerationFinished {
            request_id: 1,
            result: Err(RequestFailure::Cancelled),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.request(), &settled);
    state.consume_dirty();
    assert!(!state.consume_dirty());
}

#[test]
fn duplicate_completion_is_ignored() {
    let (state, _) = submit(AppState::new(BASE), "https://github.com/org/a");
    let done = Msg::GenerationFinished {
        request_id: 1,
        result: Ok(ServiceReply::with_file_path("a.md")),
    };
    let (state, first) = update(state, done.clone());
    let (_, second) = update(state, done);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn completion_without_submission_is_ignored() {
    let state = AppState::new(BASE);
    let (next, effects) = update(
        state.clone(),
        Msg::GenerationFinished {
            request_id: 1,
            result: Ok(ServiceReply::with_file_path("a.md")),
        },
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());
}
