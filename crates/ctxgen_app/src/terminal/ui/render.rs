use ctxgen_core::{AppViewModel, ResultView};

use super::constants::*;

pub fn banner() -> Vec<String> {
    vec![
        TITLE.to_string(),
        TAGLINE.to_string(),
        String::new(),
        NOTE.to_string(),
        QUIT_HINT.to_string(),
        String::new(),
    ]
}

/// Input prompt. The submit label doubles as the busy indicator.
pub fn prompt(view: &AppViewModel) -> String {
    format!("{PLACEHOLDER} [{}]> ", view.submit_label)
}

/// Full projection of the result region for the current view.
pub fn render(view: &AppViewModel) -> Vec<String> {
    match &view.result {
        ResultView::Empty => Vec::new(),
        ResultView::Busy => vec![view.submit_label.to_string()],
        ResultView::Error { message } => vec![format!("Error: {message}")],
        ResultView::Download { location } => vec![
            SUCCESS_HEADING.to_string(),
            SUCCESS_BODY.to_string(),
            format!("{DOWNLOAD_LABEL}: {location}"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctxgen_core::{SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
    use pretty_assertions::assert_eq;

    fn view(result: ResultView) -> AppViewModel {
        let submit_label = if result.is_busy() {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        };
        AppViewModel {
            input: String::new(),
            submit_label,
            result,
            dirty: true,
        }
    }

    #[test]
    fn idle_renders_nothing() {
        assert!(render(&view(ResultView::Empty)).is_empty());
    }

    #[test]
    fn busy_renders_processing_indicator() {
        assert_eq!(render(&view(ResultView::Busy)), vec!["Processing...".to_string()]);
    }

    #[test]
    fn error_renders_message() {
        let lines = render(&view(ResultView::Error {
            message: "No file path received from server".to_string(),
        }));
        assert_eq!(lines, vec!["Error: No file path received from server".to_string()]);
    }

    #[test]
    fn download_renders_link() {
        let lines = render(&view(ResultView::Download {
            location: "https://api.example.com/download/out.json".to_string(),
        }));
        assert_eq!(lines[0], SUCCESS_HEADING);
        assert_eq!(
            lines.last().unwrap(),
            "Download Context File: https://api.example.com/download/out.json"
        );
    }

    #[test]
    fn prompt_shows_submit_label() {
        assert_eq!(
            prompt(&view(ResultView::Empty)),
            "Enter your GitHub repository URL [Generate]> "
        );
    }
}
