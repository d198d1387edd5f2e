use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one generation request for `repo_url`.
    GenerateContext { request_id: RequestId, repo_url: String },
    /// Report a terminal outcome to the tracking collaborator.
    Track(AnalyticsEvent),
}

/// One tracked occurrence. Built once per terminal transition and consumed by emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub action: String,
    pub category: String,
    pub label: String,
    pub value: Option<i64>,
}

impl AnalyticsEvent {
    pub const SUCCESS_ACTION: &'static str = "generate_context";
    pub const SUCCESS_CATEGORY: &'static str = "engagement";
    pub const ERROR_ACTION: &'static str = "generate_context_error";
    pub const ERROR_CATEGORY: &'static str = "error";

    pub fn generated(repo_url: impl Into<String>) -> Self {
        Self {
            action: Self::SUCCESS_ACTION.to_string(),
            category: Self::SUCCESS_CATEGORY.to_string(),
            label: repo_url.into(),
            value: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            action: Self::ERROR_ACTION.to_string(),
            category: Self::ERROR_CATEGORY.to_string(),
            label: message.into(),
            value: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == Self::ERROR_CATEGORY
    }
}
