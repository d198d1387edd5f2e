#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the repository URL input.
    InputChanged(String),
    /// User submitted the current input for generation.
    SubmitClicked,
    /// The engine settled a generation request.
    GenerationFinished {
        request_id: crate::RequestId,
        result: Result<ServiceReply, crate::RequestFailure>,
    },
}

/// A successfully read service reply. Only the file path reference matters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceReply {
    pub file_path: Option<String>,
}

impl ServiceReply {
    pub fn with_file_path(file_path: impl Into<String>) -> Self {
        Self {
            file_path: Some(file_path.into()),
        }
    }

    /// The file path, treating an empty string as absent.
    pub fn usable_file_path(&self) -> Option<&str> {
        self.file_path.as_deref().filter(|path| !path.is_empty())
    }
}
