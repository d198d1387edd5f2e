/// Latest text entered by the user, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputCapture {
    text: String,
}

impl InputCapture {
    pub fn set(&mut self, text: String) {
        self.text = text;
    }

    /// Current text by value, as handed to a submission.
    pub fn value(&self) -> String {
        self.text.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
