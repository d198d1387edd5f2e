pub const TITLE: &str = "Coding Context File Generator";
pub const TAGLINE: &str = "Generate concise project context for AI analysis";
pub const NOTE: &str = "Note: the generated file is optimized for size. .gitignore rules are applied \
and package-lock.json and other irrelevant files are removed.";
pub const PLACEHOLDER: &str = "Enter your GitHub repository URL";
pub const QUIT_HINT: &str = "Type :quit or press Ctrl-D to exit.";
pub const SUCCESS_HEADING: &str = "Context File Generated";
pub const SUCCESS_BODY: &str = "Your optimized project context file is ready for download.";
pub const DOWNLOAD_LABEL: &str = "Download Context File";
