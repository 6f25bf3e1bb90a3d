//! Configuration options for the nestkv shell.

/// Default line printed after each processed command.
pub const DEFAULT_MARKER: &str = "----- Command Processed -----";

/// Configuration options for a [`crate::shell::Shell`] session.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Print the marker line after every dispatched command.
    /// Default: true
    pub print_marker: bool,

    /// The marker line itself.
    /// Default: `----- Command Processed -----`
    pub marker: String,

    /// Prompt written before each line is read.
    /// Default: None
    pub prompt: Option<String>,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self { print_marker: true, marker: DEFAULT_MARKER.to_string(), prompt: None }
    }
}

impl ShellOptions {
    /// Creates a new ShellOptions with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to print the marker line.
    pub fn print_marker(mut self, value: bool) -> Self {
        self.print_marker = value;
        self
    }

    /// Sets the marker line.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Sets the prompt.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Validates the options and returns an error if any are invalid.
    pub fn validate(&self) -> crate::Result<()> {
        if self.print_marker && self.marker.is_empty() {
            return Err(crate::Error::invalid_argument("marker must not be empty"));
        }
        if self.marker.contains('\n') {
            return Err(crate::Error::invalid_argument("marker must be a single line"));
        }
        if let Some(prompt) = &self.prompt {
            if prompt.contains('\n') {
                return Err(crate::Error::invalid_argument("prompt must not contain a newline"));
            }
        }
        Ok(())
    }
}
