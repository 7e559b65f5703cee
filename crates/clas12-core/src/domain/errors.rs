//! Error type shared by the event readers, the analysis driver and the CLI.

use std::fmt::{self, Display, Formatter};

pub type Clas12Result<T> = Result<T, Clas12Error>;
pub type ReaderResult<T> = Clas12Result<T>;
pub type AnalysisResult<T> = Clas12Result<T>;

/// Coarse failure class; decides the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clas12ErrorCategory {
    /// Malformed event records or artifacts, bad command-line values.
    InputValidationError,
    /// Files that cannot be opened, read or written.
    IoSystemError,
    /// Artifact encoding failures.
    InternalError,
}

impl Clas12ErrorCategory {
    pub const ALL: [Self; 3] = [
        Self::InputValidationError,
        Self::IoSystemError,
        Self::InternalError,
    ];

    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::InternalError => "InternalError",
        }
    }
}

impl Display for Clas12ErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `code` is a stable dotted identifier such as `IO.EVENT_FILE` that scripts
/// can match on without parsing the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{category} [{code}] {message}")]
pub struct Clas12Error {
    category: Clas12ErrorCategory,
    code: &'static str,
    message: String,
}

impl Clas12Error {
    pub fn new(
        category: Clas12ErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Clas12ErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Clas12ErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Clas12ErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> Clas12ErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    /// `ERROR: [CODE] message`, the first stderr line of a failed run.
    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}
