use std::fmt;

/// What went wrong, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Upstream answered successfully but reported no data rows.
    EmptyResult,
    /// A date or clock string from the upstream payload could not be parsed.
    Parse,
    /// The caller passed an argument the API does not accept.
    InvalidInput,
    /// Transport failure, non-success status or undecodable body.
    Unhandled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyResult => "EmptyResult",
            ErrorKind::Parse => "ParseError",
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::Unhandled => "UnhandledError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyResult, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn unhandled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unhandled, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Domain errors are passed through untouched by every boundary;
    /// everything else is already collapsed into `Unhandled`.
    pub fn is_domain(&self) -> bool {
        self.kind != ErrorKind::Unhandled
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
