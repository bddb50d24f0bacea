use failure::{Backtrace, Context, Fail};
use std::fmt;

/// Result alias used by every operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The specific kind of error that can occur.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    /// The client configuration is unusable (bad endpoint, missing variable).
    #[fail(display = "Configuration error: {}", _0)]
    Config(String),
    /// A request url could not be built.
    #[fail(display = "Invalid url: {}", _0)]
    Url(String),
    /// The transport failed before a response was received.
    #[fail(display = "HTTP error: {}", _0)]
    Http(String),
    /// The server answered with a non-2xx status.
    #[fail(display = "Unexpected status {}: {}", status, body)]
    Status { status: u16, body: String },
    /// A serialization / deserialization error
    #[fail(display = "Serialization error: {}", _0)]
    Json(String),
    /// Hints that destructuring should not be exhaustive.
    ///
    /// This enum may grow additional variants, so this makes sure clients
    /// don't count on exhaustive matching. (Otherwise, adding a new variant
    /// could break existing code.)
    #[doc(hidden)]
    #[fail(display = "Non exhaustive")]
    __Nonexhaustive,
}

/// An error that can occur while talking to the GitLab API
#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

impl Error {
    /// Return the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        self.inner.get_context()
    }

    /// The HTTP status, when the server rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self.kind() {
            ErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Context::new(kind),
        }
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(inner: Context<ErrorKind>) -> Error {
        Error { inner }
    }
}
