//! Error type for parsing legacy URLs and building CDN URLs.

use std::fmt;
use thiserror::Error;

/// What went wrong, independent of which operation hit it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input does not contain the diva image endpoint marker.
    #[error("not a diva URL")]
    NotRecognized,

    /// The input contains the marker but is not a valid URL.
    #[error("malformed URL")]
    MalformedInput,

    /// `id` or `formatid` is absent or empty.
    #[error("missing required argument")]
    MissingRequiredArgument,

    /// `id` or `id2` is `.` or `..`, which cannot be kept as a path segment.
    #[error("invalid argument")]
    InvalidArgument,

    /// The converter was configured with an empty base URL.
    #[error("missing base URL")]
    MissingBaseUrl,

    /// The configured base URL could not be parsed.
    #[error("invalid base URL")]
    InvalidBaseUrl,
}

/// Operation name carried by an [`Error`].
pub(crate) const OP_PARSE: &str = "parse";
pub(crate) const OP_BUILD: &str = "build";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by [`Converter::parse`](crate::Converter::parse) and
/// [`Converter::new_url`](crate::Converter::new_url).
///
/// Carries the operation (`"parse"` or `"build"`), the input it was called
/// with and, when there is one, the underlying cause.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    op: &'static str,
    input: String,
    source: Option<BoxError>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, op: &'static str, input: impl Into<String>) -> Self {
        Self {
            kind,
            op,
            input: input.into(),
            source: None,
        }
    }

    pub(crate) fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Re-labels a builder error as a failure of `parse(input)`, keeping the
    /// builder error as the cause.
    pub(crate) fn wrap_parse(self, input: &str) -> Self {
        let kind = self.kind;
        Error::new(kind, OP_PARSE, input).with_source(self)
    }

    /// What went wrong.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// `"parse"` or `"build"`.
    pub fn op(&self) -> &'static str {
        self.op
    }

    /// The raw URL (for `parse`) or the rendered arguments (for `build`).
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}: {}", self.op, self.input, self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
