use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, validating or parsing SIP header objects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A setter or constructor received a value outside the range RFC 3261 allows
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid SIP header syntax, or a header of the wrong type
    #[error("Invalid SIP header: {0}")]
    InvalidHeader(String),

    /// Invalid SIP URI
    #[error("Invalid SIP URI: {0}")]
    InvalidUri(String),

    /// Max-Forwards was decremented below zero
    #[error("Too many hops")]
    TooManyHops,

    /// A header line exceeded the configured limit
    #[error("Header line too long: {len} bytes (max {max})")]
    LineTooLong { len: usize, max: usize },

    /// Other error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

impl<'a> From<nom::Err<nom::error::Error<&'a [u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&'a [u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => Error::ParseError("Incomplete input".to_string()),
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::ParseError(format!(
                "{:?} at '{}'",
                e.code,
                String::from_utf8_lossy(e.input)
            )),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nom_error_conversion_keeps_remaining_input() {
        let err: nom::Err<nom::error::Error<&[u8]>> =
            nom::Err::Error(nom::error::Error::new(b"bad-input", nom::error::ErrorKind::Tag));
        let converted = Error::from(err);
        match converted {
            Error::ParseError(msg) => assert!(msg.contains("bad-input")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::TooManyHops.to_string(), "Too many hops");
        assert_eq!(
            Error::LineTooLong { len: 10, max: 5 }.to_string(),
            "Header line too long: 10 bytes (max 5)"
        );
    }
}
