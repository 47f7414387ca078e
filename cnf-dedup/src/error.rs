use std::{fmt, io};

pub use flussab::text::LineColumn;
use thiserror::Error;

/// A clause line contained a token that is not a literal.
#[derive(Debug)]
pub struct MalformedLiteral {
    /// Source location of the offending token.
    pub location: LineColumn,
    /// All whitespace separated tokens of the offending line.
    pub tokens: Vec<String>,
    /// The token that could not be parsed as a literal.
    pub token: String,
    /// Set to the supported maximum magnitude when the token is an integer outside of that range.
    pub limit: Option<isize>,
}

impl fmt::Display for MalformedLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(limit) = self.limit {
            write!(
                f,
                "{}: CNF incorrect: {:?}, literal {} out of range (supported maximum is {})",
                self.location, self.tokens, self.token, limit
            )
        } else {
            write!(
                f,
                "{}: CNF incorrect: {:?}, tried parsing literal {:?}",
                self.location, self.tokens, self.token
            )
        }
    }
}

impl std::error::Error for MalformedLiteral {}

/// Either a [`MalformedLiteral`] or an [`io::Error`].
///
/// This is used via [`ParseError`], which wraps this in a [`Box`].
#[derive(Error, Debug)]
pub enum InnerParseError {
    /// A token on a clause line is not a literal.
    #[error(transparent)]
    MalformedLiteral(MalformedLiteral),
    /// An IO error.
    #[error("IO error during parsing: {}", .0)]
    IoError(#[source] io::Error),
}

/// Boxed version of [`InnerParseError`].
pub type ParseError = Box<InnerParseError>;

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Box::new(InnerParseError::IoError(err))
    }
}

impl From<MalformedLiteral> for ParseError {
    fn from(err: MalformedLiteral) -> Self {
        Box::new(InnerParseError::MalformedLiteral(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_literal_message() {
        let err = ParseError::from(MalformedLiteral {
            location: LineColumn { line: 3, column: 3 },
            tokens: vec!["1".to_owned(), "x".to_owned(), "0".to_owned()],
            token: "x".to_owned(),
            limit: None,
        });

        assert_eq!(
            err.to_string(),
            r#"3:3: CNF incorrect: ["1", "x", "0"], tried parsing literal "x""#
        );
    }

    #[test]
    fn out_of_range_message() {
        let err = ParseError::from(MalformedLiteral {
            location: LineColumn { line: 1, column: 1 },
            tokens: vec!["99999999999".to_owned(), "0".to_owned()],
            token: "99999999999".to_owned(),
            limit: Some(2147483647),
        });

        assert_eq!(
            err.to_string(),
            r#"1:1: CNF incorrect: ["99999999999", "0"], literal 99999999999 out of range (supported maximum is 2147483647)"#
        );
    }

    #[test]
    fn io_error_message() {
        let err = ParseError::from(io::Error::new(io::ErrorKind::Other, "disk on fire"));

        assert_eq!(err.to_string(), "IO error during parsing: disk on fire");
    }
}
