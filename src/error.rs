//! Error types for nestkv.

use std::io;

use thiserror::Error;

/// The result type used throughout nestkv.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for nestkv operations.
///
/// Only [`Error::NoTransaction`] comes out of the store itself, and it is a
/// status rather than a fault: the store is left exactly as it was. The
/// protocol variants are produced while parsing input lines and never reach
/// the store.
#[derive(Debug, Error)]
pub enum Error {
    /// `ROLLBACK` or `COMMIT` was issued with no open transaction.
    #[error("NO TRANSACTION")]
    NoTransaction,

    /// The command token was not recognized.
    #[error("Unknown command")]
    UnknownCommand(String),

    /// A command received the wrong number of arguments.
    #[error("{command} command requires {expected} {noun}", noun = plural(.expected))]
    WrongArity {
        /// The command name, upper-cased.
        command: &'static str,
        /// The required argument count.
        expected: usize,
        /// The argument count that was supplied.
        actual: usize,
    },

    /// A `SET` value could not be parsed as an integer.
    #[error("invalid integer value '{0}'")]
    InvalidValue(String),

    /// An input line was not valid UTF-8.
    #[error("input line is not valid UTF-8")]
    InvalidEncoding,

    /// An invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An I/O error occurred on the input or output stream.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        "argument"
    } else {
        "arguments"
    }
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Creates a new invalid value error.
    pub fn invalid_value(value: impl Into<String>) -> Self {
        Error::InvalidValue(value.into())
    }

    /// Returns true if this error describes a malformed request line.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::UnknownCommand(_)
                | Error::WrongArity { .. }
                | Error::InvalidValue(_)
                | Error::InvalidEncoding
        )
    }
}
