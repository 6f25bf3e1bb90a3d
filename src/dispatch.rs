//! Maps a [`Command`] onto a [`KvStore`] call.
//!
//! The dispatcher holds no state and makes no decisions of its own; it is a
//! single exhaustive match from request shape to store method.

use std::fmt;

use crate::{Command, Error, KvStore, Result};

/// The result of executing one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// `GET` found a value
    Value(i64),
    /// `GET` found nothing
    NotFound,
    /// `ROLLBACK`/`COMMIT` with no open transaction
    NoTransaction,
    /// The command completed and has nothing to report
    Done,
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Value(v) => write!(f, "{}", v),
            Response::NotFound => f.write_str("NULL"),
            Response::NoTransaction => f.write_str("NO TRANSACTION"),
            Response::Done => Ok(()),
        }
    }
}

impl Response {
    /// Returns true if the response carries text to show the caller.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Response::Done)
    }
}

/// Executes `command` against `store`.
///
/// `END` does not touch the store and yields [`Response::Done`]; ending the
/// session is the caller's business.
///
/// # Errors
///
/// [`Error::NoTransaction`] is reported as [`Response::NoTransaction`]; any
/// other store error is returned unchanged.
///
/// # Example
///
/// ```
/// use nestkv::{dispatch, Command, KvStore, Response};
///
/// # fn main() -> Result<(), nestkv::Error> {
/// let store = KvStore::new();
/// dispatch::execute(&store, &Command::Set { key: "a".into(), value: 1 })?;
///
/// let resp = dispatch::execute(&store, &Command::Get { key: "a".into() })?;
/// assert_eq!(resp, Response::Value(1));
/// assert_eq!(dispatch::execute(&store, &Command::Commit)?, Response::NoTransaction);
/// # Ok(())
/// # }
/// ```
pub fn execute(store: &KvStore, command: &Command) -> Result<Response> {
    let response = match command {
        Command::Set { key, value } => {
            store.set(key, *value);
            Response::Done
        }
        Command::Get { key } => match store.get(key) {
            Some(v) => Response::Value(v),
            None => Response::NotFound,
        },
        Command::Unset { key } => {
            store.unset(key);
            Response::Done
        }
        Command::Begin => {
            store.begin();
            Response::Done
        }
        Command::Rollback => status(store.rollback())?,
        Command::Commit => status(store.commit())?,
        Command::End => Response::Done,
    };
    Ok(response)
}

fn status(result: Result<()>) -> Result<Response> {
    match result {
        Ok(()) => Ok(Response::Done),
        Err(Error::NoTransaction) => Ok(Response::NoTransaction),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(key: &str, value: i64) -> Command {
        Command::Set { key: key.into(), value }
    }

    fn get(key: &str) -> Command {
        Command::Get { key: key.into() }
    }

    #[test]
    fn test_execute_get_not_found() {
        let store = KvStore::new();
        assert_eq!(execute(&store, &get("missing")).unwrap(), Response::NotFound);
    }

    #[test]
    fn test_execute_set_get_unset() {
        let store = KvStore::new();
        assert_eq!(execute(&store, &set("a", 10)).unwrap(), Response::Done);
        assert_eq!(execute(&store, &get("a")).unwrap(), Response::Value(10));
        assert_eq!(execute(&store, &Command::Unset { key: "a".into() }).unwrap(), Response::Done);
        assert_eq!(execute(&store, &get("a")).unwrap(), Response::NotFound);
    }

    #[test]
    fn test_execute_transactions() {
        let store = KvStore::new();
        assert_eq!(execute(&store, &Command::Rollback).unwrap(), Response::NoTransaction);
        assert_eq!(execute(&store, &Command::Commit).unwrap(), Response::NoTransaction);

        execute(&store, &Command::Begin).unwrap();
        execute(&store, &set("a", 10)).unwrap();
        execute(&store, &Command::Begin).unwrap();
        execute(&store, &set("a", 20)).unwrap();
        assert_eq!(execute(&store, &Command::Rollback).unwrap(), Response::Done);
        assert_eq!(execute(&store, &get("a")).unwrap(), Response::Value(10));
        assert_eq!(execute(&store, &Command::Commit).unwrap(), Response::Done);
        assert_eq!(execute(&store, &Command::Commit).unwrap(), Response::NoTransaction);
    }

    #[test]
    fn test_execute_end_leaves_store_alone() {
        let store = KvStore::new();
        store.begin();
        assert_eq!(execute(&store, &Command::End).unwrap(), Response::Done);
        assert_eq!(store.depth(), 1);
    }

    #[test]
    fn test_status_passes_other_errors_through() {
        assert_eq!(status(Ok(())).unwrap(), Response::Done);
        assert_eq!(status(Err(Error::NoTransaction)).unwrap(), Response::NoTransaction);
        assert!(matches!(
            status(Err(Error::invalid_argument("unexpected"))),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_response_display() {
        assert_eq!(Response::Value(-3).to_string(), "-3");
        assert_eq!(Response::NotFound.to_string(), "NULL");
        assert_eq!(Response::NoTransaction.to_string(), "NO TRANSACTION");
        assert_eq!(Response::Done.to_string(), "");
        assert!(!Response::Done.is_visible());
        assert!(Response::NotFound.is_visible());
    }
}
