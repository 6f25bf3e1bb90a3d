//! Typed operations and the line parser that produces them.
//!
//! Each input line names a command with its first whitespace-separated
//! token (matched case-insensitively) followed by a fixed number of
//! arguments.
//!
//! | Command    | Arguments     |
//! |------------|---------------|
//! | `SET`      | key, integer  |
//! | `GET`      | key           |
//! | `UNSET`    | key           |
//! | `BEGIN`    | none          |
//! | `ROLLBACK` | none          |
//! | `COMMIT`   | none          |
//! | `END`      | none          |

use crate::{Error, Result};

/// A parsed request against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set a key to a value
    Set {
        /// Key to write
        key: String,
        /// Value to associate with the key
        value: i64,
    },
    /// Read a key
    Get {
        /// Key to read
        key: String,
    },
    /// Delete a key
    Unset {
        /// Key to delete
        key: String,
    },
    /// Open a nested transaction
    Begin,
    /// Discard the innermost transaction
    Rollback,
    /// Fold every open transaction into the committed map
    Commit,
    /// End the session
    End,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`], [`Error::WrongArity`] or
    /// [`Error::InvalidValue`] for a malformed line.
    ///
    /// # Example
    ///
    /// ```
    /// use nestkv::Command;
    ///
    /// let cmd = Command::parse("set a 10").unwrap();
    /// assert_eq!(cmd, Some(Command::Set { key: "a".into(), value: 10 }));
    ///
    /// assert_eq!(Command::parse("   ").unwrap(), None);
    /// assert!(Command::parse("GET").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = parts.collect();

        let command = match name.to_ascii_uppercase().as_str() {
            "SET" => {
                expect_args("SET", &args, 2)?;
                let value = args[1].parse::<i64>().map_err(|_| Error::invalid_value(args[1]))?;
                Command::Set { key: args[0].to_owned(), value }
            }
            "GET" => {
                expect_args("GET", &args, 1)?;
                Command::Get { key: args[0].to_owned() }
            }
            "UNSET" => {
                expect_args("UNSET", &args, 1)?;
                Command::Unset { key: args[0].to_owned() }
            }
            "BEGIN" => {
                expect_args("BEGIN", &args, 0)?;
                Command::Begin
            }
            "ROLLBACK" => {
                expect_args("ROLLBACK", &args, 0)?;
                Command::Rollback
            }
            "COMMIT" => {
                expect_args("COMMIT", &args, 0)?;
                Command::Commit
            }
            "END" => {
                expect_args("END", &args, 0)?;
                Command::End
            }
            _ => return Err(Error::UnknownCommand(name.to_owned())),
        };

        Ok(Some(command))
    }

    /// Returns the upper-case command name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get { .. } => "GET",
            Command::Unset { .. } => "UNSET",
            Command::Begin => "BEGIN",
            Command::Rollback => "ROLLBACK",
            Command::Commit => "COMMIT",
            Command::End => "END",
        }
    }
}

fn expect_args(command: &'static str, args: &[&str], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::WrongArity { command, expected, actual: args.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_commands() {
        assert_eq!(
            Command::parse("SET a 10").unwrap(),
            Some(Command::Set { key: "a".into(), value: 10 })
        );
        assert_eq!(Command::parse("GET a").unwrap(), Some(Command::Get { key: "a".into() }));
        assert_eq!(Command::parse("UNSET a").unwrap(), Some(Command::Unset { key: "a".into() }));
        assert_eq!(Command::parse("BEGIN").unwrap(), Some(Command::Begin));
        assert_eq!(Command::parse("ROLLBACK").unwrap(), Some(Command::Rollback));
        assert_eq!(Command::parse("COMMIT").unwrap(), Some(Command::Commit));
        assert_eq!(Command::parse("END").unwrap(), Some(Command::End));
    }

    #[test]
    fn test_command_token_is_case_insensitive() {
        assert_eq!(Command::parse("begin").unwrap(), Some(Command::Begin));
        assert_eq!(Command::parse("Commit").unwrap(), Some(Command::Commit));
        // Keys keep their case.
        assert_eq!(Command::parse("get Key").unwrap(), Some(Command::Get { key: "Key".into() }));
    }

    #[test]
    fn test_parse_extra_whitespace() {
        assert_eq!(
            Command::parse("  SET\tx   -7  ").unwrap(),
            Some(Command::Set { key: "x".into(), value: -7 })
        );
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse(" \t ").unwrap(), None);
    }

    #[test]
    fn test_parse_wrong_arity() {
        match Command::parse("SET a") {
            Err(Error::WrongArity { command, expected, actual }) => {
                assert_eq!(command, "SET");
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("Expected WrongArity, got {:?}", other),
        }

        assert!(matches!(Command::parse("GET a b"), Err(Error::WrongArity { .. })));
        assert!(matches!(Command::parse("UNSET"), Err(Error::WrongArity { .. })));
        assert!(matches!(Command::parse("BEGIN now"), Err(Error::WrongArity { .. })));
        assert!(matches!(Command::parse("COMMIT all"), Err(Error::WrongArity { .. })));
    }

    #[test]
    fn test_parse_invalid_value() {
        match Command::parse("SET a ten") {
            Err(Error::InvalidValue(v)) => assert_eq!(v, "ten"),
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
        assert!(Command::parse("SET a 1.5").is_err());
        assert!(Command::parse("SET a 99999999999999999999").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        match Command::parse("DROP a") {
            Err(Error::UnknownCommand(name)) => assert_eq!(name, "DROP"),
            other => panic!("Expected UnknownCommand, got {:?}", other),
        }
    }

    #[test]
    fn test_command_name() {
        assert_eq!(Command::Set { key: "a".into(), value: 1 }.name(), "SET");
        assert_eq!(Command::Rollback.name(), "ROLLBACK");
    }
}
