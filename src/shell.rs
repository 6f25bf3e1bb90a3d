//! Line-oriented session loop.
//!
//! The shell reads one command per line, runs it against a shared
//! [`KvStore`] and writes the rendered response. It keeps no state of its
//! own beyond its options.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nestkv::{KvStore, Shell, ShellOptions};
//!
//! # fn main() -> Result<(), nestkv::Error> {
//! let store = Arc::new(KvStore::new());
//! let shell = Shell::new(store, ShellOptions::new().print_marker(false))?;
//!
//! let mut out = Vec::new();
//! shell.run("SET a 10\nGET a\nEND\nGET a\n".as_bytes(), &mut out)?;
//! assert_eq!(String::from_utf8(out).unwrap(), "10\n");
//! # Ok(())
//! # }
//! ```

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::config::ShellOptions;
use crate::dispatch;
use crate::{Command, Error, KvStore, Result};

/// What happened to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The line reached the store
    Dispatched,
    /// Blank or malformed; the store was not touched
    Skipped,
    /// `END` was read
    Stop,
}

/// A line-protocol session bound to one store.
#[derive(Debug)]
pub struct Shell {
    store: Arc<KvStore>,
    options: ShellOptions,
}

impl Shell {
    /// Creates a shell over `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if `options` fail validation.
    pub fn new(store: Arc<KvStore>, options: ShellOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { store, options })
    }

    /// Returns the store this shell operates on.
    pub fn store(&self) -> &Arc<KvStore> {
        &self.store
    }

    /// Runs the session until `END` or end of input.
    ///
    /// Returns the number of lines that were dispatched to the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading or writing fails. Malformed lines,
    /// including lines that are not valid UTF-8, are reported on `output`
    /// and never end the session.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, output: &mut W) -> Result<usize> {
        let mut buf = Vec::new();
        let mut dispatched = 0;

        loop {
            if let Some(prompt) = &self.options.prompt {
                output.write_all(prompt.as_bytes())?;
                output.flush()?;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                log::debug!("end of input");
                break;
            }

            let flow = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line, output)?,
                Err(e) => {
                    log::debug!("rejected line of {} bytes: {}", buf.len(), e);
                    writeln!(output, "ERROR: {}", Error::InvalidEncoding)?;
                    Flow::Skipped
                }
            };

            match flow {
                Flow::Dispatched => dispatched += 1,
                Flow::Skipped => {}
                Flow::Stop => break,
            }
        }

        output.flush()?;
        Ok(dispatched)
    }

    /// Processes a single line, writing any response to `output`.
    pub fn handle_line<W: Write>(&self, line: &str, output: &mut W) -> Result<Flow> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Skipped),
            Err(e) if e.is_malformed() => {
                log::debug!("rejected line {:?}: {}", line.trim_end(), e);
                writeln!(output, "ERROR: {}", e)?;
                return Ok(Flow::Skipped);
            }
            Err(e) => return Err(e),
        };

        if command == Command::End {
            return Ok(Flow::Stop);
        }

        log::debug!("dispatching {}", command.name());
        let response = dispatch::execute(&self.store, &command)?;
        if response.is_visible() {
            writeln!(output, "{}", response)?;
        }
        if self.options.print_marker {
            writeln!(output, "{}", self.options.marker)?;
        }
        Ok(Flow::Dispatched)
    }
}
