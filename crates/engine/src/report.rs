//! Results record written at the end of a session

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::session::SessionOutcome;

/// Two-line `key = value` record of a finished session.
///
/// ```
/// use tetromino_engine::{ResultsRecord, SessionOutcome};
///
/// let record = ResultsRecord::from(SessionOutcome { lines_cleared: 3, losses: 1 });
/// assert_eq!(record.to_string(), "lines = 3\nlosses = 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultsRecord {
    pub lines: u32,
    pub losses: u32,
}

impl From<SessionOutcome> for ResultsRecord {
    fn from(outcome: SessionOutcome) -> Self {
        Self {
            lines: outcome.lines_cleared,
            losses: outcome.losses,
        }
    }
}

impl fmt::Display for ResultsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lines = {}\nlosses = {}", self.lines, self.losses)
    }
}

impl ResultsRecord {
    /// Write the record and a trailing newline
    pub fn write_to(&self, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "{}", self)?;
        out.flush()
    }

    /// Append to `path`, creating the file if it does not exist
    pub fn append_to_path(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        self.write_to(file)
    }
}
