use crate::domain::command::Command;
use crate::error::{LibraryError, Result};
use std::io::Read;

/// Reads circulation commands from a CSV source.
///
/// Expects a `type, patron, item, amount` header. Fields are trimmed and rows
/// may leave unused trailing columns out.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes commands in
    /// file order.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LibraryError::from))
    }
}
