use std::io::{self, Write};

use super::escalation::Escalation;

/// Wraps a writer whose failure must never go unnoticed.
///
/// Successful writes behave exactly like the inner writer. A failed write or
/// flush raises an [`Escalation`] naming the channel and the cause. The only
/// `Err` passed back is `ErrorKind::Interrupted`, which callers retry as
/// with any writer. No locking is added, so sharing across threads is up to
/// the inner writer.
#[derive(Debug)]
pub struct FatalWriter<W> {
    name: String,
    writer: W,
}

impl<W: Write> FatalWriter<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        Self {
            name: name.into(),
            writer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn escalate(&self, err: io::Error) -> ! {
        Escalation::new(format!("fatal write to {} failed: {}", self.name, err)).raise()
    }
}

impl<W: Write> Write for FatalWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.writer.write(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(e),
            Err(e) => self.escalate(e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.writer.flush() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(e),
            Err(e) => self.escalate(e),
        }
    }
}
