//! Output sinks.
//!
//! Views rendered in emit mode are appended to an [`OutputSink`]. The sink is
//! passed in by the caller for each request, so every request owns its own
//! buffer and flushes it whenever the surrounding application is done.

use std::io::{self, Write};

/// Append-only destination for emitted view output.
pub trait OutputSink {
    /// Appends a rendered body to the sink.
    fn append(&mut self, body: &str);
}

impl OutputSink for String {
    fn append(&mut self, body: &str) {
        self.push_str(body);
    }
}

/// Records each append separately, which keeps call order visible in tests.
impl OutputSink for Vec<String> {
    fn append(&mut self, body: &str) {
        self.push(body.to_string());
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn append(&mut self, body: &str) {
        (**self).append(body);
    }
}

/// A per-request output buffer.
///
/// # Example
///
/// ```rust
/// use twostep::{OutputBuffer, OutputSink};
///
/// let mut out = OutputBuffer::new();
/// out.append("<header>");
/// out.append("</header>");
/// assert_eq!(out.as_str(), "<header></header>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    buf: String,
}

impl OutputBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything appended so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Replaces the buffer contents.
    pub fn set(&mut self, body: impl Into<String>) {
        self.buf = body.into();
    }

    /// Takes the contents, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buf)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes the contents to `writer` and clears the buffer.
    ///
    /// # Errors
    ///
    /// Returns the writer's I/O error. The buffer keeps its contents on failure.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.buf.as_bytes())?;
        writer.flush()?;
        self.buf.clear();
        Ok(())
    }
}

impl OutputSink for OutputBuffer {
    fn append(&mut self, body: &str) {
        self.buf.push_str(body);
    }
}

impl From<OutputBuffer> for String {
    fn from(buffer: OutputBuffer) -> Self {
        buffer.buf
    }
}
