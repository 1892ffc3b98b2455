//! Output trait for rendering reports.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};

/// Target output for reports.
///
/// Reports describe *what* to output; implementations decide *how*.
pub trait Output {
    /// Render one complete JSON document.
    fn document(&mut self, value: &Value) -> io::Result<()>;
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output) -> io::Result<()>;
}

/// Writes documents as JSON indented by four spaces, one per line.
pub struct JsonOutput<W: Write> {
    writer: W,
}

impl JsonOutput<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Output for JsonOutput<W> {
    fn document(&mut self, value: &Value) -> io::Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut self.writer, formatter);
        value.serialize(&mut serializer).map_err(io::Error::other)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

/// Drops every document (`--quiet`).
#[derive(Debug, Default)]
pub struct QuietOutput;

impl Output for QuietOutput {
    fn document(&mut self, _value: &Value) -> io::Result<()> {
        Ok(())
    }
}
