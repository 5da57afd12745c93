use super::{OutputFormat, RecordSink};
use crate::{
    error::SinkError,
    record::{Metadata, PasswordRecord},
};
use serde::Serialize;
use serde_json::Value;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// A [`RecordSink`] that serializes records in an [`OutputFormat`] to any
/// [`Write`] target through a buffer.
///
/// JSON output is a single array: the opening bracket is written on
/// construction and the closing one on [`close`](RecordSink::close), so a run
/// that stops early still leaves a well-formed document.
#[derive(Debug)]
pub struct FormatSink<W: Write> {
    out: BufWriter<W>,
    format: OutputFormat,
    written: u64,
}

impl FormatSink<File> {
    /// Creates (or truncates) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Io`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>, format: OutputFormat) -> Result<Self, SinkError> {
        Self::new(File::create(path)?, format)
    }
}

impl<W: Write> FormatSink<W> {
    /// # Errors
    ///
    /// Returns [`SinkError::Io`] if the format preamble cannot be written.
    pub fn new(inner: W, format: OutputFormat) -> Result<Self, SinkError> {
        let mut out = BufWriter::new(inner);
        if format == OutputFormat::Json {
            out.write_all(b"[")?;
        }
        Ok(Self {
            out,
            format,
            written: 0,
        })
    }

    #[inline]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Records appended so far.
    #[inline]
    pub const fn written(&self) -> u64 {
        self.written
    }

    fn write_csv(&mut self, record: &PasswordRecord) -> Result<(), SinkError> {
        write_csv_field(&mut self.out, &record.password)?;
        for value in record.metadata.iter().flat_map(Metadata::values) {
            self.out.write_all(b",")?;
            match value {
                Value::String(s) => write_csv_field(&mut self.out, s)?,
                Value::Null => {}
                other => write_csv_field(&mut self.out, &other.to_string())?,
            }
        }
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn write_json(&mut self, record: &PasswordRecord) -> Result<(), SinkError> {
        #[derive(Serialize)]
        struct Row<'a> {
            password: &'a str,
            #[serde(flatten)]
            metadata: Option<&'a Metadata>,
        }

        self.out
            .write_all(if self.written == 0 { b"\n" } else { b",\n" })?;
        serde_json::to_writer_pretty(
            &mut self.out,
            &Row {
                password: &record.password,
                metadata: record.metadata.as_ref(),
            },
        )?;
        Ok(())
    }
}

impl<W: Write + Send> RecordSink for FormatSink<W> {
    fn append(&mut self, record: &PasswordRecord) -> Result<(), SinkError> {
        match self.format {
            OutputFormat::Text => {
                self.out.write_all(record.password.as_bytes())?;
                self.out.write_all(b"\n")?;
            }
            OutputFormat::Csv => self.write_csv(record)?,
            OutputFormat::Json => self.write_json(record)?,
        }
        self.written += 1;
        Ok(())
    }

    fn close(mut self) -> Result<(), SinkError> {
        if self.format == OutputFormat::Json {
            self.out
                .write_all(if self.written == 0 { b"]\n" } else { b"\n]\n" })?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Writes `field`, quoting it when it contains a delimiter, a quote or a line
/// break.
fn write_csv_field<W: Write>(out: &mut W, field: &str) -> std::io::Result<()> {
    if !field.contains([',', '"', '\n', '\r']) {
        return out.write_all(field.as_bytes());
    }
    out.write_all(b"\"")?;
    out.write_all(field.replace('"', "\"\"").as_bytes())?;
    out.write_all(b"\"")
}
