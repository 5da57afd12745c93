//! Output artifacts.
//!
//! [`RecordSink`] is the writer's only view of the artifact. [`FormatSink`]
//! is the file-backed implementation used by the command line, rendering
//! records as plain text, CSV or a JSON array.

mod file;
mod format;
mod interface;

pub use file::*;
pub use format::*;
pub use interface::*;
