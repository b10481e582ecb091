//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → OtlpFileExporter → RotatingFile
//! ```
//!
//! Spans go to `~/.local/share/zellij/cinedex/cinedex-otlp.json` (one OTLP
//! JSON document per line), rotated at 10 MB with three numbered backups.
//! The level comes from the `trace_level` plugin option (default `info`).
//!
//! Catalog requests carry the issuing span's ids in their context map, and
//! main.rs re-attaches them while the response is handled, so a request and
//! its settlement share one trace.

mod exporter;
mod file_writer;
mod init;

pub use exporter::{tracer_provider, OtlpFileExporter};
pub use file_writer::RotatingFile;
pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, TRACE_FILE_NAME};
