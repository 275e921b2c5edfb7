//! OpenTelemetry-based observability with a local span journal.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk → JournalExporter → JSONL
//! ```
//!
//! Spans are written to `~/.local/share/zellij/reelfinder/reelfinder-spans.jsonl`, one
//! compact JSON object per line, rotated at 5 MiB into `.1` to `.3` backups.
//!
//! The verbosity comes from the `trace_level` plugin option (any `EnvFilter`
//! directive, default `"info"`).
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider and journal exporter
//! - [`span_formatter`]: Journal line format
//! - [`file_writer`]: Size-rotated line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, JOURNAL_FILE};
