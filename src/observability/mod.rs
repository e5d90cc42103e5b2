//! Tracing with file-based OpenTelemetry export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer provider → JSON lines file
//! ```
//!
//! Spans land in `<data_dir>/inclusive-board-otlp.json`, one OTLP-shaped JSON
//! document per export. The file rotates at 10 MiB and keeps three numbered
//! backups. Export is optional: if the directory cannot be created the crate
//! keeps running with a plain no-op subscriber.
//!
//! ```no_run
//! use inclusive_board::observability::init_tracing;
//! use inclusive_board::Config;
//!
//! let config = Config {
//!     trace_level: Some("debug".to_string()),
//!     ..Default::default()
//! };
//! init_tracing(&config);
//! tracing::debug!("tracing is active");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
