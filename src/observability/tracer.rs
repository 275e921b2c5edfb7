//! Tracer provider backed by the span journal.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported span as one journal line.
struct JournalExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl JournalExporter {
    fn new(writer: FileWriter, resource: &Resource) -> Self {
        Self {
            writer,
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Err(TraceError::from("journal exporter is shut down"));
        }
        for span in batch {
            let line = self.formatter.format_span(span).to_string();
            self.writer
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))?;
        }
        Ok(())
    }
}

impl SpanExporter for JournalExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(std::future::ready(self.write_batch(&batch)))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.formatter = SpanFormatter::new(resource);
    }
}

impl std::fmt::Debug for JournalExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JournalExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a provider that exports every span synchronously into `journal`.
///
/// The simple (unbatched) processor is used because the plugin runs single-threaded
/// inside WASI with no background runtime.
pub fn create_tracer_provider(journal: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JournalExporter::new(FileWriter::new(journal), &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_journal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reelfinder-spans.jsonl");
        let resource = Resource::new(vec![KeyValue::new("service.name", "Reelfinder")]);
        let provider = create_tracer_provider(path.clone(), resource);

        let tracer = provider.tracer("test");
        tracer.in_span("search", |_cx| {});
        drop(tracer);

        let journal = std::fs::read_to_string(&path).unwrap();
        let line: serde_json::Value = serde_json::from_str(journal.lines().next().unwrap()).unwrap();
        assert_eq!(line["name"], "search");
        assert_eq!(line["service"], "Reelfinder");
        assert_eq!(line["trace_id"].as_str().unwrap().len(), 32);
    }
}
