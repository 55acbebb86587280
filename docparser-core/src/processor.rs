use crate::error::Result;
use crate::extract::{MetadataExtractor, PageTextExtractor};
use crate::log::ProcessingLog;
use crate::preprocessors::{DocumentHandle, Preprocessor};
use crate::sink::EventSink;
use crate::types::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Simple profiler that collects timings for parse stages
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        self.timings.push((step_name.to_string(), start.elapsed()));

        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn log_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();
        for (step, duration) in &self.timings {
            tracing::debug!(step = %step, elapsed_ms = duration.as_millis() as u64, "parse stage");
        }
        tracing::debug!(elapsed_ms = total.as_millis() as u64, "parse total");
    }
}

/// Document parse handler
///
/// Opens raw bytes, reads document metadata, extracts every page's text in
/// ascending order and returns one immutable [`ParseResponse`]. Holds no
/// per-request state, so one instance serves any number of concurrent
/// requests.
pub struct DocumentParser {
    preprocessor: Box<dyn Preprocessor>,
    sink: Arc<dyn EventSink>,
    metadata_extractor: MetadataExtractor,
}

impl DocumentParser {
    /// Create DocumentParser with full dependency injection
    pub fn new_with_dependencies(
        preprocessor: Box<dyn Preprocessor>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            preprocessor,
            sink,
            metadata_extractor: MetadataExtractor::new(),
        }
    }

    /// Convenience constructor for service usage: lopdf backend, tracing sink
    #[cfg(feature = "lopdf-backend")]
    pub fn new_lopdf() -> Self {
        let preprocessor = Box::new(crate::preprocessors::PdfPreprocessor::new_with_lopdf());
        Self::new_with_dependencies(preprocessor, Arc::new(crate::sink::TracingSink))
    }

    /// Same as [`DocumentParser::new_lopdf`] but reporting to `sink`
    #[cfg(feature = "lopdf-backend")]
    pub fn new_lopdf_with_sink(sink: Arc<dyn EventSink>) -> Self {
        let preprocessor = Box::new(crate::preprocessors::PdfPreprocessor::new_with_lopdf());
        Self::new_with_dependencies(preprocessor, sink)
    }

    pub fn backend_name(&self) -> &str {
        self.preprocessor.name()
    }

    pub fn is_healthy(&self) -> bool {
        self.preprocessor.is_healthy()
    }

    /// Parse a document from raw bytes.
    ///
    /// Any open, metadata or page failure aborts the whole request; no
    /// partial response is produced. The document handle is closed on every
    /// path; a close failure is reported to the sink and never replaces the
    /// outcome.
    pub fn parse(&self, bytes: &[u8]) -> Result<ParseResponse> {
        let mut profiler = StepProfiler::new(tracing::enabled!(tracing::Level::DEBUG));

        let mut handle = profiler.time_step("open", || self.preprocessor.open(bytes))?;

        let result = self.extract_all(handle.as_mut(), &mut profiler);

        if let Err(e) = handle.close() {
            self.sink.warn(&format!("Failed to release document handle: {e}"));
        }
        drop(handle);

        profiler.log_summary();
        result
    }

    fn extract_all(
        &self,
        handle: &mut dyn DocumentHandle,
        profiler: &mut StepProfiler,
    ) -> Result<ParseResponse> {
        let mut logs = ProcessingLog::new();

        let mut metadata =
            profiler.time_step("metadata", || self.metadata_extractor.extract(&*handle))?;
        let title = metadata.get(MetadataField::Title).to_string();
        let page_count = handle.page_count();

        let message = format!("Parsing file {title} with {page_count} numbers of pages.");
        self.sink.info(&message);
        logs.append(message);

        let pages = profiler.time_step("pages", || Self::extract_pages(&mut *handle, page_count))?;

        let message =
            format!("Parsed file {title} with {page_count} numbers of pages successfully.");
        self.sink.info(&message);
        logs.append(message);

        metadata.set(MetadataField::Logs, Some(logs.to_json_array()));

        Ok(ParseResponse::new(pages, metadata))
    }

    /// One extractor, rebound to each page in ascending order
    fn extract_pages(handle: &mut dyn DocumentHandle, page_count: u32) -> Result<PageMap> {
        let mut extractor = PageTextExtractor::new();
        let mut pages = PageMap::new();

        for page in 1..=page_count {
            extractor.set_page(page);
            let text = extractor.extract(handle)?;
            pages.insert(page, text);
        }

        Ok(pages)
    }
}
