//! Directory batch processing.
//!
//! Every `*.pdf` in an input directory is processed independently and its
//! result written to `<stem>.json` in the output directory. A document that
//! fails still produces a (failure) result file; nothing aborts the batch
//! except an unusable input or output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::model::ExtractionResult;
use crate::parser::ExtractOptions;
use crate::render::{to_json, JsonFormat};

/// File name of the optional batch summary in the output directory.
pub const SUMMARY_FILE: &str = "batch_summary.json";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Per-document extraction options
    pub extract: ExtractOptions,
    /// Output JSON layout
    pub json_format: JsonFormat,
    /// Process documents on the rayon pool
    pub parallel: bool,
    /// Write [`SUMMARY_FILE`] after the run
    pub write_summary: bool,
}

impl BatchOptions {
    /// Create default options (parallel, pretty JSON, no summary file).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-document extraction options.
    pub fn with_extract_options(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Set the output JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Process one document at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Write a summary file after the run.
    pub fn with_summary(mut self, write: bool) -> Self {
        self.write_summary = write;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            json_format: JsonFormat::Pretty,
            parallel: true,
            write_summary: false,
        }
    }
}

/// Outcome for one input document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub pages: u32,
    pub headings: usize,
    /// Extraction or write failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentReport {
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Totals for a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub started_at: DateTime<Utc>,
    pub documents: usize,
    pub failed: usize,
    pub total_pages: u64,
    pub total_headings: usize,
    pub elapsed_secs: f64,
    pub pages_per_second: f64,
    /// Per-document reports in discovery order
    pub reports: Vec<DocumentReport>,
}

impl BatchSummary {
    fn from_reports(
        started_at: DateTime<Utc>,
        elapsed_secs: f64,
        reports: Vec<DocumentReport>,
    ) -> Self {
        let total_pages: u64 = reports.iter().map(|r| r.pages as u64).sum();
        let pages_per_second = if elapsed_secs > 0.0 {
            total_pages as f64 / elapsed_secs
        } else {
            0.0
        };
        Self {
            started_at,
            documents: reports.len(),
            failed: reports.iter().filter(|r| r.is_failure()).count(),
            total_pages,
            total_headings: reports.iter().map(|r| r.headings).sum(),
            elapsed_secs,
            pages_per_second,
            reports,
        }
    }

    /// Documents that succeeded.
    pub fn succeeded(&self) -> usize {
        self.documents - self.failed
    }
}

type ProgressFn = dyn Fn(&DocumentReport) + Send + Sync;

/// Runs outline extraction over a directory of PDFs.
pub struct BatchProcessor {
    options: BatchOptions,
    progress: Option<Box<ProgressFn>>,
}

impl BatchProcessor {
    /// Create a processor.
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            progress: None,
        }
    }

    /// Call `f` after each document completes. With parallel processing the
    /// callback runs on worker threads, in completion order.
    pub fn with_progress<F>(mut self, f: F) -> Self
    where
        F: Fn(&DocumentReport) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(f));
        self
    }

    /// Options in use.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// List the PDF files directly inside `input_dir`, sorted by path.
    pub fn discover<P: AsRef<Path>>(&self, input_dir: P) -> Result<Vec<PathBuf>> {
        let input_dir = input_dir.as_ref();
        if !input_dir.is_dir() {
            return Err(Error::InputNotFound(input_dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(input_dir)? {
            let path = entry?.path();
            if path.is_file() && has_pdf_extension(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Process every PDF in `input_dir`, writing results to `output_dir`.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<BatchSummary> {
        let output_dir = output_dir.as_ref();
        let files = self.discover(input_dir)?;
        fs::create_dir_all(output_dir)?;

        log::info!("Found {} PDF files to process", files.len());
        let started_at = Utc::now();
        let start = Instant::now();

        let reports: Vec<DocumentReport> = if self.options.parallel {
            files
                .par_iter()
                .map(|path| self.process_and_report(path, output_dir))
                .collect()
        } else {
            files
                .iter()
                .map(|path| self.process_and_report(path, output_dir))
                .collect()
        };

        let summary =
            BatchSummary::from_reports(started_at, start.elapsed().as_secs_f64(), reports);
        log::info!(
            "Processed {} documents ({} failed) in {:.2}s",
            summary.documents,
            summary.failed,
            summary.elapsed_secs
        );

        if self.options.write_summary {
            let json = serde_json::to_string_pretty(&summary)?;
            fs::write(output_dir.join(SUMMARY_FILE), json)?;
        }

        Ok(summary)
    }

    /// Process one document and write its result file.
    pub fn process_document(&self, input: &Path, output_dir: &Path) -> DocumentReport {
        let result = crate::extract_outline_file(input, &self.options.extract);
        let output = output_path(input, output_dir);

        let mut report = DocumentReport {
            input: input.to_path_buf(),
            output: output.clone(),
            title: result.document_title.clone(),
            pages: result.total_pages,
            headings: result.outline.len(),
            error: result.error.clone(),
        };

        if let Err(e) = self.write_result(&result, &output) {
            log::error!("Failed to write {}: {}", output.display(), e);
            report.error.get_or_insert_with(|| format!("failed to write output: {}", e));
        } else {
            log::info!(
                "Wrote {} ({} headings)",
                output.display(),
                result.outline.len()
            );
        }
        report
    }

    fn process_and_report(&self, input: &Path, output_dir: &Path) -> DocumentReport {
        let report = self.process_document(input, output_dir);
        if let Some(progress) = &self.progress {
            progress(&report);
        }
        report
    }

    fn write_result(&self, result: &ExtractionResult, output: &Path) -> Result<()> {
        let json = to_json(result, self.options.json_format)?;
        fs::write(output, json)?;
        Ok(())
    }
}

/// `<output_dir>/<stem>.json`
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{}.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_stem() {
        let out = output_path(Path::new("/in/Annual Report.PDF"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/Annual Report.json"));
    }

    #[test]
    fn test_options_builder() {
        let options = BatchOptions::new()
            .sequential()
            .with_json_format(JsonFormat::Compact)
            .with_summary(true)
            .with_extract_options(ExtractOptions::new().with_max_pages(5));
        assert!(!options.parallel);
        assert_eq!(options.json_format, JsonFormat::Compact);
        assert!(options.write_summary);
        assert_eq!(options.extract.max_pages, 5);
    }

    #[test]
    fn test_defaults() {
        let options = BatchOptions::default();
        assert!(options.parallel);
        assert_eq!(options.json_format, JsonFormat::Pretty);
        assert!(!options.write_summary);
        assert_eq!(options.extract.max_pages, 50);
    }

    #[test]
    fn test_missing_input_dir() {
        let processor = BatchProcessor::new(BatchOptions::default());
        let err = processor.discover("/nonexistent/input").unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
    }

    #[test]
    fn test_summary_totals() {
        let report = |pages, headings, error: Option<&str>| DocumentReport {
            input: PathBuf::from("a.pdf"),
            output: PathBuf::from("a.json"),
            title: "A".to_string(),
            pages,
            headings,
            error: error.map(str::to_string),
        };
        let summary = BatchSummary::from_reports(
            Utc::now(),
            2.0,
            vec![report(10, 4, None), report(0, 0, Some("bad")), report(6, 2, None)],
        );
        assert_eq!(summary.documents, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.total_pages, 16);
        assert_eq!(summary.total_headings, 6);
        assert_eq!(summary.pages_per_second, 8.0);
    }
}
