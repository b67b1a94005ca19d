use rxscan_parser::{ParseReport, PrescriptionParser};
use std::path::Path;
use thiserror::Error;

use crate::hash;
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// The result of processing one prescription scan.
#[derive(Debug)]
pub struct ScanResult {
    /// SHA-256 hex digest of the scan bytes.
    pub scan_id: String,
    /// Raw OCR text output.
    pub ocr_text: String,
    /// Medicines recovered from the OCR text.
    pub report: ParseReport,
}

/// Orchestrates: hash → OCR → parse.
pub struct PrescriptionPipeline<R: OcrBackend> {
    recognizer: R,
    parser: PrescriptionParser,
}

impl<R: OcrBackend> PrescriptionPipeline<R> {
    pub fn new(recognizer: R, parser: PrescriptionParser) -> Self {
        Self { recognizer, parser }
    }

    /// Process a scan on disk.
    pub async fn process_file(&self, path: &Path) -> Result<ScanResult, PipelineError> {
        let bytes = tokio::fs::read(path).await?;
        self.process_bytes(&bytes)
    }

    /// Process raw image bytes (from camera capture or file read).
    pub fn process_bytes(&self, data: &[u8]) -> Result<ScanResult, PipelineError> {
        let scan_id = hash::scan_id(data);
        let ocr_text = self.recognizer.recognize(data)?;
        let report = self.parser.parse_report(&ocr_text);

        tracing::info!(
            scan = %scan_id,
            medicines = report.entries.len(),
            needs_review = report.needs_review(),
            "prescription scan processed"
        );

        Ok(ScanResult { scan_id, ocr_text, report })
    }
}
