use rxscan_ocr::{OcrBackend, PipelineError, PrescriptionPipeline};
use rxscan_parser::{
    ExtractedMedicine, ParseReport, ParsedMedicine, PrescriptionParser, StrategyKind,
};
use serde::Serialize;
use std::path::Path;

/// One medicine as shown on the review screen.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicineOutput {
    pub name: String,
    pub dosage: String,
    pub frequency_per_day: u8,
    pub has_dosage: bool,
    pub supply_quantity: u32,
    pub source: StrategyKind,
    pub confidence: f32,
}

impl MedicineOutput {
    fn from_entry(entry: &ExtractedMedicine, supply_days: u32) -> Self {
        let m = &entry.medicine;
        MedicineOutput {
            name: m.name.clone(),
            dosage: m.dosage.clone(),
            frequency_per_day: m.frequency_per_day,
            has_dosage: m.has_dosage(),
            supply_quantity: m.supply_quantity(supply_days),
            source: entry.source,
            confidence: entry.confidence,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_id: Option<String>,
    pub needs_review: bool,
    pub supply_days: u32,
    pub medicines: Vec<MedicineOutput>,
}

impl ReportOutput {
    pub fn new(report: &ParseReport, scan_id: Option<String>, supply_days: u32) -> Self {
        ReportOutput {
            scan_id,
            needs_review: report.needs_review(),
            supply_days,
            medicines: report
                .entries
                .iter()
                .map(|e| MedicineOutput::from_entry(e, supply_days))
                .collect(),
        }
    }
}

pub fn parse_text(parser: &PrescriptionParser, text: &str) -> Vec<ParsedMedicine> {
    parser.parse(text)
}

pub fn report_text(parser: &PrescriptionParser, text: &str, supply_days: u32) -> ReportOutput {
    ReportOutput::new(&parser.parse_report(text), None, supply_days)
}

pub async fn parse_scan<R: OcrBackend>(
    pipeline: &PrescriptionPipeline<R>,
    path: &Path,
) -> Result<Vec<ParsedMedicine>, PipelineError> {
    let result = pipeline.process_file(path).await?;
    tracing::debug!(chars = result.ocr_text.len(), "OCR text received");
    Ok(result.report.into_medicines())
}

pub async fn report_scan<R: OcrBackend>(
    pipeline: &PrescriptionPipeline<R>,
    path: &Path,
    supply_days: u32,
) -> Result<ReportOutput, PipelineError> {
    let result = pipeline.process_file(path).await?;
    tracing::debug!(chars = result.ocr_text.len(), "OCR text received");
    Ok(ReportOutput::new(&result.report, Some(result.scan_id), supply_days))
}
