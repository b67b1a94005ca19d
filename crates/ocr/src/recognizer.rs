use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("could not decode prescription image: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("no OCR engine compiled in; rebuild with the `tesseract` feature")]
    NotAvailable,
}

/// Turns a photographed or scanned prescription (PNG/JPEG bytes) into text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

/// Engine settings tuned for prescriptions.
///
/// Prescriptions are short, left-aligned medicine lists, often laid out as
/// columns separated by runs of spaces. Page segmentation mode 4 (single
/// column of variable-size text) keeps one medicine per line, and keeping
/// inter-word spacing lets the column gaps reach the table-row strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerSettings {
    /// Directory containing `*.traineddata`; `None` uses the engine default.
    pub data_path: Option<String>,
    pub lang: String,
    pub page_seg_mode: u8,
    pub preserve_interword_spaces: bool,
    /// Assumed resolution for phone photos that carry no DPI metadata.
    pub source_dpi: u32,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            data_path: None,
            lang: "eng".to_string(),
            page_seg_mode: 4,
            preserve_interword_spaces: true,
            source_dpi: 300,
        }
    }
}

/// Clean up raw engine output: drop form feeds and trailing blanks, and
/// collapse runs of empty lines. Leading and inner spacing is kept.
pub fn tidy_transcript(raw: &str) -> String {
    let mut out = Vec::new();
    let mut blank_run = false;
    for line in raw.replace('\u{c}', "\n").lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if !blank_run && !out.is_empty() {
                out.push(String::new());
            }
            blank_run = true;
        } else {
            out.push(line.to_string());
            blank_run = false;
        }
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

// ── Test and fallback backends ────────────────────────────────────────────────

/// Returns a fixed transcript whatever the image.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Used when no OCR engine was compiled in.
pub struct UnavailableRecognizer;

impl OcrBackend for UnavailableRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

// ── Tesseract ─────────────────────────────────────────────────────────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{tidy_transcript, OcrBackend, OcrError, RecognizerSettings};
    use leptess::{LepTess, Variable};

    pub struct TesseractRecognizer {
        settings: RecognizerSettings,
    }

    impl TesseractRecognizer {
        pub fn new(settings: RecognizerSettings) -> Self {
            Self { settings }
        }

        fn engine(&self) -> Result<LepTess, OcrError> {
            let s = &self.settings;
            let mut lt = LepTess::new(s.data_path.as_deref(), &s.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            let spaces = if s.preserve_interword_spaces { "1" } else { "0" };
            lt.set_variable(Variable::TesseditPagesegMode, &s.page_seg_mode.to_string())
                .and_then(|_| lt.set_variable(Variable::PreserveInterwordSpaces, spaces))
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            Ok(lt)
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = self.engine()?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.set_source_resolution(self.settings.source_dpi as i32);
            let raw = lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))?;
            tracing::debug!(chars = raw.len(), lang = %self.settings.lang, "tesseract pass done");
            Ok(tidy_transcript(&raw))
        }
    }
}
