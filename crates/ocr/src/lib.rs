pub mod hash;
pub mod pipeline;
pub mod recognizer;

pub use hash::{scan_id, sha256_bytes, to_hex};
pub use pipeline::{PipelineError, PrescriptionPipeline, ScanResult};
pub use recognizer::{
    tidy_transcript, MockRecognizer, OcrBackend, OcrError, RecognizerSettings,
    UnavailableRecognizer,
};
