use anyhow::{Context, Result};
use clap::Parser;
use rxscan_core::DEFAULT_SUPPLY_DAYS;
use rxscan_parser::{ParserConfig, PrescriptionParser};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(about = "Extract medicines from OCR'd prescription text", version)]
struct Args {
    /// Text file to parse; reads stdin when omitted.
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Treat FILE as a prescription image and run OCR first. Output follows
    /// `--report` the same way as for text input.
    #[arg(long)]
    image: bool,

    /// TOML file with extra stop words / name suffixes.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Include strategy, confidence and supply quantity for each entry.
    #[arg(long)]
    report: bool,

    /// Treatment length used for supply quantities in `--report` output.
    #[arg(
        long = "supply-days",
        default_value_t = DEFAULT_SUPPLY_DAYS,
        value_parser = clap::value_parser!(u32).range(1..=3650)
    )]
    supply_days: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let parser = load_parser(args.config.as_deref())?;

    let json = if args.image {
        let path = args.input.as_deref().context("--image needs a FILE")?;
        let pipeline = rxscan_ocr::PrescriptionPipeline::new(recognizer(), parser);
        let failed = || format!("failed to process scan {}", path.display());
        if args.report {
            let out = commands::report_scan(&pipeline, path, args.supply_days)
                .await
                .with_context(failed)?;
            serde_json::to_string_pretty(&out)?
        } else {
            let meds = commands::parse_scan(&pipeline, path).await.with_context(failed)?;
            serde_json::to_string_pretty(&meds)?
        }
    } else {
        let text = read_input(args.input.as_deref())?;
        if args.report {
            let out = commands::report_text(&parser, &text, args.supply_days);
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string_pretty(&commands::parse_text(&parser, &text))?
        }
    };

    println!("{json}");
    Ok(())
}

fn load_parser(config: Option<&Path>) -> Result<PrescriptionParser> {
    let Some(path) = config else {
        return Ok(PrescriptionParser::default());
    };
    let config = ParserConfig::from_path(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::info!("Loaded parser config: {}", path.display());
    Ok(PrescriptionParser::from_config(&config))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => {
            std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(feature = "tesseract")]
fn recognizer() -> rxscan_ocr::recognizer::tesseract_backend::TesseractRecognizer {
    let settings = rxscan_ocr::RecognizerSettings::default();
    rxscan_ocr::recognizer::tesseract_backend::TesseractRecognizer::new(settings)
}

#[cfg(not(feature = "tesseract"))]
fn recognizer() -> rxscan_ocr::UnavailableRecognizer {
    rxscan_ocr::UnavailableRecognizer
}
